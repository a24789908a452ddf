// retailflow-core/src/domain/cleaning/transactions.rs

use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::warn;

use super::{Cleaned, CleaningReport, DropReason};
use crate::domain::error::DomainError;
use crate::domain::model::{Entity, RawTable, Transaction};
use crate::domain::validators::{parse_date, parse_decimal, parse_integer};

/// A row that survived the date filter, with every other field coerced but not yet judged.
struct Staged {
    transaction_id: Option<i64>,
    customer_id: Option<i64>,
    product_id: Option<i64>,
    transaction_date: NaiveDate,
    quantity: Option<i64>,
    amount: Option<f64>,
}

impl Staged {
    /// Identity of a transaction for deduplication purposes.
    fn dedup_key(&self) -> (Option<i64>, Option<i64>, NaiveDate, Option<u64>) {
        (
            self.customer_id,
            self.product_id,
            self.transaction_date,
            self.amount.map(f64::to_bits),
        )
    }
}

/// Date filter, then deduplication, then the quantity/amount filter, then
/// one row per transaction id.
///
/// Deduplication runs before the positivity filter, so a duplicate of an
/// invalid row is counted as a duplicate. The surviving set is the same
/// either way.
pub fn clean_transactions(raw: &RawTable) -> Result<Cleaned<Transaction>, DomainError> {
    let id_col = raw.column("transaction_id")?;
    let customer_col = raw.column("customer_id")?;
    let product_col = raw.column("product_id")?;
    let date_col = raw.column("transaction_date")?;
    let quantity_col = raw.column("quantity")?;
    let amount_col = raw.column("amount")?;

    let mut report = CleaningReport::new(Entity::Transactions.name(), raw.len());

    // 1. Date filter
    let mut invalid_dates = Vec::new();
    let mut staged = Vec::with_capacity(raw.len());
    for row in raw.rows() {
        let raw_date = row.get(date_col);
        let Some(transaction_date) = raw_date.and_then(parse_date) else {
            invalid_dates.push(raw_date.unwrap_or_default().to_string());
            continue;
        };
        staged.push(Staged {
            transaction_id: row.get(id_col).and_then(parse_integer),
            customer_id: row.get(customer_col).and_then(parse_integer),
            product_id: row.get(product_col).and_then(parse_integer),
            transaction_date,
            quantity: row.get(quantity_col).and_then(parse_integer),
            amount: row.get(amount_col).and_then(parse_decimal),
        });
    }
    if !invalid_dates.is_empty() {
        warn!(
            "Found {} invalid dates: {:?}",
            invalid_dates.len(),
            invalid_dates
        );
    }
    report.record(DropReason::InvalidDate, invalid_dates.len());

    // 2. Exact duplicates, first occurrence wins
    let before_dedup = staged.len();
    let mut seen = HashSet::with_capacity(staged.len());
    staged.retain(|row| seen.insert(row.dedup_key()));
    report.record(DropReason::Duplicate, before_dedup - staged.len());

    // 3. Positive quantity and amount, well-formed identifiers
    let mut non_positive = 0;
    let mut malformed_ids = 0;
    let mut reused_ids = Vec::new();
    let mut kept_ids = HashSet::with_capacity(staged.len());
    let mut rows = Vec::with_capacity(staged.len());
    for row in staged {
        let (Some(quantity), Some(amount)) = (row.quantity, row.amount) else {
            non_positive += 1;
            continue;
        };
        if quantity <= 0 || amount <= 0.0 {
            non_positive += 1;
            continue;
        }
        let (Some(transaction_id), Some(customer_id), Some(product_id)) =
            (row.transaction_id, row.customer_id, row.product_id)
        else {
            malformed_ids += 1;
            continue;
        };
        // 4. Distinct tuples sharing an id: the first one wins
        if !kept_ids.insert(transaction_id) {
            reused_ids.push(transaction_id);
            continue;
        }
        rows.push(Transaction {
            transaction_id,
            customer_id,
            product_id,
            transaction_date: row.transaction_date,
            quantity,
            amount,
        });
    }
    report.record(DropReason::NonPositiveQuantityOrAmount, non_positive);
    report.record(DropReason::MalformedId, malformed_ids);
    if !reused_ids.is_empty() {
        warn!("Found reused transaction ids: {:?}", reused_ids);
    }
    report.record(DropReason::DuplicateTransactionId, reused_ids.len());

    let report = report.finish(rows.len());
    Ok(Cleaned { rows, report })
}

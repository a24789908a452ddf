// retailflow-core/src/domain/integrity.rs
//
// Cross-entity referential check. Runs strictly after the three per-entity
// cleaners: it trusts that customers and products are already validated.

use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, instrument, warn};

use crate::domain::model::{Customer, Product, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IntegrityReport {
    /// Transactions whose customer_id is unknown.
    pub orphaned_customer_transactions: usize,
    /// Transactions whose product_id is unknown.
    pub orphaned_product_transactions: usize,
    pub valid_transactions: usize,
    pub total_transactions: usize,
}

#[derive(Debug, Clone)]
pub struct IntegrityOutcome {
    pub transactions: Vec<Transaction>,
    pub report: IntegrityReport,
}

/// Keeps only the transactions referencing a known customer AND a known product.
///
/// A transaction missing both references is counted in both orphan counters,
/// so the two counters do not necessarily add up to `total - valid`.
#[instrument(skip_all, fields(transactions = transactions.len()))]
pub fn check_integrity(
    customers: &[Customer],
    transactions: Vec<Transaction>,
    products: &[Product],
) -> IntegrityOutcome {
    info!("Validating data integrity...");

    let customer_ids: HashSet<i64> = customers.iter().map(|c| c.customer_id).collect();
    let product_ids: HashSet<i64> = products.iter().map(|p| p.product_id).collect();

    let total_transactions = transactions.len();
    let mut orphaned_customer_transactions = 0;
    let mut orphaned_product_transactions = 0;

    let valid: Vec<Transaction> = transactions
        .into_iter()
        .filter(|t| {
            let known_customer = customer_ids.contains(&t.customer_id);
            let known_product = product_ids.contains(&t.product_id);
            if !known_customer {
                orphaned_customer_transactions += 1;
            }
            if !known_product {
                orphaned_product_transactions += 1;
            }
            known_customer && known_product
        })
        .collect();

    let report = IntegrityReport {
        orphaned_customer_transactions,
        orphaned_product_transactions,
        valid_transactions: valid.len(),
        total_transactions,
    };

    if report.valid_transactions < total_transactions {
        warn!(
            orphaned_customers = orphaned_customer_transactions,
            orphaned_products = orphaned_product_transactions,
            "Removed {} orphaned transactions",
            total_transactions - report.valid_transactions
        );
    }
    info!(?report, "Data integrity report");

    IntegrityOutcome {
        transactions: valid,
        report,
    }
}

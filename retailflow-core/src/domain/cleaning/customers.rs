// retailflow-core/src/domain/cleaning/customers.rs

use tracing::warn;

use super::{Cleaned, CleaningReport, DropReason};
use crate::domain::error::DomainError;
use crate::domain::model::{Customer, Entity, RawTable};
use crate::domain::validators::{is_valid_email, parse_date, parse_integer};

const UNKNOWN_NAME: &str = "Unknown";

/// Email filter, then name defaulting, then registration date parsing.
///
/// A row failing several checks is counted once, under the first check it
/// fails. Invalid emails must be gone before the store sees the table: the
/// `email` column is unique and not null there.
pub fn clean_customers(raw: &RawTable) -> Result<Cleaned<Customer>, DomainError> {
    let id_col = raw.column("customer_id")?;
    let first_col = raw.column("first_name")?;
    let last_col = raw.column("last_name")?;
    let email_col = raw.column("email")?;
    let date_col = raw.column("registration_date")?;

    let mut report = CleaningReport::new(Entity::Customers.name(), raw.len());
    let mut invalid_emails = Vec::new();
    let mut invalid_dates = 0;
    let mut malformed_ids = 0;
    let mut rows = Vec::with_capacity(raw.len());

    for row in raw.rows() {
        // 1. Email shape
        let email = row.get(email_col);
        if !is_valid_email(email) {
            invalid_emails.push(email.unwrap_or_default().to_string());
            continue;
        }

        // 2. Names default to a placeholder
        let first_name = row.get(first_col).unwrap_or(UNKNOWN_NAME).to_string();
        let last_name = row.get(last_col).unwrap_or(UNKNOWN_NAME).to_string();

        // 3. Registration date must parse
        let Some(registration_date) = row.get(date_col).and_then(parse_date) else {
            invalid_dates += 1;
            continue;
        };

        let Some(customer_id) = row.get(id_col).and_then(parse_integer) else {
            malformed_ids += 1;
            continue;
        };

        rows.push(Customer {
            customer_id,
            first_name,
            last_name,
            email: email.unwrap_or_default().to_string(),
            registration_date,
        });
    }

    if !invalid_emails.is_empty() {
        warn!(
            "Found {} invalid emails: {:?}",
            invalid_emails.len(),
            invalid_emails
        );
    }
    report.record(DropReason::InvalidEmail, invalid_emails.len());
    report.record(DropReason::InvalidDate, invalid_dates);
    report.record(DropReason::MalformedId, malformed_ids);

    let report = report.finish(rows.len());
    Ok(Cleaned { rows, report })
}

// retailflow-core/src/domain/cleaning/mod.rs
//
// Per-entity cleaning stages. Each stage reads a raw table, never mutates it,
// and returns freshly built rows plus a report of what was dropped and why.
// Row-level problems are dropped and logged; only structural problems
// (a required column absent) are returned as errors.

pub mod customers;
pub mod products;
pub mod transactions;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, warn};

pub use customers::clean_customers;
pub use products::{clean_products, normalize_category};
pub use transactions::clean_transactions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    InvalidEmail,
    InvalidDate,
    Duplicate,
    DuplicateTransactionId,
    NonPositiveQuantityOrAmount,
    InvalidPrice,
    MalformedId,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::InvalidDate => "invalid_date",
            Self::Duplicate => "duplicate",
            Self::DuplicateTransactionId => "duplicate_transaction_id",
            Self::NonPositiveQuantityOrAmount => "non_positive_quantity_or_amount",
            Self::InvalidPrice => "invalid_price",
            Self::MalformedId => "malformed_id",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub entity: String,
    pub input_rows: usize,
    pub output_rows: usize,
    pub dropped: BTreeMap<DropReason, usize>,
}

impl CleaningReport {
    fn new(entity: &str, input_rows: usize) -> Self {
        info!(entity, rows = input_rows, "Starting {} data cleaning", entity);
        Self {
            entity: entity.to_string(),
            input_rows,
            output_rows: input_rows,
            dropped: BTreeMap::new(),
        }
    }

    fn record(&mut self, reason: DropReason, count: usize) {
        if count == 0 {
            return;
        }
        warn!(
            entity = %self.entity,
            reason = %reason,
            count,
            "Dropped {} {} record(s): {}",
            count,
            self.entity,
            reason
        );
        *self.dropped.entry(reason).or_insert(0) += count;
    }

    fn finish(mut self, output_rows: usize) -> Self {
        self.output_rows = output_rows;
        info!(
            entity = %self.entity,
            before = self.input_rows,
            after = output_rows,
            "Removed {} invalid {} records",
            self.removed(),
            self.entity
        );
        self
    }

    /// Total rows removed, whatever the cause.
    pub fn removed(&self) -> usize {
        self.input_rows - self.output_rows
    }

    pub fn dropped_for(&self, reason: DropReason) -> usize {
        self.dropped.get(&reason).copied().unwrap_or(0)
    }
}

/// Output of a cleaning stage.
#[derive(Debug, Clone)]
pub struct Cleaned<T> {
    pub rows: Vec<T>,
    pub report: CleaningReport,
}

/// Title case: the first letter of every alphabetic run is
/// upper-cased, every other letter lower-cased.
pub(crate) fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

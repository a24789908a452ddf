// retailflow-core/src/ports/store.rs

// The relational sink. The pipeline only knows this contract: it does not
// know which engine sits behind it, only that writes are all-or-nothing.

use serde::Serialize;
use std::path::Path;
use tracing::warn;

use crate::domain::model::{Relation, Snapshot};
use crate::domain::revenue::{CustomerRevenue, RevenueMetrics};
use crate::error::RetailflowError;

/// Rows actually written by a snapshot replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LoadReport {
    pub customers: usize,
    pub products: usize,
    pub transactions: usize,
    pub customer_revenue: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TableCounts {
    pub customers: u64,
    pub products: u64,
    pub transactions: u64,
    pub customer_revenue: u64,
}

impl TableCounts {
    pub fn get(&self, relation: Relation) -> u64 {
        match relation {
            Relation::Customers => self.customers,
            Relation::Products => self.products,
            Relation::Transactions => self.transactions,
            Relation::CustomerRevenue => self.customer_revenue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StoreSummary {
    pub tables: TableCounts,
    pub revenue: RevenueMetrics,
}

/// Projected rows of an ad-hoc query, every cell rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub trait Store {
    /// Acquires the underlying connection. Idempotent.
    fn connect(&mut self) -> Result<(), RetailflowError>;

    /// Releases the connection. Never fails; problems are logged.
    fn disconnect(&mut self);

    fn is_connected(&self) -> bool;

    /// Creates the four relations, their constraints and indexes if absent.
    fn define_schema(&mut self) -> Result<(), RetailflowError>;

    /// Replaces customers, products and transactions wholesale and rebuilds
    /// customer_revenue, all inside one transaction.
    fn replace_snapshot(&mut self, snapshot: &Snapshot) -> Result<LoadReport, RetailflowError>;

    /// Recomputes customer_revenue from the current transactions, atomically.
    /// Returns the number of revenue rows.
    fn compute_revenue_aggregate(&mut self) -> Result<usize, RetailflowError>;

    fn summary(&self) -> Result<StoreSummary, RetailflowError>;

    /// customer_revenue ordered by customer_id.
    fn customer_revenue(&self) -> Result<Vec<CustomerRevenue>, RetailflowError>;

    /// Runs a query returning a single integer (typically a COUNT).
    fn query_scalar(&self, sql: &str) -> Result<i64, RetailflowError>;

    fn run_query(&self, sql: &str) -> Result<QueryResult, RetailflowError>;

    /// Writes a relation as CSV (header + rows). Returns the number of data rows.
    fn export_csv(&self, relation: Relation, destination: &Path)
    -> Result<usize, RetailflowError>;

    fn engine_name(&self) -> &str;
}

/// Scoped connection: connects, runs `f`, and disconnects on every exit path.
/// The first error wins.
pub fn with_session<S, T, F>(store: &mut S, f: F) -> Result<T, RetailflowError>
where
    S: Store + ?Sized,
    F: FnOnce(&mut S) -> Result<T, RetailflowError>,
{
    store.connect()?;
    let result = f(store);
    if let Err(e) = &result {
        warn!("Store session ended with an error: {}", e);
    }
    store.disconnect();
    result
}

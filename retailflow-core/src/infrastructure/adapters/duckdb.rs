// retailflow-core/src/infrastructure/adapters/duckdb.rs

use chrono::{NaiveDate, TimeDelta};
use duckdb::types::ValueRef;
use duckdb::{Config, Connection, params};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

// Hexagonal Imports
use super::sql;
use crate::domain::model::{Customer, Product, Relation, Snapshot, Transaction, last_write_wins};
use crate::domain::revenue::{CustomerRevenue, RevenueMetrics};
use crate::error::RetailflowError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;
use crate::ports::store::{LoadReport, QueryResult, Store, StoreSummary, TableCounts};

/// Store gateway backed by a DuckDB file.
///
/// The connection is held only between `connect` and `disconnect`; every
/// data operation made outside that window fails with `NotConnected`.
pub struct DuckDBStore {
    db_path: PathBuf,
    conn: Option<Connection>,
}

/// One relation's worth of rows for `write_table`.
#[derive(Debug, Clone, Copy)]
pub enum TableRows<'a> {
    Customers(&'a [Customer]),
    Products(&'a [Product]),
    Transactions(&'a [Transaction]),
}

impl TableRows<'_> {
    pub fn relation(&self) -> Relation {
        match self {
            Self::Customers(_) => Relation::Customers,
            Self::Products(_) => Relation::Products,
            Self::Transactions(_) => Relation::Transactions,
        }
    }
}

impl DuckDBStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            conn: None,
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn conn(&self) -> Result<&Connection, InfrastructureError> {
        self.conn.as_ref().ok_or(InfrastructureError::NotConnected)
    }

    fn conn_mut(&mut self) -> Result<&mut Connection, InfrastructureError> {
        self.conn.as_mut().ok_or(InfrastructureError::NotConnected)
    }
}

impl Drop for DuckDBStore {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl Store for DuckDBStore {
    fn connect(&mut self) -> Result<(), RetailflowError> {
        if self.conn.is_some() {
            return Ok(());
        }

        if let Some(parent) = self.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(&self.db_path, Config::default()).map_err(|e| {
            error!("Failed to connect to database: {}", e);
            e
        })?;
        info!(path = ?self.db_path, "Connected to database");
        self.conn = Some(conn);
        Ok(())
    }

    fn disconnect(&mut self) {
        if let Some(conn) = self.conn.take() {
            match conn.close() {
                Ok(()) => info!("Database connection closed"),
                Err((_conn, e)) => warn!("Database connection closed with an error: {}", e),
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    #[instrument(skip(self))]
    fn define_schema(&mut self) -> Result<(), RetailflowError> {
        let conn = self.conn_mut()?;
        let tx = conn.transaction()?;
        tx.execute_batch(&sql::schema()).map_err(|e| {
            error!("Failed to create database schema: {}", e);
            e
        })?;
        tx.commit()?;
        info!("Database schema created successfully");
        Ok(())
    }

    #[instrument(skip_all)]
    fn replace_snapshot(&mut self, snapshot: &Snapshot) -> Result<LoadReport, RetailflowError> {
        let conn = self.conn_mut()?;

        // Dropping `tx` on any early return rolls everything back:
        // the previous snapshot survives untouched.
        let tx = conn.transaction()?;

        // 1. Drop + recreate (full replace, DDL and indexes before any row)
        tx.execute_batch(sql::DROP_ALL)?;
        tx.execute_batch(&sql::schema())?;

        // 2. Parents before children
        let customers = write_table(&tx, TableRows::Customers(&snapshot.customers))?;
        let products = write_table(&tx, TableRows::Products(&snapshot.products))?;
        let transactions = write_table(&tx, TableRows::Transactions(&snapshot.transactions))?;

        // 3. Derived relation, same transaction
        let customer_revenue = rebuild_customer_revenue(&tx)?;

        tx.commit().map_err(|e| {
            error!("Failed to commit snapshot: {}", e);
            e
        })?;

        Ok(LoadReport {
            customers,
            products,
            transactions,
            customer_revenue,
        })
    }

    #[instrument(skip(self))]
    fn compute_revenue_aggregate(&mut self) -> Result<usize, RetailflowError> {
        let conn = self.conn_mut()?;
        let tx = conn.transaction()?;
        let count = rebuild_customer_revenue(&tx)?;
        tx.commit()?;
        Ok(count)
    }

    fn summary(&self) -> Result<StoreSummary, RetailflowError> {
        let count = |relation: Relation| -> Result<u64, RetailflowError> {
            let n = self.query_scalar(&format!("SELECT COUNT(*) FROM {}", relation.table_name()))?;
            Ok(u64::try_from(n).unwrap_or_default())
        };

        let tables = TableCounts {
            customers: count(Relation::Customers)?,
            products: count(Relation::Products)?,
            transactions: count(Relation::Transactions)?,
            customer_revenue: count(Relation::CustomerRevenue)?,
        };

        let revenue = self.conn()?.query_row(sql::REVENUE_STATS, [], |row| {
            Ok(RevenueMetrics::from_aggregates(
                row.get::<_, Option<f64>>(0)?,
                row.get::<_, Option<f64>>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, Option<f64>>(3)?,
            ))
        })?;

        Ok(StoreSummary { tables, revenue })
    }

    fn customer_revenue(&self) -> Result<Vec<CustomerRevenue>, RetailflowError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql::SELECT_CUSTOMER_REVENUE)?;
        let rows = stmt.query_map([], |row| {
            Ok(CustomerRevenue {
                customer_id: row.get(0)?,
                total_amount: row.get(1)?,
                transaction_count: row.get(2)?,
            })
        })?;

        let mut revenue = Vec::new();
        for row in rows {
            revenue.push(row?);
        }
        Ok(revenue)
    }

    fn query_scalar(&self, query: &str) -> Result<i64, RetailflowError> {
        let value = self
            .conn()?
            .query_row(query, [], |row| row.get::<_, i64>(0))?;
        Ok(value)
    }

    fn run_query(&self, query: &str) -> Result<QueryResult, RetailflowError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(query)?;
        let mut rows = stmt.query([])?;

        // Column names only exist once the statement has run.
        let columns = rows
            .as_ref()
            .map(|s| s.column_names())
            .unwrap_or_default();

        let mut result = QueryResult {
            columns,
            rows: Vec::new(),
        };
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(result.columns.len());
            for idx in 0..result.columns.len() {
                cells.push(render_value(row.get_ref(idx)?));
            }
            result.rows.push(cells);
        }
        Ok(result)
    }

    fn export_csv(&self, relation: Relation, destination: &Path) -> Result<usize, RetailflowError> {
        let result = self.run_query(&format!(
            "SELECT * FROM {} ORDER BY 1",
            relation.table_name()
        ))?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&result.columns)?;
        for row in &result.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| InfrastructureError::Io(e.into_error()))?;

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        atomic_write(destination, bytes)?;

        info!("Exported {} to {}", relation, destination.display());
        Ok(result.rows.len())
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

/// Inserts one relation's rows into its (freshly recreated) table.
/// Customers and products sharing a primary key collapse last-write-wins.
/// Transactions are inserted as given: the cleaner has already settled
/// duplicate ids, so a repeat here violates the primary key.
pub fn write_table(conn: &Connection, rows: TableRows<'_>) -> Result<usize, duckdb::Error> {
    let relation = rows.relation();
    let written = match rows {
        TableRows::Customers(customers) => {
            let kept = last_write_wins(customers, |c| c.customer_id);
            log_collapsed(relation, customers.len(), kept.len());
            let mut stmt = conn.prepare(sql::INSERT_CUSTOMER)?;
            for c in &kept {
                stmt.execute(params![
                    c.customer_id,
                    c.first_name,
                    c.last_name,
                    c.email,
                    c.registration_date.to_string(),
                ])?;
            }
            kept.len()
        }
        TableRows::Products(products) => {
            let kept = last_write_wins(products, |p| p.product_id);
            log_collapsed(relation, products.len(), kept.len());
            let mut stmt = conn.prepare(sql::INSERT_PRODUCT)?;
            for p in &kept {
                stmt.execute(params![p.product_id, p.product_name, p.category, p.price])?;
            }
            kept.len()
        }
        TableRows::Transactions(transactions) => {
            let mut stmt = conn.prepare(sql::INSERT_TRANSACTION)?;
            for t in transactions {
                stmt.execute(params![
                    t.transaction_id,
                    t.customer_id,
                    t.product_id,
                    t.transaction_date.to_string(),
                    t.quantity,
                    t.amount,
                ])?;
            }
            transactions.len()
        }
    };

    info!("Loaded {} {} records", written, relation);
    Ok(written)
}

/// Drop, recreate and refill customer_revenue from the current transactions.
fn rebuild_customer_revenue(conn: &Connection) -> Result<usize, duckdb::Error> {
    conn.execute_batch(sql::DROP_CUSTOMER_REVENUE)?;
    conn.execute_batch(sql::CREATE_CUSTOMER_REVENUE)?;
    let count = conn
        .execute(sql::ROLLUP_CUSTOMER_REVENUE, [])
        .map_err(|e| {
            error!("Failed to calculate customer revenue: {}", e);
            e
        })?;
    info!("Calculated revenue for {} customers", count);
    Ok(count)
}

fn log_collapsed(relation: Relation, before: usize, after: usize) {
    if before > after {
        warn!(
            "Collapsed {} {} rows sharing a primary key (last write wins)",
            before - after,
            relation
        );
    }
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Boolean(b) => b.to_string(),
        ValueRef::TinyInt(i) => i.to_string(),
        ValueRef::SmallInt(i) => i.to_string(),
        ValueRef::Int(i) => i.to_string(),
        ValueRef::BigInt(i) => i.to_string(),
        ValueRef::HugeInt(i) => i.to_string(),
        ValueRef::Float(f) => f.to_string(),
        ValueRef::Double(f) => f.to_string(),
        ValueRef::Decimal(d) => d.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Date32(days) => NaiveDate::from_ymd_opt(1970, 1, 1)
            .zip(TimeDelta::try_days(days.into()))
            .and_then(|(epoch, delta)| epoch.checked_add_signed(delta))
            .map(|d| d.to_string())
            .unwrap_or_else(|| days.to_string()),
        other => {
            debug!("Rendering unsupported value type through Debug");
            format!("{:?}", other)
        }
    }
}

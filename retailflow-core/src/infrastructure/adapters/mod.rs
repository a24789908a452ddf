// retailflow-core/src/infrastructure/adapters/mod.rs

pub mod csv;
pub mod duckdb;
mod sql;

pub use self::csv::CsvDirectorySource;
pub use self::duckdb::DuckDBStore;

// retailflow-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetailflowError {
    // --- DOMAIN ERRORS (missing columns, missing inputs, failed assertions) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, CSV, Database) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for RetailflowError {
    fn from(err: std::io::Error) -> Self {
        RetailflowError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for RetailflowError {
    fn from(err: duckdb::Error) -> Self {
        RetailflowError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(err)))
    }
}

impl From<csv::Error> for RetailflowError {
    fn from(err: csv::Error) -> Self {
        RetailflowError::Infrastructure(InfrastructureError::Csv(err))
    }
}

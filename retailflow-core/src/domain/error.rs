// retailflow-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Required column '{column}' is missing from the {table} table")]
    #[diagnostic(
        code(retailflow::domain::missing_column),
        help("Check the header row of the {table} input file.")
    )]
    MissingColumn { table: String, column: String },

    #[error("Missing required input files: {0:?}")]
    #[diagnostic(
        code(retailflow::domain::missing_inputs),
        help("customers.csv, products.csv and transactions.csv must all be present.")
    )]
    MissingInputs(Vec<String>),

    #[error("Unknown relation '{0}'")]
    #[diagnostic(
        code(retailflow::domain::unknown_relation),
        help("Expected one of: customers, products, transactions, customer_revenue.")
    )]
    UnknownRelation(String),

    #[error("Output validation failed: {0}")]
    #[diagnostic(code(retailflow::domain::validation))]
    ValidationFailed(String),
}

// retailflow-core/src/ports/mod.rs

pub mod source;
pub mod store;

pub use source::TableSource;
pub use store::{LoadReport, QueryResult, Store, StoreSummary, TableCounts, with_session};

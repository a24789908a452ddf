// retailflow-core/src/domain/mod.rs

pub mod cleaning;
pub mod error;
pub mod integrity;
pub mod model;
pub mod revenue;
pub mod validators;

pub use error::DomainError;
pub use model::{Customer, Entity, Product, RawTable, Relation, Snapshot, Transaction};

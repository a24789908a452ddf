// retailflow-core/src/lib.rs

#![allow(missing_docs)]
// 1. Memory safety
#![deny(unsafe_code)]
// 2. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 3. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts for the raw table source and the relational store.
pub mod ports;

// 2. Domain
// Entities, validators, cleaners, referential integrity, revenue rollup.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// DuckDB store, CSV source, configuration files, filesystem helpers.
pub mod infrastructure;

// 4. Application (Use Cases)
// Pipeline orchestration, preflight, post-load validation, reporting.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::RetailflowError;

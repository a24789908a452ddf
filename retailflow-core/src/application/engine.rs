// retailflow-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::error::RetailflowError;
use crate::ports::store::{QueryResult, Store};

/// Runs an ad-hoc query with timing instrumentation.
/// The store must already be connected.
#[instrument(skip(store), fields(query.len = query.len()))]
pub fn execute_query<S: Store + ?Sized>(store: &S, query: &str) -> Result<QueryResult, RetailflowError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    let result = store.run_query(query);
    let duration = start.elapsed();

    match &result {
        Ok(rows) => debug!("✅ Query returned {} rows in {:.2?}", rows.rows.len(), duration),
        // Logged here for the timing context; propagated unchanged.
        Err(e) => error!("❌ Query failed after {:.2?}: {}", duration, e),
    }
    result
}

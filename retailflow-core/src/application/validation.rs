// retailflow-core/src/application/validation.rs

use tracing::{error, info, instrument};

// Imports Hexagonaux
use crate::domain::error::DomainError;
use crate::domain::model::Relation;
use crate::error::RetailflowError;
use crate::ports::store::Store;

/// Outcome of one post-load assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    pub name: String,
    pub observed: i64,
    pub passed: bool,
}

/// Re-reads the store and asserts that the load produced sane data:
/// every relation non-empty, no stored email without '@', no non-positive
/// stored amount. Every assertion runs; the first failure does not hide
/// the others.
#[instrument(skip(store), fields(engine = store.engine_name()))]
pub fn validate_output<S: Store + ?Sized>(store: &S) -> Result<Vec<Assertion>, RetailflowError> {
    let mut assertions = Vec::new();

    // 1. Non-empty relations
    for relation in Relation::ALL {
        let count = store.query_scalar(&format!(
            "SELECT COUNT(*) FROM {}",
            relation.table_name()
        ))?;
        assertions.push(Assertion {
            name: format!("{} is not empty", relation),
            observed: count,
            passed: count > 0,
        });
    }

    // 2. Lingering invalid data
    let checks = [
        (
            "no stored email without '@'",
            "SELECT COUNT(*) FROM customers WHERE email NOT LIKE '%@%'",
        ),
        (
            "no stored transaction amount <= 0",
            "SELECT COUNT(*) FROM transactions WHERE amount <= 0",
        ),
    ];
    for (name, sql) in checks {
        let count = store.query_scalar(sql)?;
        assertions.push(Assertion {
            name: name.to_string(),
            observed: count,
            passed: count == 0,
        });
    }

    let failures: Vec<String> = assertions
        .iter()
        .filter(|a| !a.passed)
        .map(|a| format!("{} (observed {})", a.name, a.observed))
        .collect();

    for a in &assertions {
        if a.passed {
            info!("PASS: {}", a.name);
        } else {
            error!("FAIL: {} (observed {})", a.name, a.observed);
        }
    }

    if !failures.is_empty() {
        return Err(DomainError::ValidationFailed(failures.join("; ")).into());
    }

    info!("Output data validation passed");
    Ok(assertions)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::model::Snapshot;
    use crate::domain::revenue::CustomerRevenue;
    use crate::ports::store::{LoadReport, QueryResult, StoreSummary};
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex;

    // --- MOCK STORE ---
    struct MockStore {
        pub executed_queries: Mutex<Vec<String>>,
        pub counts: HashMap<&'static str, i64>,
    }

    impl MockStore {
        fn healthy() -> Self {
            Self {
                executed_queries: Mutex::new(Vec::new()),
                counts: HashMap::from([
                    ("customers", 2),
                    ("products", 2),
                    ("transactions", 2),
                    ("customer_revenue", 2),
                    ("invalid_emails", 0),
                    ("non_positive_amounts", 0),
                ]),
            }
        }

        fn with(mut self, key: &'static str, value: i64) -> Self {
            self.counts.insert(key, value);
            self
        }
    }

    impl Store for MockStore {
        fn connect(&mut self) -> Result<(), RetailflowError> {
            Ok(())
        }
        fn disconnect(&mut self) {}
        fn is_connected(&self) -> bool {
            true
        }
        fn define_schema(&mut self) -> Result<(), RetailflowError> {
            Ok(())
        }
        fn replace_snapshot(&mut self, _snapshot: &Snapshot) -> Result<LoadReport, RetailflowError> {
            Ok(LoadReport::default())
        }
        fn compute_revenue_aggregate(&mut self) -> Result<usize, RetailflowError> {
            Ok(0)
        }
        fn summary(&self) -> Result<StoreSummary, RetailflowError> {
            Ok(StoreSummary::default())
        }
        fn customer_revenue(&self) -> Result<Vec<CustomerRevenue>, RetailflowError> {
            Ok(vec![])
        }
        fn query_scalar(&self, sql: &str) -> Result<i64, RetailflowError> {
            self.executed_queries.lock().unwrap().push(sql.to_string());
            let key = if sql.contains("NOT LIKE") {
                "invalid_emails"
            } else if sql.contains("amount <= 0") {
                "non_positive_amounts"
            } else {
                // "SELECT COUNT(*) FROM <table>"
                sql.rsplit(' ').next().unwrap_or_default()
            };
            Ok(self.counts.get(key).copied().unwrap_or(0))
        }
        fn run_query(&self, _sql: &str) -> Result<QueryResult, RetailflowError> {
            Ok(QueryResult::default())
        }
        fn export_csv(&self, _relation: Relation, _destination: &Path) -> Result<usize, RetailflowError> {
            Ok(0)
        }
        fn engine_name(&self) -> &str {
            "mock"
        }
    }

    #[test]
    fn test_validate_output_passes_on_healthy_store() {
        let store = MockStore::healthy();
        let assertions = validate_output(&store).unwrap();

        assert_eq!(assertions.len(), 6);
        assert!(assertions.iter().all(|a| a.passed));

        let queries = store.executed_queries.lock().unwrap();
        assert!(queries.iter().any(|q| q.contains("email NOT LIKE '%@%'")));
        assert!(queries.iter().any(|q| q.contains("amount <= 0")));
    }

    #[test]
    fn test_validate_output_reports_every_failure() {
        let store = MockStore::healthy()
            .with("customer_revenue", 0)
            .with("invalid_emails", 3);

        let err = validate_output(&store).unwrap_err();
        let RetailflowError::Domain(DomainError::ValidationFailed(msg)) = err else {
            panic!("expected ValidationFailed, got {err:?}");
        };
        assert!(msg.contains("customer_revenue is not empty"));
        assert!(msg.contains("no stored email without '@' (observed 3)"));
        assert!(!msg.contains("amount"));
    }

    #[test]
    fn test_validate_output_propagates_store_errors() {
        struct Disconnected;
        impl Store for Disconnected {
            fn connect(&mut self) -> Result<(), RetailflowError> {
                Ok(())
            }
            fn disconnect(&mut self) {}
            fn is_connected(&self) -> bool {
                false
            }
            fn define_schema(&mut self) -> Result<(), RetailflowError> {
                Ok(())
            }
            fn replace_snapshot(&mut self, _: &Snapshot) -> Result<LoadReport, RetailflowError> {
                Ok(LoadReport::default())
            }
            fn compute_revenue_aggregate(&mut self) -> Result<usize, RetailflowError> {
                Ok(0)
            }
            fn summary(&self) -> Result<StoreSummary, RetailflowError> {
                Ok(StoreSummary::default())
            }
            fn customer_revenue(&self) -> Result<Vec<CustomerRevenue>, RetailflowError> {
                Ok(vec![])
            }
            fn query_scalar(&self, _: &str) -> Result<i64, RetailflowError> {
                Err(crate::infrastructure::error::InfrastructureError::NotConnected.into())
            }
            fn run_query(&self, _: &str) -> Result<QueryResult, RetailflowError> {
                Ok(QueryResult::default())
            }
            fn export_csv(&self, _: Relation, _: &Path) -> Result<usize, RetailflowError> {
                Ok(0)
            }
            fn engine_name(&self) -> &str {
                "disconnected"
            }
        }

        assert!(matches!(
            validate_output(&Disconnected),
            Err(RetailflowError::Infrastructure(_))
        ));
    }
}

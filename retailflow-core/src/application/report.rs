// retailflow-core/src/application/report.rs

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::domain::cleaning::CleaningReport;
use crate::domain::integrity::IntegrityReport;
use crate::domain::model::Relation;
use crate::domain::revenue::RevenueMetrics;
use crate::error::RetailflowError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;
use crate::ports::store::StoreSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub record_count: u64,
}

/// The machine-readable summary artifact written after each successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub generated_at: String,
    pub tables: BTreeMap<String, TableStats>,
    pub revenue_metrics: RevenueMetrics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cleaning: Vec<CleaningReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<IntegrityReport>,
}

impl QualityReport {
    pub fn new(summary: &StoreSummary, generated_at: DateTime<Utc>) -> Self {
        let tables = Relation::ALL
            .iter()
            .map(|r| {
                (
                    r.table_name().to_string(),
                    TableStats {
                        record_count: summary.tables.get(*r),
                    },
                )
            })
            .collect();

        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            tables,
            revenue_metrics: summary.revenue,
            cleaning: Vec::new(),
            integrity: None,
        }
    }

    pub fn with_run_details(mut self, cleaning: Vec<CleaningReport>, integrity: IntegrityReport) -> Self {
        self.cleaning = cleaning;
        self.integrity = Some(integrity);
        self
    }

    pub fn to_json(&self) -> Result<String, InfrastructureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), RetailflowError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        atomic_write(path, self.to_json()?)?;
        info!("Data quality report written to {}", path.display());
        Ok(())
    }
}

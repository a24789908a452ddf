// retailflow-core/src/application/pipeline.rs

use chrono::Utc;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument};

use crate::application::report::QualityReport;
use crate::domain::cleaning::{CleaningReport, clean_customers, clean_products, clean_transactions};
use crate::domain::integrity::{IntegrityReport, check_integrity};
use crate::domain::model::{Entity, RawTable, Relation, Snapshot};
use crate::error::RetailflowError;
use crate::infrastructure::config::PipelineConfig;
use crate::ports::source::TableSource;
use crate::ports::store::{LoadReport, Store, StoreSummary, with_session};

/// Strictly sequential; a failure in any stage aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Extracted,
    Transformed,
    Loaded,
    Reported,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Extracted => "extracted",
            Stage::Transformed => "transformed",
            Stage::Loaded => "loaded",
            Stage::Reported => "reported",
        };
        f.write_str(s)
    }
}

/// Where the report stage writes its artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTargets {
    pub summary_path: PathBuf,
    /// `None` disables the flat customer_revenue export.
    pub revenue_export_path: Option<PathBuf>,
}

impl ReportTargets {
    pub fn from_config(config: &PipelineConfig, export_revenue: bool) -> Self {
        Self {
            summary_path: config.summary_path(),
            revenue_export_path: export_revenue.then(|| config.revenue_export_path()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Extracted {
    pub customers: RawTable,
    pub products: RawTable,
    pub transactions: RawTable,
}

#[derive(Debug, Clone)]
pub struct Transformed {
    pub snapshot: Snapshot,
    pub cleaning: Vec<CleaningReport>,
    pub integrity: IntegrityReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub stage: Stage,
    pub load: LoadReport,
    pub summary: StoreSummary,
    pub integrity: IntegrityReport,
    pub summary_path: PathBuf,
    pub revenue_export: Option<PathBuf>,
}

// --- STAGES ---

pub fn extract<T: TableSource + ?Sized>(source: &T) -> Result<Extracted, RetailflowError> {
    info!("📥 Extracting data from source files");
    Ok(Extracted {
        customers: source.extract(Entity::Customers)?,
        products: source.extract(Entity::Products)?,
        transactions: source.extract(Entity::Transactions)?,
    })
}

/// Per-entity cleaning, then the cross-entity integrity check.
/// The integrity check needs all three cleaned tables, hence the order.
pub fn transform(extracted: Extracted) -> Result<Transformed, RetailflowError> {
    info!("🧹 Transforming data");

    let customers = clean_customers(&extracted.customers)?;
    let products = clean_products(&extracted.products)?;
    let transactions = clean_transactions(&extracted.transactions)?;

    let outcome = check_integrity(&customers.rows, transactions.rows, &products.rows);

    Ok(Transformed {
        snapshot: Snapshot {
            customers: customers.rows,
            products: products.rows,
            transactions: outcome.transactions,
        },
        cleaning: vec![customers.report, products.report, transactions.report],
        integrity: outcome.report,
    })
}

/// Full replace of the store contents plus the revenue rollup, as one unit.
pub fn load<S: Store + ?Sized>(store: &mut S, transformed: &Transformed) -> Result<LoadReport, RetailflowError> {
    info!("💾 Loading data into {}", store.engine_name());
    with_session(store, |s| {
        s.define_schema()?;
        s.replace_snapshot(&transformed.snapshot)
    })
}

/// Reads the store back and writes the summary artifact (and the optional
/// revenue export).
pub fn report<S: Store + ?Sized>(
    store: &mut S,
    transformed: &Transformed,
    targets: &ReportTargets,
) -> Result<StoreSummary, RetailflowError> {
    info!("📊 Generating pipeline summary report");

    let summary = with_session(store, |s| {
        let summary = s.summary()?;
        if let Some(path) = &targets.revenue_export_path {
            s.export_csv(Relation::CustomerRevenue, path)?;
        }
        Ok(summary)
    })?;

    QualityReport::new(&summary, Utc::now())
        .with_run_details(transformed.cleaning.clone(), transformed.integrity)
        .write(&targets.summary_path)?;

    Ok(summary)
}

// --- ORCHESTRATION ---

/// Extract → Transform → Load → Report. The first error is returned as is.
#[instrument(skip_all, fields(engine = store.engine_name()))]
pub fn run_pipeline<T, S>(
    source: &T,
    store: &mut S,
    targets: &ReportTargets,
) -> Result<RunResult, RetailflowError>
where
    T: TableSource + ?Sized,
    S: Store + ?Sized,
{
    println!("🚀 Starting ETL pipeline...");
    let start_time = Instant::now();

    let extracted = extract(source)?;
    info!(stage = %Stage::Extracted, "Stage complete");

    let transformed = transform(extracted)?;
    info!(stage = %Stage::Transformed, "Stage complete");

    let load = load(store, &transformed)?;
    info!(stage = %Stage::Loaded, "Stage complete");

    let summary = report(store, &transformed, targets)?;
    info!(stage = %Stage::Reported, "Stage complete");

    println!(
        "✨ Pipeline completed in {:.2?}: {} customers, {} products, {} transactions loaded",
        start_time.elapsed(),
        load.customers,
        load.products,
        load.transactions
    );

    Ok(RunResult {
        stage: Stage::Reported,
        load,
        summary,
        integrity: transformed.integrity,
        summary_path: targets.summary_path.clone(),
        revenue_export: targets.revenue_export_path.clone(),
    })
}

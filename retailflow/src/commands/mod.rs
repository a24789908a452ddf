// retailflow/src/commands/mod.rs

pub mod check;
pub mod export;
pub mod query;
pub mod run;
pub mod summary;
pub mod validate;

use anyhow::Context;
use miette::Diagnostic;
use std::path::PathBuf;
use tracing::debug;

use retailflow_core::RetailflowError;
use retailflow_core::infrastructure::config::{PipelineConfig, load_pipeline_config};

use crate::cli::{ProjectArgs, StoreArgs};

/// retailflow.yaml, then environment, then CLI flags.
pub fn resolve_config(args: &ProjectArgs) -> anyhow::Result<PipelineConfig> {
    let config = load_pipeline_config(&args.project_dir).with_context(|| {
        format!(
            "Failed to load pipeline configuration from {:?}",
            args.project_dir
        )
    })?;
    let config = config.with_overrides(args.input_dir.clone(), args.output_dir.clone());
    debug!(?config, "Resolved pipeline configuration");
    Ok(config)
}

/// The store file read-side commands operate on. It must already exist:
/// opening a missing path would silently create an empty database.
pub fn resolve_db_path(args: &StoreArgs) -> anyhow::Result<PathBuf> {
    let db_path = match &args.db_path {
        Some(path) => path.clone(),
        None => resolve_config(&args.project)?.database_path(),
    };

    if !db_path.exists() {
        anyhow::bail!(
            "❌ Database not found at: {}\n👉 Have you run 'retailflow run'?",
            db_path.display()
        );
    }
    Ok(db_path)
}

/// Renders core errors with their diagnostic code and help when they carry one.
/// Unwrapped, so the message stays greppable in CI logs.
pub fn render_error(err: RetailflowError) -> String {
    match err {
        RetailflowError::Domain(e) => describe(&e),
        RetailflowError::Infrastructure(e) => describe(&e),
        other => format!("  × {}", other),
    }
}

pub fn describe<D: Diagnostic>(diagnostic: &D) -> String {
    let mut out = format!("  × {}", diagnostic);
    if let Some(code) = diagnostic.code() {
        out.push_str(&format!("\n  code: {}", code));
    }
    if let Some(help) = diagnostic.help() {
        out.push_str(&format!("\n  help: {}", help));
    }
    out
}

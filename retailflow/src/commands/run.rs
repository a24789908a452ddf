// retailflow/src/commands/run.rs
//
// USE CASE: Run the pipeline, the way the scheduler does it:
// preflight -> pipeline -> post-load validation. Any failure exits non-zero.

use retailflow_core::application::{
    ReportTargets, check_input_files, run_pipeline, validate_output,
};
use retailflow_core::infrastructure::adapters::{CsvDirectorySource, DuckDBStore};
use retailflow_core::ports::store::with_session;

use super::summary::print_summary;
use super::{render_error, resolve_config};
use crate::cli::ProjectArgs;

pub fn execute(project: ProjectArgs, skip_export: bool) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = resolve_config(&project)?;
    println!("   Input:  {}", config.input_path.display());
    println!("   Output: {}", config.output_path.display());

    // B. Preflight (fail fast, before any processing)
    if let Err(e) = check_input_files(&config.input_path) {
        eprintln!("\n💥 PREFLIGHT FAILED:\n{}", render_error(e));
        std::process::exit(1);
    }

    // C. Adapters
    let source = CsvDirectorySource::new(&config.input_path);
    let mut store = DuckDBStore::new(config.database_path());
    let targets = ReportTargets::from_config(&config, !skip_export);

    // D. Run the Pipeline (Application Layer)
    let result = match run_pipeline(&source, &mut store, &targets) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR:\n{}", render_error(e));
            std::process::exit(1);
        }
    };

    // E. Post-load validation
    println!("🧪 Validating output data...");
    if let Err(e) = with_session(&mut store, |s| validate_output(&*s)) {
        eprintln!("\n❌ VALIDATION FAILED:\n{}", render_error(e));
        std::process::exit(1);
    }

    print_summary(&result.summary);
    println!("   Report: {}", result.summary_path.display());
    if let Some(export) = &result.revenue_export {
        println!("   Export: {}", export.display());
    }
    println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
    Ok(())
}

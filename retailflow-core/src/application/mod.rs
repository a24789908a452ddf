// retailflow-core/src/application/mod.rs

pub mod engine;
pub mod pipeline;
pub mod preflight;
pub mod report;
pub mod validation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use retailflow_core::application::{run_pipeline, validate_output};`

pub use engine::execute_query;
pub use pipeline::{ReportTargets, RunResult, Stage, run_pipeline};
pub use preflight::check_input_files;
pub use report::QualityReport;
pub use validation::validate_output;

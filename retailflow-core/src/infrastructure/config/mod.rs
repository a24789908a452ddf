// retailflow-core/src/infrastructure/config/mod.rs

pub mod pipeline;

pub use pipeline::{
    CONFIG_FILE, DATABASE_FILE, PipelineConfig, REVENUE_EXPORT_FILE, SUMMARY_FILE,
    apply_overrides, load_pipeline_config,
};

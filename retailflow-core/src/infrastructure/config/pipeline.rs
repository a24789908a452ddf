// retailflow-core/src/infrastructure/config/pipeline.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_FILE: &str = "retailflow.yaml";
pub const DATABASE_FILE: &str = "retail_data.duckdb";
pub const SUMMARY_FILE: &str = "data_quality_report.json";
pub const REVENUE_EXPORT_FILE: &str = "customer_revenue.csv";

pub const ENV_INPUT_PATH: &str = "RETAILFLOW_INPUT_PATH";
pub const ENV_OUTPUT_PATH: &str = "RETAILFLOW_OUTPUT_PATH";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PipelineConfig {
    #[serde(rename = "input-path", default = "default_input_path")]
    pub input_path: PathBuf,

    #[serde(rename = "output-path", default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("data/input")
}
fn default_output_path() -> PathBuf {
    PathBuf::from("data/output")
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
        }
    }
}

impl PipelineConfig {
    pub fn database_path(&self) -> PathBuf {
        self.output_path.join(DATABASE_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_path.join(SUMMARY_FILE)
    }

    pub fn revenue_export_path(&self) -> PathBuf {
        self.output_path.join(REVENUE_EXPORT_FILE)
    }

    /// Explicit paths (CLI flags) win over everything else.
    pub fn with_overrides(mut self, input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.input_path = input;
        }
        if let Some(output) = output {
            self.output_path = output;
        }
        self
    }

    fn resolve_against(mut self, project_dir: &Path) -> Self {
        if self.input_path.is_relative() {
            self.input_path = project_dir.join(&self.input_path);
        }
        if self.output_path.is_relative() {
            self.output_path = project_dir.join(&self.output_path);
        }
        self
    }
}

/// Loads `retailflow.yaml` (optional), layers the environment on top and
/// resolves relative paths against `project_dir`.
#[instrument]
pub fn load_pipeline_config(project_dir: &Path) -> Result<PipelineConfig, InfrastructureError> {
    // 1. File (or defaults)
    let config_path = project_dir.join(CONFIG_FILE);
    let config = if config_path.exists() {
        info!(path = ?config_path, "Loading pipeline configuration");
        let content = fs::read_to_string(&config_path)?;
        // An empty file means "all defaults"
        if content.trim().is_empty() {
            PipelineConfig::default()
        } else {
            serde_yaml::from_str(&content)?
        }
    } else {
        debug!("No {} in {:?}, using defaults", CONFIG_FILE, project_dir);
        PipelineConfig::default()
    };

    // 2. Environment layering
    let config = apply_overrides(config, |key| std::env::var(key).ok());

    Ok(config.resolve_against(project_dir))
}

/// `lookup` is `std::env::var` in production, a map in tests.
pub fn apply_overrides<F>(mut config: PipelineConfig, lookup: F) -> PipelineConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_INPUT_PATH).filter(|v| !v.is_empty()) {
        info!(old = ?config.input_path, new = ?val, "Overriding input path via ENV");
        config.input_path = PathBuf::from(val);
    }
    if let Some(val) = lookup(ENV_OUTPUT_PATH).filter(|v| !v.is_empty()) {
        info!(old = ?config.output_path, new = ?val, "Overriding output path via ENV");
        config.output_path = PathBuf::from(val);
    }
    config
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_resolve_against_project_dir() -> Result<()> {
        let dir = tempdir()?;
        let config = PipelineConfig::default().resolve_against(dir.path());

        assert_eq!(config.input_path, dir.path().join("data/input"));
        assert_eq!(
            config.database_path(),
            dir.path().join("data/output").join("retail_data.duckdb")
        );
        assert_eq!(
            config.summary_path().file_name().unwrap(),
            "data_quality_report.json"
        );
        assert_eq!(
            config.revenue_export_path().file_name().unwrap(),
            "customer_revenue.csv"
        );
        Ok(())
    }

    #[test]
    fn test_yaml_keys_and_partial_file() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(CONFIG_FILE), "output-path: build/out\n")?;

        let config = load_pipeline_config(dir.path())?;

        assert_eq!(config.input_path, dir.path().join("data/input"));
        assert_eq!(config.output_path, dir.path().join("build/out"));
        Ok(())
    }

    #[test]
    fn test_invalid_yaml_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(CONFIG_FILE), "input-path: [unclosed\n")?;

        let err = load_pipeline_config(dir.path()).unwrap_err();
        assert!(matches!(err, InfrastructureError::YamlError(_)));
        Ok(())
    }

    #[test]
    fn test_env_then_flags_precedence() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_INPUT_PATH, "/env/in"),
            (ENV_OUTPUT_PATH, "/env/out"),
        ]);

        let config = apply_overrides(PipelineConfig::default(), |k| {
            env.get(k).map(|v| v.to_string())
        });
        assert_eq!(config.input_path, PathBuf::from("/env/in"));

        let config = config.with_overrides(None, Some(PathBuf::from("/flag/out")));
        assert_eq!(config.input_path, PathBuf::from("/env/in"));
        assert_eq!(config.output_path, PathBuf::from("/flag/out"));
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = PipelineConfig {
            input_path: PathBuf::from("/abs/in"),
            output_path: PathBuf::from("rel/out"),
        }
        .resolve_against(Path::new("/project"));

        assert_eq!(config.input_path, PathBuf::from("/abs/in"));
        assert_eq!(config.output_path, PathBuf::from("/project/rel/out"));
    }
}

// retailflow-core/src/application/preflight.rs

use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::Entity;
use crate::error::RetailflowError;

/// Fails fast, before any extraction, when an input file is absent.
/// Every missing path is reported, not just the first one.
#[instrument]
pub fn check_input_files(input_dir: &Path) -> Result<Vec<PathBuf>, RetailflowError> {
    let (present, missing): (Vec<PathBuf>, Vec<PathBuf>) = Entity::ALL
        .iter()
        .map(|entity| input_dir.join(entity.file_name()))
        .partition(|path| path.is_file());

    if !missing.is_empty() {
        let missing: Vec<String> = missing.iter().map(|p| p.display().to_string()).collect();
        error!("Missing input files: {:?}", missing);
        return Err(DomainError::MissingInputs(missing).into());
    }

    info!("All input files found");
    Ok(present)
}

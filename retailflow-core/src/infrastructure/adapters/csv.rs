// retailflow-core/src/infrastructure/adapters/csv.rs

use csv::{ReaderBuilder, Trim};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::model::{Entity, RawTable};
use crate::error::RetailflowError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::source::TableSource;

/// Reads `<entity>.csv` files from one directory.
/// Every cell is kept as text: typing is the cleaners' job.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    input_dir: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
        }
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn path_for(&self, entity: Entity) -> PathBuf {
        self.input_dir.join(entity.file_name())
    }
}

impl TableSource for CsvDirectorySource {
    #[instrument(skip(self), fields(dir = ?self.input_dir))]
    fn extract(&self, entity: Entity) -> Result<RawTable, RetailflowError> {
        let path = self.path_for(entity);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_path(&path)
            .map_err(|e| match e.into_kind() {
                csv::ErrorKind::Io(io) => InfrastructureError::Io(io),
                kind => InfrastructureError::ConfigError(format!(
                    "cannot open {}: {:?}",
                    path.display(),
                    kind
                )),
            })?;

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        info!("Extracted {} {} records", rows.len(), entity.name());
        Ok(RawTable::new(entity.name(), headers, rows))
    }
}

use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument};

use crate::config::Config;
use crate::importers::{ImportError, SpreadsheetImporter};
use crate::normalizer::normalize;
use crate::store::{ArtifactStore, StoreError};
use crate::workdir::WorkingDir;

/// Error types for a refresh run
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Cannot enter project root {path}: {source}")]
    ProjectRoot {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshStats {
    pub rows_written: usize,
    pub sentinels_replaced: usize,
    pub output: PathBuf,
}

/// Rebuilds the persisted column table from the workbook
#[derive(Debug, Clone)]
pub struct RefreshService {
    config: Config,
}

impl RefreshService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full refresh
    ///
    /// 1. Switches into the project root (restored on return)
    /// 2. Loads the sheet into a typed table
    /// 3. Replaces `NA` sentinels with nulls
    /// 4. Overwrites the persisted artifact
    #[instrument(skip(self), fields(root = %self.config.project_root.display()))]
    pub fn run(&self) -> Result<RefreshStats, RefreshError> {
        let start_time = Instant::now();

        let _cwd = WorkingDir::enter(&self.config.project_root).map_err(|source| {
            RefreshError::ProjectRoot {
                path: self.config.project_root.display().to_string(),
                source,
            }
        })?;

        let importer = SpreadsheetImporter::new(&self.config.input);
        let table = importer.load(&self.config.sheet, self.config.header_row)?;

        let (table, report) = normalize(table);

        let store = ArtifactStore::new(&self.config.output);
        store.write(&table)?;

        info!(
            "Refreshed {} rows ({} NA sentinels replaced) in {:.2?}",
            table.len(),
            report.total(),
            start_time.elapsed()
        );

        Ok(RefreshStats {
            rows_written: table.len(),
            sentinels_replaced: report.total(),
            output: self.config.output.clone(),
        })
    }
}

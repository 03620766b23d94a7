use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::models::{ColumnRow, ColumnTable};
use crate::schema::{ColumnSpec, SCHEMA};
use crate::store::StoreError;

/// On-disk layout: the declared schema followed by the rows
#[derive(Serialize)]
struct ArtifactOut<'a> {
    columns: &'a [ColumnSpec],
    rows: &'a [ColumnRow],
}

#[derive(Deserialize)]
struct ArtifactIn {
    rows: Vec<ColumnRow>,
}

/// Package-internal data file holding the column-definition table
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    path: PathBuf,
}

impl ArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Serialize the table, byte-for-byte stable for identical input
    pub fn encode(table: &ColumnTable) -> Result<Vec<u8>, StoreError> {
        let artifact = ArtifactOut {
            columns: &SCHEMA,
            rows: &table.rows,
        };
        let mut bytes = serde_json::to_vec_pretty(&artifact)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Replace the artifact with `table`
    ///
    /// Writes to a temp file in the target directory, then renames it over
    /// the old file so readers never see a partial write.
    #[instrument(skip(self, table), fields(path = %self.path.display(), rows = table.len()))]
    pub fn write(&self, table: &ColumnTable) -> Result<(), StoreError> {
        let bytes = Self::encode(table)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let mut temp_file = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        temp_file.write_all(&bytes).map_err(|e| self.io_error(e))?;
        temp_file.flush().map_err(|e| self.io_error(e))?;

        // Temp files are created 0600; the artifact keeps the old file's mode
        if let Some(permissions) = self.target_permissions() {
            temp_file
                .as_file()
                .set_permissions(permissions)
                .map_err(|e| self.io_error(e))?;
        }
        debug!("Wrote {} bytes to {}", bytes.len(), temp_file.path().display());

        temp_file
            .persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        info!("Persisted {} rows to {}", table.len(), self.path.display());
        Ok(())
    }

    /// Mode of the artifact being replaced, or 0644 for a new one
    #[cfg(unix)]
    fn target_permissions(&self) -> Option<fs::Permissions> {
        use std::os::unix::fs::PermissionsExt;

        match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => Some(fs::Permissions::from_mode(0o644)),
        }
    }

    #[cfg(not(unix))]
    fn target_permissions(&self) -> Option<fs::Permissions> {
        fs::metadata(&self.path).ok().map(|meta| meta.permissions())
    }

    /// Load the table back, as the consuming library does at start-up
    pub fn read(&self) -> Result<ColumnTable, StoreError> {
        let bytes = fs::read(&self.path).map_err(|e| self.io_error(e))?;
        let artifact: ArtifactIn = serde_json::from_slice(&bytes)?;
        debug!(
            "Read {} rows from {}",
            artifact.rows.len(),
            self.path.display()
        );
        Ok(ColumnTable::new(artifact.rows))
    }
}

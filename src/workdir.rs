use std::env;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Process working directory switched for the lifetime of the guard
///
/// The directory that was current on [`WorkingDir::enter`] is restored on
/// drop, including when the caller returns early with an error.
#[derive(Debug)]
pub struct WorkingDir {
    previous: PathBuf,
}

impl WorkingDir {
    pub fn enter(path: impl AsRef<Path>) -> io::Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(path.as_ref())?;
        debug!(
            "Changed working directory from {} to {}",
            previous.display(),
            path.as_ref().display()
        );
        Ok(Self { previous })
    }

    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        match env::set_current_dir(&self.previous) {
            Ok(()) => debug!("Restored working directory {}", self.previous.display()),
            Err(e) => warn!(
                "Failed to restore working directory {}: {}",
                self.previous.display(),
                e
            ),
        }
    }
}

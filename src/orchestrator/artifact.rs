use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::IoError;

/// A file owned for the duration of one suite and removed when dropped,
/// whichever way the suite ends.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    /// Create `path` with `contents`. The file is removed again if writing
    /// fails part way.
    pub fn create(path: impl Into<PathBuf>, contents: &str) -> Result<Self, IoError> {
        let path = path.into();
        let mut file = File::create(&path).map_err(|e| IoError::create_error(&path, e))?;
        let artifact = Self { path };
        file.write_all(contents.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| IoError::write_error(&artifact.path, e))?;
        Ok(artifact)
    }

    /// Claim a path some other process is about to create.
    pub fn claim(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed temporary file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove temporary file"),
        }
    }
}

//! Scoped per-execution workspaces.
//!
//! A workspace is a uniquely-named temporary directory holding one
//! submission's source file and build artifacts. It never outlives the
//! execution that created it: removal happens on every exit path, either
//! through the explicit [`Workspace::close`] or through `Drop`.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Errors from workspace lifecycle operations.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("failed to create workspace: {0}")]
    Create(std::io::Error),

    #[error("failed to write source file '{file}': {source}")]
    WriteSource {
        file: String,
        source: std::io::Error,
    },

    #[error("failed to remove workspace '{id}': {source}")]
    Cleanup {
        id: String,
        source: std::io::Error,
    },
}

/// A scoped temporary directory for one execution.
pub struct Workspace {
    /// Unique identifier, used as the directory prefix and in log lines.
    id: String,
    path: PathBuf,
    dir: Option<TempDir>,
}

impl Workspace {
    /// Creates a fresh workspace under the system temp directory.
    pub fn create() -> Result<Self, WorkspaceError> {
        let id = format!("polyrun-{}", Uuid::new_v4());
        let dir = tempfile::Builder::new()
            .prefix(&id)
            .tempdir()
            .map_err(WorkspaceError::Create)?;
        let path = dir.path().to_path_buf();
        debug!("Created workspace {} at {}", id, path.display());
        Ok(Self {
            id,
            path,
            dir: Some(dir),
        })
    }

    /// The workspace identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The workspace directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the source blob under the given file name and returns its path.
    pub fn write_source(&self, file_name: &str, contents: &str) -> Result<PathBuf, WorkspaceError> {
        let path = self.path().join(file_name);
        fs::write(&path, contents).map_err(|e| WorkspaceError::WriteSource {
            file: file_name.to_string(),
            source: e,
        })?;
        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(path)
    }

    /// Removes the workspace, surfacing any removal error.
    pub fn close(mut self) -> Result<(), WorkspaceError> {
        if let Some(dir) = self.dir.take() {
            let id = self.id.clone();
            dir.close().map_err(|e| WorkspaceError::Cleanup { id, source: e })?;
        }
        Ok(())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        // Backstop for early-exit paths: TempDir removes the directory on
        // drop, but any failure there is only logged.
        if let Some(dir) = self.dir.take() {
            if let Err(e) = dir.close() {
                warn!(
                    "Failed to remove workspace {} at {}: {}",
                    self.id,
                    self.path.display(),
                    e
                );
            }
        }
    }
}

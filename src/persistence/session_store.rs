//! JSON session file on disk

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::core::SessionDocument;
use crate::error::{Result, SessionError};

/// Owner of the session document at a single path
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored document with `document`.
    ///
    /// Written to a temp file next to the target and renamed over it, so a
    /// crash mid-save leaves the previous session intact.
    pub fn save(&self, document: &SessionDocument) -> Result<()> {
        self.write(document)
            .map_err(|e| SessionError::store(&self.path, e))?;
        info!("Session saved to {:?} ({} clients)", self.path, document.len());
        Ok(())
    }

    fn write(&self, document: &SessionDocument) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(document).context("Failed to serialize session")?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create {:?}", temp_path))?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to move session into {:?}", self.path))?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "session.json".to_string());
        self.path
            .with_file_name(format!(".{}.tmp.{}", name, std::process::id()))
    }

    /// Read the stored document
    pub fn load(&self) -> Result<SessionDocument> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SessionError::NoSavedSession(self.path.clone()));
            }
            Err(e) => return Err(SessionError::store(&self.path, e)),
        };

        let document: SessionDocument = serde_json::from_str(&json)
            .map_err(|e| SessionError::store(&self.path, e))?;
        debug!("Loaded {} snapshots from {:?}", document.len(), self.path);
        Ok(document)
    }

    /// Delete the stored document. Returns whether there was one.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Session file {:?} removed", self.path);
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SessionError::store(&self.path, e)),
        }
    }
}

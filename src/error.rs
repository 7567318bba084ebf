//! Errors that abort a whole save, restore or clear pass

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    /// hyprctl could not be run, exited non-zero or printed garbage
    #[error("Failed to get clients from Hyprland: {0}")]
    ClientsUnavailable(String),

    #[error("No saved session found at {}", .0.display())]
    NoSavedSession(PathBuf),

    #[error("Session file {} is unusable: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SessionError {
    pub fn store(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        Self::Store {
            path: path.into(),
            source: source.into(),
        }
    }
}

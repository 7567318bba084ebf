//! Session data model - What gets recorded for each window

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use super::settings::DEFAULT_WORKSPACE;

/// Ordered list of snapshots, persisted as a single JSON array
pub type SessionDocument = Vec<ClientSnapshot>;

/// A client as reported by `hyprctl clients -j`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawClient {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub workspace: Option<WorkspaceRef>,
    #[serde(default)]
    pub pid: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorkspaceRef {
    #[serde(default)]
    pub name: String,
}

impl RawClient {
    pub fn new(class: &str, workspace: Option<&str>, pid: i64) -> Self {
        Self {
            class: Some(class.to_string()),
            workspace: workspace.map(|name| WorkspaceRef {
                name: name.to_string(),
            }),
            pid,
        }
    }

    /// Class, if it is present and non-empty
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref().filter(|c| !c.is_empty())
    }

    pub fn workspace_name(&self) -> Option<&str> {
        self.workspace
            .as_ref()
            .map(|w| w.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Owning process id; Hyprland reports -1 for clients it cannot attribute
    pub fn pid(&self) -> Option<u32> {
        u32::try_from(self.pid).ok().filter(|pid| *pid > 0)
    }
}

/// Class-specific state captured beyond class and workspace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Enrichment {
    Terminal {
        cwd: Option<PathBuf>,
        in_nvim: bool,
    },
    MediaPlayer {
        mpv_file: Option<PathBuf>,
    },
    #[default]
    None,
}

/// Persisted record of one client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRecord", into = "SnapshotRecord")]
pub struct ClientSnapshot {
    pub class: String,
    pub workspace: String,
    pub extra: Enrichment,
}

impl ClientSnapshot {
    pub fn new(class: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            workspace: workspace.into(),
            extra: Enrichment::None,
        }
    }

    pub fn with_extra(mut self, extra: Enrichment) -> Self {
        self.extra = extra;
        self
    }
}

/// Flat on-disk shape of a snapshot.
///
/// `cwd` and `mpv_file` distinguish "absent" from `null`: a terminal whose
/// directory could not be resolved is written as `"cwd": null`, which still
/// marks the record as a terminal when it is read back.
#[derive(Serialize, Deserialize)]
struct SnapshotRecord {
    class: String,
    #[serde(default)]
    workspace: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    cwd: Option<Option<PathBuf>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    in_nvim: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    mpv_file: Option<Option<PathBuf>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<PathBuf>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<PathBuf>::deserialize(deserializer).map(Some)
}

impl From<ClientSnapshot> for SnapshotRecord {
    fn from(snapshot: ClientSnapshot) -> Self {
        let mut record = SnapshotRecord {
            class: snapshot.class,
            workspace: Some(snapshot.workspace),
            cwd: None,
            in_nvim: None,
            mpv_file: None,
        };
        match snapshot.extra {
            Enrichment::Terminal { cwd, in_nvim } => {
                record.cwd = Some(cwd);
                record.in_nvim = Some(in_nvim);
            }
            Enrichment::MediaPlayer { mpv_file } => record.mpv_file = Some(mpv_file),
            Enrichment::None => {}
        }
        record
    }
}

impl TryFrom<SnapshotRecord> for ClientSnapshot {
    type Error = String;

    fn try_from(record: SnapshotRecord) -> Result<Self, Self::Error> {
        if record.class.is_empty() {
            return Err("snapshot has an empty class".to_string());
        }

        let extra = if let Some(mpv_file) = record.mpv_file {
            Enrichment::MediaPlayer { mpv_file }
        } else if record.cwd.is_some() || record.in_nvim.is_some() {
            Enrichment::Terminal {
                cwd: record.cwd.flatten(),
                in_nvim: record.in_nvim.unwrap_or(false),
            }
        } else {
            Enrichment::None
        };

        // Documents written by older versions stored `null` for clients
        // without a workspace
        let workspace = record
            .workspace
            .filter(|ws| !ws.is_empty())
            .unwrap_or_else(|| DEFAULT_WORKSPACE.to_string());

        Ok(Self {
            class: record.class,
            workspace,
            extra,
        })
    }
}

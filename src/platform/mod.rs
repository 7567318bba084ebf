//! Desktop integrations: the window manager and the notification daemon

pub mod hyprland;
pub mod notify;

use std::process::Output;

use crate::core::RawClient;
use crate::error::Result;

pub use hyprland::Hyprctl;
pub use notify::NotifySend;

/// The compositor side of a session: who is open, and how to launch things
pub trait WindowManager {
    /// List the current graphical clients
    fn clients(&self) -> Result<Vec<RawClient>>;

    /// Launch `command` on `workspace`
    fn exec(&self, workspace: &str, command: &str) -> anyhow::Result<()>;
}

/// Notification urgency, as understood by `notify-send -u`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::Critical => "critical",
        }
    }
}

/// Fire-and-forget desktop notifications
pub trait Notifier {
    fn notify(&self, message: &str, urgency: Urgency);
}

pub(crate) fn stderr_or_status(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }

    format!("exit status {}", output.status)
}

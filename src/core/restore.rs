//! Restore - Replaying a session document through the window manager

use tracing::{debug, info, warn};

use super::app_kind::AppKind;
use super::settings::Settings;
use super::snapshot::SessionDocument;
use crate::platform::WindowManager;

/// Outcome of a restore pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    /// Launch commands accepted by the window manager
    pub restored: usize,
    /// Snapshots with no usable launch command
    pub skipped: usize,
    /// Launch commands the window manager rejected
    pub failed: usize,
}

impl RestoreSummary {
    /// Human readable one-liner for the notification
    pub fn message(&self) -> String {
        let mut msg = format!("Restored {} apps", self.restored);
        if self.skipped > 0 {
            msg.push_str(&format!(" (skipped {})", self.skipped));
        }
        if self.failed > 0 {
            msg.push_str(&format!(" (failed {})", self.failed));
        }
        msg
    }
}

/// Launch every snapshot in document order. Each launch is independent: a
/// failed dispatch is counted and the pass moves on.
pub fn restore(
    document: &SessionDocument,
    window_manager: &dyn WindowManager,
    settings: &Settings,
) -> RestoreSummary {
    let mut summary = RestoreSummary::default();

    for snapshot in document {
        let kind = AppKind::classify(&snapshot.class, settings);
        let Some(command) = kind.launch_command(snapshot, settings) else {
            debug!("Skipping {} '{}'", kind.label(), snapshot.class);
            summary.skipped += 1;
            continue;
        };

        match window_manager.exec(&snapshot.workspace, &command) {
            Ok(()) => {
                debug!("Launched '{}' on workspace {}", command, snapshot.workspace);
                summary.restored += 1;
            }
            Err(e) => {
                warn!("Failed to restore '{}': {:#}", snapshot.class, e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Restore finished: {} restored, {} skipped, {} failed",
        summary.restored, summary.skipped, summary.failed
    );
    summary
}

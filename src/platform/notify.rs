//! Desktop notifications through `notify-send`

use std::process::{Command, Stdio};

use tracing::{info, warn};

use super::{Notifier, Urgency};

/// Title shown on every notification
pub const NOTIFICATION_TITLE: &str = "Hypr Session";

#[derive(Debug, Default)]
pub struct NotifySend;

impl Notifier for NotifySend {
    fn notify(&self, message: &str, urgency: Urgency) {
        info!("{}", message);

        let status = Command::new("notify-send")
            .args(["-u", urgency.as_str(), NOTIFICATION_TITLE, message])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => warn!("notify-send exited with {}", status),
            Err(e) => warn!("Failed to send notification: {}", e),
        }
    }
}

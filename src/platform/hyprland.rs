//! Hyprland integration through `hyprctl`

use std::process::Command;

use anyhow::Context;
use tracing::{debug, trace};

use super::{stderr_or_status, WindowManager};
use crate::core::RawClient;
use crate::error::{Result, SessionError};

/// Talks to the running compositor with `hyprctl`
pub struct Hyprctl {
    /// Prefix placed in front of every launched command (e.g. `uwsm app --`)
    launcher: Vec<String>,
}

impl Hyprctl {
    pub fn new(launcher: Vec<String>) -> Self {
        Self { launcher }
    }

    /// Build the argument for `hyprctl dispatch exec`
    pub fn exec_string(&self, workspace: &str, command: &str) -> String {
        let mut launch = format!("[workspace {}]", workspace);
        for part in &self.launcher {
            launch.push(' ');
            launch.push_str(part);
        }
        launch.push(' ');
        launch.push_str(command);
        launch
    }
}

/// Parse the output of `hyprctl clients -j`
pub fn parse_clients(json: &str) -> Result<Vec<RawClient>> {
    serde_json::from_str(json)
        .map_err(|e| SessionError::ClientsUnavailable(format!("unexpected hyprctl output: {}", e)))
}

impl WindowManager for Hyprctl {
    fn clients(&self) -> Result<Vec<RawClient>> {
        let output = Command::new("hyprctl")
            .args(["clients", "-j"])
            .output()
            .map_err(|e| SessionError::ClientsUnavailable(format!("cannot run hyprctl: {}", e)))?;

        if !output.status.success() {
            return Err(SessionError::ClientsUnavailable(stderr_or_status(&output)));
        }

        let clients = parse_clients(&String::from_utf8_lossy(&output.stdout))?;
        debug!("hyprctl reported {} clients", clients.len());
        Ok(clients)
    }

    fn exec(&self, workspace: &str, command: &str) -> anyhow::Result<()> {
        let launch = self.exec_string(workspace, command);
        trace!("hyprctl dispatch exec {}", launch);

        let output = Command::new("hyprctl")
            .args(["dispatch", "exec", launch.as_str()])
            .output()
            .context("Failed to run hyprctl")?;

        if !output.status.success() {
            anyhow::bail!("hyprctl dispatch failed: {}", stderr_or_status(&output));
        }

        // hyprctl exits 0 even when the dispatcher rejects the request
        let reply = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !reply.is_empty() && reply != "ok" {
            anyhow::bail!("hyprctl dispatch failed: {}", reply);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_string_scopes_to_workspace() {
        let hyprctl = Hyprctl::new(vec!["uwsm".into(), "app".into(), "--".into()]);
        assert_eq!(
            hyprctl.exec_string("3", "firefox"),
            "[workspace 3] uwsm app -- firefox"
        );

        let direct = Hyprctl::new(Vec::new());
        assert_eq!(direct.exec_string("special:term", "kitty"), "[workspace special:term] kitty");
    }

    #[test]
    fn garbage_output_is_a_clients_error() {
        let err = parse_clients("hyprctl: socket not found").unwrap_err();
        assert!(matches!(err, SessionError::ClientsUnavailable(_)));
    }

    #[test]
    fn client_without_workspace_parses() {
        let clients = parse_clients(r#"[{ "class": "firefox", "pid": 12 }]"#).unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].workspace_name(), None);
    }
}

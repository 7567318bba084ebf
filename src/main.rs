//! hypr-session - Save and restore Hyprland desktop sessions
//!
//! Records every open window's class and workspace (plus the working
//! directory of terminals and the open file of media players) and relaunches
//! them later on the same workspaces.

#![allow(dead_code)] // Parts of the core API are only used by tests

mod core;
mod error;
mod persistence;
mod platform;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::{SessionManager, Settings, SystemProcessTable};
use crate::platform::{Hyprctl, Notifier, NotifySend, Urgency};

/// Application name constant
pub const APP_NAME: &str = "hypr-session";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "Usage: hypr-session [save|restore|clear]";

#[derive(Debug, Parser)]
#[command(name = APP_NAME, version, about = "Save and restore Hyprland sessions")]
struct Cli {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Action {
    /// Capture the open windows and write the session file
    Save,
    /// Relaunch the saved windows on their workspaces
    Restore,
    /// Delete the session file
    Clear,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            let _ = e.print();
            NotifySend.notify(USAGE, Urgency::Critical);
            return ExitCode::FAILURE;
        }
    };

    let settings = match Settings::load(&Settings::default_config_path()) {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(false);
            tracing::error!("{}", e);
            NotifySend.notify(&e.to_string(), Urgency::Critical);
            return ExitCode::FAILURE;
        }
    };

    init_logging(settings.debug_logging);
    info!("{} v{} running {:?}", APP_NAME, APP_VERSION, cli.action);

    let hyprctl = Hyprctl::new(settings.launcher.clone());
    let manager = SessionManager::new(settings, hyprctl, NotifySend);

    let outcome = match cli.action {
        Action::Save => manager.save(SystemProcessTable::new()).map(|_| ()),
        Action::Restore => manager.restore().map(|_| ()),
        Action::Clear => manager.clear().map(|_| ()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            manager.report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize the logging system
fn init_logging(debug: bool) {
    let default = if debug {
        "hypr_session=debug"
    } else {
        "hypr_session=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_parse() {
        let cli = Cli::try_parse_from(["hypr-session", "restore"]).unwrap();
        assert_eq!(cli.action, Action::Restore);
        let cli = Cli::try_parse_from(["hypr-session", "clear"]).unwrap();
        assert_eq!(cli.action, Action::Clear);
    }

    #[test]
    fn missing_or_unknown_action_is_rejected() {
        assert!(Cli::try_parse_from(["hypr-session"]).is_err());
        assert!(Cli::try_parse_from(["hypr-session", "reload"]).is_err());
        assert!(Cli::try_parse_from(["hypr-session", "save", "--force"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

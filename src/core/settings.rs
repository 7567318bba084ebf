//! Application settings management

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SessionError};

/// Workspace used when a client reports none
pub const DEFAULT_WORKSPACE: &str = "1";

/// Name of the optional configuration file inside `~/.config/hypr`
const CONFIG_FILE_NAME: &str = "hypr-session.json";

/// Built-in class -> launch command table
const BUILTIN_APPS: &[(&str, &str)] = &[
    ("firefox", "firefox"),
    ("code", "code"),
    ("thunar", "thunar"),
    ("org.gnome.Nautilus", "nautilus"),
    (
        "chrome-chatgpt.com__-Default",
        "chromium -app=https://chat.openai.com",
    ),
    (
        "chrome-keep.google.com__-Default",
        "chromium -app=https://keep.google.com",
    ),
    (
        "chrome-drive.google.com__-Default",
        "chromium -app=https://drive.google.com",
    ),
    (
        "chrome-web.whatsapp.com__-Default",
        "chromium -app=https://web.whatsapp.com",
    ),
    ("li.oever.aether", "aether"),
    ("org.gnome.Evince", "evince"),
    ("Brave-browser", "brave-browser"),
    ("dev.zed.Zed", "zeditor"),
];

/// How to open a terminal emulator in a given directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalProfile {
    /// Window class reported by Hyprland (matched case-insensitively)
    pub class: String,
    /// Program to launch
    pub command: String,
    /// Flag that sets the starting directory
    pub directory_flag: String,
    /// Flag placed before a program to run instead of the shell, if the
    /// terminal needs one
    #[serde(default)]
    pub exec_flag: Option<String>,
}

impl TerminalProfile {
    fn new(class: &str, command: &str, directory_flag: &str, exec_flag: Option<&str>) -> Self {
        Self {
            class: class.to_string(),
            command: command.to_string(),
            directory_flag: directory_flag.to_string(),
            exec_flag: exec_flag.map(str::to_string),
        }
    }
}

/// How to reopen a media player on a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPlayerProfile {
    pub class: String,
    pub command: String,
    /// Flag that starts playback paused
    pub pause_flag: String,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the session document lives (defaults to ~/.config/hypr/session.json)
    pub session_file: Option<PathBuf>,
    /// Workspace recorded for clients without one
    pub fallback_workspace: String,
    /// Prefix for every launch command
    pub launcher: Vec<String>,
    /// Terminal emulators whose working directory is captured
    pub terminals: Vec<TerminalProfile>,
    /// Media players whose open file is captured
    pub media_players: Vec<MediaPlayerProfile>,
    /// Editor detected inside terminals and relaunched on restore
    pub editor: String,
    /// Process names preferred when picking a terminal's child
    pub editor_names: Vec<String>,
    /// Shell process names, the next best child of a terminal
    pub shell_names: Vec<String>,
    /// Extra class -> command entries, overriding the built-in table
    pub apps: BTreeMap<String, String>,
    /// Enable debug logging
    pub debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_file: None,
            fallback_workspace: DEFAULT_WORKSPACE.to_string(),
            launcher: vec!["uwsm".into(), "app".into(), "--".into()],
            terminals: vec![
                TerminalProfile::new("kitty", "kitty", "--directory", None),
                TerminalProfile::new(
                    "Alacritty",
                    "alacritty",
                    "--working-directory",
                    Some("-e"),
                ),
                TerminalProfile::new("foot", "foot", "--working-directory", None),
            ],
            media_players: vec![MediaPlayerProfile {
                class: "mpv".into(),
                command: "mpv".into(),
                pause_flag: "--pause".into(),
            }],
            editor: "nvim".into(),
            editor_names: ["nvim", "vim", "vi", "hx", "nano"]
                .into_iter()
                .map(String::from)
                .collect(),
            shell_names: ["bash", "zsh", "fish", "sh", "dash", "nu"]
                .into_iter()
                .map(String::from)
                .collect(),
            apps: BTreeMap::new(),
            debug_logging: false,
        }
    }
}

impl Settings {
    /// Default location of the optional configuration file
    pub fn default_config_path() -> PathBuf {
        Self::hypr_config_dir().join(CONFIG_FILE_NAME)
    }

    /// Load settings from `path`, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(SessionError::store(path, e)),
        };

        let mut settings: Settings =
            serde_json::from_str(&json).map_err(|source| SessionError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate();
        debug!("Loaded config from {:?}", path);
        Ok(settings)
    }

    /// Get the session file path, using default if not set
    pub fn get_session_file(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| Self::hypr_config_dir().join("session.json"))
    }

    fn hypr_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hypr")
    }

    /// Look up the launch command for a class, user entries first
    pub fn app_command(&self, class: &str) -> Option<&str> {
        self.apps.get(class).map(String::as_str).or_else(|| {
            BUILTIN_APPS
                .iter()
                .find(|(name, _)| *name == class)
                .map(|(_, cmd)| *cmd)
        })
    }

    pub fn terminal(&self, class: &str) -> Option<&TerminalProfile> {
        self.terminals
            .iter()
            .find(|t| t.class.eq_ignore_ascii_case(class))
    }

    pub fn media_player(&self, class: &str) -> Option<&MediaPlayerProfile> {
        self.media_players
            .iter()
            .find(|m| m.class.eq_ignore_ascii_case(class))
    }

    /// Validate settings and fix any invalid values
    pub fn validate(&mut self) {
        if self.fallback_workspace.trim().is_empty() {
            self.fallback_workspace = DEFAULT_WORKSPACE.to_string();
        }
        if self.editor.trim().is_empty() {
            self.editor = "nvim".to_string();
        }
        self.launcher.retain(|part| !part.trim().is_empty());
        self.terminals
            .retain(|t| !t.class.is_empty() && !t.command.is_empty());
        self.media_players
            .retain(|m| !m.class.is_empty() && !m.command.is_empty());
        self.apps.retain(|class, cmd| !class.is_empty() && !cmd.is_empty());
    }
}

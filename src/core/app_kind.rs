//! Application kinds - How each recognised class is captured and relaunched

use std::path::Path;

use tracing::debug;

use super::process::{ProcessInspector, ProcessTable};
use super::settings::{MediaPlayerProfile, Settings, TerminalProfile};
use super::snapshot::{ClientSnapshot, Enrichment};

/// What a window class is, as far as capture and restore are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKind<'a> {
    /// Terminal emulator: working directory and nested editor are captured
    Terminal(&'a TerminalProfile),
    /// Media player: the open file is captured
    MediaPlayer(&'a MediaPlayerProfile),
    /// Anything else, relaunched from the class -> command table
    Mapped,
}

impl<'a> AppKind<'a> {
    /// Classify a window class (case-insensitive)
    pub fn classify(class: &str, settings: &'a Settings) -> Self {
        if let Some(terminal) = settings.terminal(class) {
            Self::Terminal(terminal)
        } else if let Some(player) = settings.media_player(class) {
            Self::MediaPlayer(player)
        } else {
            Self::Mapped
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Terminal(_) => "terminal",
            Self::MediaPlayer(_) => "media player",
            Self::Mapped => "app",
        }
    }

    /// Gather the class-specific state of a running client
    pub fn enrich<T: ProcessTable>(
        &self,
        pid: Option<u32>,
        inspector: &ProcessInspector<T>,
        settings: &Settings,
    ) -> Enrichment {
        match self {
            Self::Terminal(_) => {
                let Some(pid) = pid else {
                    return Enrichment::Terminal {
                        cwd: None,
                        in_nvim: false,
                    };
                };
                let target = inspector.find_preferred_child(pid).unwrap_or(pid);
                Enrichment::Terminal {
                    cwd: inspector.working_directory(target),
                    in_nvim: inspector.has_descendant(pid, &settings.editor),
                }
            }
            Self::MediaPlayer(_) => Enrichment::MediaPlayer {
                mpv_file: pid.and_then(|pid| inspector.command_line_file(pid)),
            },
            Self::Mapped => Enrichment::None,
        }
    }

    /// Command that brings the snapshot back, or `None` if it cannot be
    /// restored
    pub fn launch_command(&self, snapshot: &ClientSnapshot, settings: &Settings) -> Option<String> {
        match self {
            Self::Terminal(terminal) => Some(terminal_command(terminal, snapshot, settings)),
            Self::MediaPlayer(player) => {
                let file = match &snapshot.extra {
                    Enrichment::MediaPlayer {
                        mpv_file: Some(file),
                    } => file,
                    _ => return None,
                };
                if !file.exists() {
                    debug!("{} file {:?} is gone", snapshot.class, file);
                    return None;
                }
                Some(format!(
                    "{} {} {}",
                    player.command,
                    player.pause_flag,
                    shell_quote(file)
                ))
            }
            Self::Mapped => settings.app_command(&snapshot.class).map(str::to_string),
        }
    }
}

fn terminal_command(
    terminal: &TerminalProfile,
    snapshot: &ClientSnapshot,
    settings: &Settings,
) -> String {
    let (cwd, in_nvim) = match &snapshot.extra {
        Enrichment::Terminal { cwd, in_nvim } => (cwd.as_deref(), *in_nvim),
        _ => (None, false),
    };

    let Some(cwd) = cwd.filter(|dir| dir.is_dir()) else {
        return terminal.command.clone();
    };

    let dir = shell_quote(cwd);
    let mut cmd = format!("{} {} {}", terminal.command, terminal.directory_flag, dir);
    if in_nvim {
        if let Some(flag) = &terminal.exec_flag {
            cmd.push(' ');
            cmd.push_str(flag);
        }
        cmd.push(' ');
        cmd.push_str(&settings.editor);
        cmd.push(' ');
        cmd.push_str(&dir);
    }
    cmd
}

/// Quote a path for the shell Hyprland runs exec strings through
fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.to_string_lossy().replace('\'', r"'\''"))
}

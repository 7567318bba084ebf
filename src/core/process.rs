//! Process inspection - Answering questions about a client's process tree
//!
//! Every query degrades to "unknown" (`None` / `false`) instead of failing:
//! processes can exit between being listed and being inspected, and one
//! uninspectable client must never abort a capture pass.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::trace;

use super::settings::Settings;

/// Read access to the process table
pub trait ProcessTable {
    /// Direct children of `pid` in listing order, `None` if the listing failed
    fn children(&self, pid: u32) -> Option<Vec<u32>>;

    /// Command name of `pid`
    fn name(&self, pid: u32) -> Option<String>;

    /// Current working directory of `pid`
    fn cwd(&self, pid: u32) -> Option<PathBuf>;

    /// Full argument vector of `pid`, program name included
    fn cmdline(&self, pid: u32) -> Option<Vec<String>>;
}

/// Process tree queries used to enrich terminal and media player snapshots
pub struct ProcessInspector<T> {
    table: T,
    editor_names: Vec<String>,
    shell_names: Vec<String>,
}

impl<T: ProcessTable> ProcessInspector<T> {
    pub fn new(table: T, settings: &Settings) -> Self {
        Self {
            table,
            editor_names: settings.editor_names.clone(),
            shell_names: settings.shell_names.clone(),
        }
    }

    /// Pick the most meaningful direct child of a terminal: an editor if one
    /// is running, otherwise a shell, otherwise whatever comes first.
    pub fn find_preferred_child(&self, pid: u32) -> Option<u32> {
        let children = self.table.children(pid)?;
        let named: Vec<(u32, String)> = children
            .iter()
            .map(|&child| (child, self.table.name(child).unwrap_or_default()))
            .collect();

        let pick = |patterns: &[String]| {
            named
                .iter()
                .find(|(_, name)| patterns.iter().any(|p| p.eq_ignore_ascii_case(name)))
                .map(|(child, _)| *child)
        };

        pick(&self.editor_names)
            .or_else(|| pick(&self.shell_names))
            .or_else(|| children.first().copied())
    }

    pub fn working_directory(&self, pid: u32) -> Option<PathBuf> {
        let cwd = self.table.cwd(pid);
        if cwd.is_none() {
            trace!("No working directory for pid {}", pid);
        }
        cwd
    }

    /// Whether any process below `pid` is named exactly `target`.
    ///
    /// Walks parent -> child edges with an explicit stack. A pid is never
    /// expanded twice, so malformed tables with cycles still terminate.
    pub fn has_descendant(&self, pid: u32, target: &str) -> bool {
        let mut visited = HashSet::from([pid]);
        let mut stack = vec![pid];

        while let Some(node) = stack.pop() {
            let Some(children) = self.table.children(node) else {
                trace!("Could not list children of pid {}", node);
                continue;
            };

            for child in children {
                if !visited.insert(child) {
                    continue;
                }
                if self.table.name(child).as_deref() == Some(target) {
                    return true;
                }
                stack.push(child);
            }
        }

        false
    }

    /// The file a process was opened on: the last non-flag argument that
    /// exists on disk. Relative arguments resolve against the process's own
    /// working directory.
    pub fn command_line_file(&self, pid: u32) -> Option<PathBuf> {
        let args = self.table.cmdline(pid)?;
        let cwd = self.table.cwd(pid);

        args.iter()
            .skip(1)
            .rev()
            .filter(|arg| !arg.is_empty() && !arg.starts_with('-'))
            .filter_map(|arg| {
                let path = PathBuf::from(arg);
                if path.is_absolute() {
                    Some(path)
                } else {
                    cwd.as_ref().map(|dir| dir.join(path))
                }
            })
            .find(|path| path.exists())
    }
}

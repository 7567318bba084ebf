//! Live process table backed by sysinfo

use std::collections::HashMap;
use std::path::PathBuf;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use tracing::debug;

use super::process::ProcessTable;

/// Snapshot of the user's process table taken once per capture pass
pub struct SystemProcessTable {
    /// System information
    system: System,
    /// Parent pid -> child pids, sorted by pid
    children: HashMap<u32, Vec<u32>>,
}

impl SystemProcessTable {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::new()
                .with_cwd(UpdateKind::OnlyIfNotSet)
                .with_cmd(UpdateKind::OnlyIfNotSet),
        );

        let mut children: HashMap<u32, Vec<u32>> = HashMap::new();
        for (pid, process) in system.processes() {
            // Linux threads show up as tasks of their process, skip them
            if process.thread_kind().is_some() {
                continue;
            }
            if let Some(parent) = process.parent() {
                children
                    .entry(parent.as_u32())
                    .or_default()
                    .push(pid.as_u32());
            }
        }
        for list in children.values_mut() {
            list.sort_unstable();
        }

        debug!("Process table refreshed ({} processes)", system.processes().len());
        Self { system, children }
    }
}

impl Default for SystemProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable for SystemProcessTable {
    fn children(&self, pid: u32) -> Option<Vec<u32>> {
        self.system.process(Pid::from_u32(pid))?;
        Some(self.children.get(&pid).cloned().unwrap_or_default())
    }

    fn name(&self, pid: u32) -> Option<String> {
        self.system
            .process(Pid::from_u32(pid))
            .map(|p| p.name().to_string_lossy().to_string())
    }

    fn cwd(&self, pid: u32) -> Option<PathBuf> {
        self.system
            .process(Pid::from_u32(pid))
            .and_then(|p| p.cwd().map(|c| c.to_path_buf()))
            .filter(|c| !c.as_os_str().is_empty())
    }

    fn cmdline(&self, pid: u32) -> Option<Vec<String>> {
        let process = self.system.process(Pid::from_u32(pid))?;
        let cmd: Vec<String> = process
            .cmd()
            .iter()
            .map(|s| s.to_string_lossy().to_string())
            .collect();
        (!cmd.is_empty()).then_some(cmd)
    }
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    #[test]
    fn sees_the_current_process() {
        let table = SystemProcessTable::new();
        let me = std::process::id();

        assert!(table.name(me).is_some());
        assert!(table.children(me).is_some());
        assert!(table.cmdline(me).is_some());
        assert_eq!(
            table.cwd(me).map(|c| c.canonicalize().unwrap()),
            Some(std::env::current_dir().unwrap().canonicalize().unwrap())
        );
    }

    #[test]
    fn unknown_pid_is_unknown() {
        let table = SystemProcessTable::new();
        let pid = u32::MAX - 1;

        assert_eq!(table.children(pid), None);
        assert_eq!(table.name(pid), None);
        assert_eq!(table.cwd(pid), None);
    }
}

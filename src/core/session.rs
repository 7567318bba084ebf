//! Session manager - Wires capture, storage and restore to the desktop

use tracing::{error, info};

use super::capture::capture;
use super::process::{ProcessInspector, ProcessTable};
use super::restore::{restore, RestoreSummary};
use super::settings::Settings;
use crate::error::{Result, SessionError};
use crate::persistence::SessionStore;
use crate::platform::{Notifier, Urgency, WindowManager};

/// Runs save / restore / clear passes and reports their outcome
pub struct SessionManager<W, N> {
    /// Application settings
    settings: Settings,
    /// Session document storage
    store: SessionStore,
    window_manager: W,
    notifier: N,
}

impl<W: WindowManager, N: Notifier> SessionManager<W, N> {
    pub fn new(settings: Settings, window_manager: W, notifier: N) -> Self {
        let store = SessionStore::new(settings.get_session_file());
        Self {
            settings,
            store,
            window_manager,
            notifier,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Capture every open client and overwrite the stored session
    pub fn save(&self, table: impl ProcessTable) -> Result<usize> {
        info!("Saving session to {:?}", self.store.path());
        let clients = self.window_manager.clients()?;
        let inspector = ProcessInspector::new(table, &self.settings);
        let document = capture(&clients, &inspector, &self.settings);

        self.store.save(&document)?;
        self.notifier.notify(
            &format!("Session saved ({} apps).", document.len()),
            Urgency::Normal,
        );
        Ok(document.len())
    }

    /// Relaunch the stored session on its workspaces
    pub fn restore(&self) -> Result<RestoreSummary> {
        info!("Restoring session from {:?}", self.store.path());
        let document = self.store.load()?;
        let summary = restore(&document, &self.window_manager, &self.settings);

        let urgency = if summary.failed > 0 {
            Urgency::Normal
        } else {
            Urgency::Low
        };
        self.notifier.notify(&summary.message(), urgency);
        Ok(summary)
    }

    /// Forget the stored session. Clearing twice is not an error.
    pub fn clear(&self) -> Result<bool> {
        let removed = self.store.clear()?;
        let message = if removed {
            "Session cleared."
        } else {
            "No saved session to clear."
        };
        self.notifier.notify(message, Urgency::Normal);
        Ok(removed)
    }

    /// Tell the user a pass was aborted
    pub fn report_failure(&self, err: &SessionError) {
        error!("{}", err);
        self.notifier.notify(&err.to_string(), Urgency::Critical);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::process::tests::FakeTable;
    use crate::core::restore::tests::RecordingWm;
    use crate::core::snapshot::{Enrichment, RawClient};
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: RefCell<Vec<(String, Urgency)>>,
    }

    impl Notifier for &RecordingNotifier {
        fn notify(&self, message: &str, urgency: Urgency) {
            self.sent.borrow_mut().push((message.to_string(), urgency));
        }
    }

    fn settings_in(dir: &TempDir) -> Settings {
        Settings {
            session_file: Some(dir.path().join("session.json")),
            ..Default::default()
        }
    }

    #[test]
    fn save_then_restore_replays_the_session() {
        let dir = TempDir::new().unwrap();
        let proj = dir.path().join("proj");
        std::fs::create_dir(&proj).unwrap();

        let table = FakeTable::default()
            .with(50, "kitty", None)
            .with(51, "zsh", Some(50))
            .in_dir(51, &proj);
        let notes = RecordingNotifier::default();
        let wm = RecordingWm {
            clients: vec![
                RawClient::new("kitty", Some("2"), 50),
                RawClient::new("", Some("2"), 60),
                RawClient::new("firefox", None, 70),
            ],
            ..Default::default()
        };
        let manager = SessionManager::new(settings_in(&dir), wm, &notes);

        assert_eq!(manager.save(table).unwrap(), 2);
        let stored = manager.store().load().unwrap();
        assert_eq!(
            stored[0].extra,
            Enrichment::Terminal {
                cwd: Some(proj.clone()),
                in_nvim: false,
            }
        );
        assert_eq!(stored[1].workspace, "1");

        let summary = manager.restore().unwrap();
        assert_eq!(
            summary,
            RestoreSummary {
                restored: 2,
                skipped: 0,
                failed: 0
            }
        );
        assert_eq!(
            *manager.window_manager.launched.borrow(),
            vec![
                ("2".to_string(), format!("kitty --directory '{}'", proj.display())),
                ("1".to_string(), "firefox".to_string()),
            ]
        );
        assert_eq!(
            *notes.sent.borrow(),
            vec![
                ("Session saved (2 apps).".to_string(), Urgency::Normal),
                ("Restored 2 apps".to_string(), Urgency::Low),
            ]
        );
    }

    #[test]
    fn unreachable_window_manager_aborts_save() {
        let dir = TempDir::new().unwrap();
        let notes = RecordingNotifier::default();
        let wm = RecordingWm {
            unreachable: true,
            ..Default::default()
        };
        let manager = SessionManager::new(settings_in(&dir), wm, &notes);

        let err = manager.save(FakeTable::default()).unwrap_err();
        assert!(matches!(err, SessionError::ClientsUnavailable(_)));
        assert!(!manager.store().path().exists());

        manager.report_failure(&err);
        assert_eq!(notes.sent.borrow()[0].1, Urgency::Critical);
    }

    #[test]
    fn restore_without_session_is_fatal() {
        let dir = TempDir::new().unwrap();
        let notes = RecordingNotifier::default();
        let manager = SessionManager::new(settings_in(&dir), RecordingWm::default(), &notes);

        assert!(matches!(
            manager.restore(),
            Err(SessionError::NoSavedSession(_))
        ));
        assert!(notes.sent.borrow().is_empty());
    }

    #[test]
    fn clear_twice_succeeds() {
        let dir = TempDir::new().unwrap();
        let notes = RecordingNotifier::default();
        let manager = SessionManager::new(settings_in(&dir), RecordingWm::default(), &notes);
        manager
            .store()
            .save(&vec![crate::core::ClientSnapshot::new("code", "1")])
            .unwrap();

        assert!(manager.clear().unwrap());
        assert!(!manager.clear().unwrap());
        assert_eq!(
            notes.sent.borrow().last().map(|(m, _)| m.clone()),
            Some("No saved session to clear.".to_string())
        );
        assert_eq!(
            manager.store().path(),
            dir.path().join("session.json").as_path()
        );
    }
}

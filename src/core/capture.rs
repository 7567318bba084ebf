//! Capture - Turning the compositor's client list into a session document

use tracing::{debug, info};

use super::app_kind::AppKind;
use super::process::{ProcessInspector, ProcessTable};
use super::settings::Settings;
use super::snapshot::{ClientSnapshot, RawClient, SessionDocument};

/// Build snapshots for every client that has a class, in enumeration order
pub fn capture<T: ProcessTable>(
    clients: &[RawClient],
    inspector: &ProcessInspector<T>,
    settings: &Settings,
) -> SessionDocument {
    let mut document = SessionDocument::with_capacity(clients.len());

    for client in clients {
        let Some(class) = client.class() else {
            debug!("Skipping client without class (pid {})", client.pid);
            continue;
        };

        let workspace = client
            .workspace_name()
            .unwrap_or(settings.fallback_workspace.as_str());
        let kind = AppKind::classify(class, settings);
        let extra = kind.enrich(client.pid(), inspector, settings);

        debug!(
            "Captured {} '{}' on workspace {}: {:?}",
            kind.label(),
            class,
            workspace,
            extra
        );
        document.push(ClientSnapshot::new(class, workspace).with_extra(extra));
    }

    info!("Captured {} of {} clients", document.len(), clients.len());
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::process::tests::FakeTable;
    use crate::core::snapshot::Enrichment;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn clients_without_class_are_dropped() {
        let settings = Settings::default();
        let inspector = ProcessInspector::new(FakeTable::default(), &settings);
        let clients = vec![
            RawClient::new("firefox", Some("2"), 10),
            RawClient::new("", Some("3"), 11),
            RawClient {
                class: None,
                ..Default::default()
            },
            RawClient::new("code", Some("4"), 12),
        ];

        let doc = capture(&clients, &inspector, &settings);
        let classes: Vec<&str> = doc.iter().map(|s| s.class.as_str()).collect();
        assert_eq!(classes, vec!["firefox", "code"]);
    }

    #[test]
    fn missing_workspace_falls_back_to_one() {
        let settings = Settings::default();
        let inspector = ProcessInspector::new(FakeTable::default(), &settings);
        let clients = vec![
            RawClient::new("firefox", None, 10),
            RawClient::new("code", Some(""), 11),
        ];

        let doc = capture(&clients, &inspector, &settings);
        assert!(doc.iter().all(|s| s.workspace == "1"));
    }

    #[test]
    fn enrichment_follows_the_class() {
        let dir = TempDir::new().unwrap();
        let movie = dir.path().join("a.mp4");
        std::fs::write(&movie, b"").unwrap();
        let movie_str = movie.to_string_lossy().to_string();

        let settings = Settings::default();
        let table = FakeTable::default()
            .with(100, "kitty", None)
            .with(101, "fish", Some(100))
            .in_dir(101, "/srv/work")
            .with(200, "mpv", None)
            .args(200, &["mpv", "--pause", &movie_str]);
        let inspector = ProcessInspector::new(table, &settings);
        let clients = vec![
            RawClient::new("Kitty", Some("2"), 100),
            RawClient::new("mpv", Some("5"), 200),
            RawClient::new("firefox", Some("1"), 300),
        ];

        let doc = capture(&clients, &inspector, &settings);
        assert_eq!(
            doc,
            vec![
                ClientSnapshot::new("Kitty", "2").with_extra(Enrichment::Terminal {
                    cwd: Some(PathBuf::from("/srv/work")),
                    in_nvim: false,
                }),
                ClientSnapshot::new("mpv", "5").with_extra(Enrichment::MediaPlayer {
                    mpv_file: Some(movie),
                }),
                ClientSnapshot::new("firefox", "1"),
            ]
        );
    }

    #[test]
    fn vanished_processes_degrade_instead_of_failing() {
        let settings = Settings::default();
        let inspector = ProcessInspector::new(FakeTable::default(), &settings);
        let clients = vec![
            RawClient::new("kitty", Some("1"), 4000),
            RawClient::new("mpv", Some("1"), -1),
        ];

        let doc = capture(&clients, &inspector, &settings);
        assert_eq!(
            doc[0].extra,
            Enrichment::Terminal {
                cwd: None,
                in_nvim: false
            }
        );
        assert_eq!(doc[1].extra, Enrichment::MediaPlayer { mpv_file: None });
    }
}

//! Core module - Session model, process inspection, capture and restore

mod app_kind;
mod capture;
mod monitor;
mod process;
mod restore;
mod session;
pub mod settings;
mod snapshot;

pub use app_kind::AppKind;
pub use capture::capture;
pub use monitor::SystemProcessTable;
pub use process::{ProcessInspector, ProcessTable};
pub use restore::{restore, RestoreSummary};
pub use session::SessionManager;
pub use settings::Settings;
pub use snapshot::{ClientSnapshot, Enrichment, RawClient, SessionDocument, WorkspaceRef};

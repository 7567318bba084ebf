//! Persistence layer - Session file storage

mod session_store;

pub use session_store::SessionStore;

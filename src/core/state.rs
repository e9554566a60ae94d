//! # Application State
//!
//! Canonical client-side state. The controller here is the only owner of the
//! session list and the message thread; views get read-only snapshots each
//! frame. Presentation state (scroll offsets, focus, drafts) lives in the
//! `tui` module.
//!
//! ```text
//! App
//! ├── sessions: Vec<Session>          // sessions known to this client
//! ├── active_session_id: Option      // at most one session displayed
//! ├── thread: Vec<Message>           // messages of the active session
//! ├── is_sending: bool               // one send in flight, gates new sends
//! ├── is_fetching: bool              // session fetch in flight
//! ├── pending_message_id: Option     // id of the optimistic user message
//! ├── status_message: String         // status bar text
//! └── server_version: Option         // from the startup health check
//! ```
//!
//! Invariant: `thread` always belongs to `active_session_id`. Switching the
//! active session clears the thread immediately; the replacement arrives with
//! the fetch completion, and stale completions are discarded.

use crate::api::types::{Message, Session};

pub struct App {
    pub sessions: Vec<Session>,
    pub active_session_id: Option<String>,
    pub thread: Vec<Message>,
    pub is_sending: bool,
    pub is_fetching: bool,
    /// Identity of the optimistically appended user message, if a send is in
    /// flight. Rollback on failure removes exactly this entry.
    pub pending_message_id: Option<String>,
    pub status_message: String,
    pub server_version: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
            active_session_id: None,
            thread: Vec::new(),
            is_sending: false,
            is_fetching: false,
            pending_message_id: None,
            status_message: String::from("Welcome to Banter!"),
            server_version: None,
        }
    }

    /// True if `id` is the session currently shown in the thread.
    pub fn is_active(&self, id: &str) -> bool {
        self.active_session_id.as_deref() == Some(id)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

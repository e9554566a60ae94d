//! # Actions
//!
//! Everything that can happen in Banter becomes an `Action`. The user picks a
//! session? That's `Action::SelectSession`. A network call comes back? That's
//! `Action::SessionFetched` or one of its `*Failed` siblings.
//!
//! The `update()` function takes the current state and an action and mutates
//! the state, returning an [`Effect`] describing the I/O the caller should
//! start. No side effects happen here beyond logging; the TUI event loop owns
//! the network.
//!
//! ```text
//! State + Action  →  update()  →  mutated State + Effect
//! ```
//!
//! Because every transition goes through this one function, each testable
//! property of the controller is an ordinary unit test below.

use log::{debug, warn};

use crate::api::types::{Message, Role, Session, SessionChatResponse};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User picked a session in the sidebar.
    SelectSession(String),
    /// `GET /sessions/{id}` resolved.
    SessionFetched { id: String, messages: Vec<Message> },
    SessionFetchFailed { id: String, error: String },

    /// User confirmed the new-session dialog (prompt may be empty).
    NewSession { system_prompt: Option<String> },
    /// `POST /sessions` resolved. `queued_text` carries the draft that
    /// triggered an implicit create on first send, if any.
    SessionCreated {
        session: Session,
        queued_text: Option<String>,
    },
    SessionCreateFailed { error: String },

    /// User confirmed deletion in the sidebar.
    DeleteSession(String),
    SessionDeleted(String),
    SessionDeleteFailed { id: String, error: String },

    /// User submitted the composer draft (already trimmed).
    Submit(String),
    /// `POST /sessions/{id}/chat` resolved.
    SendCompleted {
        session_id: String,
        reply: SessionChatResponse,
    },
    SendFailed {
        session_id: String,
        message_id: String,
        error: String,
    },

    HealthChecked { status: String, version: String },
    HealthCheckFailed { error: String },

    Quit,
}

/// I/O the TUI should start after a transition. Exactly one effect per
/// action keeps the in-flight bookkeeping trivial: the only concurrency gate
/// the controller needs is `is_sending`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchSession(String),
    CreateSession {
        system_prompt: Option<String>,
        queued_text: Option<String>,
    },
    DeleteSession(String),
    SendMessage {
        session_id: String,
        message_id: String,
        text: String,
    },
}

/// Append an optimistic user message for `text` and mark the send in flight.
/// Returns the effect that performs the actual request.
fn begin_send(app: &mut App, session_id: String, text: String) -> Effect {
    let message = Message::local(&session_id, Role::User, text.clone());
    let message_id = message.id.clone();
    app.thread.push(message);
    app.pending_message_id = Some(message_id.clone());
    app.is_sending = true;
    app.status_message = String::from("Sending...");
    Effect::SendMessage {
        session_id,
        message_id,
        text,
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SelectSession(id) => {
            // Re-selecting the active session is a no-op; a refetch would
            // only blank the thread for nothing.
            if app.is_active(&id) {
                return Effect::None;
            }
            app.active_session_id = Some(id.clone());
            app.thread.clear();
            app.is_fetching = true;
            Effect::FetchSession(id)
        }

        Action::SessionFetched { id, messages } => {
            // A fetch that resolved after the user moved on is stale; the
            // thread must only ever show the active session.
            if !app.is_active(&id) {
                debug!("Discarding stale fetch for session {id}");
                return Effect::None;
            }
            app.is_fetching = false;
            app.thread = messages;
            Effect::None
        }

        Action::SessionFetchFailed { id, error } => {
            warn!("Failed to fetch session {id}: {error}");
            if app.is_active(&id) {
                app.is_fetching = false;
                app.status_message = String::from("Failed to load session");
            }
            Effect::None
        }

        Action::NewSession { system_prompt } => Effect::CreateSession {
            system_prompt,
            queued_text: None,
        },

        Action::SessionCreated {
            session,
            queued_text,
        } => {
            let session_id = session.id.clone();
            app.sessions.insert(0, session);
            app.active_session_id = Some(session_id.clone());
            app.thread.clear();
            app.is_fetching = false;
            app.status_message = String::from("Session created");
            match queued_text {
                // First-send path: the draft that triggered the implicit
                // create now goes out against the fresh session.
                Some(text) => begin_send(app, session_id, text),
                None => Effect::None,
            }
        }

        Action::SessionCreateFailed { error } => {
            warn!("Failed to create session: {error}");
            // Covers the first-send path, where sending was set before the
            // create went out.
            app.is_sending = false;
            app.status_message = String::from("Failed to create session");
            Effect::None
        }

        Action::DeleteSession(id) => {
            // Destructive actions are gated while a send is in flight.
            if app.is_sending {
                return Effect::None;
            }
            Effect::DeleteSession(id)
        }

        Action::SessionDeleted(id) => {
            app.sessions.retain(|s| s.id != id);
            if app.is_active(&id) {
                app.active_session_id = None;
                app.thread.clear();
                app.is_fetching = false;
            }
            app.status_message = String::from("Session deleted");
            Effect::None
        }

        Action::SessionDeleteFailed { id, error } => {
            warn!("Failed to delete session {id}: {error}");
            app.status_message = String::from("Failed to delete session");
            Effect::None
        }

        Action::Submit(text) => {
            let text = text.trim().to_string();
            // The composer guards the first two too; the reducer re-checks so
            // the gate holds for any caller. Sends are also gated while a
            // fetch is replacing the thread, otherwise the replacement would
            // silently erase the optimistic message.
            if text.is_empty() || app.is_sending || app.is_fetching {
                return Effect::None;
            }
            match app.active_session_id.clone() {
                Some(session_id) => begin_send(app, session_id, text),
                None => {
                    // No active session: create one (default prompt), then
                    // send once the id is known.
                    app.is_sending = true;
                    app.status_message = String::from("Creating session...");
                    Effect::CreateSession {
                        system_prompt: None,
                        queued_text: Some(text),
                    }
                }
            }
        }

        Action::SendCompleted { session_id, reply } => {
            app.is_sending = false;
            app.pending_message_id = None;
            // Reply for a session the user navigated away from: the slot is
            // free again, but the text belongs to a thread we no longer hold.
            if !app.is_active(&session_id) {
                debug!("Discarding reply for inactive session {session_id}");
                return Effect::None;
            }
            app.thread
                .push(Message::local(&session_id, Role::Assistant, reply.response));
            app.status_message = format!("{} ({} messages)", reply.model, reply.message_count);
            Effect::None
        }

        Action::SendFailed {
            session_id,
            message_id,
            error,
        } => {
            warn!("Send to session {session_id} failed: {error}");
            app.is_sending = false;
            app.pending_message_id = None;
            // Roll back the optimistic append by identity, leaving the
            // thread as if the send never happened. If the user already
            // switched sessions the message is gone with the old thread and
            // this finds nothing.
            app.thread.retain(|m| m.id != message_id);
            app.status_message = String::from("Failed to send message");
            Effect::None
        }

        Action::HealthChecked { status, version } => {
            debug!("Server healthy: {status} v{version}");
            app.server_version = Some(version);
            app.status_message = String::from("Connected");
            Effect::None
        }

        Action::HealthCheckFailed { error } => {
            warn!("Health check failed: {error}");
            app.status_message = String::from("Server unreachable");
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

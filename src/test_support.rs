//! Shared fixture builders for unit tests.

use crate::api::types::{Message, Role, Session, SessionChatResponse};

pub fn session(id: &str) -> Session {
    Session {
        id: id.to_string(),
        system_prompt: None,
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

pub fn session_with_prompt(id: &str, prompt: &str) -> Session {
    Session {
        system_prompt: Some(prompt.to_string()),
        ..session(id)
    }
}

pub fn message(session_id: &str, role: Role, content: &str) -> Message {
    Message::local(session_id, role, content.to_string())
}

pub fn reply(session_id: &str, text: &str) -> SessionChatResponse {
    SessionChatResponse {
        response: text.to_string(),
        model: "test-model".to_string(),
        session_id: session_id.to_string(),
        message_count: 2,
    }
}

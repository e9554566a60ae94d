use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Who authored a message. The server only ever produces these two roles.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

/// A conversation context held by the server. Immutable once created; the
/// only lifecycle operations are create and delete.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub system_prompt: Option<String>,
    pub created_at: String,
}

/// One turn in a conversation. Either fetched in bulk when a session is
/// loaded, or synthesized locally via [`Message::local`] for optimistic
/// appends before the server has confirmed anything.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub session_id: String,
    pub role: Role,
    pub content: String,
    pub created_at: String,
}

impl Message {
    /// Build a client-side message with a generated id and the current time.
    /// The id only has to be unique within the in-memory thread; it is never
    /// sent to the server.
    pub fn local(session_id: &str, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            role,
            content: content.into(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Response body of `GET /sessions/{id}`: the descriptor plus the full
/// ordered thread (server order, treated as chronological).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionWithMessages {
    pub session: Session,
    pub messages: Vec<Message>,
}

/// Request body of `POST /sessions`. An absent prompt means default behavior,
/// so `None` is omitted from the JSON entirely.
#[derive(Serialize, Debug, Default)]
pub struct CreateSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

/// Request body of `POST /sessions/{id}/chat`.
#[derive(Serialize, Debug)]
pub struct SessionChatRequest {
    pub message: String,
}

/// Response body of `POST /sessions/{id}/chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionChatResponse {
    pub response: String,
    pub model: String,
    pub session_id: String,
    pub message_count: u32,
}

/// Response body of `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Contract test: the create request must omit an absent prompt rather
    /// than sending `"system_prompt": null`.
    #[test]
    fn test_create_request_serialization() {
        let req = CreateSessionRequest {
            system_prompt: Some("You are terse.".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"system_prompt":"You are terse."}"#
        );

        let empty = CreateSessionRequest::default();
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
    }

    #[test]
    fn test_chat_request_serialization() {
        let req = SessionChatRequest {
            message: "hello".to_string(),
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"message":"hello"}"#);
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
    }

    #[test]
    fn test_session_with_messages_deserialization() {
        let json = r#"{
            "session": {"id": "s1", "system_prompt": null, "created_at": "2024-01-01T00:00:00Z"},
            "messages": [
                {"id": "m1", "session_id": "s1", "role": "user", "content": "hi", "created_at": "2024-01-01T00:00:01Z"},
                {"id": "m2", "session_id": "s1", "role": "assistant", "content": "hello", "created_at": "2024-01-01T00:00:02Z"}
            ]
        }"#;
        let parsed: SessionWithMessages = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.session.id, "s1");
        assert!(parsed.session.system_prompt.is_none());
        assert_eq!(parsed.messages.len(), 2);
        assert_eq!(parsed.messages[0].role, Role::User);
        assert_eq!(parsed.messages[1].role, Role::Assistant);
    }

    #[test]
    fn test_local_message_fields() {
        let msg = Message::local("s1", Role::User, "draft");
        assert_eq!(msg.session_id, "s1");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "draft");
        assert!(!msg.id.is_empty());
        // Timestamp must parse back as RFC 3339
        assert!(chrono::DateTime::parse_from_rfc3339(&msg.created_at).is_ok());
    }

    #[test]
    fn test_local_messages_get_distinct_ids() {
        let a = Message::local("s1", Role::User, "one");
        let b = Message::local("s1", Role::User, "two");
        assert_ne!(a.id, b.id);
    }
}

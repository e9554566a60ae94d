//! # Remote Chat API
//!
//! Request/response client for the chat-session server. Five operations,
//! all HTTP+JSON, single attempt each: create session, fetch a session with
//! its thread, delete session, send a message, health check.
//!
//! The [`ChatApi`] trait is the seam between the core and the network, so
//! tests can substitute a scripted implementation.

pub mod client;
pub mod types;

pub use client::{ApiError, ChatApi, HttpApi};
pub use types::{
    HealthResponse, Message, Role, Session, SessionChatResponse, SessionWithMessages,
};

//! # Banter
//!
//! A terminal client for a chat-session server. The `core` module holds all
//! business logic as pure state transitions; `api` speaks the server's REST
//! protocol; `tui` is the ratatui adapter that wires the two together.

pub mod api;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

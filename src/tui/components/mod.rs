//! # TUI Components
//!
//! Two patterns, mirroring the rest of the adapter layer:
//!
//! - **Stateless** (props-based): `TitleBar`, `MessageView`. Created fresh
//!   each frame with the data they need.
//! - **Stateful** (event-driven): `InputBox`, `MessageListState`,
//!   `SessionListState`, `PromptDialogState`. Persistent state lives in
//!   `TuiState`; a transient wrapper borrows it for the render pass.
//!
//! Every component receives app data as read-only props and reports user
//! intent through its event type. None of them touch the network or the
//! core state directly.

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod prompt_dialog;
pub mod session_list;
pub mod title_bar;

pub use input_box::{ComposerEvent, InputBox};
pub use message::MessageView;
pub use message_list::{MessageList, MessageListState};
pub use prompt_dialog::{DialogEvent, PromptDialog, PromptDialogState};
pub use session_list::{SessionEvent, SessionList, SessionListState};
pub use title_bar::TitleBar;

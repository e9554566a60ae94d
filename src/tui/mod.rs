//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. The core
//! never touches the terminal or the network; this loop owns both, running
//! requests on tokio tasks that report back over an mpsc channel as Actions.
//!
//! ## Redraw Strategy
//!
//! The loop sleeps up to 250ms in `poll_event_timeout` and only redraws when
//! an input event arrived or a background action landed, so an idle client
//! costs nothing.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during redraws.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{ChatApi, HttpApi};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ComposerEvent, DialogEvent, InputBox, MessageListState, PromptDialogState, SessionEvent,
    SessionListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which pane owns keyboard input. Tab cycles, Esc jumps back and forth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Composer,
    Sessions,
}

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub session_list: SessionListState,
    // New-session dialog overlay (None = hidden)
    pub prompt_dialog: Option<PromptDialogState>,
    pub focus: Focus,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            session_list: SessionListState::new(),
            prompt_dialog: None,
            focus: Focus::Composer, // User expects to type immediately
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn ChatApi> = Arc::new(HttpApi::new(config.api_base_url.clone()));
    let mut app = App::new();
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    spawn_health_check(&api, tx.clone());

    let mut needs_redraw = true; // Force first frame

    'main: loop {
        // Sync InputBox props with App/TUI state
        tui.input_box.disabled = app.is_sending;
        tui.input_box.focused = tui.focus == Focus::Composer && tui.prompt_dialog.is_none();

        // Only draw when something changed
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of focus
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    break 'main;
                }
                continue;
            }

            // When the new-session dialog is open, it captures all input
            if let Some(ref mut dialog) = tui.prompt_dialog {
                if let Some(dialog_event) = dialog.handle_event(&event) {
                    tui.prompt_dialog = None;
                    if let DialogEvent::Confirm(system_prompt) = dialog_event {
                        let effect = update(&mut app, Action::NewSession { system_prompt });
                        run_effect(effect, &api, &tx);
                        tui.message_list = MessageListState::new();
                    }
                }
                continue;
            }

            // Ctrl+N opens the dialog from anywhere
            if matches!(event, TuiEvent::NewSession) {
                tui.prompt_dialog = Some(PromptDialogState::new());
                continue;
            }

            // Tab and Esc move focus between the composer and the sidebar
            if matches!(event, TuiEvent::FocusNext | TuiEvent::Escape) {
                tui.focus = match tui.focus {
                    Focus::Composer => Focus::Sessions,
                    Focus::Sessions => Focus::Composer,
                };
                continue;
            }

            // Scroll events always go to the thread view regardless of focus
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.message_list.handle_event(&event);
                continue;
            }

            match tui.focus {
                Focus::Sessions => {
                    // End re-sticks the thread view to the newest message
                    if matches!(event, TuiEvent::CursorEnd) {
                        tui.message_list.handle_event(&TuiEvent::ScrollToBottom);
                        continue;
                    }
                    if let Some(session_event) =
                        tui.session_list.handle_event(&event, &app.sessions)
                    {
                        match session_event {
                            SessionEvent::Select(id) => {
                                let effect = update(&mut app, Action::SelectSession(id));
                                if effect != Effect::None {
                                    tui.message_list = MessageListState::new();
                                }
                                run_effect(effect, &api, &tx);
                            }
                            SessionEvent::CreateNew => {
                                tui.prompt_dialog = Some(PromptDialogState::new());
                            }
                            SessionEvent::Delete(id) => {
                                let effect = update(&mut app, Action::DeleteSession(id));
                                run_effect(effect, &api, &tx);
                            }
                        }
                    }
                }
                Focus::Composer => {
                    if let Some(ComposerEvent::Submit(text)) =
                        tui.input_box.handle_event(&event)
                    {
                        let effect = update(&mut app, Action::Submit(text));
                        run_effect(effect, &api, &tx);
                    }
                }
            }
        }

        // Handle background task actions (resolved requests)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if effect == Effect::Quit {
                break 'main;
            }
            run_effect(effect, &api, &tx);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Start the I/O an effect asks for. `Effect::Quit` is handled by the caller;
/// everything else becomes a tokio task reporting back through `tx`.
fn run_effect(effect: Effect, api: &Arc<dyn ChatApi>, tx: &mpsc::Sender<Action>) {
    match effect {
        Effect::None | Effect::Quit => {}
        Effect::FetchSession(id) => spawn_fetch_session(api, id, tx.clone()),
        Effect::CreateSession {
            system_prompt,
            queued_text,
        } => spawn_create_session(api, system_prompt, queued_text, tx.clone()),
        Effect::DeleteSession(id) => spawn_delete_session(api, id, tx.clone()),
        Effect::SendMessage {
            session_id,
            message_id,
            text,
        } => spawn_send_message(api, session_id, message_id, text, tx.clone()),
    }
}

fn send_action(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send action: receiver dropped");
    }
}

fn spawn_fetch_session(api: &Arc<dyn ChatApi>, id: String, tx: mpsc::Sender<Action>) {
    info!("Fetching session {id}");
    let api = api.clone();
    tokio::spawn(async move {
        let action = match api.get_session(&id).await {
            Ok(data) => Action::SessionFetched {
                id,
                messages: data.messages,
            },
            Err(e) => Action::SessionFetchFailed {
                id,
                error: e.to_string(),
            },
        };
        send_action(&tx, action);
    });
}

fn spawn_create_session(
    api: &Arc<dyn ChatApi>,
    system_prompt: Option<String>,
    queued_text: Option<String>,
    tx: mpsc::Sender<Action>,
) {
    info!("Creating session (queued_text: {})", queued_text.is_some());
    let api = api.clone();
    tokio::spawn(async move {
        let action = match api.create_session(system_prompt).await {
            Ok(session) => Action::SessionCreated {
                session,
                queued_text,
            },
            Err(e) => Action::SessionCreateFailed {
                error: e.to_string(),
            },
        };
        send_action(&tx, action);
    });
}

fn spawn_delete_session(api: &Arc<dyn ChatApi>, id: String, tx: mpsc::Sender<Action>) {
    info!("Deleting session {id}");
    let api = api.clone();
    tokio::spawn(async move {
        let action = match api.delete_session(&id).await {
            Ok(()) => Action::SessionDeleted(id),
            Err(e) => Action::SessionDeleteFailed {
                id,
                error: e.to_string(),
            },
        };
        send_action(&tx, action);
    });
}

fn spawn_send_message(
    api: &Arc<dyn ChatApi>,
    session_id: String,
    message_id: String,
    text: String,
    tx: mpsc::Sender<Action>,
) {
    info!("Sending message to session {session_id}");
    let api = api.clone();
    tokio::spawn(async move {
        let action = match api.send_message(&session_id, &text).await {
            Ok(reply) => Action::SendCompleted { session_id, reply },
            Err(e) => Action::SendFailed {
                session_id,
                message_id,
                error: e.to_string(),
            },
        };
        send_action(&tx, action);
    });
}

fn spawn_health_check(api: &Arc<dyn ChatApi>, tx: mpsc::Sender<Action>) {
    let api = api.clone();
    tokio::spawn(async move {
        let action = match api.health_check().await {
            Ok(health) => Action::HealthChecked {
                status: health.status,
                version: health.version,
            },
            Err(e) => Action::HealthCheckFailed {
                error: e.to_string(),
            },
        };
        send_action(&tx, action);
    });
}

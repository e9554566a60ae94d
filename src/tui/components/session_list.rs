//! # Session List Component
//!
//! Sidebar for browsing, opening, creating, and deleting sessions. Focused
//! with Tab; deletion takes a second `d` to confirm.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SessionListState` lives in `TuiState`
//! - `SessionList` is created each frame with borrowed state and the
//!   controller's session snapshot as props
//!
//! The session list itself is owned by the core; this component only holds
//! the selection cursor and the delete-confirmation flag.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::types::Session;
use crate::tui::event::TuiEvent;

/// Persistent state for the sidebar.
pub struct SessionListState {
    pub selected: usize,
    pub confirm_delete: bool,
    pub list_state: ListState,
}

impl SessionListState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            confirm_delete: false,
            list_state: ListState::default(),
        }
    }

    /// Keep the cursor valid after the session list shrinks or grows.
    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Handle a key event against the current session snapshot, returning a
    /// `SessionEvent` when the sidebar wants something done.
    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        sessions: &[Session],
    ) -> Option<SessionEvent> {
        self.clamp(sessions.len());

        // A second `d` confirms; any other key cancels the pending delete.
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = false;
        }

        match event {
            TuiEvent::CursorUp => {
                if !sessions.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !sessions.is_empty() {
                    self.selected = (self.selected + 1).min(sessions.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => sessions
                .get(self.selected)
                .map(|session| SessionEvent::Select(session.id.clone())),
            TuiEvent::InputChar('n') => Some(SessionEvent::CreateNew),
            TuiEvent::InputChar('d') => {
                if sessions.is_empty() {
                    return None;
                }
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(SessionEvent::Delete(sessions[self.selected].id.clone()))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            _ => None,
        }
    }
}

impl Default for SessionListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events emitted by the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Select(String),
    CreateNew,
    Delete(String),
}

/// Transient render wrapper for the sidebar.
pub struct SessionList<'a> {
    state: &'a mut SessionListState,
    sessions: &'a [Session],
    active_id: Option<&'a str>,
    focused: bool,
}

impl<'a> SessionList<'a> {
    pub fn new(
        state: &'a mut SessionListState,
        sessions: &'a [Session],
        active_id: Option<&'a str>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            sessions,
            active_id,
            focused,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.clamp(self.sessions.len());

        let help_text = if self.state.confirm_delete {
            " d again to delete "
        } else if self.focused {
            " n New  d Delete  Enter Open "
        } else {
            " Tab to browse "
        };

        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Sessions ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.sessions.is_empty() {
            let empty = Paragraph::new("No sessions yet.\nCtrl+N starts one.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .sessions
            .iter()
            .enumerate()
            .map(|(i, session)| {
                let date = format_timestamp(&session.created_at);
                let marker = if self.active_id == Some(session.id.as_str()) {
                    "▸ "
                } else {
                    "  "
                };

                // Layout: "▸ Jan 15  <label>"
                let inner_width = area.width.saturating_sub(4) as usize;
                let label_width = inner_width.saturating_sub(marker.width() + date.width() + 2);
                let label = truncate_str(session_label(session), label_width);

                let style = if self.focused && i == self.state.selected {
                    if self.state.confirm_delete {
                        Style::default()
                            .fg(Color::Red)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    }
                } else if self.active_id == Some(session.id.as_str()) {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let line = Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(date, style),
                    Span::styled("  ", style),
                    Span::styled(label, style),
                ]);

                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// What to show for a session in the sidebar: the first line of its system
/// prompt, or a fixed label for default-prompt sessions.
fn session_label(session: &Session) -> &str {
    session
        .system_prompt
        .as_deref()
        .and_then(|p| p.lines().next())
        .filter(|l| !l.trim().is_empty())
        .unwrap_or("(default)")
}

/// Format an RFC 3339 timestamp as "Jan 15", or empty if it doesn't parse.
fn format_timestamp(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%b %d").to_string())
        .unwrap_or_default()
}

/// Truncate a string to fit within `max_width` display columns, adding "..."
/// if needed. Cuts on char boundaries and counts columns, not bytes, so
/// multibyte and wide labels never split mid-character.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{session, session_with_prompt};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_enter_selects_session() {
        let mut state = SessionListState::new();
        let sessions = vec![session("a"), session("b")];

        state.handle_event(&TuiEvent::CursorDown, &sessions);
        let event = state.handle_event(&TuiEvent::Submit, &sessions);

        assert_eq!(event, Some(SessionEvent::Select("b".to_string())));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut state = SessionListState::new();
        let sessions = vec![session("a")];

        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &sessions), None);
        assert!(state.confirm_delete);

        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d'), &sessions),
            Some(SessionEvent::Delete("a".to_string()))
        );
        assert!(!state.confirm_delete);
    }

    #[test]
    fn test_other_key_cancels_delete_confirmation() {
        let mut state = SessionListState::new();
        let sessions = vec![session("a")];

        state.handle_event(&TuiEvent::InputChar('d'), &sessions);
        state.handle_event(&TuiEvent::CursorDown, &sessions);
        assert!(!state.confirm_delete);
    }

    #[test]
    fn test_delete_on_empty_list_is_noop() {
        let mut state = SessionListState::new();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &[]), None);
        assert!(!state.confirm_delete);
    }

    #[test]
    fn test_n_requests_new_session() {
        let mut state = SessionListState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('n'), &[]),
            Some(SessionEvent::CreateNew)
        );
    }

    #[test]
    fn test_selection_clamps_when_list_shrinks() {
        let mut state = SessionListState::new();
        let sessions = vec![session("a"), session("b"), session("c")];
        state.handle_event(&TuiEvent::CursorDown, &sessions);
        state.handle_event(&TuiEvent::CursorDown, &sessions);
        assert_eq!(state.selected, 2);

        // Two sessions were deleted out from under the cursor.
        let shrunk = vec![session("a")];
        state.handle_event(&TuiEvent::CursorDown, &shrunk);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_session_label_prefers_prompt() {
        let with_prompt = session_with_prompt("a", "You are terse.\nSecond line");
        assert_eq!(session_label(&with_prompt), "You are terse.");

        let without = session("b");
        assert_eq!(session_label(&without), "(default)");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a longer label", 10), "a longe...");
        assert_eq!(truncate_str("abc", 2), "..");
    }

    #[test]
    fn test_truncate_str_cuts_on_char_boundaries() {
        // Multibyte chars (2 bytes, 1 column each) must never split mid-char.
        assert_eq!(truncate_str("ééééé", 8), "ééééé");
        assert_eq!(truncate_str(&"é".repeat(30), 8), format!("{}...", "é".repeat(5)));
        // Wide CJK chars occupy 2 columns; the cut counts columns.
        assert_eq!(truncate_str("日本語のラベル", 9), "日本語...");
    }

    #[test]
    fn test_render_with_multibyte_prompt_label() {
        let backend = TestBackend::new(24, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = SessionListState::new();
        let sessions = vec![session_with_prompt("a", &"é".repeat(30))];

        terminal
            .draw(|f| {
                SessionList::new(&mut state, &sessions, Some("a"), true).render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("é"));
        assert!(text.contains("..."));
    }
}

//! # New-Session Dialog
//!
//! Centered overlay capturing an optional system prompt for a new session.
//! Enter confirms (an empty or whitespace-only prompt means "default
//! behavior"), Esc cancels. While open, the dialog captures all input.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::EventHandler;
use crate::tui::components::input_box::{next_char_boundary, prev_char_boundary};
use crate::tui::event::TuiEvent;

/// Events emitted by the dialog. Either way the parent closes it.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogEvent {
    /// Create the session. `None` means no system prompt.
    Confirm(Option<String>),
    Cancel,
}

/// Persistent state for the dialog while it is open.
pub struct PromptDialogState {
    pub buffer: String,
    cursor: usize,
}

impl PromptDialogState {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
        }
    }
}

impl Default for PromptDialogState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for PromptDialogState {
    type Event = DialogEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(DialogEvent::Cancel),
            TuiEvent::Submit => {
                let prompt = self.buffer.trim();
                let prompt = (!prompt.is_empty()).then(|| prompt.to_string());
                Some(DialogEvent::Confirm(prompt))
            }
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                None
            }
            TuiEvent::Paste(text) => {
                let flat = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &flat);
                self.cursor += flat.len();
                None
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                }
                None
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                }
                None
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the dialog overlay.
pub struct PromptDialog<'a> {
    state: &'a PromptDialogState,
}

impl<'a> PromptDialog<'a> {
    pub fn new(state: &'a PromptDialogState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 7, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" New Session ")
            .title_bottom(Line::from(" Enter Create  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [hint_area, _, input_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let hint = Paragraph::new("System prompt (optional, Enter to skip):")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, hint_area);

        let input = Paragraph::new(self.state.buffer.as_str());
        frame.render_widget(input, input_area);

        let cursor_col = self.state.buffer[..self.state.cursor].width() as u16;
        frame.set_cursor_position((
            input_area.x + cursor_col.min(input_area.width.saturating_sub(1)),
            input_area.y,
        ));
    }
}

/// Compute a centered rect: `percent_x` of the width, fixed `height` rows.
fn centered_rect(percent_x: u16, height: u16, outer: Rect) -> Rect {
    let [center_v] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(outer);
    let [center] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(state: &mut PromptDialogState, text: &str) {
        for c in text.chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_confirm_with_prompt() {
        let mut state = PromptDialogState::new();
        type_str(&mut state, "You are terse.");

        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(DialogEvent::Confirm(Some("You are terse.".to_string())))
        );
    }

    #[test]
    fn test_confirm_empty_means_no_prompt() {
        let mut state = PromptDialogState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(DialogEvent::Confirm(None))
        );

        let mut state = PromptDialogState::new();
        type_str(&mut state, "   ");
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(DialogEvent::Confirm(None))
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut state = PromptDialogState::new();
        type_str(&mut state, "discarded");
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(DialogEvent::Cancel));
    }

    #[test]
    fn test_editing() {
        let mut state = PromptDialogState::new();
        type_str(&mut state, "tese");
        state.handle_event(&TuiEvent::CursorLeft);
        state.handle_event(&TuiEvent::Backspace);
        state.handle_event(&TuiEvent::InputChar('r'));
        state.handle_event(&TuiEvent::CursorEnd);
        state.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(state.buffer, "tere!");
    }

    #[test]
    fn test_render_shows_title_and_help() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = PromptDialogState::new();
        type_str(&mut state, "Be brief.");

        terminal
            .draw(|f| {
                PromptDialog::new(&state).render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("New Session"));
        assert!(text.contains("Be brief."));
        assert!(text.contains("Esc Cancel"));
    }
}

//! # InputBox Component
//!
//! The composer: a single-line text input at the bottom of the screen.
//!
//! The draft buffer is internal state; `disabled` and `focused` are props
//! from the parent. Submit emits the trimmed draft and is a no-op when the
//! trimmed draft is empty or a send is in flight.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputBox.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    /// User submitted the draft (Enter). Content is already trimmed.
    Submit(String),
    /// Draft content or cursor changed.
    Changed,
}

/// Byte index of the previous char boundary before `pos`.
pub(crate) fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte index of the next char boundary after `pos`.
pub(crate) fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(s.len())
}

pub struct InputBox {
    /// Draft text (internal state).
    pub buffer: String,
    /// Whether submits are gated by an in-flight send (prop).
    pub disabled: bool,
    /// Whether the composer has keyboard focus (prop).
    pub focused: bool,
    /// Cursor byte offset into `buffer`.
    cursor: usize,
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            focused: true,
            cursor: 0,
        }
    }

    /// Start of the visible window so the cursor stays on screen when the
    /// draft is wider than the box.
    fn window_start(&self, inner_width: u16) -> usize {
        let budget = inner_width.saturating_sub(1) as usize;
        let mut start = self.cursor;
        while start > 0 {
            let candidate = prev_char_boundary(&self.buffer, start);
            if self.buffer[candidate..self.cursor].width() > budget {
                break;
            }
            start = candidate;
        }
        start
    }
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.disabled {
            " Message (sending...) "
        } else {
            " Message "
        };

        let border_style = if self.disabled {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let inner_width = area.width.saturating_sub(2);
        let start = self.window_start(inner_width);
        let visible = &self.buffer[start..];

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title(title);

        let input = Paragraph::new(visible).block(block);
        frame.render_widget(input, area);

        if self.focused {
            let cursor_col = self.buffer[start..self.cursor].width() as u16;
            frame.set_cursor_position((area.x + 1 + cursor_col.min(inner_width), area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(ComposerEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                // Single-line composer: pasted newlines become spaces.
                let flat = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &flat);
                self.cursor += flat.len();
                Some(ComposerEvent::Changed)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(ComposerEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(ComposerEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                    Some(ComposerEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                    Some(ComposerEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => {
                (self.cursor != 0).then(|| {
                    self.cursor = 0;
                    ComposerEvent::Changed
                })
            }
            TuiEvent::CursorEnd => {
                (self.cursor != self.buffer.len()).then(|| {
                    self.cursor = self.buffer.len();
                    ComposerEvent::Changed
                })
            }
            TuiEvent::Submit => {
                // No-op while a send is in flight or the trimmed draft is
                // empty; the draft is preserved in both cases.
                if self.disabled || self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(ComposerEvent::Submit(text.trim().to_string()))
            }
            _ => None,
        }
    }
}

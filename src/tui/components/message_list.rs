//! # Message List Component
//!
//! Scrollable view over the active session's thread. Follows the persistent
//! state + transient wrapper pattern:
//! - `MessageListState` (scroll offset, stick-to-bottom) lives in `TuiState`
//! - `MessageList` is created each frame with borrowed state and props
//!
//! While a send is in flight a dim placeholder card is appended after the
//! last message, standing in for the assistant reply.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::types::Message;
use crate::tui::components::MessageView;
use crate::tui::event::TuiEvent;

/// Height of the pending-reply placeholder card (1 content line + borders).
const PLACEHOLDER_HEIGHT: u16 = 3;

/// Persistent scroll state for the thread view.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// Follow the newest message until the user scrolls away; End re-enables.
    pub stick_to_bottom: bool,
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
        }
    }

    /// Scroll events routed here regardless of focus.
    pub fn handle_event(&mut self, event: &TuiEvent) {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
            }
            TuiEvent::ScrollToBottom => {
                self.scroll_state.scroll_to_bottom();
                self.stick_to_bottom = true;
            }
            _ => {}
        }
    }
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient render wrapper for the thread view.
pub struct MessageList<'a> {
    state: &'a mut MessageListState,
    messages: &'a [Message],
    /// A send is in flight: show the pending-reply placeholder.
    pending_reply: bool,
    /// The thread is being fetched after a session switch.
    fetching: bool,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        pending_reply: bool,
        fetching: bool,
    ) -> Self {
        Self {
            state,
            messages,
            pending_reply,
            fetching,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.messages.is_empty() && !self.pending_reply {
            let text = if self.fetching {
                "Loading session..."
            } else {
                "No messages yet. Say something below."
            };
            let empty = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().padding(Padding::top(area.height / 2)));
            frame.render_widget(empty, area);
            return;
        }

        // One column for the scrollbar.
        let content_width = area.width.saturating_sub(1);

        let heights: Vec<u16> = self
            .messages
            .iter()
            .map(|m| MessageView::calculate_height(m, content_width))
            .collect();
        let total_height = content_height(&heights, self.pending_reply);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (message, height) in self.messages.iter().zip(&heights) {
            if y_offset >= total_height {
                break;
            }
            let rect = Rect::new(0, y_offset, content_width, *height);
            scroll_view.render_widget(MessageView::new(message), rect);
            y_offset = y_offset.saturating_add(*height);
        }

        if self.pending_reply && y_offset < total_height {
            let rect = Rect::new(0, y_offset, content_width, PLACEHOLDER_HEIGHT);
            let style = Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC);
            let placeholder = Paragraph::new("...")
                .style(style)
                .wrap(Wrap { trim: true })
                .block(
                    Block::bordered()
                        .title(" assistant ")
                        .border_type(ratatui::widgets::BorderType::Rounded)
                        .border_style(style)
                        .title_style(style),
                );
            scroll_view.render_widget(placeholder, rect);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Sum message heights into the scroll view's total, saturating at the `u16`
/// coordinate space. A thread long enough to hit the clamp is simply cut off
/// at the bottom instead of overflowing.
fn content_height(heights: &[u16], pending_reply: bool) -> u16 {
    let mut total: u32 = heights.iter().map(|&h| u32::from(h)).sum();
    if pending_reply {
        total += u32::from(PLACEHOLDER_HEIGHT);
    }
    total.min(u32::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Role;
    use crate::test_support::message;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(messages: &[Message], pending: bool, fetching: bool) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = MessageListState::new();

        terminal
            .draw(|f| {
                MessageList::new(&mut state, messages, pending, fetching).render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_renders_messages_with_roles() {
        let messages = vec![
            message("s1", Role::User, "hello there"),
            message("s1", Role::Assistant, "hi yourself"),
        ];
        let text = render_to_text(&messages, false, false);
        assert!(text.contains("hello there"));
        assert!(text.contains("hi yourself"));
        assert!(text.contains("you"));
        assert!(text.contains("assistant"));
    }

    #[test]
    fn test_empty_thread_shows_hint() {
        let text = render_to_text(&[], false, false);
        assert!(text.contains("No messages yet"));
    }

    #[test]
    fn test_fetching_shows_loading() {
        let text = render_to_text(&[], false, true);
        assert!(text.contains("Loading session..."));
    }

    #[test]
    fn test_pending_reply_shows_placeholder() {
        let messages = vec![message("s1", Role::User, "question")];
        let text = render_to_text(&messages, true, false);
        assert!(text.contains("question"));
        assert!(text.contains("..."));
    }

    #[test]
    fn test_content_height_saturates() {
        assert_eq!(content_height(&[3, 4, 5], false), 12);
        assert_eq!(content_height(&[3, 4, 5], true), 12 + PLACEHOLDER_HEIGHT);

        // A pathological thread must clamp, not overflow.
        let huge = vec![u16::MAX, 40, 40];
        assert_eq!(content_height(&huge, false), u16::MAX);
        assert_eq!(content_height(&huge, true), u16::MAX);
    }

    #[test]
    fn test_scroll_up_breaks_stick_to_bottom() {
        let mut state = MessageListState::new();
        assert!(state.stick_to_bottom);

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }
}

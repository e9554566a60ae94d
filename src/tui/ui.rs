//! # UI Layout
//!
//! Pure drawing: lays the frame out and delegates to components. Reads the
//! core `App` and the TUI's component state; mutates nothing but scroll and
//! cursor positions.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, PromptDialog, SessionList, TitleBar};
use crate::tui::{Focus, TuiState};

/// Sidebar width in columns.
const SESSION_LIST_WIDTH: u16 = 32;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let [title_area, body_area, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    let [sidebar_area, thread_area] = Layout::horizontal([
        Constraint::Length(SESSION_LIST_WIDTH),
        Constraint::Min(1),
    ])
    .areas(body_area);

    TitleBar::new(app.server_version.clone(), app.status_message.clone())
        .render(frame, title_area);

    SessionList::new(
        &mut tui.session_list,
        &app.sessions,
        app.active_session_id.as_deref(),
        tui.focus == Focus::Sessions && tui.prompt_dialog.is_none(),
    )
    .render(frame, sidebar_area);

    if app.active_session_id.is_some() {
        MessageList::new(
            &mut tui.message_list,
            &app.thread,
            app.is_sending,
            app.is_fetching,
        )
        .render(frame, thread_area);
    } else {
        render_welcome(frame, thread_area);
    }

    tui.input_box.render(frame, input_area);

    // Rendered last so the overlay sits on top and owns the cursor.
    if let Some(dialog) = &tui.prompt_dialog {
        PromptDialog::new(dialog).render(frame, frame.area());
    }
}

/// Shown in place of the thread before any session is open.
fn render_welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Welcome to Banter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Type a message below to start a conversation,",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "or press Ctrl+N to set a system prompt first.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let vertical_pad = area.height.saturating_sub(lines.len() as u16) / 2;
    let [_, centered, _] = Layout::vertical([
        Constraint::Length(vertical_pad),
        Constraint::Length(lines.len() as u16),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered,
    );
}

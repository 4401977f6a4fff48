//! Status bar
//!
//! Displays the current page and its key bindings.

use kana_app::Page;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::ViewContext;

/// Render the status bar.
pub fn render(frame: &mut Frame, ctx: &ViewContext<'_>, area: Rect) {
    let (page, hints) = match ctx.session.page() {
        None => ("Connecting", "F3 restart  Esc quit"),
        Some(Page::Start) => {
            ("Start", "Up/Down set  Left/Right size  Enter start  1-7 quick start  Esc quit")
        },
        Some(Page::Training) if ctx.session.is_paused() => {
            ("Paused", "F2 resume  F3 restart  Esc quit")
        },
        Some(Page::Training) => ("Training", "Enter submit  F2 pause  F3 restart  Esc quit"),
        Some(Page::Summary) => ("Summary", "Enter back  Esc quit"),
    };

    let status_line = Line::from(vec![
        Span::raw(" "),
        Span::styled(page, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" | "),
        Span::raw(hints),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}

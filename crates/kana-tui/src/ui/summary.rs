//! Summary page

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use super::ViewContext;

/// Render the summary page.
pub fn render(frame: &mut Frame, ctx: &ViewContext<'_>, area: Rect) {
    let Some(snapshot) = ctx.session.snapshot() else {
        return;
    };

    let lines = vec![
        Line::default(),
        Line::from(format!("Missed {} in {}", snapshot.misses, snapshot.hits)),
        Line::default(),
        Line::styled("[Back]", Style::default().fg(Color::Cyan)),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Summary ");
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center).block(block), area);
}

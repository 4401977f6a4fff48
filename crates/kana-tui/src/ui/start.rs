//! Start page
//!
//! Lesson-set radio list and drill-size buttons.

use kana_app::{LessonSet, SESSION_SIZES, size_label};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::ViewContext;

/// Render the start page.
pub fn render(frame: &mut Frame, ctx: &ViewContext<'_>, area: Rect) {
    let selected = ctx.input.selected_set(ctx.session);
    let highlight = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::default()];
    for set in LessonSet::ALL {
        let (marker, style) =
            if set == selected { ("(*)", highlight) } else { ("( )", Style::default()) };
        lines.push(Line::from(Span::styled(format!("  {marker} {}", set.label()), style)));
    }
    lines.push(Line::default());

    let mut buttons = vec![Span::raw("  ")];
    for (i, size) in SESSION_SIZES.into_iter().enumerate() {
        let style = if i == ctx.input.size_index() {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        buttons.push(Span::styled(format!("[{}]", size_label(size)), style));
        buttons.push(Span::raw(" "));
    }
    lines.push(Line::from(buttons));

    let block = Block::default().borders(Borders::ALL).title(" Choose your training ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

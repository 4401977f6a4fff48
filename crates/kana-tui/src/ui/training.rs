//! Training page
//!
//! The training card (word, answer field, progress), the wrong-answer panel
//! after a miss, and the paused screen.

use kana_app::{DiffRender, FocusTarget};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::{ViewContext, centered_row, diff};

const PROMPT: &str = "> ";
const PANEL_HEIGHT: u16 = 5;
const CARD_MIN_HEIGHT: u16 = 10;
const ANSWER_ROW: u16 = 3;

/// Render the training page.
pub fn render(frame: &mut Frame, ctx: &ViewContext<'_>, area: Rect) {
    if ctx.session.is_paused() {
        let paragraph = Paragraph::new("Paused")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(paragraph, centered_row(area));
        return;
    }

    let failed = ctx
        .session
        .snapshot()
        .and_then(|snapshot| snapshot.submitted.as_ref())
        .is_some_and(|result| !result.is_match);

    match ctx.session.diff_view() {
        Some(view) if failed => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(PANEL_HEIGHT), Constraint::Min(CARD_MIN_HEIGHT)])
                .split(area);
            let [panel_area, card_area] = chunks.as_ref() else {
                return;
            };
            render_wrong_answer(frame, view, *panel_area);
            render_card(frame, ctx, *card_area);
        },
        _ => render_card(frame, ctx, area),
    }
}

fn render_wrong_answer(frame: &mut Frame, view: &DiffRender, area: Rect) {
    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let row = |label: &'static str, spans: Vec<Span<'static>>| {
        let mut line = vec![Span::styled(label, label_style)];
        line.extend(spans);
        Line::from(line)
    };

    let lines = vec![
        row("Word:     ", diff::spans(&view.kana)),
        row("Expected: ", diff::spans(&view.expected)),
        row("Was:      ", diff::spans(&view.submitted)),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Wrong answer ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_card(frame: &mut Frame, ctx: &ViewContext<'_>, area: Rect) {
    let Some(snapshot) = ctx.session.snapshot() else {
        return;
    };

    let elapsed = ctx.session.answer_elapsed(ctx.now);
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            snapshot.word.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::default(),
        Line::from(format!("{PROMPT}{}", ctx.input.buffer())),
        Line::default(),
        Line::from(ctx.session.status_line().unwrap_or_default()),
        Line::from(format!("{}/{}", snapshot.chars_done, snapshot.chars_total)),
        Line::from(Span::styled(
            format!("{:.1}s", elapsed.as_secs_f64()),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", snapshot.set));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if ctx.input.focus() == FocusTarget::Answer && inner.height > ANSWER_ROW {
        let before_cursor: String = ctx.input.buffer().chars().take(ctx.input.cursor()).collect();
        let offset = (PROMPT.width() + before_cursor.width()) as u16;
        let max_x = inner.x.saturating_add(inner.width.saturating_sub(1));
        let cursor_x = inner.x.saturating_add(offset).min(max_x);
        frame.set_cursor_position((cursor_x, inner.y + ANSWER_ROW));
    }
}

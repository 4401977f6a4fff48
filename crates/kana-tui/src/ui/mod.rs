//! UI rendering
//!
//! Rendering functions that convert session state into terminal output
//! using ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into a frame.

mod diff;
mod start;
mod status;
mod summary;
mod training;

use std::time::Instant;

use kana_app::{InputState, Page, Session};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

/// Everything a frame is drawn from.
pub struct ViewContext<'a> {
    /// Session state.
    pub session: &'a Session<Instant>,
    /// Answer buffer and menu selection.
    pub input: &'a InputState,
    /// Time of this frame, for the live timer.
    pub now: Instant,
}

/// Render the entire UI.
pub fn render(frame: &mut Frame, ctx: &ViewContext<'_>) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(MAIN_AREA_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let [main_area, status_area] = chunks.as_ref() else {
        return;
    };

    match ctx.session.page() {
        None => render_placeholder(frame, *main_area),
        Some(Page::Start) => start::render(frame, ctx, *main_area),
        Some(Page::Training) => training::render(frame, ctx, *main_area),
        Some(Page::Summary) => summary::render(frame, ctx, *main_area),
    }
    status::render(frame, ctx, *status_area);
}

/// Shown until the host sends its first snapshot.
fn render_placeholder(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("Waiting for host...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, centered_row(area));
}

/// One-row strip through the vertical middle of `area`.
fn centered_row(area: Rect) -> Rect {
    Rect { y: area.y + area.height / 2, height: area.height.min(1), ..area }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use kana_app::{AppEvent, EditOp, HostMessage, KeyInput, Snapshot, SubmittedResult};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    /// Screen contents, one string per row. Wide glyphs are followed by a
    /// blank cell.
    fn screen(session: &Session<Instant>, input: &InputState, now: Instant) -> Vec<String> {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, &ViewContext { session, input, now })).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|row| row.contains(needle))
    }

    fn session_with(snapshot: Snapshot, now: Instant) -> Session<Instant> {
        let mut session = Session::new(now);
        let raw = HostMessage::Update(snapshot).encode().unwrap();
        session.handle(AppEvent::Host(Arc::from(raw)), now);
        session
    }

    #[test]
    fn placeholder_before_first_snapshot() {
        let now = Instant::now();
        let rows = screen(&Session::new(now), &InputState::new(), now);

        assert!(contains(&rows, "Waiting for host..."));
        assert!(contains(&rows, "Esc quit"));
    }

    #[test]
    fn start_page_lists_sets_and_sizes() {
        let now = Instant::now();
        let mut snapshot = Snapshot::new(Page::Start);
        snapshot.set = "Katakana".into();
        let rows = screen(&session_with(snapshot, now), &InputState::new(), now);

        assert!(contains(&rows, "Choose your training"));
        assert!(contains(&rows, "( ) Hiragana"));
        assert!(contains(&rows, "(*) Katakana"));
        assert!(contains(&rows, "( ) Hiragana + Katakana + Rare"));
        assert!(contains(&rows, "[100]"));
        assert!(contains(&rows, "[All]"));
    }

    #[test]
    fn training_card_shows_progress_and_answer() {
        let now = Instant::now();
        let mut snapshot = Snapshot::new(Page::Training);
        snapshot.set = "Hiragana".into();
        snapshot.word = "neko".into();
        snapshot.hits = 3;
        snapshot.misses = 1;
        snapshot.remaining = 7;
        snapshot.chars_done = 12;
        snapshot.chars_total = 40;
        let mut session = session_with(snapshot, now);
        let mut input = InputState::new();
        for c in "nek".chars() {
            input.handle_key(KeyInput::Char(c), &mut session, now);
        }

        let rows = screen(&session, &input, now + Duration::from_millis(2500));

        assert!(contains(&rows, "neko"));
        assert!(contains(&rows, "> nek"));
        assert!(contains(&rows, "3/10 (1 miss)"));
        assert!(contains(&rows, "12/40"));
        assert!(contains(&rows, "2.5s"));
        assert!(!contains(&rows, "Wrong answer"));
    }

    #[test]
    fn wrong_answer_panel_follows_graded_snapshot() {
        let now = Instant::now();
        let mut snapshot = Snapshot::new(Page::Training);
        snapshot.submitted = Some(SubmittedResult {
            is_match: false,
            diff: vec![EditOp::Change("nu".into(), "ne".into()), EditOp::Same("ko".into())],
            split: vec!["ね".into(), "こ".into()],
        });
        let rows = screen(&session_with(snapshot, now), &InputState::new(), now);

        assert!(contains(&rows, "Wrong answer"));
        assert!(contains(&rows, "Expected: neko"));
        assert!(contains(&rows, "Was:      nuko"));
    }

    #[test]
    fn matched_answer_has_no_panel() {
        let now = Instant::now();
        let mut snapshot = Snapshot::new(Page::Training);
        snapshot.submitted = Some(SubmittedResult {
            is_match: true,
            diff: vec![EditOp::Same("ko".into())],
            split: vec!["こ".into()],
        });
        let rows = screen(&session_with(snapshot, now), &InputState::new(), now);

        assert!(!contains(&rows, "Wrong answer"));
    }

    #[test]
    fn paused_training_hides_the_card() {
        let now = Instant::now();
        let mut snapshot = Snapshot::new(Page::Training);
        snapshot.word = "neko".into();
        let mut session = session_with(snapshot, now);
        session.toggle_pause(now);

        let rows = screen(&session, &InputState::new(), now);

        assert!(contains(&rows, "Paused"));
        assert!(!contains(&rows, "neko"));
    }

    #[test]
    fn summary_reports_misses() {
        let now = Instant::now();
        let mut snapshot = Snapshot::new(Page::Summary);
        snapshot.hits = 9;
        snapshot.misses = 2;
        let rows = screen(&session_with(snapshot, now), &InputState::new(), now);

        assert!(contains(&rows, "Missed 2 in 9"));
        assert!(contains(&rows, "[Back]"));
    }
}

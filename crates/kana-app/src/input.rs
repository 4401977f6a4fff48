//! Terminal-agnostic keyboard input.
//!
//! [`InputState`] owns the answer buffer and the start-menu selection and
//! maps keys to [`Session`] operations. The cursor counts characters, not
//! bytes, so kana input edits correctly.

use std::{ops::Sub, time::Duration};

use crate::{AppAction, FocusTarget, LessonSet, Page, SESSION_SIZES, Session};

/// Keyboard input abstraction.
///
/// Decouples key handling from terminal libraries so the same bindings run
/// under the TUI and in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Escape key (quit).
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Pause/Break key.
    Pause,
    /// Function key `F1`..`F12`.
    F(u8),
}

/// Size preselected on the start page (100 words).
const DEFAULT_SIZE_INDEX: usize = 1;

/// View-side input state.
#[derive(Debug)]
pub struct InputState {
    /// Answer buffer.
    buffer: String,
    /// Cursor position in characters.
    cursor: usize,
    /// Who receives printable keys.
    focus: FocusTarget,
    /// Set chosen on the start page. `None` follows the host's selector.
    selected_set: Option<LessonSet>,
    /// Index into [`SESSION_SIZES`].
    size_index: usize,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            focus: FocusTarget::Answer,
            selected_set: None,
            size_index: DEFAULT_SIZE_INDEX,
        }
    }
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current answer text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current focus target.
    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    /// Move focus.
    pub fn set_focus(&mut self, focus: FocusTarget) {
        self.focus = focus;
    }

    /// Lesson set highlighted on the start page.
    ///
    /// Without an explicit choice this follows the host's selector, falling
    /// back to the first set.
    pub fn selected_set<I>(&self, session: &Session<I>) -> LessonSet
    where
        I: Copy + Ord + Sub<Output = Duration>,
    {
        self.selected_set
            .or_else(|| session.snapshot().and_then(|s| LessonSet::from_selector(&s.set)))
            .unwrap_or_default()
    }

    /// Drill size highlighted on the start page.
    pub fn selected_size(&self) -> u32 {
        SESSION_SIZES[self.size_index]
    }

    /// Index of the highlighted drill size.
    pub fn size_index(&self) -> usize {
        self.size_index
    }

    /// Discard the answer buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Return to the initial state, keeping nothing.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Handle a key and return actions for the runtime.
    pub fn handle_key<I>(
        &mut self,
        key: KeyInput,
        session: &mut Session<I>,
        now: I,
    ) -> Vec<AppAction>
    where
        I: Copy + Ord + Sub<Output = Duration>,
    {
        match key {
            KeyInput::Esc => return session.quit(),
            KeyInput::F(5) => return session.refresh(),
            KeyInput::Pause | KeyInput::F(2) => return session.toggle_pause(now),
            _ => {},
        }

        match session.page() {
            Some(Page::Start) => self.handle_start_key(key, session, now),
            Some(Page::Training) => self.handle_training_key(key, session, now),
            Some(Page::Summary) => match key {
                KeyInput::Enter | KeyInput::Backspace | KeyInput::F(3) => session.restart(),
                _ => vec![],
            },
            None => match key {
                KeyInput::F(3) => session.restart(),
                _ => vec![],
            },
        }
    }

    fn handle_start_key<I>(
        &mut self,
        key: KeyInput,
        session: &mut Session<I>,
        now: I,
    ) -> Vec<AppAction>
    where
        I: Copy + Ord + Sub<Output = Duration>,
    {
        match key {
            KeyInput::Up => {
                self.selected_set = Some(self.selected_set(session).prev());
                vec![AppAction::Render]
            },
            KeyInput::Down => {
                self.selected_set = Some(self.selected_set(session).next());
                vec![AppAction::Render]
            },
            KeyInput::Left => {
                self.size_index = self.size_index.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                self.size_index = (self.size_index + 1).min(SESSION_SIZES.len() - 1);
                vec![AppAction::Render]
            },
            KeyInput::Enter => {
                let set = self.selected_set(session);
                session.start(set.as_str(), self.selected_size(), now)
            },
            KeyInput::Char(c) => match c.to_digit(10).map(|d| d as usize) {
                Some(digit @ 1..=7) => {
                    self.size_index = digit - 1;
                    let set = self.selected_set(session);
                    session.start(set.as_str(), self.selected_size(), now)
                },
                _ => vec![],
            },
            KeyInput::F(3) => session.restart(),
            _ => vec![],
        }
    }

    fn handle_training_key<I>(
        &mut self,
        key: KeyInput,
        session: &mut Session<I>,
        now: I,
    ) -> Vec<AppAction>
    where
        I: Copy + Ord + Sub<Output = Duration>,
    {
        if key == KeyInput::F(3) {
            self.clear();
            return session.restart();
        }
        if self.focus != FocusTarget::Answer || !session.is_answering() {
            return vec![];
        }

        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
                vec![AppAction::Render]
            },
            KeyInput::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
                vec![AppAction::Render]
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                vec![AppAction::Render]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppAction::Render]
            },
            KeyInput::End => {
                self.cursor = self.char_len();
                vec![AppAction::Render]
            },
            KeyInput::Enter => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                let mut actions = session.submit(text, now);
                actions.push(AppAction::Render);
                actions
            },
            _ => vec![],
        }
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, cursor: usize) -> usize {
        self.buffer.char_indices().nth(cursor).map_or(self.buffer.len(), |(at, _)| at)
    }
}

//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The host is a child process
//! reached through [`HostProcess`].

use std::{
    io::{self, Stdout, stdout},
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use kana_app::{AppEvent, Driver, DriverEvent, FocusTarget, InputState, KeyInput, Session};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tracing::debug;

use crate::{HostProcess, ui};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The host program could not be started.
    #[error("failed to start host {program:?}: {source}")]
    HostSpawn {
        /// Program that failed to start.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },

    /// The host's input pipe is closed.
    #[error("host closed its input")]
    HostClosed,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui) and the host
/// transport.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    host: HostProcess,
    tick: Duration,
}

impl TerminalDriver {
    /// Take over the terminal and drive `host`.
    ///
    /// `tick` is the redraw interval for the live answer timer.
    pub fn new(host: HostProcess, tick: Duration) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, host, tick })
    }
}

/// Convert a crossterm key event to [`KeyInput`].
///
/// `Ctrl+C` maps to `Esc` since raw mode swallows the signal.
pub fn convert_key(event: KeyEvent) -> Option<KeyInput> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(KeyInput::Esc),
            _ => None,
        };
    }

    match event.code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        KeyCode::Pause => Some(KeyInput::Pause),
        KeyCode::F(n) => Some(KeyInput::F(n)),
        _ => None,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;
    type Instant = Instant;

    async fn poll_event(
        &mut self,
        session: &mut Session<Instant>,
        input: &mut InputState,
    ) -> Result<DriverEvent, Self::Error> {
        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        let actions = match convert_key(key_event) {
                            Some(key) => input.handle_key(key, session, Instant::now()),
                            None => vec![],
                        };
                        Ok(DriverEvent::Actions(actions))
                    },
                    Some(Ok(Event::Resize(..))) => {
                        Ok(DriverEvent::Actions(session.handle(AppEvent::Resize, Instant::now())))
                    },
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(DriverEvent::Actions(vec![])),
                }
            }

            // Host output
            line = self.host.link_mut().recv() => {
                Ok(line.map_or(DriverEvent::HostClosed, DriverEvent::HostLine))
            }

            // Tick timeout
            () = tokio::time::sleep(self.tick) => {
                Ok(DriverEvent::Actions(session.handle(AppEvent::Tick, Instant::now())))
            }
        }
    }

    async fn send_line(&mut self, line: String) -> Result<(), Self::Error> {
        self.host.link().send(line)
    }

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn render(
        &mut self,
        session: &Session<Instant>,
        input: &InputState,
    ) -> Result<(), Self::Error> {
        let now = Instant::now();
        self.terminal.draw(|frame| {
            ui::render(frame, &ui::ViewContext { session, input, now });
        })?;
        Ok(())
    }

    fn focus(&mut self, target: FocusTarget) {
        debug!(?target, "focus");
    }

    fn reload(&mut self) -> Result<(), Self::Error> {
        self.terminal.clear()?;
        Ok(())
    }

    fn stop(&mut self) {
        self.host.stop();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

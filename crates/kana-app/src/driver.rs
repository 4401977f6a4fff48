//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the runtime from the terminal and the host
//! transport. Each frontend implements it, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::{future::Future, ops::Sub, time::Duration};

use crate::{AppAction, FocusTarget, InputState, Session};

/// One step of driver input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// Actions produced by handling a key, tick or resize.
    Actions(Vec<AppAction>),
    /// One raw line from the host.
    HostLine(String),
    /// The host closed its output.
    HostClosed,
}

/// Abstracts I/O operations for the runtime.
///
/// # Associated Types
///
/// - [`Error`](Driver::Error): Platform-specific error type
/// - [`Instant`](Driver::Instant): Time representation (real or virtual)
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in tests.
    type Instant: Copy + Ord + Send + Sync + Sub<Output = Duration>;

    /// Wait for the next input.
    ///
    /// Keys, ticks and resizes are applied to `session` and `input` here and
    /// come back as [`DriverEvent::Actions`]. Host lines are returned raw.
    fn poll_event(
        &mut self,
        session: &mut Session<Self::Instant>,
        input: &mut InputState,
    ) -> impl Future<Output = Result<DriverEvent, Self::Error>> + Send;

    /// Write one encoded intent to the host.
    ///
    /// # Errors
    ///
    /// Returns an error if the host's input is closed.
    fn send_line(&mut self, line: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Current time instant.
    fn now(&self) -> Self::Instant;

    /// Render the session.
    fn render(
        &mut self,
        session: &Session<Self::Instant>,
        input: &InputState,
    ) -> Result<(), Self::Error>;

    /// Move keyboard focus in the view.
    fn focus(&mut self, target: FocusTarget);

    /// Rebuild the view from scratch.
    fn reload(&mut self) -> Result<(), Self::Error>;

    /// Release resources.
    fn stop(&mut self);
}

//! Session side-effects.
//!
//! [`AppAction`]s are instructions produced by the [`crate::Session`] state
//! machine for the runtime to execute. `Render` doubles as the
//! "state changed" notification for the view.

use crate::Intent;

/// Input element that should receive keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The answer field on the training page.
    Answer,
    /// The page itself (answer field inactive).
    Main,
}

/// Actions produced by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Redraw the view.
    Render,

    /// Quit the application.
    Quit,

    /// Send an intent to the host.
    Send(Intent),

    /// Move keyboard focus.
    Focus(FocusTarget),

    /// Discard the answer buffer.
    ClearInput,

    /// Reload the whole view. Session state is kept.
    Reload,
}

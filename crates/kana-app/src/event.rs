//! Session input events.
//!
//! Events originate from the driver (ticks, resizes) and from the host
//! through the [`crate::Bridge`] subscription.

use std::sync::Arc;

/// Events processed by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Periodic tick. Refreshes the live answer timer.
    Tick,

    /// The terminal was resized.
    Resize,

    /// One raw inbound host message, not yet decoded.
    Host(Arc<str>),

    /// The host stopped sending.
    HostClosed,
}

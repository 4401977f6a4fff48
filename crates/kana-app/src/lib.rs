//! Application layer for the kana drill UI
//!
//! Pure state machines and a generic runtime, so the same session logic runs
//! under the terminal frontend and in tests.
//!
//! # Components
//!
//! - [`Session`]: drill state machine (page, pause flag, answer timer)
//! - [`render_diff`]: aligns a graded answer's edit script with the kana split
//! - [`Bridge`]: outbound intent queue and inbound message fan-out
//! - [`InputState`]: key bindings and the answer buffer
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod bridge;
pub mod diff;
mod driver;
mod error;
mod event;
mod input;
pub mod protocol;
mod runtime;
mod session;
mod state;
mod timer;

pub use action::{AppAction, FocusTarget};
pub use bridge::{Bridge, Subscription};
pub use diff::{DiffRender, Highlight, Span, SplitMismatch, StyledText, render_diff};
pub use driver::{Driver, DriverEvent};
pub use error::ProtocolError;
pub use event::AppEvent;
pub use input::{InputState, KeyInput};
pub use protocol::{EditOp, HostMessage, Intent, Page, Snapshot, SubmittedResult};
pub use runtime::Runtime;
pub use session::Session;
pub use state::{LessonSet, SESSION_SIZES, size_label};
pub use timer::AnswerTimer;

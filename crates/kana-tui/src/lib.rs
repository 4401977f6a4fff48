//! Terminal UI for the kana drill
//!
//! A thin shell over [`kana_app::Driver`] that provides terminal and host
//! process I/O. All orchestration logic lives in the generic
//! [`kana_app::Runtime`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod host;
pub mod logging;
pub mod terminal;
pub mod ui;

pub use host::{HostLink, HostProcess, HostWriter};
pub use kana_app::{Driver, KeyInput, Runtime, Session};
pub use terminal::{TerminalDriver, TerminalError, convert_key};

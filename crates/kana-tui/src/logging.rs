//! Logging setup.
//!
//! The TUI owns stdout and stderr, so nothing is printed. Events go to:
//! - the host, as `Console` (INFO) or `Error` (WARN, ERROR) intents
//! - an optional log file, at whatever the filter admits

use std::{fmt, fs::File, path::Path, sync::Mutex};

use kana_app::Intent;
use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::{
    EnvFilter, fmt as tracing_fmt,
    layer::{Context, Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::{HostWriter, TerminalError};

/// Install the global subscriber.
///
/// `level` is the default filter directive; `RUST_LOG` overrides it.
pub fn init(level: &str, log_file: Option<&Path>, host: HostWriter) -> Result<(), TerminalError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            Some(tracing_fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        },
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(HostLogLayer::new(host))
        .with(file_layer)
        .init();
    Ok(())
}

/// Forwards INFO and more severe events to the host.
pub struct HostLogLayer {
    host: HostWriter,
}

impl HostLogLayer {
    /// Forward to `host`.
    pub fn new(host: HostWriter) -> Self {
        Self { host }
    }
}

impl<S: Subscriber> Layer<S> for HostLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() > Level::INFO {
            return;
        }

        let mut collector = FieldCollector::default();
        event.record(&mut collector);
        let text = format!("{}: {}", meta.target(), collector.finish());

        let intent =
            if *meta.level() == Level::INFO { Intent::Console(text) } else { Intent::Error(text) };
        if let Ok(line) = intent.encode() {
            self.host.send(line).ok();
        }
    }
}

/// Renders event fields as `message key=value ...`.
#[derive(Default)]
struct FieldCollector {
    message: String,
    fields: Vec<String>,
}

impl FieldCollector {
    fn finish(self) -> String {
        let mut out = self.message;
        for field in self.fields {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&field);
        }
        out
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }
}

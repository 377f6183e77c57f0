#![forbid(unsafe_code)]

//! Tracing layer that writes events to the browser console.
//!
//! Each event becomes one line, `target: message key=value ...`, passed to a
//! [`ConsoleSink`] together with its level. The default sink picks the
//! `console` method matching the level.
//!
//! ```no_run
//! use stylelens_demo::console::BrowserConsoleLayer;
//! use tracing_subscriber::prelude::*;
//!
//! let subscriber = tracing_subscriber::registry().with(BrowserConsoleLayer::new(tracing::Level::DEBUG));
//! let _ = tracing::subscriber::set_global_default(subscriber);
//! ```

use std::fmt::{self, Write as FmtWrite};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Receives formatted lines.
pub type ConsoleSink = Box<dyn Fn(Level, &str) + Send + Sync>;

/// Forwards events at or above a maximum verbosity to a [`ConsoleSink`].
pub struct BrowserConsoleLayer {
    max_level: Level,
    sink: ConsoleSink,
}

impl BrowserConsoleLayer {
    /// Layer writing to the browser `console`.
    pub fn new(max_level: Level) -> Self {
        Self::with_sink(max_level, Box::new(write_to_console))
    }

    pub fn with_sink(max_level: Level, sink: ConsoleSink) -> Self {
        Self { max_level, sink }
    }
}

impl<S> Layer<S> for BrowserConsoleLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = *metadata.level();
        if level > self.max_level {
            return;
        }
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        (self.sink)(level, &visitor.finish(metadata.target()));
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self, target: &str) -> String {
        format!("{target}: {}{}", self.message, self.fields)
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn write_to_console(level: Level, line: &str) {
    use web_sys::console;

    let line = line.into();
    match level {
        Level::ERROR => console::error_1(&line),
        Level::WARN => console::warn_1(&line),
        Level::INFO => console::info_1(&line),
        Level::DEBUG | Level::TRACE => console::debug_1(&line),
    }
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn write_to_console(level: Level, line: &str) {
    eprintln!("{level:>5} {line}");
}

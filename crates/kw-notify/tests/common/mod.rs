//! Shared helpers for integration tests.

use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// One captured log line.
#[derive(Debug, Clone)]
pub struct CapturedLog {
    pub level: Level,
    pub text: String,
}

/// Logs recorded while a [`capture_logs`] guard is alive.
#[derive(Clone, Default)]
pub struct LogSink(Arc<Mutex<Vec<CapturedLog>>>);

impl LogSink {
    pub fn at(&self, level: Level) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|log| log.level == level)
            .map(|log| log.text.clone())
            .collect()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.at(level).iter().any(|text| text.contains(needle))
    }
}

struct FieldWriter<'a>(&'a mut String);

impl Visit for FieldWriter<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let _ = write!(self.0, "{}={:?} ", field.name(), value);
    }
}

struct CaptureLayer(LogSink);

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut text = String::new();
        event.record(&mut FieldWriter(&mut text));
        self.0 .0.lock().unwrap().push(CapturedLog {
            level: *event.metadata().level(),
            text,
        });
    }
}

/// Capture every event emitted on this thread until the guard drops.
///
/// Use with the default current-thread `#[tokio::test]` runtime.
pub fn capture_logs() -> (LogSink, DefaultGuard) {
    let sink = LogSink::default();
    let subscriber = Registry::default().with(CaptureLayer(sink.clone()));
    let guard = tracing::subscriber::set_default(subscriber);
    (sink, guard)
}

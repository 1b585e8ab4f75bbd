//! Log sinks for the error reporter.

use std::sync::Mutex;

/// Anything that can record a one-line error message.
pub trait LogSink {
    fn record(&self, message: &str);
}

/// Sends messages to the process-wide `tracing` subscriber at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Keeps messages in memory; used by tests and by callers that collect errors.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for MemorySink {
    fn record(&self, message: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push(message.to_string());
    }
}

impl<T: LogSink + ?Sized> LogSink for &T {
    fn record(&self, message: &str) {
        (**self).record(message)
    }
}

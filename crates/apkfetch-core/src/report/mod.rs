//! Error reporting: hand an error to a log sink and give it back to the caller.
//!
//! Building a [`FetchError`] and logging it are separate steps. Call sites that
//! want both use [`report`] or the [`log_error!`](crate::log_error) macro.

mod sink;

pub use sink::{LogSink, MemorySink, TracingSink};

use crate::error::FetchError;

/// Records `err` (message and cause chain) on `sink` and returns it unchanged.
pub fn report(sink: &dyn LogSink, err: FetchError) -> FetchError {
    sink.record(&err.render());
    err
}

/// Formats a message, builds a [`FetchError`] of the given kind, records it on
/// the sink and evaluates to the error.
///
/// ```
/// use apkfetch_core::error::ErrorKind;
/// use apkfetch_core::log_error;
/// use apkfetch_core::report::MemorySink;
///
/// let sink = MemorySink::new();
/// let err = log_error!(&sink, ErrorKind::HttpStatus(404), "HTTP response error: {}", "404 Not Found");
/// assert_eq!(err.to_string(), "HTTP response error: 404 Not Found");
/// assert_eq!(sink.lines(), vec!["HTTP response error: 404 Not Found".to_string()]);
/// ```
#[macro_export]
macro_rules! log_error {
    ($sink:expr, $kind:expr, $($arg:tt)+) => {
        $crate::report::report(
            $sink,
            $crate::error::FetchError::new($kind, format!($($arg)+)),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io;

    #[test]
    fn report_records_full_chain_and_returns_error() {
        let sink = MemorySink::new();
        let cause = io::Error::new(io::ErrorKind::NotFound, "no such directory");
        let err = FetchError::with_source(ErrorKind::CreateFile, "error creating file /a/b", cause);
        let back = report(&sink, err);
        assert_eq!(back.kind(), ErrorKind::CreateFile);
        assert_eq!(back.to_string(), "error creating file /a/b");
        assert_eq!(sink.lines(), vec!["error creating file /a/b: no such directory"]);
    }

    #[test]
    fn macro_formats_arguments() {
        let sink = MemorySink::new();
        let err = crate::log_error!(&sink, ErrorKind::Copy, "error copying content to file {}", "/tmp/x");
        assert_eq!(err.kind(), ErrorKind::Copy);
        assert_eq!(sink.lines().len(), 1);
        assert!(sink.lines()[0].contains("/tmp/x"));
    }

    #[test]
    fn constructing_does_not_log() {
        let sink = MemorySink::new();
        let _ = FetchError::new(ErrorKind::Transport, "connection refused");
        assert!(sink.lines().is_empty());
    }
}

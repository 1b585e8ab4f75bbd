//! Error type shared by fetch, verify and the error reporter.

use std::error::Error as StdError;
use std::fmt;

type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// What failed, so callers can branch without inspecting message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// URL did not parse or is not http/https.
    InvalidUrl,
    /// Network-level failure reported by the HTTP client (DNS, connect, reset).
    Transport,
    /// Deadline elapsed before the transfer completed.
    Timeout,
    /// Caller cancelled the transfer.
    Cancelled,
    /// Final HTTP status was not 200.
    HttpStatus(u32),
    /// Destination file could not be created.
    CreateFile,
    /// The body could not be written, or broke off after a 200 status.
    Copy,
    /// A local file could not be opened or read.
    Read,
    /// Computed digest differs from the expected one.
    ChecksumMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidUrl => write!(f, "invalid url"),
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::Cancelled => write!(f, "cancelled"),
            ErrorKind::HttpStatus(code) => write!(f, "http {}", code),
            ErrorKind::CreateFile => write!(f, "create file"),
            ErrorKind::Copy => write!(f, "copy"),
            ErrorKind::Read => write!(f, "read"),
            ErrorKind::ChecksumMismatch => write!(f, "checksum mismatch"),
        }
    }
}

/// Error value carrying a kind, a message and an optional wrapped cause.
///
/// `Display` prints only the message; the cause is reachable via `source()`
/// (so `{:#}` in anyhow prints the full chain once). Constructing a
/// `FetchError` never logs; see [`crate::report`] for that.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<Cause>,
}

impl FetchError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<E>(kind: ErrorKind, message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message followed by every cause in the chain, `: `-separated.
    pub fn render(&self) -> String {
        let mut out = self.message.clone();
        let mut next = self.source();
        while let Some(cause) = next {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            next = cause.source();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn display_is_message_only() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let e = FetchError::with_source(ErrorKind::CreateFile, "error creating file /x", io_err);
        assert_eq!(e.to_string(), "error creating file /x");
        assert_eq!(e.kind(), ErrorKind::CreateFile);
        assert!(e.source().is_some());
    }

    #[test]
    fn render_includes_cause_chain() {
        let io_err = io::Error::new(io::ErrorKind::Other, "disk full");
        let e = FetchError::with_source(ErrorKind::Copy, "error copying content to file /y", io_err);
        assert_eq!(e.render(), "error copying content to file /y: disk full");
    }

    #[test]
    fn render_without_cause() {
        let e = FetchError::new(ErrorKind::HttpStatus(404), "HTTP response error: 404 Not Found");
        assert_eq!(e.render(), "HTTP response error: 404 Not Found");
        assert!(e.source().is_none());
    }

    #[test]
    fn kind_display() {
        assert_eq!(ErrorKind::HttpStatus(503).to_string(), "http 503");
        assert_eq!(ErrorKind::ChecksumMismatch.to_string(), "checksum mismatch");
    }
}

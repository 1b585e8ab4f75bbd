//! Single-stream HTTP GET of an artifact into a local file.
//!
//! Success is a final status of exactly 200. The destination is created (or
//! truncated) only once a 200 status line has been seen, so an error response
//! never clobbers an existing file. No retries; a failed fetch may leave a
//! partially written destination behind if the failure happened mid-body.

mod options;
mod status;

pub use options::FetchOptions;
pub use status::{parse_status_line, StatusLine};

use crate::error::{ErrorKind, FetchError};
use crate::report::{self, LogSink, TracingSink};
use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str;

/// Downloads `url` into `output_path` with default options, logging to `tracing`.
pub fn download(url: &str, output_path: &Path) -> Result<u64, FetchError> {
    download_file(url, output_path, &FetchOptions::default(), &TracingSink)
}

/// Downloads `url` into `output_path`. Returns the number of body bytes written.
///
/// Status, create and copy failures are recorded on `sink` before being
/// returned. A body that breaks off after a 200 status (short read, reset)
/// counts as a copy failure. URL, transport, timeout and cancellation errors
/// are returned without logging.
pub fn download_file(
    url: &str,
    output_path: &Path,
    opts: &FetchOptions,
    sink: &dyn LogSink,
) -> Result<u64, FetchError> {
    validate_url(url)?;
    if opts.is_cancelled() {
        return Err(FetchError::new(ErrorKind::Cancelled, format!("GET {} cancelled", url)));
    }
    tracing::debug!(url, path = %output_path.display(), "fetching");

    let status: RefCell<Option<StatusLine>> = RefCell::new(None);
    let output: RefCell<Option<File>> = RefCell::new(None);
    let failure: RefCell<Option<FetchError>> = RefCell::new(None);
    let written = Cell::new(0u64);

    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, opts).map_err(|e| transport_error(url, e))?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                // Every response in a redirect chain starts with a status line;
                // the last one seen belongs to the body being delivered.
                if let Some(line) = str::from_utf8(data).ok().and_then(parse_status_line) {
                    *status.borrow_mut() = Some(line);
                }
                true
            })
            .map_err(|e| transport_error(url, e))?;
        transfer
            .write_function(|data| {
                if !status.borrow().as_ref().is_some_and(StatusLine::is_ok) {
                    return Ok(data.len()); // drained; the status is reported after perform
                }
                let mut out = output.borrow_mut();
                if out.is_none() {
                    match File::create(output_path) {
                        Ok(f) => *out = Some(f),
                        Err(e) => {
                            *failure.borrow_mut() = Some(create_error(output_path, e));
                            return Ok(0);
                        }
                    }
                }
                if let Some(file) = out.as_mut() {
                    if let Err(e) = file.write_all(data) {
                        *failure.borrow_mut() = Some(copy_error(output_path, e));
                        return Ok(0);
                    }
                }
                written.set(written.get() + data.len() as u64);
                Ok(data.len())
            })
            .map_err(|e| transport_error(url, e))?;
        transfer
            .progress_function(|_, _, _, _| !opts.is_cancelled())
            .map_err(|e| transport_error(url, e))?;
        transfer.perform()
    };

    if let Some(err) = failure.into_inner() {
        return Err(report::report(sink, err));
    }

    let status = match status.into_inner() {
        Some(s) => Some(s),
        None => easy.response_code().ok().filter(|c| *c != 0).map(StatusLine::from_code),
    };

    if let Err(e) = performed {
        if e.is_aborted_by_callback() && opts.is_cancelled() {
            return Err(FetchError::with_source(
                ErrorKind::Cancelled,
                format!("GET {} cancelled", url),
                e,
            ));
        }
        if e.is_operation_timedout() {
            return Err(FetchError::with_source(
                ErrorKind::Timeout,
                format!("GET {} timed out", url),
                e,
            ));
        }
        return Err(match status {
            // Body started under a 200 and then broke off (short body, reset).
            Some(s) if s.is_ok() => report::report(sink, copy_error(output_path, e)),
            Some(s) => status_error(&s, sink),
            None => transport_error(url, e),
        });
    }

    match status {
        Some(s) if s.is_ok() => {}
        Some(s) => return Err(status_error(&s, sink)),
        None => {
            return Err(FetchError::new(
                ErrorKind::Transport,
                format!("GET {}: no HTTP status received", url),
            ))
        }
    }

    // 200 with an empty body never reaches the write callback.
    let mut file = match output.into_inner() {
        Some(f) => f,
        None => File::create(output_path)
            .map_err(|e| report::report(sink, create_error(output_path, e)))?,
    };
    file.flush()
        .map_err(|e| report::report(sink, copy_error(output_path, e)))?;

    let bytes = written.get();
    tracing::info!(url, path = %output_path.display(), bytes, "fetch complete");
    Ok(bytes)
}

/// Accepts only absolute http/https URLs.
fn validate_url(url: &str) -> Result<(), FetchError> {
    let parsed = url::Url::parse(url).map_err(|e| {
        FetchError::with_source(ErrorKind::InvalidUrl, format!("invalid URL {:?}", url), e)
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::new(
            ErrorKind::InvalidUrl,
            format!("unsupported URL scheme {:?} in {}", other, url),
        )),
    }
}

fn configure(
    easy: &mut curl::easy::Easy,
    url: &str,
    opts: &FetchOptions,
) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(opts.follow_redirects)?;
    if opts.follow_redirects {
        easy.max_redirections(opts.max_redirections)?;
    }
    if let Some(d) = opts.connect_timeout {
        easy.connect_timeout(d)?;
    }
    if let Some(d) = opts.timeout {
        easy.timeout(d)?;
    }
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }
    easy.progress(true)?;
    Ok(())
}

fn status_error(status: &StatusLine, sink: &dyn LogSink) -> FetchError {
    crate::log_error!(
        sink,
        ErrorKind::HttpStatus(status.code),
        "HTTP response error: {}",
        status.text
    )
}

fn create_error(path: &Path, e: std::io::Error) -> FetchError {
    FetchError::with_source(
        ErrorKind::CreateFile,
        format!("error creating file {}", path.display()),
        e,
    )
}

fn copy_error<E>(path: &Path, e: E) -> FetchError
where
    E: std::error::Error + Send + Sync + 'static,
{
    FetchError::with_source(
        ErrorKind::Copy,
        format!("error copying content to file {}", path.display()),
        e,
    )
}

fn transport_error(url: &str, e: curl::Error) -> FetchError {
    FetchError::with_source(ErrorKind::Transport, format!("GET {} failed", url), e)
}

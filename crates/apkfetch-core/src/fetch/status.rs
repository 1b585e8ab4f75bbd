//! Parse HTTP status lines collected by curl's header callback.

/// Status of one HTTP response: numeric code plus the text shown in errors
/// (e.g. `404 Not Found`, or just `200` when the server sends no reason).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub code: u32,
    pub text: String,
}

impl StatusLine {
    /// Used when no status line was captured and only the numeric code is known.
    pub fn from_code(code: u32) -> Self {
        Self {
            code,
            text: code.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == 200
    }
}

/// Parses `HTTP/1.1 404 Not Found` style lines. Returns None for header
/// lines and anything else that is not a status line.
pub fn parse_status_line(line: &str) -> Option<StatusLine> {
    let line = line.trim();
    let rest = line.strip_prefix("HTTP/")?;
    let (_version, rest) = rest.split_once(' ')?;
    let rest = rest.trim_start();
    let (code_str, reason) = match rest.split_once(' ') {
        Some((c, r)) => (c, r.trim()),
        None => (rest, ""),
    };
    if code_str.len() != 3 {
        return None;
    }
    let code = code_str.parse::<u32>().ok()?;
    let text = if reason.is_empty() {
        code_str.to_string()
    } else {
        format!("{} {}", code_str, reason)
    };
    Some(StatusLine { code, text })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http11_with_reason() {
        let s = parse_status_line("HTTP/1.1 404 Not Found\r\n").unwrap();
        assert_eq!(s.code, 404);
        assert_eq!(s.text, "404 Not Found");
        assert!(!s.is_ok());
    }

    #[test]
    fn http2_without_reason() {
        let s = parse_status_line("HTTP/2 200").unwrap();
        assert_eq!(s.code, 200);
        assert_eq!(s.text, "200");
        assert!(s.is_ok());
    }

    #[test]
    fn multi_word_reason() {
        let s = parse_status_line("HTTP/1.0 500 Internal Server Error").unwrap();
        assert_eq!(s.text, "500 Internal Server Error");
    }

    #[test]
    fn header_lines_are_not_status() {
        assert!(parse_status_line("Content-Length: 5").is_none());
        assert!(parse_status_line("").is_none());
        assert!(parse_status_line("HTTP/1.1 abc OK").is_none());
        assert!(parse_status_line("HTTP/1.1").is_none());
    }

    #[test]
    fn from_code() {
        assert_eq!(StatusLine::from_code(502).text, "502");
    }
}

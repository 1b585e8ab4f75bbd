//! SHA-256 checksums of local files.
//!
//! Digests are lowercase hex. Hashing is a single pass over the file with a
//! bounded buffer; I/O errors are returned as-is and no partial digest is
//! ever produced.

use crate::error::{ErrorKind, FetchError};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use walkdir::WalkDir;

const BUF_SIZE: usize = 64 * 1024;

/// Compute SHA-256 of a file and return the digest as lowercase hex.
pub fn sha256_path(path: &Path) -> io::Result<String> {
    let mut f = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = match f.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// SHA-256 of an in-memory buffer, lowercase hex.
pub fn sha256_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Hash `path` and compare against `expected` (hex, case-insensitive,
/// surrounding whitespace ignored). Returns the computed digest on match.
pub fn verify_sha256(path: &Path, expected: &str) -> Result<String, FetchError> {
    let actual = sha256_path(path).map_err(|e| {
        FetchError::with_source(ErrorKind::Read, format!("error reading {}", path.display()), e)
    })?;
    ensure_digest(path, &actual, expected)?;
    Ok(actual)
}

/// Checks an already computed digest of `path` against `expected`.
pub fn ensure_digest(path: &Path, actual: &str, expected: &str) -> Result<(), FetchError> {
    if digests_match(actual, expected) {
        return Ok(());
    }
    Err(FetchError::new(
        ErrorKind::ChecksumMismatch,
        format!(
            "checksum mismatch for {}: expected {}, got {}",
            path.display(),
            expected.trim().to_ascii_lowercase(),
            actual
        ),
    ))
}

/// Compares two hex digests, ignoring case and surrounding whitespace.
pub fn digests_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Hash every regular file under `root`, keyed by its path relative to
/// `root` with `/` separators. Symlinks are not followed.
pub fn checksum_tree(root: &Path) -> io::Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(root).map_err(io::Error::other)?;
        let key = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        out.insert(key, sha256_path(entry.path())?);
    }
    Ok(out)
}

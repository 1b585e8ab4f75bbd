//! Checksum command: compute, and optionally verify, SHA-256 of a file.

use anyhow::{Context, Result};
use apkfetch_core::checksum;
use std::path::Path;

/// Print SHA-256 of the given file. With `expect`, fail unless it matches.
pub fn run_checksum(path: &Path, expect: Option<&str>) -> Result<()> {
    let digest = match expect {
        Some(expected) => checksum::verify_sha256(path, expected)?,
        None => checksum::sha256_path(path)
            .with_context(|| format!("checksum {}", path.display()))?,
    };
    println!("{}  {}", digest, path.display());
    Ok(())
}

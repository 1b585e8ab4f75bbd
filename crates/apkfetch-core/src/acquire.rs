//! Fetch an APK, fingerprint it, and fill in the result records.

use crate::checksum;
use crate::error::{ErrorKind, FetchError};
use crate::fetch::{self, FetchOptions};
use crate::model::{ApkDetails, ApkInfo, DecompilationInfo, ProcessResult};
use crate::naming;
use crate::report::{self, LogSink};
use std::path::{Path, PathBuf};

/// What to fetch and where to put it.
#[derive(Debug, Clone)]
pub struct AcquireRequest {
    pub package_name: String,
    pub download_link: String,
    pub dest_dir: PathBuf,
    /// Local file name; derived from the link when None.
    pub file_name: Option<String>,
    /// When set, the downloaded file must hash to this value.
    pub expected_sha256: Option<String>,
}

impl AcquireRequest {
    pub fn new(
        package_name: impl Into<String>,
        download_link: impl Into<String>,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            download_link: download_link.into(),
            dest_dir: dest_dir.into(),
            file_name: None,
            expected_sha256: None,
        }
    }

    /// Resolved local file name: the explicit name made safe, or one derived
    /// from the link.
    pub fn resolved_file_name(&self) -> String {
        self.file_name
            .as_deref()
            .and_then(naming::apk_file_name)
            .unwrap_or_else(|| naming::derive_file_name(&self.download_link))
    }

    pub fn output_path(&self) -> PathBuf {
        self.dest_dir.join(self.resolved_file_name())
    }
}

/// Downloads the artifact and records its checksum.
///
/// Never returns an error: every failure is recorded on `sink` and reflected
/// as `result = Fail`. `decompilation` is left at its default.
pub fn acquire_apk(req: &AcquireRequest, opts: &FetchOptions, sink: &dyn LogSink) -> ApkInfo {
    let file_name = req.resolved_file_name();
    let mut info = ApkInfo {
        result: ProcessResult::Fail,
        apk_info: ApkDetails {
            package_name: req.package_name.clone(),
            download_link: req.download_link.clone(),
            file_name: file_name.clone(),
            manifest_checksum: String::new(),
        },
        decompilation: DecompilationInfo::default(),
    };

    let output_path = req.dest_dir.join(&file_name);
    if let Ok(digest) = fetch_and_hash(req, &output_path, opts, sink) {
        let verified = match req.expected_sha256.as_deref() {
            Some(expected) => checksum::ensure_digest(&output_path, &digest, expected)
                .map_err(|e| report::report(sink, e))
                .is_ok(),
            None => true,
        };
        // Recorded on mismatch as well.
        info.apk_info.manifest_checksum = digest;
        if verified {
            info.result = ProcessResult::Pass;
        }
    }
    tracing::debug!(package = %req.package_name, result = ?info.result, "acquire finished");
    info
}

/// Download then hash. Every error returned here has already been recorded on `sink`.
fn fetch_and_hash(
    req: &AcquireRequest,
    output_path: &Path,
    opts: &FetchOptions,
    sink: &dyn LogSink,
) -> Result<String, FetchError> {
    std::fs::create_dir_all(&req.dest_dir).map_err(|e| {
        let err = FetchError::with_source(
            ErrorKind::CreateFile,
            format!("error creating directory {}", req.dest_dir.display()),
            e,
        );
        report::report(sink, err)
    })?;

    fetch::download_file(&req.download_link, output_path, opts, sink).map_err(|e| {
        match e.kind() {
            // Already recorded by the fetcher.
            ErrorKind::HttpStatus(_) | ErrorKind::CreateFile | ErrorKind::Copy => e,
            _ => report::report(sink, e),
        }
    })?;

    checksum::sha256_path(output_path).map_err(|e| {
        let err = FetchError::with_source(
            ErrorKind::Read,
            format!("error reading {}", output_path.display()),
            e,
        );
        report::report(sink, err)
    })
}

/// Builds the decompilation record for an existing output directory by
/// hashing every file under it. Missing or unreadable directories give
/// `status = Fail` with no checksums.
pub fn describe_output(output_dir: &Path, sink: &dyn LogSink) -> DecompilationInfo {
    let mut info = DecompilationInfo {
        status: ProcessResult::Fail,
        output_directory: output_dir.display().to_string(),
        ..DecompilationInfo::default()
    };
    match checksum::checksum_tree(output_dir) {
        Ok(sums) => {
            info.layout_checksums = sums;
            info.status = ProcessResult::Pass;
        }
        Err(e) => {
            let err = FetchError::with_source(
                ErrorKind::Read,
                format!("error hashing output directory {}", output_dir.display()),
                e,
            );
            report::report(sink, err);
        }
    }
    info
}

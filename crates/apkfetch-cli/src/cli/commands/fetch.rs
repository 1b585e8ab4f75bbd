//! `apkfetch fetch <url>` – download, fingerprint and report.

use anyhow::Result;
use apkfetch_core::acquire::{acquire_apk, AcquireRequest};
use apkfetch_core::config::FetchConfig;
use apkfetch_core::fetch::FetchOptions;
use apkfetch_core::model::write_report;
use std::path::Path;
use std::time::Duration;

use crate::cli::sink::CliSink;
use crate::cli::FetchArgs;

pub fn run_fetch(cfg: &FetchConfig, args: FetchArgs, sink: &CliSink) -> Result<()> {
    let mut opts = FetchOptions::from_config(cfg);
    if let Some(secs) = args.timeout {
        opts.timeout = Some(Duration::from_secs(secs));
    }

    let dest = match args.dest {
        Some(d) => d,
        None => std::env::current_dir()?,
    };
    let mut req = AcquireRequest::new(String::new(), args.url, dest);
    req.file_name = args.name;
    req.expected_sha256 = args.expect_sha256;
    req.package_name = args
        .package
        .unwrap_or_else(|| default_package_name(&req.resolved_file_name()));

    let info = acquire_apk(&req, &opts, sink);
    if let Some(path) = &args.report {
        write_report(path, &info)?;
        tracing::info!("wrote report to {}", path.display());
    }
    println!("{}", info.to_json_pretty()?);

    if !info.result.is_pass() {
        anyhow::bail!("fetch of {} failed", req.download_link);
    }
    Ok(())
}

/// `com.example.app.apk` -> `com.example.app`.
fn default_package_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    let is_apk = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("apk"));
    match path.file_stem() {
        Some(stem) if is_apk => stem.to_string_lossy().into_owned(),
        _ => file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_name_strips_apk_extension() {
        assert_eq!(default_package_name("com.example.app.apk"), "com.example.app");
        assert_eq!(default_package_name("App.APK"), "App");
        assert_eq!(default_package_name("download.bin"), "download.bin");
        assert_eq!(default_package_name("noext"), "noext");
    }
}

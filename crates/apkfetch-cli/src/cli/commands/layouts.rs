//! `apkfetch layouts <dir>` – hash a decompiled output directory.

use anyhow::Result;
use apkfetch_core::acquire::describe_output;
use apkfetch_core::model::{read_report, write_report, ApkInfo};
use std::path::Path;

use crate::cli::sink::CliSink;

pub fn run_layouts(dir: &Path, report: Option<&Path>, sink: &CliSink) -> Result<()> {
    let decompilation = describe_output(dir, sink);

    if let Some(path) = report {
        let mut info = if path.exists() {
            read_report(path)?
        } else {
            ApkInfo::default()
        };
        info.decompilation = decompilation.clone();
        write_report(path, &info)?;
        tracing::info!("merged layout checksums into {}", path.display());
    }
    println!("{}", serde_json::to_string_pretty(&decompilation)?);

    if !decompilation.status.is_pass() {
        anyhow::bail!("could not hash {}", dir.display());
    }
    Ok(())
}

//! Result records written out as JSON.
//!
//! These are plain value types; nothing here checks that a checksum matches
//! a file or that fields agree with each other.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Outcome of a processing step. Defaults to `Fail` (not passed yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProcessResult {
    Pass,
    #[default]
    Fail,
}

impl ProcessResult {
    pub fn is_pass(self) -> bool {
        self == ProcessResult::Pass
    }
}

/// Top-level record for one artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApkInfo {
    pub result: ProcessResult,
    #[serde(rename = "apkInfo")]
    pub apk_info: ApkDetails,
    pub decompilation: DecompilationInfo,
}

/// Identifies a fetched artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApkDetails {
    pub package_name: String,
    pub download_link: String,
    pub file_name: String,
    pub manifest_checksum: String,
}

/// Decompilation status, where its output lives, and per-layout checksums.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompilationInfo {
    pub status: ProcessResult,
    #[serde(rename = "outputDirectory")]
    pub output_directory: String,
    #[serde(rename = "checksums")]
    pub layout_checksums: BTreeMap<String, String>,
}

impl ApkInfo {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

/// Write `info` as pretty JSON to `path`, creating parent directories.
pub fn write_report(path: &Path, info: &ApkInfo) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report dir {}", parent.display()))?;
    }
    let json = info.to_json_pretty()?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}

pub fn read_report(path: &Path) -> Result<ApkInfo> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read report {}", path.display()))?;
    ApkInfo::from_json(&data).with_context(|| format!("parse report {}", path.display()))
}

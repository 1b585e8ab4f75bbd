use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fetch settings loaded from `~/.config/apkfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Maximum time to establish the TCP/TLS connection, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Overall deadline for one fetch, in seconds. None = no deadline.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Follow 3xx redirects.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,
    /// Maximum redirects to follow when `follow_redirects` is on.
    #[serde(default = "default_max_redirections")]
    pub max_redirections: u32,
    /// Optional User-Agent header; None = curl's default.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirections() -> u32 {
    10
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: None,
            follow_redirects: default_follow_redirects(),
            max_redirections: default_max_redirections(),
            user_agent: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("apkfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<FetchConfig> {
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}

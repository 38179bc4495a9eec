use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::style::{self, CommentStyle};

/// Default streaming buffer size in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Per-invocation settings, threaded explicitly through every stamp and
/// verify call. No process-wide defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub style: CommentStyle,
    /// Streaming buffer size; must exceed the marker window for the style.
    pub buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: style::DOUBLE_SLASH,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Config {
    /// Config with the comment style matched to a file extension.
    pub fn for_extension(ext: &str) -> Self {
        Self {
            style: CommentStyle::for_extension(ext),
            ..Self::default()
        }
    }
}

/// Tool configuration loaded from `~/.config/fimark/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Streaming buffer size in bytes.
    pub buffer_size: usize,
    /// Style name used when extension detection finds nothing; accepts the
    /// same names as the CLI `--style` flag.
    #[serde(default)]
    pub default_style: Option<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            default_style: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fimark")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load tool configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ToolConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ToolConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ToolConfig = toml::from_str(&data)?;
    Ok(cfg)
}

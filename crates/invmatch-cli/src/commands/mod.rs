//! CLI command implementations.

pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use invmatch_core::InvmatchConfig;

/// Platform config location, `<config dir>/invmatch/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invmatch")
        .join("config.json")
}

/// Load the config named by `--config`, else the platform file if present,
/// else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvmatchConfig> {
    let config = match config_path {
        Some(path) => InvmatchConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path, e))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                InvmatchConfig::from_file(&path)?
            } else {
                InvmatchConfig::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}

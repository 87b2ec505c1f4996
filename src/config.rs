use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/protocol.toml";

/// How listings are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub output: OutputFormat,
    /// Print the network/tag columns in text component listings.
    pub show_channels: bool,
    /// Block state the `encode` command puts into block particles.
    pub sample_block_state: i32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            output: OutputFormat::Text,
            show_channels: true,
            sample_block_state: 1,
        }
    }
}

impl ProtocolConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ProtocolConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ProtocolConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Protocol config not found at {}. Using defaults",
                        path.display()
                    );
                }
                ProtocolConfig::default()
            }
        }
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = ProtocolConfig::load_from_path(&dir.path().join("absent.toml"));
        assert_eq!(cfg.log_filter, "warn");
        assert_eq!(cfg.output, OutputFormat::Text);
        assert_eq!(cfg.sample_block_state, 1);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("protocol.toml");
        fs::write(&path, "output = \"json\"\nsample_block_state = 0\n").expect("write config");

        let cfg = ProtocolConfig::load_from_path(&path);
        assert_eq!(cfg.output, OutputFormat::Json);
        assert_eq!(cfg.sample_block_state, 0);
        assert!(cfg.show_channels);
    }

    #[test]
    fn unparsable_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("protocol.toml");
        fs::write(&path, "output = \"yaml\"").expect("write config");
        assert_eq!(ProtocolConfig::load_from_path(&path).output, OutputFormat::Text);
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("protocol.toml");
        let cfg = ProtocolConfig {
            log_filter: "mdminecraft_net=debug".to_string(),
            show_channels: false,
            ..ProtocolConfig::default()
        };
        cfg.save_to_path(&path).expect("save");

        let loaded = ProtocolConfig::load_from_path(&path);
        assert_eq!(loaded.log_filter, "mdminecraft_net=debug");
        assert!(!loaded.show_channels);
    }
}

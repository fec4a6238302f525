use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use vizing::cli::edge_list::{ColoringFormat, EdgeListFormat};

/// Settings read from the CLI config file. Every field is optional; command
/// line flags win over file values, file values win over built-in defaults.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(skip)]
    path: Option<PathBuf>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub input_format: Option<EdgeListFormat>,
    #[serde(default)]
    pub output_format: Option<ColoringFormat>,
    #[serde(default)]
    pub allow_palette_growth: Option<bool>,
}

impl CliConfig {
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = explicit.or_else(default_config_path);
        let mut config = match path.as_ref() {
            Some(config_path) if config_path.exists() => read_file(config_path)?,
            _ => CliConfig::default(),
        };
        config.path = path;
        Ok(config)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn read_file(path: &Path) -> Result<CliConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read CLI config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse CLI config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("edgecolor").join("config.toml"))
}

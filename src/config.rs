// File: ./src/config.rs
// Handles configuration loading and defaults.
use crate::bucket::DEFAULT_BUCKETS;
use crate::context::AppContext;
use crate::controller::SyncOptions;
use crate::map::{DEFAULT_PADDING, DEFAULT_ZOOM, MapOptions};
use anyhow::{Error, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

fn default_featured_buckets() -> usize {
    DEFAULT_BUCKETS
}
fn default_map_padding() -> f64 {
    DEFAULT_PADDING
}
fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}
fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Dataset file (`.json`, `.yaml` or `.yml`). Relative paths resolve
    /// against the config directory.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default = "default_featured_buckets")]
    pub featured_buckets: usize,
    #[serde(default = "default_map_padding")]
    pub map_padding: f64,
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            featured_buckets: DEFAULT_BUCKETS,
            map_padding: DEFAULT_PADDING,
            default_zoom: DEFAULT_ZOOM,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Whether `err` means the config file simply does not exist yet, as
    /// opposed to being unreadable or invalid.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Dataset to load: `override_path` if given, then the configured file,
    /// then the context default.
    pub fn data_path(&self, ctx: &dyn AppContext, override_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(p) = override_path {
            return Some(p.to_path_buf());
        }
        match &self.data_file {
            Some(p) if p.is_absolute() => Some(p.clone()),
            Some(p) => ctx.get_config_dir().ok().map(|dir| dir.join(p)),
            None => ctx.get_default_data_path(),
        }
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            featured_buckets: self.featured_buckets,
            map: MapOptions {
                padding: if self.map_padding.is_finite() && self.map_padding >= 0.0 {
                    self.map_padding
                } else {
                    DEFAULT_PADDING
                },
                default_zoom: self.default_zoom,
            },
        }
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

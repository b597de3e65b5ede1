//! Cache configuration (`glcompat.toml`)
//!
//! Tunes the state-object caches: bucket count and how many unreferenced
//! objects each family keeps around before evicting. Everything has a
//! default, so an empty file (or no file) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::state::StateFamily;

/// File name looked up in the config directory
pub const CONFIG_FILE_NAME: &str = "glcompat.toml";

/// Largest accepted `cache.bucket_count`
pub const MAX_BUCKET_COUNT: usize = 1 << 20;

/// Context configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContextConfig {
    /// State cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

/// State cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Hash buckets per family cache (default: 512)
    #[serde(default = "default_bucket_count")]
    pub bucket_count: usize,
    /// Unreferenced objects retained per family
    #[serde(default)]
    pub spare_limits: SpareLimits,
}

/// Per-family bound of the spare list.
///
/// Zero means an object is destroyed as soon as nothing references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpareLimits {
    #[serde(default = "default_spare_limit")]
    pub blend: usize,
    #[serde(default = "default_spare_limit")]
    pub depth_stencil: usize,
    #[serde(default = "default_spare_limit")]
    pub rasterizer: usize,
    #[serde(default = "default_spare_limit")]
    pub sampler: usize,
    #[serde(default = "default_spare_limit")]
    pub input_layout: usize,
}

fn default_bucket_count() -> usize {
    512
}
fn default_spare_limit() -> usize {
    32
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            bucket_count: default_bucket_count(),
            spare_limits: SpareLimits::default(),
        }
    }
}

impl Default for SpareLimits {
    fn default() -> Self {
        Self {
            blend: default_spare_limit(),
            depth_stencil: default_spare_limit(),
            rasterizer: default_spare_limit(),
            sampler: default_spare_limit(),
            input_layout: default_spare_limit(),
        }
    }
}

impl SpareLimits {
    /// Spare limit configured for `family`
    pub fn for_family(&self, family: StateFamily) -> usize {
        match family {
            StateFamily::Blend => self.blend,
            StateFamily::DepthStencil => self.depth_stencil,
            StateFamily::Rasterizer => self.rasterizer,
            StateFamily::Sampler => self.sampler,
            StateFamily::InputLayout => self.input_layout,
        }
    }
}

/// Errors while reading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ContextConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ContextConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.bucket_count == 0 {
            return Err(ConfigError::Invalid(
                "cache.bucket_count must be at least 1".to_string(),
            ));
        }
        if self.cache.bucket_count > MAX_BUCKET_COUNT {
            return Err(ConfigError::Invalid(format!(
                "cache.bucket_count must be at most {MAX_BUCKET_COUNT}"
            )));
        }
        Ok(())
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Linux: `~/.config/glcompat`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "glcompat", "glcompat")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Loads the configuration from the platform config directory.
///
/// Returns default values if the file doesn't exist or is invalid.
pub fn load() -> ContextConfig {
    let Some(path) = config_dir().map(|dir| dir.join(CONFIG_FILE_NAME)) else {
        return ContextConfig::default();
    };
    match ContextConfig::load_from(&path) {
        Ok(config) => config,
        Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            ContextConfig::default()
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring config: {}", err);
            ContextConfig::default()
        }
    }
}

//! Dashboard configuration
//!
//! Loaded from `<config_dir>/xpboard/config.toml`. A missing file yields the
//! defaults; a malformed one is an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use xpboard_types::{ChartViewports, MAX_SERIES_LEN};

use crate::error::CoreError;
use crate::scale::DEFAULT_TICK_COUNT;
use crate::summary::TotalXpPolicy;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Maximum bars per chart
    pub top_n: usize,

    /// Value-axis tick intervals
    pub tick_count: usize,

    /// Quiet period before a resize re-renders
    pub resize_debounce_ms: u64,

    /// Rows in the recent-transactions table
    pub recent_limit: usize,

    /// Which XP records count toward the total
    pub total_xp: TotalXpPolicy,

    /// Chart viewports used until the surface reports a size
    pub viewports: ChartViewports,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: MAX_SERIES_LEN,
            tick_count: DEFAULT_TICK_COUNT,
            resize_debounce_ms: 250,
            recent_limit: 10,
            total_xp: TotalXpPolicy::AllXp,
            viewports: ChartViewports::default(),
        }
    }
}

impl DashboardConfig {
    /// `<config_dir>/xpboard/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("xpboard").join(CONFIG_FILE))
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content, path)?;
        tracing::debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Parse and validate TOML content; `path` is only used in errors
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, CoreError> {
        let config: Self = toml::from_str(content).map_err(|source| CoreError::ConfigParse {
            path: path.to_path_buf(),
            message: source.message().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.top_n == 0 {
            return Err(CoreError::InvalidConfig {
                message: "top_n must be at least 1".to_string(),
            });
        }
        if self.tick_count == 0 {
            return Err(CoreError::InvalidConfig {
                message: "tick_count must be at least 1".to_string(),
            });
        }

        for (name, vp) in [("xp", &self.viewports.xp), ("skills", &self.viewports.skills)] {
            let m = &vp.margin;
            let values = [vp.width, vp.height, m.top, m.right, m.bottom, m.left];
            if values.iter().any(|v| !v.is_finite()) {
                return Err(CoreError::InvalidConfig {
                    message: format!("viewports.{name} must only contain finite numbers"),
                });
            }
            if vp.width <= 0.0 || vp.height <= 0.0 {
                return Err(CoreError::InvalidConfig {
                    message: format!("viewports.{name} width and height must be positive"),
                });
            }
        }
        Ok(())
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

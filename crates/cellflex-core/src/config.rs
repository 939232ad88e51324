// ABOUTME: Layout configuration handling.
// ABOUTME: Loads and saves engine settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a split pane without a usable minimum width is constrained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MinSizeFallback {
    /// Explicit minimums (including 0) win; the fallback only covers unset ones
    #[default]
    Unset,
    /// A minimum of 0 is treated like an unset one
    UnsetOrZero,
}

/// Splitter geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitSettings {
    /// Half of the divider thickness in pixels
    pub divider_half_width: f64,
    /// Minimum pane extent used when a pane declares none
    pub fallback_min_size: f64,
    /// Base added to the summed pane minimums for the splitter's own minimum
    pub own_min_size_base: f64,
    pub min_size_fallback: MinSizeFallback,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            divider_half_width: 3.0,
            fallback_min_size: 20.0,
            own_min_size_base: 50.0,
            min_size_fallback: MinSizeFallback::default(),
        }
    }
}

impl SplitSettings {
    /// Clearance between a divider centre and its neighbour's edge
    pub fn divider_width(&self) -> f64 {
        2.0 * self.divider_half_width
    }

    /// Effective minimum for a pane with the given declared minimum
    pub fn min_extent(&self, declared: Option<f64>) -> f64 {
        match (declared, self.min_size_fallback) {
            (Some(v), MinSizeFallback::Unset) if v.is_finite() => v,
            (Some(v), MinSizeFallback::UnsetOrZero) if v.is_finite() && v != 0.0 => v,
            _ => self.fallback_min_size,
        }
    }
}

/// Window dimensions the root widgets start out with
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f64,
    pub height: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Splitter settings
    pub split: SplitSettings,

    /// Window settings
    pub window: WindowSettings,

    /// Gap between box children when a descriptor gives none
    pub box_spacing: f64,

    /// Container padding when a descriptor gives none
    pub box_margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            split: SplitSettings::default(),
            window: WindowSettings::default(),
            box_spacing: 4.0,
            box_margin: 0.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl LayoutConfig {
    /// Get the default config file path (~/.config/cellflex/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cellflex").join("config.toml"))
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save config to default path
    pub fn save_to_default(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::ReadError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let mut config = LayoutConfig::default();
        config.split.divider_half_width = 4.0;
        config.window.width = 640.0;

        let temp_path = std::env::temp_dir().join("cellflex_test_config.toml");
        config.save(&temp_path).unwrap();
        let loaded = LayoutConfig::load(&temp_path).unwrap();

        assert_eq!(loaded.split.divider_half_width, 4.0);
        assert_eq!(loaded.window.width, 640.0);
        assert_eq!(loaded.split.fallback_min_size, 20.0);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: LayoutConfig = toml::from_str("[split]\nfallback_min_size = 10.0\n").unwrap();
        assert_eq!(config.split.fallback_min_size, 10.0);
        assert_eq!(config.split.divider_half_width, 3.0);
        assert_eq!(config.window.height, 800.0);
    }

    #[test]
    fn test_min_extent_policies() {
        let mut split = SplitSettings::default();
        assert_eq!(split.min_extent(None), 20.0);
        assert_eq!(split.min_extent(Some(0.0)), 0.0);
        assert_eq!(split.min_extent(Some(35.0)), 35.0);
        assert_eq!(split.min_extent(Some(f64::NAN)), 20.0);

        split.min_size_fallback = MinSizeFallback::UnsetOrZero;
        assert_eq!(split.min_extent(Some(0.0)), 20.0);
        assert_eq!(split.min_extent(Some(35.0)), 35.0);
    }

    #[test]
    fn test_default_path() {
        if let Some(p) = LayoutConfig::default_path() {
            assert!(p.ends_with("cellflex/config.toml"));
        }
    }
}

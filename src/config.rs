//! Application Configuration
//! JSON settings file with defaults for every field.

use crate::layout::projection::Projection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable that overrides the settings file location.
pub const CONFIG_ENV: &str = "CHART_GALLERY_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "chart_gallery.json";

pub const MIN_REFRESH_INTERVAL_MS: u64 = 100;
pub const MAX_REFRESH_INTERVAL_MS: u64 = 10_000;
pub const MAX_LIVE_CAPACITY: usize = 500;
pub const MAX_KDE_POINTS: usize = 2000;
pub const MAX_HISTOGRAM_BINS: usize = 200;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Sizes of the generated datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub categories: usize,
    pub series_points: usize,
    pub scatter_points: usize,
    pub group_samples: usize,
    pub candles: usize,
    pub weather_hours: usize,
    pub cloud_points: usize,
    pub heat_rows: usize,
    pub heat_cols: usize,
}

impl SampleConfig {
    /// Largest accepted value of each size.
    pub const MAX: SampleConfig = SampleConfig {
        categories: 30,
        series_points: 500,
        scatter_points: 2000,
        group_samples: 2000,
        candles: 500,
        weather_hours: 500,
        cloud_points: 2000,
        heat_rows: 14,
        heat_cols: 48,
    };

    /// Every size with its field name, in declaration order.
    pub fn named(&self) -> [(&'static str, usize); 9] {
        [
            ("categories", self.categories),
            ("series_points", self.series_points),
            ("scatter_points", self.scatter_points),
            ("group_samples", self.group_samples),
            ("candles", self.candles),
            ("weather_hours", self.weather_hours),
            ("cloud_points", self.cloud_points),
            ("heat_rows", self.heat_rows),
            ("heat_cols", self.heat_cols),
        ]
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            categories: 8,
            series_points: 48,
            scatter_points: 120,
            group_samples: 80,
            candles: 40,
            weather_hours: 48,
            cloud_points: 150,
            heat_rows: 7,
            heat_cols: 24,
        }
    }
}

/// User-facing settings, edited in the settings sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub refresh_interval_ms: u64,
    pub auto_refresh: bool,
    /// Maximum length of the live stock and weather series
    pub live_capacity: usize,
    pub kde_points: usize,
    pub histogram_bins: usize,
    pub projection: Projection,
    pub dark_mode: bool,
    pub samples: SampleConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 1000,
            auto_refresh: true,
            live_capacity: 60,
            kde_points: 200,
            histogram_bins: 20,
            projection: Projection::default(),
            dark_mode: true,
            samples: SampleConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Settings file location: `$CHART_GALLERY_CONFIG` or the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_REFRESH_INTERVAL_MS..=MAX_REFRESH_INTERVAL_MS).contains(&self.refresh_interval_ms) {
            return Err(ConfigError::Invalid(format!(
                "refresh_interval_ms must be between {} and {}",
                MIN_REFRESH_INTERVAL_MS, MAX_REFRESH_INTERVAL_MS
            )));
        }
        if !(2..=MAX_LIVE_CAPACITY).contains(&self.live_capacity) {
            return Err(ConfigError::Invalid(format!(
                "live_capacity must be between 2 and {}",
                MAX_LIVE_CAPACITY
            )));
        }
        if !(2..=MAX_KDE_POINTS).contains(&self.kde_points) {
            return Err(ConfigError::Invalid(format!(
                "kde_points must be between 2 and {}",
                MAX_KDE_POINTS
            )));
        }
        if !(1..=MAX_HISTOGRAM_BINS).contains(&self.histogram_bins) {
            return Err(ConfigError::Invalid(format!(
                "histogram_bins must be between 1 and {}",
                MAX_HISTOGRAM_BINS
            )));
        }
        if let Projection::Perspective { distance } = self.projection {
            if !(distance.is_finite() && distance > 0.0) {
                return Err(ConfigError::Invalid(
                    "perspective distance must be positive".to_string(),
                ));
            }
        }
        let limits = SampleConfig::MAX.named();
        for ((name, value), (_, max)) in self.samples.named().into_iter().zip(limits) {
            if !(1..=max).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "samples.{} must be between 1 and {}",
                    name, max
                )));
            }
        }
        Ok(())
    }

    /// Load and validate a settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the settings file, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"live_capacity": 10, "samples": {"candles": 5}}"#).unwrap();
        assert_eq!(config.live_capacity, 10);
        assert_eq!(config.samples.candles, 5);
        assert_eq!(config.samples.categories, SampleConfig::default().categories);
        assert_eq!(config.refresh_interval_ms, 1000);
    }

    #[test]
    fn projection_mode_is_tagged() {
        let config: AppConfig =
            serde_json::from_str(r#"{"projection": {"mode": "orthographic"}}"#).unwrap();
        assert_eq!(config.projection, Projection::Orthographic);

        let json = serde_json::to_string(&Projection::Perspective { distance: 3.0 }).unwrap();
        assert!(json.contains("\"perspective\""));
    }

    #[test]
    fn rejects_invalid_values() {
        let config = AppConfig {
            refresh_interval_ms: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = AppConfig {
            live_capacity: 1,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.samples.candles = 0;
        assert!(config.validate().is_err());

        let config = AppConfig {
            projection: Projection::Perspective { distance: -1.0 },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_values_above_limits() {
        let config: AppConfig =
            serde_json::from_str(r#"{"live_capacity": 1000000000000000}"#).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("live_capacity"));

        let config = AppConfig {
            live_capacity: MAX_LIVE_CAPACITY,
            kde_points: MAX_KDE_POINTS,
            histogram_bins: MAX_HISTOGRAM_BINS,
            refresh_interval_ms: MAX_REFRESH_INTERVAL_MS,
            samples: SampleConfig::MAX,
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());

        for config in [
            AppConfig {
                kde_points: MAX_KDE_POINTS + 1,
                ..AppConfig::default()
            },
            AppConfig {
                histogram_bins: usize::MAX,
                ..AppConfig::default()
            },
            AppConfig {
                refresh_interval_ms: 50,
                ..AppConfig::default()
            },
        ] {
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }

        let mut config = AppConfig::default();
        config.samples.cloud_points = usize::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("samples.cloud_points"));
    }

    #[test]
    fn oversized_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.json");
        std::fs::write(&path, r#"{"samples": {"group_samples": 4000000000}}"#).unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Invalid(_))));
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");

        let config = AppConfig {
            auto_refresh: false,
            live_capacity: 25,
            projection: Projection::Orthographic,
            ..AppConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn broken_or_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(AppConfig::load_or_default(&missing), AppConfig::default());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(AppConfig::load(&broken), Err(ConfigError::Parse(_))));
        assert_eq!(AppConfig::load_or_default(&broken), AppConfig::default());
    }
}

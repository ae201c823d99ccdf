//! Tunable constants for the particle field
//!
//! Defaults reproduce the hero background exactly. Every field is optional
//! in JSON so a config file only needs to name what it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::error::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of points generated on every (re)initialization
    pub point_count: usize,
    /// Max absolute velocity per axis, in units/frame
    pub max_speed: f64,
    /// Points closer than this are joined by a line
    pub link_distance: f64,
    /// Line alpha at zero distance
    pub link_alpha: f64,
    pub link_width: f64,
    pub link_color: [u8; 3],
    pub dot_radius: f64,
    pub dot_alpha: f64,
    pub dot_color: [u8; 3],
    /// Pointer radius inside which dots glow
    pub hover_distance: f64,
    /// Extra radius at zero pointer distance
    pub hover_radius_boost: f64,
    /// Extra alpha at zero pointer distance
    pub hover_alpha_boost: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            point_count: 55,
            max_speed: 0.125,
            link_distance: 160.0,
            link_alpha: 0.35,
            link_width: 1.0,
            link_color: [160, 200, 255],
            dot_radius: 2.2,
            dot_alpha: 0.55,
            dot_color: [200, 230, 255],
            hover_distance: 220.0,
            hover_radius_boost: 1.8,
            hover_alpha_boost: 0.4,
        }
    }
}

impl FieldConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading field config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        let values = [
            ("max_speed", self.max_speed),
            ("link_distance", self.link_distance),
            ("link_alpha", self.link_alpha),
            ("link_width", self.link_width),
            ("dot_radius", self.dot_radius),
            ("dot_alpha", self.dot_alpha),
            ("hover_distance", self.hover_distance),
            ("hover_radius_boost", self.hover_radius_boost),
            ("hover_alpha_boost", self.hover_alpha_boost),
        ];
        for (field, value) in values {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        for (field, value) in [
            ("link_distance", self.link_distance),
            ("link_width", self.link_width),
            ("dot_radius", self.dot_radius),
            ("hover_distance", self.hover_distance),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("max_speed", self.max_speed),
            ("hover_radius_boost", self.hover_radius_boost),
            ("hover_alpha_boost", self.hover_alpha_boost),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        for (field, value) in [
            ("link_alpha", self.link_alpha),
            ("dot_alpha", self.dot_alpha),
            ("dot_alpha + hover_alpha_boost", self.dot_alpha + self.hover_alpha_boost),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::AlphaOutOfRange { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.point_count, 55);
        assert_eq!(config.link_distance, 160.0);
        assert_eq!(config.hover_distance, 220.0);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = FieldConfig::from_json_str(r#"{"point_count": 12, "link_distance": 90.0}"#)
            .expect("valid config");
        assert_eq!(config.point_count, 12);
        assert_eq!(config.link_distance, 90.0);
        assert_eq!(config.dot_radius, 2.2);
        assert_eq!(config.dot_color, [200, 230, 255]);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = FieldConfig::from_json_str("{}").expect("valid config");
        assert_eq!(config, FieldConfig::default());
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let err = FieldConfig::from_json_str(r#"{"hover_distance": 0.0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive { field: "hover_distance", .. }
        ));
    }

    #[test]
    fn test_rejects_alpha_overflow() {
        let err = FieldConfig::from_json_str(r#"{"dot_alpha": 0.8, "hover_alpha_boost": 0.4}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::AlphaOutOfRange { .. }));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let err = FieldConfig::from_json_str(r#"{"max_speed": -1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Negative { field: "max_speed", .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = FieldConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = FieldConfig::from_path("/nonexistent/hero-field.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

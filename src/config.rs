//! Defaults for contrast, compliance, mixing and blending.
//!
//! Every [`Color`](crate::Color) operation with tunable parameters has a
//! `*_with` variant taking these settings. With the `config` feature the
//! settings can be loaded from YAML; missing keys fall back to defaults.

use crate::error::Result;

#[cfg(feature = "config")]
use crate::error::Error;
#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "config")]
use std::path::Path;

/// Settings for [`Color::contrast_with`](crate::Color::contrast_with).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct ContrastConfig {
    /// Color returned for light inputs.
    #[cfg_attr(feature = "config", serde(default = "default_dark"))]
    pub dark: String,

    /// Color returned for dark inputs.
    #[cfg_attr(feature = "config", serde(default = "default_light"))]
    pub light: String,

    /// Luma percentage at or above which `dark` is chosen (0-100).
    #[cfg_attr(feature = "config", serde(default = "default_threshold"))]
    pub threshold: f64,
}

fn default_dark() -> String {
    "#000".to_string()
}
fn default_light() -> String {
    "#FFF".to_string()
}
fn default_threshold() -> f64 {
    43.0
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            dark: default_dark(),
            light: default_light(),
            threshold: default_threshold(),
        }
    }
}

/// Thresholds for [`Color::compliance_with`](crate::Color::compliance_with).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct ComplianceConfig {
    /// Minimum YIQ brightness difference.
    #[cfg_attr(feature = "config", serde(default = "default_brightness"))]
    pub brightness: f64,

    /// Minimum summed RGB channel difference.
    #[cfg_attr(feature = "config", serde(default = "default_color"))]
    pub color: f64,
}

fn default_brightness() -> f64 {
    125.0
}
fn default_color() -> f64 {
    500.0
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            brightness: default_brightness(),
            color: default_color(),
        }
    }
}

/// Library-wide defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct Config {
    /// Contrast pick.
    #[cfg_attr(feature = "config", serde(default))]
    pub contrast: ContrastConfig,

    /// Compliance thresholds.
    #[cfg_attr(feature = "config", serde(default))]
    pub compliance: ComplianceConfig,

    /// Weight of `self` in [`Color::mix`](crate::Color::mix), 0-100.
    #[cfg_attr(feature = "config", serde(default = "default_mix_weight"))]
    pub mix_weight: f64,

    /// Opacity of the other color in [`Color::blend`](crate::Color::blend), 0-1.
    #[cfg_attr(feature = "config", serde(default = "default_blend_alpha"))]
    pub blend_alpha: f64,
}

fn default_mix_weight() -> f64 {
    50.0
}
fn default_blend_alpha() -> f64 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contrast: ContrastConfig::default(),
            compliance: ComplianceConfig::default(),
            mix_weight: default_mix_weight(),
            blend_alpha: default_blend_alpha(),
        }
    }
}

impl Config {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that numeric settings are finite and in range.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("contrast.threshold", self.contrast.threshold, 0.0, 100.0),
            ("mix_weight", self.mix_weight, 0.0, 100.0),
            ("blend_alpha", self.blend_alpha, 0.0, 1.0),
            ("compliance.brightness", self.compliance.brightness, 0.0, 255.0),
            ("compliance.color", self.compliance.color, 0.0, 765.0),
        ];
        for (key, value, min, max) in checks {
            if !(min..=max).contains(&value) {
                return Err(crate::error::Error::Config(format!(
                    "{key} = {value} is outside [{min}, {max}]"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "config")]
impl Config {
    /// Parses configuration from a YAML string.
    ///
    /// Parse errors carry the offending line number.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::Config(format!("line {line}: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::parse(&content)
    }

    /// Loads configuration, falling back to defaults on any error.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

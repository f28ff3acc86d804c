//! Presets and the top-level engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::easing::Ease;
use crate::error::ConfigError;

/// Entry phase of a stamp: pop in at the pointer with an overexposed flash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryTween {
    pub duration: f32,
    pub ease: Ease,
    pub scale_from: f32,
    pub inner_scale_from: f32,
    /// Brightness multiplier at the start of entry (2.5 = 250%).
    pub brightness_from: f32,
}

impl Default for EntryTween {
    fn default() -> Self {
        Self {
            duration: 0.4,
            ease: Ease::Power1,
            scale_from: 0.0,
            inner_scale_from: 2.8,
            brightness_from: 2.5,
        }
    }
}

/// Exit phase, measured from the start of the stamp so it can overlap entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitTween {
    pub delay: f32,
    pub duration: f32,
    pub ease: Ease,
    pub scale_to: f32,
}

impl Default for ExitTween {
    fn default() -> Self {
        Self {
            delay: 0.5,
            duration: 0.5,
            ease: Ease::Power2,
            scale_to: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailPreset {
    pub name: String,
    /// Raw pointer travel, in px, needed before the next stamp.
    pub threshold: f32,
    /// Per-frame factor pulling the smoothed pointer toward the raw one.
    pub smoothing: f32,
    /// Stacking order the counter returns to once every slot is idle.
    pub stack_base: u32,
    pub entry: EntryTween,
    pub exit: ExitTween,
}

impl Default for TrailPreset {
    fn default() -> Self {
        Self {
            name: "Default".into(),
            threshold: 60.0,
            smoothing: 0.1,
            stack_base: 1,
            entry: EntryTween::default(),
            exit: ExitTween::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltPreset {
    /// Pixels of pointer offset per degree of rotation. Smaller tilts harder.
    pub divisor: f32,
    /// Spotlight percentage moved per degree of rotation.
    pub spotlight_gain: f32,
    pub perspective: f32,
    /// `translateZ` applied while hovered.
    pub lift: f32,
}

impl TiltPreset {
    pub fn service_card() -> Self {
        Self {
            divisor: 10.0,
            spotlight_gain: 2.0,
            perspective: 1000.0,
            lift: 20.0,
        }
    }

    pub fn gallery_tile() -> Self {
        Self {
            divisor: 15.0,
            spotlight_gain: 3.0,
            perspective: 1000.0,
            lift: 20.0,
        }
    }
}

impl Default for TiltPreset {
    fn default() -> Self {
        Self::service_card()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltPresets {
    pub service_card: TiltPreset,
    pub gallery_tile: TiltPreset,
}

impl Default for TiltPresets {
    fn default() -> Self {
        Self {
            service_card: TiltPreset::service_card(),
            gallery_tile: TiltPreset::gallery_tile(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance and speed below which the follower counts as at rest.
    pub rest_epsilon: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 400.0,
            damping: 25.0,
            mass: 1.0,
            rest_epsilon: 0.01,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpotlightPreset {
    /// Seconds the spotlight takes to catch up with the pointer.
    pub damping: f32,
    pub ease: Ease,
    /// Seconds to hide the fade overlay once the pointer moves.
    pub fade_in: f32,
    /// Seconds to restore the fade overlay after the pointer leaves.
    pub fade_out: f32,
    pub radius: f32,
}

impl Default for GridSpotlightPreset {
    fn default() -> Self {
        Self {
            damping: 0.45,
            ease: Ease::Power3,
            fade_in: 0.25,
            fade_out: 0.6,
            radius: 300.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub trail: TrailPreset,
    pub tilt: TiltPresets,
    pub follower: SpringConfig,
    pub grid: GridSpotlightPreset,
    /// Image references handed to the trail, in stamp order.
    pub images: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trail: TrailPreset::default(),
            tilt: TiltPresets::default(),
            follower: SpringConfig::default(),
            grid: GridSpotlightPreset::default(),
            images: (1..=6).map(|i| format!("look-{i:02}")).collect(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a `.toml` or `.json` file, picked by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&source)?,
            Some("json") => Self::from_json_str(&source)?,
            _ => return Err(ConfigError::UnknownFormat(path.to_path_buf())),
        };
        info!(
            "Loaded config {} (trail preset {:?}, {} images)",
            path.display(),
            config.trail.name,
            config.images.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let trail = &self.trail;
        positive("trail.threshold", trail.threshold)?;
        if !(trail.smoothing > 0.0 && trail.smoothing <= 1.0) {
            return Err(invalid("trail.smoothing", format!("{} is outside (0, 1]", trail.smoothing)));
        }
        non_negative("trail.entry.duration", trail.entry.duration)?;
        non_negative("trail.exit.delay", trail.exit.delay)?;
        non_negative("trail.exit.duration", trail.exit.duration)?;
        finite("trail.entry.scale_from", trail.entry.scale_from)?;
        finite("trail.entry.inner_scale_from", trail.entry.inner_scale_from)?;
        finite("trail.entry.brightness_from", trail.entry.brightness_from)?;
        finite("trail.exit.scale_to", trail.exit.scale_to)?;

        for (field, preset) in [
            ("tilt.service_card.divisor", &self.tilt.service_card),
            ("tilt.gallery_tile.divisor", &self.tilt.gallery_tile),
        ] {
            positive(field, preset.divisor)?;
            finite("tilt.spotlight_gain", preset.spotlight_gain)?;
            positive("tilt.perspective", preset.perspective)?;
        }

        positive("follower.stiffness", self.follower.stiffness)?;
        non_negative("follower.damping", self.follower.damping)?;
        positive("follower.mass", self.follower.mass)?;

        non_negative("grid.damping", self.grid.damping)?;
        non_negative("grid.fade_in", self.grid.fade_in)?;
        non_negative("grid.fade_out", self.grid.fade_out)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not finite")))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be > 0")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be >= 0")))
    }
}

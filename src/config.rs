//! Rig Configuration
//!
//! [`SwimConfig`] gathers every tunable of the pipeline. `Default` reproduces
//! the reference swimmer; JSON documents override any subset of fields.
//!
//! ```rust,ignore
//! let config = SwimConfig::from_json_str(r#"{ "swim_speed": 0.05 }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::oscillator::{BoneDriver, swim_gait};
use crate::animation::path::{CirclePath, Curve, WavePath};
use crate::errors::{Result, RigError};
use crate::rig::bone_names;
use crate::rig::builder::{BoneSpec, dolphin_specs};
use crate::rig::skinning::{BandingPolicy, DEFAULT_TARGET_SIZE};

/// Display rate the per-frame reference speed was tuned at.
pub const REFERENCE_FRAME_RATE: f64 = 60.0;

/// Path progress per frame in the reference.
pub const REFERENCE_SPEED_PER_FRAME: f64 = 0.0005;

/// Which path the swimmer follows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathConfig {
    Wave(WavePath),
    Circle(CirclePath),
}

impl PathConfig {
    #[must_use]
    pub fn build(&self) -> Box<dyn Curve> {
        match *self {
            PathConfig::Wave(path) => Box::new(path),
            PathConfig::Circle(path) => Box::new(path),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig::Wave(WavePath::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwimConfig {
    pub path: PathConfig,
    /// Path progress per second.
    pub swim_speed: f64,
    /// Frame deltas above this many seconds are clamped, so a stalled host
    /// does not make the swimmer jump along its path.
    pub max_frame_delta: f64,

    pub skeleton_name: String,
    pub skeleton: Vec<BoneSpec>,

    pub banding: BandingPolicy,
    /// Longest side of the mesh after normalization.
    pub target_size: f32,

    pub drivers: Vec<BoneDriver>,
    /// Phase added to the right flipper's oscillators, in radians. Zero keeps
    /// both flippers stroking together.
    pub flipper_phase_offset: f64,
}

impl Default for SwimConfig {
    fn default() -> Self {
        Self {
            path: PathConfig::default(),
            swim_speed: REFERENCE_SPEED_PER_FRAME * REFERENCE_FRAME_RATE,
            max_frame_delta: 0.25,
            skeleton_name: "Dolphin".to_string(),
            skeleton: dolphin_specs(),
            banding: BandingPolicy::default(),
            target_size: DEFAULT_TARGET_SIZE,
            drivers: swim_gait(),
            flipper_phase_offset: 0.0,
        }
    }
}

impl SwimConfig {
    /// Parses and validates a JSON document; absent fields keep their
    /// defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the pipeline cannot animate with: non-finite numbers,
    /// a non-positive `target_size`, `band_height` or `max_frame_delta`.
    pub fn validate(&self) -> Result<()> {
        positive("target_size", f64::from(self.target_size))?;
        positive("max_frame_delta", self.max_frame_delta)?;
        positive("banding.band_height", f64::from(self.banding.band_height))?;
        finite("banding.offset", f64::from(self.banding.offset))?;
        finite("swim_speed", self.swim_speed)?;
        finite("flipper_phase_offset", self.flipper_phase_offset)?;

        match self.path {
            PathConfig::Wave(path) => {
                finite("path.freq_x", f64::from(path.freq_x))?;
                finite("path.freq_y", f64::from(path.freq_y))?;
                finite("path.phase_shift", f64::from(path.phase_shift))?;
                finite("path.magnitude", f64::from(path.magnitude))?;
            }
            PathConfig::Circle(path) => {
                finite("path.radius", f64::from(path.radius))?;
                finite("path.height", f64::from(path.height))?;
            }
        }

        for spec in &self.skeleton {
            if !spec.offset.is_finite() {
                return Err(RigError::InvalidConfig {
                    field: format!("skeleton.{}.offset", spec.name),
                    value: spec.offset.to_string(),
                    reason: "must be finite",
                });
            }
        }

        for driver in &self.drivers {
            for oscillator in &driver.oscillators {
                let field = |name: &str| format!("drivers.{}.{name}", driver.bone);
                for (name, value) in [
                    ("frequency", oscillator.frequency),
                    ("amplitude", oscillator.amplitude),
                    ("phase", oscillator.phase),
                ] {
                    if !value.is_finite() {
                        return Err(RigError::InvalidConfig {
                            field: field(name),
                            value: value.to_string(),
                            reason: "must be finite",
                        });
                    }
                }
            }
        }

        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The configured drivers with `flipper_phase_offset` folded in.
    #[must_use]
    pub fn resolved_drivers(&self) -> Vec<BoneDriver> {
        let mut drivers = self.drivers.clone();
        if self.flipper_phase_offset != 0.0 {
            for driver in drivers.iter_mut().filter(|d| d.bone == bone_names::RIGHT_FLIPPER) {
                for oscillator in &mut driver.oscillators {
                    oscillator.phase += self.flipper_phase_offset;
                }
            }
        }
        drivers
    }
}

fn finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RigError::InvalidConfig {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite",
        })
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RigError::InvalidConfig {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be positive",
        })
    }
}

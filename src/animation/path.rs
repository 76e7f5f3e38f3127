//! Parametric swim paths.
//!
//! A path maps a progress value in [0, 1) to a position and a unit tangent.
//! Paths are immutable after construction and hold no per-frame state, so
//! evaluating one never has side effects.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Debug;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Direction substituted when a path's derivative vanishes.
pub const DEFAULT_FORWARD: Vec3 = Vec3::X;

/// Step used by the finite-difference tangent.
const TANGENT_DELTA: f32 = 1e-4;

/// Position and direction of travel at one point of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub position: Vec3,
    /// Unit length.
    pub tangent: Vec3,
}

/// Reduces any progress value into [0, 1).
///
/// Non-finite input maps to 0.
#[must_use]
pub fn wrap_progress(progress: f32) -> f32 {
    let wrapped = progress - progress.floor();
    if !wrapped.is_finite() || wrapped >= 1.0 {
        // `x - floor(x)` rounds up to 1.0 for tiny negative x
        0.0
    } else {
        wrapped
    }
}

/// A path generator.
///
/// Implementors provide [`point`](Curve::point); [`tangent`](Curve::tangent)
/// defaults to a finite difference and can be overridden with an analytic
/// derivative. Callers use [`evaluate`](Curve::evaluate).
pub trait Curve: Debug {
    /// Position at `progress` in [0, 1].
    fn point(&self, progress: f32) -> Vec3;

    /// Direction of travel at `progress`, not necessarily normalized.
    fn tangent(&self, progress: f32) -> Vec3 {
        let t1 = (progress - TANGENT_DELTA).max(0.0);
        let t2 = (progress + TANGENT_DELTA).min(1.0);
        self.point(t2) - self.point(t1)
    }

    /// Samples the path. Progress outside [0, 1) is wrapped first, and a
    /// degenerate tangent falls back to [`DEFAULT_FORWARD`].
    fn evaluate(&self, progress: f32) -> PathSample {
        let progress = wrap_progress(progress);
        PathSample {
            position: self.point(progress),
            tangent: self.tangent(progress).try_normalize().unwrap_or(DEFAULT_FORWARD),
        }
    }
}

/// Lissajous-style loop: sine waves on X and Y, one cosine period on Z.
///
/// ```text
/// position = (sin(fx·π·p + φ), sin(fy·π·p), cos(2π·p)) · magnitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WavePath {
    pub freq_x: f32,
    pub freq_y: f32,
    pub phase_shift: f32,
    pub magnitude: f32,
}

impl WavePath {
    #[must_use]
    pub fn new(freq_x: f32, freq_y: f32, phase_shift: f32, magnitude: f32) -> Self {
        Self {
            freq_x,
            freq_y,
            phase_shift,
            magnitude,
        }
    }
}

impl Default for WavePath {
    fn default() -> Self {
        Self::new(3.0, 2.0, FRAC_PI_2, 10.0)
    }
}

impl Curve for WavePath {
    fn point(&self, progress: f32) -> Vec3 {
        Vec3::new(
            (self.freq_x * PI * progress + self.phase_shift).sin(),
            (self.freq_y * PI * progress).sin(),
            (TAU * progress).cos(),
        ) * self.magnitude
    }

    fn tangent(&self, progress: f32) -> Vec3 {
        Vec3::new(
            self.freq_x * PI * (self.freq_x * PI * progress + self.phase_shift).cos(),
            self.freq_y * PI * (self.freq_y * PI * progress).cos(),
            -TAU * (TAU * progress).sin(),
        ) * self.magnitude
    }
}

/// Horizontal circle of `radius` at constant `height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CirclePath {
    pub radius: f32,
    pub height: f32,
}

impl Default for CirclePath {
    fn default() -> Self {
        Self {
            radius: 10.0,
            height: 0.0,
        }
    }
}

impl Curve for CirclePath {
    fn point(&self, progress: f32) -> Vec3 {
        let angle = TAU * progress;
        Vec3::new(self.radius * angle.cos(), self.height, -self.radius * angle.sin())
    }

    fn tangent(&self, progress: f32) -> Vec3 {
        let angle = TAU * progress;
        Vec3::new(-angle.sin(), 0.0, -angle.cos()) * self.radius
    }
}

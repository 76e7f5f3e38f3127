//! Pose Driver
//!
//! Turns `(t, s)`, elapsed seconds and the swim-time accumulator, into a
//! [`Pose`]: where the swimmer is on its path, which way it faces, and the
//! value of every oscillator-driven bone channel.
//!
//! # Frame flow
//!
//! 1. [`SwimState::advance`] moves `s` forward by `speed · dt`
//! 2. [`PoseDriver::evaluate`] samples the path at `progress(s)` and the
//!    oscillators at `t`; a pure function of its inputs
//! 3. [`PoseDriver::apply`] writes the pose into the skeleton and the
//!    swimmer's transform, leaving overridden channels untouched

use std::f32::consts::PI;

use glam::{Quat, Vec3};
use smallvec::SmallVec;

use crate::animation::binder::Binder;
use crate::animation::binding::{Channel, ChannelBinding};
use crate::animation::oscillator::BoneDriver;
use crate::animation::path::{Curve, DEFAULT_FORWARD};
use crate::scene::skeleton::Skeleton;
use crate::scene::transform::Transform;

/// `s` is range-reduced once it grows past this, keeping its fractional
/// part precise over unbounded sessions.
const RANGE_REDUCTION_THRESHOLD: f64 = 1024.0;

/// Fractional part of the accumulator, always in [0, 1).
#[must_use]
pub fn progress(swim_time: f64) -> f64 {
    let p = swim_time - swim_time.floor();
    if !p.is_finite() || p >= 1.0 { 0.0 } else { p }
}

/// Mutable per-session animation state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwimState {
    swim_time: f64,
    elapsed: f64,
}

impl SwimState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an explicit accumulator value.
    #[must_use]
    pub fn with_swim_time(swim_time: f64) -> Self {
        Self {
            swim_time,
            elapsed: 0.0,
        }
    }

    /// Records the clock reading and advances `s` by `speed · delta`.
    pub fn advance(&mut self, elapsed: f64, delta: f64, speed: f64) {
        self.elapsed = elapsed;
        self.swim_time += speed * delta;
        if self.swim_time.abs() >= RANGE_REDUCTION_THRESHOLD {
            self.swim_time -= self.swim_time.floor();
        }
    }

    #[inline]
    #[must_use]
    pub fn swim_time(&self) -> f64 {
        self.swim_time
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    #[must_use]
    pub fn progress(&self) -> f64 {
        progress(self.swim_time)
    }
}

/// Placement of the swimmer's root object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootPose {
    pub position: Vec3,
    pub orientation: Quat,
    pub tangent: Vec3,
}

/// One evaluated oscillator, already resolved to a bone index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSample {
    pub bone: usize,
    pub channel: Channel,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub progress: f64,
    pub root: RootPose,
    pub channels: SmallVec<[ChannelSample; 16]>,
}

impl Pose {
    /// Value driven onto `channel` of bone `bone`, if any oscillator drives it.
    #[must_use]
    pub fn sample(&self, bone: usize, channel: Channel) -> Option<f32> {
        self.channels
            .iter()
            .find(|s| s.bone == bone && s.channel == channel)
            .map(|s| s.value)
    }
}

/// The asset's forward axis points along −X in the curve's convention, so
/// the tangent-aligned rotation is composed with a half turn about Y.
#[must_use]
pub fn orientation_along(tangent: Vec3) -> Quat {
    let tangent = tangent.try_normalize().unwrap_or(DEFAULT_FORWARD);
    Quat::from_rotation_arc(Vec3::X, tangent) * Quat::from_rotation_y(PI)
}

#[derive(Debug)]
pub struct PoseDriver {
    path: Box<dyn Curve>,
    drivers: Vec<BoneDriver>,
    bindings: Vec<ChannelBinding>,
    speed: f64,
}

impl PoseDriver {
    /// Creates a driver for `skeleton`. Bone names are resolved here, once;
    /// drivers for bones the skeleton lacks are dropped.
    ///
    /// `speed` is in progress units per second.
    #[must_use]
    pub fn new(path: Box<dyn Curve>, drivers: Vec<BoneDriver>, skeleton: &Skeleton, speed: f64) -> Self {
        let bindings = Binder::bind(skeleton, &drivers);
        Self {
            path,
            drivers,
            bindings,
            speed,
        }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &dyn Curve {
        self.path.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    #[must_use]
    pub fn bindings(&self) -> &[ChannelBinding] {
        &self.bindings
    }

    /// Computes the pose for elapsed time `t` and accumulator `s`.
    #[must_use]
    pub fn evaluate(&self, t: f64, s: f64) -> Pose {
        let progress = progress(s);
        let sample = self.path.evaluate(progress as f32);

        let root = RootPose {
            position: sample.position,
            orientation: orientation_along(sample.tangent),
            tangent: sample.tangent,
        };

        let channels = self
            .bindings
            .iter()
            .map(|binding| {
                let oscillator = &self.drivers[binding.driver_index].oscillators[binding.oscillator_index];
                ChannelSample {
                    bone: binding.bone_index,
                    channel: binding.channel,
                    value: oscillator.sample(t) as f32,
                }
            })
            .collect();

        Pose { progress, root, channels }
    }

    /// Writes `pose` into the skeleton and the swimmer's root transform.
    ///
    /// Rotation channels are assigned directly; position channels are
    /// offsets from the bone's rest position. Channels flagged as
    /// overridden on a bone are skipped.
    pub fn apply(pose: &Pose, skeleton: &mut Skeleton, root: &mut Transform) {
        root.position = pose.root.position;
        root.rotation = pose.root.orientation;

        for sample in &pose.channels {
            let Some(bone) = skeleton.bone_mut(sample.bone) else {
                continue;
            };
            if bone.is_overridden(sample.channel) {
                continue;
            }

            let value = match sample.channel {
                Channel::PositionX => bone.rest_position.x + sample.value,
                Channel::PositionY => bone.rest_position.y + sample.value,
                Channel::PositionZ => bone.rest_position.z + sample.value,
                _ => sample.value,
            };
            bone.set_channel(sample.channel, value);
        }
    }

    /// Advances `state` and poses the rig for the new frame.
    pub fn step(
        &self,
        state: &mut SwimState,
        elapsed: f64,
        delta: f64,
        skeleton: &mut Skeleton,
        root: &mut Transform,
    ) -> Pose {
        state.advance(elapsed, delta, self.speed);
        let pose = self.evaluate(state.elapsed(), state.swim_time());
        Self::apply(&pose, skeleton, root);
        pose
    }
}

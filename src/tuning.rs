//! Live parameter inspection and editing.
//!
//! External tooling (an inspector panel, a debug console) reads and writes
//! bone rotation channels through [`ParameterPanel`]. A written channel is
//! flagged as overridden on its bone, so the pose driver stops animating it
//! until [`ParameterPanel::release`] hands it back.

use std::f32::consts::PI;

use crate::animation::binding::Channel;
use crate::errors::{Result, RigError};
use crate::scene::skeleton::Skeleton;

/// One editable value, as an inspector would list it.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub bone: String,
    pub channel: Channel,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub overridden: bool,
}

pub struct ParameterPanel;

impl ParameterPanel {
    /// Editable range of `channel`. Position channels are unbounded.
    #[must_use]
    pub fn range(channel: Channel) -> (f32, f32) {
        if channel.is_position() {
            (f32::MIN, f32::MAX)
        } else {
            (-PI, PI)
        }
    }

    /// Every bone's rotation channels, in skin index order.
    #[must_use]
    pub fn parameters(skeleton: &Skeleton) -> Vec<Parameter> {
        skeleton
            .bones()
            .iter()
            .flat_map(|bone| {
                Channel::ROTATIONS.iter().map(move |&channel| {
                    let (min, max) = Self::range(channel);
                    Parameter {
                        bone: bone.name.clone(),
                        channel,
                        value: bone.channel(channel),
                        min,
                        max,
                        overridden: bone.is_overridden(channel),
                    }
                })
            })
            .collect()
    }

    pub fn get(skeleton: &Skeleton, bone: &str, channel: Channel) -> Result<f32> {
        skeleton
            .bone_by_name(bone)
            .map(|b| b.channel(channel))
            .ok_or_else(|| RigError::UnknownBone(bone.to_string()))
    }

    /// Writes `value`, clamped to the channel's range, and pins the channel.
    ///
    /// Returns the value actually written.
    pub fn set(skeleton: &mut Skeleton, bone: &str, channel: Channel, value: f32) -> Result<f32> {
        let target = skeleton
            .bone_by_name_mut(bone)
            .ok_or_else(|| RigError::UnknownBone(bone.to_string()))?;

        let (min, max) = Self::range(channel);
        let clamped = if value.is_nan() { target.channel(channel) } else { value.clamp(min, max) };

        target.set_channel(channel, clamped);
        target.set_override(channel, true);
        log::debug!("Tuning: {bone} {} = {clamped}", channel.label());
        Ok(clamped)
    }

    /// Returns `channel` of `bone` to the pose driver.
    pub fn release(skeleton: &mut Skeleton, bone: &str, channel: Channel) -> Result<()> {
        let target = skeleton
            .bone_by_name_mut(bone)
            .ok_or_else(|| RigError::UnknownBone(bone.to_string()))?;
        target.set_override(channel, false);
        Ok(())
    }

    /// Returns every channel of every bone to the pose driver.
    pub fn release_all(skeleton: &mut Skeleton) {
        for bone in skeleton.bones_mut() {
            for channel in Channel::ALL {
                bone.set_override(channel, false);
            }
        }
    }
}

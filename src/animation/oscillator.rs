//! Sinusoidal bone drivers.
//!
//! Each [`BoneDriver`] names a bone and lists the oscillators that write its
//! channels. The reference swim gait is [`swim_gait`].

use serde::{Deserialize, Serialize};

use crate::animation::binding::Channel;
use crate::rig::bone_names;

/// `value(t) = sin(t · frequency + phase) · amplitude`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub channel: Channel,
    /// Angular frequency in radians per second.
    pub frequency: f64,
    pub amplitude: f64,
    #[serde(default)]
    pub phase: f64,
}

impl Oscillator {
    #[must_use]
    pub fn new(channel: Channel, frequency: f64, amplitude: f64) -> Self {
        Self {
            channel,
            frequency,
            amplitude,
            phase: 0.0,
        }
    }

    #[must_use]
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Output at `t` seconds. Exactly zero at `t = 0` when the phase is zero.
    #[inline]
    #[must_use]
    pub fn sample(&self, t: f64) -> f64 {
        (t * self.frequency + self.phase).sin() * self.amplitude
    }
}

/// Oscillators driving one bone, addressed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneDriver {
    pub bone: String,
    pub oscillators: Vec<Oscillator>,
}

impl BoneDriver {
    #[must_use]
    pub fn new(bone: &str, oscillators: Vec<Oscillator>) -> Self {
        Self {
            bone: bone.to_string(),
            oscillators,
        }
    }
}

// ============================================================================
// Reference gait
// ============================================================================

const SWAY_AMPLITUDE: f64 = 0.4;
const SWAY_SPEED: f64 = 1.3;
const SWAY_MULTIPLIERS: [f64; 3] = [1.0, 1.2, 1.5];

const BOB_AMPLITUDE: f64 = 0.15;
const BOB_SPEED: f64 = 0.7;
const BOB_MULTIPLIERS: [f64; 3] = [1.0, 0.9, 0.8];

const TAIL_SPEED: f64 = 2.5;
const TAIL_AMPLITUDE: f64 = 0.6;

const FLIPPER_SPEED: f64 = 2.2;
const FLIPPER_AMPLITUDE: f64 = 0.7;

const DORSAL_SPEED: f64 = 1.3;
const DORSAL_AMPLITUDE: f64 = 0.12;

/// The swim gait: a traveling side-to-side wave down the spine with a slow
/// vertical bob, a tail beat, flipper strokes and a small dorsal fin shake.
///
/// Both flippers share one phase.
#[must_use]
pub fn swim_gait() -> Vec<BoneDriver> {
    let spine = [
        bone_names::UPPER_SPINE,
        bone_names::MIDDLE_SPINE,
        bone_names::LOWER_SPINE,
    ];

    let mut drivers: Vec<BoneDriver> = spine
        .iter()
        .zip(SWAY_MULTIPLIERS.iter().zip(BOB_MULTIPLIERS))
        .map(|(bone, (sway, bob))| {
            BoneDriver::new(
                bone,
                vec![
                    Oscillator::new(Channel::RotationY, SWAY_SPEED * sway, SWAY_AMPLITUDE),
                    Oscillator::new(Channel::PositionY, BOB_SPEED * bob, BOB_AMPLITUDE),
                ],
            )
        })
        .collect();

    drivers.push(BoneDriver::new(
        bone_names::TAIL_FIN,
        vec![Oscillator::new(Channel::RotationX, TAIL_SPEED, TAIL_AMPLITUDE)],
    ));
    for flipper in [bone_names::LEFT_FLIPPER, bone_names::RIGHT_FLIPPER] {
        drivers.push(BoneDriver::new(
            flipper,
            vec![Oscillator::new(Channel::RotationX, FLIPPER_SPEED, FLIPPER_AMPLITUDE)],
        ));
    }
    drivers.push(BoneDriver::new(
        bone_names::DORSAL_FIN,
        vec![Oscillator::new(Channel::RotationZ, DORSAL_SPEED, DORSAL_AMPLITUDE)],
    ));

    drivers
}

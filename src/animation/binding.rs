use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A single scalar property of a bone that animation can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    RotationX, // Maps to bone.rotation.x (Euler, radians)
    RotationY,
    RotationZ,
    PositionX, // Maps to bone.transform.position.x
    PositionY,
    PositionZ,
}

impl Channel {
    pub const ROTATIONS: [Channel; 3] = [Channel::RotationX, Channel::RotationY, Channel::RotationZ];
    pub const ALL: [Channel; 6] = [
        Channel::RotationX,
        Channel::RotationY,
        Channel::RotationZ,
        Channel::PositionX,
        Channel::PositionY,
        Channel::PositionZ,
    ];

    #[must_use]
    pub fn flag(self) -> Channels {
        match self {
            Channel::RotationX => Channels::ROTATION_X,
            Channel::RotationY => Channels::ROTATION_Y,
            Channel::RotationZ => Channels::ROTATION_Z,
            Channel::PositionX => Channels::POSITION_X,
            Channel::PositionY => Channels::POSITION_Y,
            Channel::PositionZ => Channels::POSITION_Z,
        }
    }

    #[must_use]
    pub fn is_position(self) -> bool {
        matches!(self, Channel::PositionX | Channel::PositionY | Channel::PositionZ)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Channel::RotationX => "Rotation X",
            Channel::RotationY => "Rotation Y",
            Channel::RotationZ => "Rotation Z",
            Channel::PositionX => "Position X",
            Channel::PositionY => "Position Y",
            Channel::PositionZ => "Position Z",
        }
    }
}

bitflags! {
    /// Set of channels, used for per-bone override masks.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Channels: u8 {
        const ROTATION_X = 1 << 0;
        const ROTATION_Y = 1 << 1;
        const ROTATION_Z = 1 << 2;
        const POSITION_X = 1 << 3;
        const POSITION_Y = 1 << 4;
        const POSITION_Z = 1 << 5;
    }
}

/// Binding relationship: oscillator `oscillator_index` of driver
/// `driver_index` writes `channel` of bone `bone_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBinding {
    pub driver_index: usize,
    pub oscillator_index: usize,
    pub bone_index: usize,
    pub channel: Channel,
}

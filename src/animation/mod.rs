//! Procedural animation: swim paths, oscillators and the per-frame pose driver.

pub mod binder;
pub mod binding;
pub mod oscillator;
pub mod path;
pub mod pose;

pub use binder::Binder;
pub use binding::{Channel, ChannelBinding, Channels};
pub use oscillator::{BoneDriver, Oscillator, swim_gait};
pub use path::{CirclePath, Curve, PathSample, WavePath, wrap_progress};
pub use pose::{ChannelSample, Pose, PoseDriver, RootPose, SwimState, orientation_along, progress};

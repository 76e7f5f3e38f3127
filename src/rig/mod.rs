//! Load-time rigging: skeleton construction and skin binding.

pub mod builder;
pub mod skinning;

pub use builder::{BoneSpec, SkeletonBuilder, bone_names, dolphin_specs};
pub use skinning::{BandingPolicy, DEFAULT_TARGET_SIZE, SkinBinder};

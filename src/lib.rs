#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! # finrig
//!
//! Procedural skeletal animation for a swimming creature: a hand-built bone
//! rig is skinned onto a static mesh by vertical banding, then driven every
//! frame by a parametric swim path and sinusoidal bone oscillators.
//!
//! - [`rig`]: skeleton construction and skin binding (load time)
//! - [`animation`]: swim paths, oscillators and the pose driver (per frame)
//! - [`scene`]: node hierarchy, skeletons and matrix propagation
//! - [`app`]: the swimmer context and the frame loop
//! - [`tuning`]: live inspection and editing of bone channels

pub mod animation;
pub mod app;
pub mod assets;
pub mod config;
pub mod errors;
pub mod resources;
pub mod rig;
pub mod scene;
pub mod tuning;
pub mod utils;

pub use animation::{CirclePath, Curve, Pose, PoseDriver, SwimState, WavePath};
pub use app::{FrameLoop, FrameStats, Renderer, SwimContext};
pub use assets::{InMemoryMesh, JsonMeshFile, MeshSource};
pub use config::SwimConfig;
pub use errors::{Result, RigError};
pub use resources::primitives::*;
pub use resources::{Geometry, SkinnedMesh};
pub use rig::{SkeletonBuilder, SkinBinder};
pub use scene::{Node, Scene, Skeleton};
pub use tuning::ParameterPanel;

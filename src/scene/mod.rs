//! Scene Graph Module
//!
//! Manages the hierarchy the renderer consumes each frame:
//! - [`Node`]: scene node with parent/child links and a transform
//! - [`Transform`]: local TRS plus cached matrices with dirty checking
//! - [`Scene`]: node storage and component pools (skinned meshes, skeletons)
//! - [`Skeleton`]: bone hierarchy bound to a skinned mesh
//! - [`transform_system`]: hierarchy propagation, decoupled from `Scene`

pub mod node;
pub mod scene;
pub mod skeleton;
pub mod transform;
pub mod transform_system;

pub use node::Node;
pub use scene::Scene;
pub use skeleton::{Bone, SkinBinding, Skeleton};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct SkeletonKey;
}

use glam::{Affine3A, Vec3};

use crate::scene::skeleton::SkinBinding;
use crate::scene::transform::Transform;
use crate::scene::{MeshKey, NodeHandle};

/// A scene node: hierarchy, transform and optional component keys.
///
/// # Hierarchy
///
/// - `parent`: handle to the parent node (`None` for root nodes)
/// - `children`: handles of the child nodes
///
/// Components (skinned mesh, skin binding) live in the [`Scene`](crate::scene::Scene)
/// pools; the node only stores their keys.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,

    /// Skinned mesh rendered at this node.
    pub mesh: Option<MeshKey>,
    /// Skeleton driven relative to this node's world matrix.
    pub skin: Option<SkinBinding>,
}

impl Node {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            mesh: None,
            skin: None,
        }
    }

    #[must_use]
    pub fn from_position(name: &str, position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            ..Self::new(name)
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Returns the world matrix computed by the transform system.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("")
    }
}

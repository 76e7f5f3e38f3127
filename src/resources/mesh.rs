use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::resources::geometry::{BoundingBox, Geometry, Normalization};
use crate::scene::SkeletonKey;
use crate::scene::skeleton::Skeleton;

/// Number of bone influence slots per vertex.
pub const MAX_INFLUENCES: usize = 4;

/// Per-vertex bone influences, laid out for direct GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct VertexInfluence {
    pub indices: [u16; MAX_INFLUENCES],
    pub weights: [f32; MAX_INFLUENCES],
}

impl VertexInfluence {
    /// Full weight on a single bone.
    #[must_use]
    pub fn single(bone: u16) -> Self {
        Self {
            indices: [bone, 0, 0, 0],
            weights: [1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Linear blend between two bones: `1 - t` on `a`, `t` on `b`.
    #[must_use]
    pub fn blend(a: u16, b: u16, t: f32) -> Self {
        Self {
            indices: [a, b, 0, 0],
            weights: [1.0 - t, t, 0.0, 0.0],
        }
    }

    #[must_use]
    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    #[must_use]
    pub fn nonzero_count(&self) -> usize {
        self.weights.iter().filter(|w| **w != 0.0).count()
    }
}

/// Geometry bound to a skeleton.
///
/// The skeleton itself lives in the scene's pool; the mesh only keeps its key
/// and is valid as long as that skeleton exists.
#[derive(Debug, Clone)]
pub struct SkinnedMesh {
    pub name: String,
    pub geometry: Geometry,
    pub(crate) influences: Vec<VertexInfluence>,
    pub skeleton: SkeletonKey,
    /// One-time fit into the unit cube, applied on the mesh node.
    pub normalization: Normalization,
}

impl SkinnedMesh {
    pub(crate) fn new(
        name: &str,
        geometry: Geometry,
        influences: Vec<VertexInfluence>,
        skeleton: SkeletonKey,
    ) -> Self {
        debug_assert_eq!(geometry.vertex_count(), influences.len());
        Self {
            name: name.to_string(),
            geometry,
            influences,
            skeleton,
            normalization: Normalization::IDENTITY,
        }
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.geometry.vertex_count()
    }

    /// Influences, parallel to the geometry positions.
    #[inline]
    #[must_use]
    pub fn influences(&self) -> &[VertexInfluence] {
        &self.influences
    }

    /// Raw bytes of the influence array for a vertex buffer upload.
    #[must_use]
    pub fn influence_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.influences)
    }

    /// Bounds of the geometry after normalization, in mesh-node parent space.
    #[must_use]
    pub fn normalized_bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(
            self.geometry
                .positions
                .iter()
                .map(|p| self.normalization.apply(*p)),
        )
    }

    /// CPU linear-blend skinning, the reference for what the GPU computes.
    ///
    /// Returns positions in mesh space. Influence slots that point past the
    /// skeleton are ignored.
    #[must_use]
    pub fn skinned_positions(&self, skeleton: &Skeleton) -> Vec<Vec3> {
        let joints = skeleton.joint_matrices();
        self.geometry
            .positions
            .iter()
            .zip(&self.influences)
            .map(|(position, influence)| skin_vertex(*position, influence, joints))
            .collect()
    }
}

fn skin_vertex(position: Vec3, influence: &VertexInfluence, joints: &[Mat4]) -> Vec3 {
    let mut result = Vec3::ZERO;
    for (&index, &weight) in influence.indices.iter().zip(&influence.weights) {
        if weight == 0.0 {
            continue;
        }
        if let Some(joint) = joints.get(usize::from(index)) {
            result += joint.transform_point3(position) * weight;
        }
    }
    result
}

//! Skinning Binder
//!
//! Assigns bone influences by vertical banding: the mesh is sliced into
//! horizontal bands of `band_height` along its local Y axis, band `i` maps to
//! bone `i`, and a vertex blends linearly between its band's bone and the next
//! one according to how far up the band it sits.
//!
//! This is a spatial heuristic, not nearest-bone skinning. It assumes the mesh
//! is authored so that local Y runs along the spine.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RigError};
use crate::resources::geometry::Geometry;
use crate::resources::mesh::{SkinnedMesh, VertexInfluence};
use crate::scene::SkeletonKey;
use crate::scene::skeleton::Skeleton;

/// Longest side of the mesh after normalization.
pub const DEFAULT_TARGET_SIZE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandingPolicy {
    /// Added to Y before banding.
    pub offset: f32,
    pub band_height: f32,
}

impl Default for BandingPolicy {
    fn default() -> Self {
        Self {
            offset: 10.0,
            band_height: 5.0,
        }
    }
}

impl BandingPolicy {
    /// Influence of a vertex at height `y` on a skeleton of `bone_count` bones.
    ///
    /// Bands outside the skeleton clamp to the nearest end bone with full
    /// weight.
    #[must_use]
    pub fn influence(&self, y: f32, bone_count: usize) -> VertexInfluence {
        let last = bone_count.saturating_sub(1);
        let raw = (y + self.offset) / self.band_height;
        if !raw.is_finite() {
            return VertexInfluence::single(0);
        }

        let band = raw.floor();
        let weight = raw - band;

        if band < 0.0 {
            VertexInfluence::single(0)
        } else if band >= last as f32 {
            VertexInfluence::single(bone_index(last))
        } else {
            let index = band as usize;
            VertexInfluence::blend(bone_index(index), bone_index(index + 1), weight)
        }
    }
}

fn bone_index(index: usize) -> u16 {
    u16::try_from(index).unwrap_or(u16::MAX)
}

/// Binds geometry to a skeleton and fits it into the unit cube.
#[derive(Debug, Clone, Copy)]
pub struct SkinBinder {
    pub policy: BandingPolicy,
    pub target_size: f32,
}

impl Default for SkinBinder {
    fn default() -> Self {
        Self {
            policy: BandingPolicy::default(),
            target_size: DEFAULT_TARGET_SIZE,
        }
    }
}

impl SkinBinder {
    #[must_use]
    pub fn new(policy: BandingPolicy, target_size: f32) -> Self {
        Self { policy, target_size }
    }

    /// Computes the influences for every vertex.
    #[must_use]
    pub fn compute_influences(&self, geometry: &Geometry, bone_count: usize) -> Vec<VertexInfluence> {
        geometry
            .positions
            .iter()
            .map(|p| self.policy.influence(p.y, bone_count))
            .collect()
    }

    /// Creates a skinned mesh bound to `skeleton` (stored in the scene under
    /// `key`). The skeleton is not modified.
    pub fn bind(
        &self,
        name: &str,
        geometry: Geometry,
        key: SkeletonKey,
        skeleton: &Skeleton,
    ) -> Result<SkinnedMesh> {
        if geometry.is_empty() {
            return Err(RigError::EmptyGeometry);
        }

        let influences = self.compute_influences(&geometry, skeleton.len());
        let normalization = geometry.normalization(self.target_size)?;

        let mut mesh = SkinnedMesh::new(name, geometry, influences, key);
        mesh.normalization = normalization;

        log::info!(
            "Bound '{}' ({} vertices) to skeleton '{}' ({} bones), scale {:.4}",
            mesh.name,
            mesh.vertex_count(),
            skeleton.name,
            skeleton.len(),
            normalization.scale
        );
        Ok(mesh)
    }
}

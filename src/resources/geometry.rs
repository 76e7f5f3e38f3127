use glam::{Affine3A, Vec3};

use crate::errors::{Result, RigError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Smallest box containing every point, `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self { min: first, max: first }, Self::expand_to))
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the longest side.
    #[must_use]
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    #[must_use]
    pub fn expand_to(self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }
}

/// Uniform scale plus translation that fits a mesh into a centered cube.
///
/// A point `p` maps to `p * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub offset: Vec3,
    pub scale: f32,
}

impl Normalization {
    pub const IDENTITY: Self = Self {
        offset: Vec3::ZERO,
        scale: 1.0,
    };

    /// Centers `bounds` on the origin and maps its longest side to `target_size`.
    ///
    /// A box with no extent (all points coincide) is only re-centered.
    #[must_use]
    pub fn fit(bounds: &BoundingBox, target_size: f32) -> Self {
        let longest = bounds.max_dimension();
        let scale = if longest > f32::EPSILON {
            target_size / longest
        } else {
            log::warn!("Geometry has no extent; normalization only re-centers it");
            1.0
        };

        Self {
            offset: -bounds.center() * scale,
            scale,
        }
    }

    #[must_use]
    pub fn apply(&self, point: Vec3) -> Vec3 {
        point * self.scale + self.offset
    }

    #[must_use]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            glam::Quat::IDENTITY,
            self.offset,
        )
    }
}

impl Default for Normalization {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Static mesh geometry as handed over by the mesh source.
///
/// Only positions are interpreted by the rig. Normals and indices are carried
/// through untouched for the renderer.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,

    bounding_box: Option<BoundingBox>,
}

impl Geometry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry with positions only.
    #[must_use]
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        let mut geo = Self {
            positions,
            ..Self::default()
        };
        geo.compute_bounding_volume();
        geo
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn set_indices(&mut self, indices: Vec<u32>) {
        self.indices = indices;
    }

    pub fn compute_bounding_volume(&mut self) {
        self.bounding_box = BoundingBox::from_points(self.positions.iter().copied());
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_box
    }

    /// Fits the geometry into a cube of side `target_size` centered on the origin.
    pub fn normalization(&self, target_size: f32) -> Result<Normalization> {
        let bounds = self
            .bounding_box
            .or_else(|| BoundingBox::from_points(self.positions.iter().copied()))
            .ok_or(RigError::EmptyGeometry)?;
        Ok(Normalization::fit(&bounds, target_size))
    }
}

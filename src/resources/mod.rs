//! Mesh-side resources: static geometry, skin influences and procedural shapes.

pub mod geometry;
pub mod mesh;
pub mod primitives;

pub use geometry::{BoundingBox, Geometry, Normalization};
pub use mesh::{MAX_INFLUENCES, SkinnedMesh, VertexInfluence};

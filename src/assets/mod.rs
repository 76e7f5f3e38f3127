//! Mesh sources the swimmer can be built from.

pub mod source;

pub use source::{InMemoryMesh, JsonMeshFile, MeshSource};

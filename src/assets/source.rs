use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Deserialize;

use crate::errors::{Result, RigError};
use crate::resources::geometry::Geometry;

/// Provider of the swimmer's base geometry.
///
/// Failures surface as [`RigError::MeshLoad`]; the pipeline never builds a
/// rig around a missing mesh.
pub trait MeshSource {
    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Geometry>;
}

/// Geometry that is already resident, such as a procedural primitive.
#[derive(Debug, Clone)]
pub struct InMemoryMesh {
    name: String,
    geometry: Geometry,
}

impl InMemoryMesh {
    #[must_use]
    pub fn new(name: &str, geometry: Geometry) -> Self {
        Self {
            name: name.to_string(),
            geometry,
        }
    }
}

impl MeshSource for InMemoryMesh {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> Result<Geometry> {
        if self.geometry.is_empty() {
            return Err(RigError::MeshLoad(format!("'{}' has no vertices", self.name)));
        }
        Ok(self.geometry.clone())
    }
}

#[derive(Deserialize)]
struct MeshDocument {
    positions: Vec<[f32; 3]>,
    #[serde(default)]
    indices: Vec<u32>,
}

/// Vertex data stored as a JSON document on disk:
///
/// ```json
/// { "positions": [[0.0, -10.0, 0.0], ...], "indices": [0, 1, 2, ...] }
/// ```
#[derive(Debug, Clone)]
pub struct JsonMeshFile {
    path: PathBuf,
}

impl JsonMeshFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses a mesh document that has already been read.
    pub fn parse(json: &str) -> Result<Geometry> {
        let document: MeshDocument =
            serde_json::from_str(json).map_err(|e| RigError::MeshLoad(e.to_string()))?;
        if document.positions.is_empty() {
            return Err(RigError::MeshLoad("document has no positions".to_string()));
        }

        let positions: Vec<Vec3> = document.positions.into_iter().map(Vec3::from).collect();
        let vertex_count = positions.len();
        if let Some(&bad) = document.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(RigError::MeshLoad(format!(
                "index {bad} out of range for {vertex_count} vertices"
            )));
        }

        let mut geometry = Geometry::from_positions(positions);
        if !document.indices.is_empty() {
            geometry.set_indices(document.indices);
        }
        Ok(geometry)
    }
}

impl MeshSource for JsonMeshFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Geometry> {
        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| RigError::MeshLoad(format!("{}: {e}", self.path.display())))?;
        Self::parse(&json)
    }
}

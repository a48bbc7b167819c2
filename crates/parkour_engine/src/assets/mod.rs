//! Asset management system
//!
//! The collision core never parses files. It asks a [`MeshLoader`] for a
//! [`MeshAsset`] by path and extracts triangles from whatever comes back.
//! [`MeshLibrary`] is the in-memory loader levels are built from.

pub mod mesh;
pub mod primitives;

pub use mesh::MeshAsset;
pub use primitives::PrimitiveShape;

use std::collections::HashMap;
use thiserror::Error;

/// Mesh-loading service
pub trait MeshLoader {
    /// Load the mesh registered under `path`
    fn load_mesh(&self, path: &str) -> Result<MeshAsset, AssetError>;
}

/// In-memory mesh store keyed by asset path
#[derive(Debug, Default, Clone)]
pub struct MeshLibrary {
    meshes: HashMap<String, MeshAsset>,
}

impl MeshLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `asset` under `path`, replacing any previous entry
    pub fn insert(&mut self, path: impl Into<String>, asset: MeshAsset) {
        let path = path.into();
        log::debug!(
            "Registered mesh '{}' ({} vertices, {} indices)",
            path,
            asset.vertices.len(),
            asset.indices.len()
        );
        self.meshes.insert(path, asset);
    }

    /// Whether `path` is known
    pub fn contains(&self, path: &str) -> bool {
        self.meshes.contains_key(path)
    }

    /// Number of stored meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether no mesh is stored
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl MeshLoader for MeshLibrary {
    fn load_mesh(&self, path: &str) -> Result<MeshAsset, AssetError> {
        self.meshes
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_roundtrip_and_missing() {
        let mut library = MeshLibrary::new();
        library.insert("models/ground.glb", PrimitiveShape::plane(10.0, 10.0).build());

        assert!(library.contains("models/ground.glb"));
        assert_eq!(library.len(), 1);
        assert_eq!(library.load_mesh("models/ground.glb").unwrap().indices.len(), 6);
        assert!(matches!(
            library.load_mesh("models/missing.glb"),
            Err(AssetError::NotFound(path)) if path == "models/missing.glb"
        ));
    }
}

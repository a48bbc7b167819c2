//! Loaded mesh assets and collision geometry extraction

use crate::foundation::math::{Mat4, Vec3};
use crate::physics::collision::MeshSnapshot;

use super::AssetError;

/// A mesh as handed over by the loading service
///
/// Only positions and triangle-list indices matter to collision; normals,
/// texture coordinates and materials stay with the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshAsset {
    /// Vertex positions in model space
    pub vertices: Vec<Vec3>,
    /// Triangle-list indices into `vertices`
    pub indices: Vec<u32>,
    /// Root node placement baked in at load time
    pub node_transform: Option<Mat4>,
}

impl MeshAsset {
    /// Create an asset without a node transform
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            node_transform: None,
        }
    }

    /// Attach a node transform
    pub fn with_node_transform(mut self, node_transform: Mat4) -> Self {
        self.node_transform = Some(node_transform);
        self
    }

    /// Whether the asset carries no drawable triangles
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.len() < 3
    }

    /// Check that every index points at a vertex
    pub fn validate(&self) -> Result<(), AssetError> {
        let count = self.vertices.len();
        match self.indices.iter().find(|&&i| i as usize >= count) {
            Some(bad) => Err(AssetError::InvalidData(format!(
                "index {} out of range for {} vertices",
                bad, count
            ))),
            None => Ok(()),
        }
    }

    /// Extract the model-space triangle soup used for collision
    ///
    /// Deterministic and idempotent. An asset without mesh data yields an
    /// empty snapshot, which collision treats as "nothing to hit".
    pub fn collision_snapshot(&self) -> MeshSnapshot {
        let snapshot = MeshSnapshot::from_indexed(&self.vertices, &self.indices);
        match self.node_transform {
            Some(node) => snapshot.with_node_transform(node),
            None => snapshot,
        }
    }
}

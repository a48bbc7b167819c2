//! Collision mesh representations
//!
//! A [`MeshSnapshot`] is the model-space triangle soup extracted from a loaded
//! mesh asset, paired with the node transform baked in at load time. A
//! [`WorldSpaceCollisionMesh`] is the same geometry after the transform
//! pipeline, ready for ray queries.

use crate::foundation::math::{Mat4, Point3, Vec3};
use super::primitives::{BoundingSphere, CullMode, Ray, RayHit, Triangle};
use super::raycast::nearest_hit;

/// Triangles in MODEL SPACE plus the root node transform of their asset
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSnapshot {
    triangles: Vec<Triangle>,
    node_transform: Mat4,
}

impl MeshSnapshot {
    /// Snapshot with no geometry; collision treats it as absent
    pub fn empty() -> Self {
        Self::from_triangles(Vec::new())
    }

    /// Snapshot from already assembled triangles with an identity node transform
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            node_transform: Mat4::identity(),
        }
    }

    /// Builds a snapshot from MODEL SPACE vertices and triangle-list indices
    ///
    /// Trailing indices that do not make a full triangle are ignored, as are
    /// triangles that reference a vertex out of range.
    pub fn from_indexed(vertices: &[Vec3], indices: &[u32]) -> Self {
        let mut triangles = Vec::with_capacity(indices.len() / 3);
        let mut skipped = 0usize;

        for chunk in indices.chunks_exact(3) {
            let corner = |i: u32| vertices.get(i as usize).copied();
            match (corner(chunk[0]), corner(chunk[1]), corner(chunk[2])) {
                (Some(v0), Some(v1), Some(v2)) => triangles.push(Triangle::new(v0, v1, v2)),
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!("Skipped {} triangles with out-of-range indices", skipped);
        }
        if indices.len() % 3 != 0 {
            log::warn!("Ignoring {} trailing indices", indices.len() % 3);
        }

        Self::from_triangles(triangles)
    }

    /// Attach the node transform baked in during asset load
    pub fn with_node_transform(mut self, node_transform: Mat4) -> Self {
        self.node_transform = node_transform;
        self
    }

    /// Model-space triangles
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Node-to-model transform (identity when the asset had none)
    pub fn node_transform(&self) -> &Mat4 {
        &self.node_transform
    }

    /// Whether there is nothing to collide with
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Transform every triangle by `matrix` into a world-space mesh
    pub fn to_world_space(&self, matrix: &Mat4) -> WorldSpaceCollisionMesh {
        let point = |v: Vec3| matrix.transform_point(&Point3::from(v)).coords;
        let triangles = self.triangles.iter().map(|tri| tri.map(point)).collect();
        WorldSpaceCollisionMesh::new(triangles)
    }
}

impl Default for MeshSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// World-space collision mesh, rebuilt whenever its placement changes
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSpaceCollisionMesh {
    /// Triangles in world space
    pub triangles: Vec<Triangle>,
    /// Bounds used to reject rays before testing triangles
    pub bounds: Option<BoundingSphere>,
}

impl WorldSpaceCollisionMesh {
    /// Wrap world-space triangles and compute their bounds
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let bounds = BoundingSphere::enclosing(triangles.iter().flat_map(Triangle::vertices));
        Self { triangles, bounds }
    }

    /// Whether there is nothing to collide with
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Test ray intersection against all triangles in the mesh
    /// Returns the closest hit if any triangle is hit
    pub fn intersect_ray(&self, ray: &Ray, cull: CullMode) -> Option<RayHit> {
        let bounds = self.bounds?;
        if !bounds.intersects_ray(ray) {
            return None;
        }
        nearest_hit(ray, &self.triangles, cull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4Ext;
    use approx::assert_relative_eq;

    fn unit_quad() -> (Vec<Vec3>, Vec<u32>) {
        let vertices = vec![
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, -1.0),
        ];
        (vertices, vec![0, 1, 2, 0, 2, 3])
    }

    #[test]
    fn test_from_indexed_builds_triangles() {
        let (vertices, indices) = unit_quad();
        let snapshot = MeshSnapshot::from_indexed(&vertices, &indices);

        assert_eq!(snapshot.triangles().len(), 2);
        assert_eq!(snapshot.triangles()[1].v2, vertices[3]);
        assert_eq!(*snapshot.node_transform(), Mat4::identity());
    }

    #[test]
    fn test_from_indexed_is_deterministic() {
        let (vertices, indices) = unit_quad();
        assert_eq!(
            MeshSnapshot::from_indexed(&vertices, &indices),
            MeshSnapshot::from_indexed(&vertices, &indices)
        );
    }

    #[test]
    fn test_from_indexed_skips_bad_indices() {
        let (vertices, _) = unit_quad();
        let snapshot = MeshSnapshot::from_indexed(&vertices, &[0, 1, 2, 0, 2, 9, 1, 2]);
        assert_eq!(snapshot.triangles().len(), 1);
    }

    #[test]
    fn test_empty_snapshot_has_no_world_hits() {
        let world = MeshSnapshot::empty().to_world_space(&Mat4::identity());
        assert!(world.is_empty());
        assert!(world.bounds.is_none());
        assert!(world.intersect_ray(&Ray::down(Vec3::new(0.0, 1.0, 0.0)), CullMode::None).is_none());
    }

    #[test]
    fn test_world_space_ray_hit() {
        let (vertices, indices) = unit_quad();
        let matrix = Mat4::translate_scale(Vec3::new(0.0, 2.0, 0.0), Vec3::new(3.0, 1.0, 3.0));
        let world = MeshSnapshot::from_indexed(&vertices, &indices).to_world_space(&matrix);

        let hit = world
            .intersect_ray(&Ray::down(Vec3::new(2.5, 5.0, -2.5)), CullMode::None)
            .unwrap();
        assert_relative_eq!(hit.point, Vec3::new(2.5, 2.0, -2.5), epsilon = 1e-5);

        assert!(world.intersect_ray(&Ray::down(Vec3::new(3.5, 5.0, 0.0)), CullMode::None).is_none());
    }
}

//! Scene placement and the model-to-world transform pipeline
//!
//! The renderer positions a mesh instance with a translate followed by a
//! non-uniform scale, on top of the node transform baked into the asset.
//! Collision must use exactly the same matrix or what the player sees and
//! what they stand on drift apart.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use super::mesh::{MeshSnapshot, WorldSpaceCollisionMesh};

/// Scene-supplied translation and non-uniform scale of one mesh instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// World translation
    pub translation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Placement {
    /// Placement that leaves geometry untouched
    pub fn identity() -> Self {
        Self {
            translation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Placement from translation and scale
    pub fn new(translation: Vec3, scale: Vec3) -> Self {
        Self { translation, scale }
    }

    /// Placement with unit scale
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// `Translate × Scale`
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translate_scale(self.translation, self.scale)
    }

    /// `Placement × NodeTransform`, the model matrix the renderer draws with
    pub fn model_matrix(&self, node_transform: &Mat4) -> Mat4 {
        self.to_matrix() * node_transform
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

/// Map a snapshot into world space through `Placement × NodeTransform`
pub fn world_triangles(snapshot: &MeshSnapshot, placement: &Placement) -> WorldSpaceCollisionMesh {
    snapshot.to_world_space(&placement.model_matrix(snapshot.node_transform()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::Triangle;
    use approx::assert_relative_eq;

    fn sample_snapshot() -> MeshSnapshot {
        MeshSnapshot::from_triangles(vec![
            Triangle::new(Vec3::new(-1.0, 2.0, 1.0), Vec3::new(1.0, 2.0, 1.0), Vec3::new(1.0, 2.0, -1.0)),
            Triangle::new(Vec3::new(0.5, -3.0, 4.0), Vec3::new(7.0, 0.25, 1.0), Vec3::new(-2.0, 9.0, 0.0)),
        ])
    }

    #[test]
    fn test_identity_pipeline_preserves_triangles() {
        let snapshot = sample_snapshot();
        let world = world_triangles(&snapshot, &Placement::identity());

        for (src, dst) in snapshot.triangles().iter().zip(&world.triangles) {
            for (a, b) in src.vertices().iter().zip(dst.vertices()) {
                assert_relative_eq!(*a, b, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_placement_scales_then_translates() {
        let snapshot = sample_snapshot();
        let placement = Placement::new(Vec3::new(-8.0, -3.0, -8.0), Vec3::new(1.0, 0.3, 0.5));
        let world = world_triangles(&snapshot, &placement);

        // (-1, 2, 1) -> (-1 * 1 - 8, 2 * 0.3 - 3, 1 * 0.5 - 8)
        assert_relative_eq!(world.triangles[0].v0, Vec3::new(-9.0, -2.4, -7.5), epsilon = 1e-5);
    }

    #[test]
    fn test_node_transform_applied_before_placement() {
        let node = Mat4::new_translation(&Vec3::new(0.0, 10.0, 0.0));
        let snapshot = sample_snapshot().with_node_transform(node);
        let placement = Placement::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(1.0, 0.5, 1.0));
        let world = world_triangles(&snapshot, &placement);

        // Node lifts y=2 to 12, placement scales to 6 and drops to 3
        assert_relative_eq!(world.triangles[0].v0.y, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_model_matrix_matches_pipeline() {
        let node = Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 2.0, 2.0));
        let snapshot = sample_snapshot().with_node_transform(node);
        let placement = Placement::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 1.0, 4.0));

        let matrix = placement.model_matrix(&node);
        let expected = matrix.transform_point(&snapshot.triangles()[1].v1.into()).coords;
        let world = world_triangles(&snapshot, &placement);

        assert_relative_eq!(world.triangles[1].v1, expected, epsilon = 1e-5);
    }
}

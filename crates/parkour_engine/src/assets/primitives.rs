//! Procedural level meshes
//!
//! Levels are blocked out from boxes and planes described in configuration.
//! All faces wind counter-clockwise seen from outside, so normals point out.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

use super::mesh::MeshAsset;

/// A primitive mesh shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PrimitiveShape {
    /// Axis-aligned box centered on the origin
    Box {
        /// Half size along each axis
        half_extents: [f32; 3],
    },
    /// Horizontal quad at y = 0 facing +Y
    Plane {
        /// Half size along X
        half_width: f32,
        /// Half size along Z
        half_depth: f32,
    },
}

impl PrimitiveShape {
    /// Box shape
    pub fn cuboid(half_x: f32, half_y: f32, half_z: f32) -> Self {
        Self::Box {
            half_extents: [half_x, half_y, half_z],
        }
    }

    /// Plane shape
    pub fn plane(half_width: f32, half_depth: f32) -> Self {
        Self::Plane {
            half_width,
            half_depth,
        }
    }

    /// Generate the mesh
    pub fn build(&self) -> MeshAsset {
        match *self {
            Self::Box { half_extents: [x, y, z] } => cuboid_mesh(x, y, z),
            Self::Plane { half_width, half_depth } => plane_mesh(half_width, half_depth),
        }
    }
}

fn cuboid_mesh(x: f32, y: f32, z: f32) -> MeshAsset {
    let vertices = vec![
        // Front corners
        Vec3::new(-x, -y, z),
        Vec3::new(x, -y, z),
        Vec3::new(x, y, z),
        Vec3::new(-x, y, z),
        // Back corners
        Vec3::new(-x, -y, -z),
        Vec3::new(-x, y, -z),
        Vec3::new(x, y, -z),
        Vec3::new(x, -y, -z),
    ];

    let indices = vec![
        // Front
        0, 1, 2, 2, 3, 0,
        // Back
        4, 5, 6, 6, 7, 4,
        // Left
        4, 0, 3, 3, 5, 4,
        // Right
        1, 7, 6, 6, 2, 1,
        // Top
        3, 2, 6, 6, 5, 3,
        // Bottom
        4, 7, 1, 1, 0, 4,
    ];

    MeshAsset::new(vertices, indices)
}

fn plane_mesh(half_width: f32, half_depth: f32) -> MeshAsset {
    let vertices = vec![
        Vec3::new(-half_width, 0.0, half_depth),
        Vec3::new(half_width, 0.0, half_depth),
        Vec3::new(half_width, 0.0, -half_depth),
        Vec3::new(-half_width, 0.0, -half_depth),
    ];

    MeshAsset::new(vertices, vec![0, 1, 2, 2, 3, 0])
}

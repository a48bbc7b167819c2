//! Collision detection primitives and mesh geometry
//!
//! # Architecture
//!
//! - **Model Space Storage**: level geometry is kept as extracted from the asset
//! - **On-Demand Transformation**: geometry is moved to world space only when
//!   its placement changes, then cached until the next change
//! - **Pure Queries**: ray tests take plain slices and hold no state
//!
//! # Module Organization
//!
//! - [`primitives`] - Rays, triangles, bounding spheres
//! - [`raycast`] - Nearest-hit query over a triangle soup
//! - [`mesh`] - Model-space snapshots and world-space collision meshes
//! - [`placement`] - Placement and the model-to-world pipeline

pub mod primitives;
pub mod raycast;
pub mod mesh;
pub mod placement;

// Re-export commonly used types
pub use primitives::{BoundingSphere, CullMode, Ray, RayHit, Triangle};
pub use raycast::nearest_hit;
pub use mesh::{MeshSnapshot, WorldSpaceCollisionMesh};
pub use placement::{world_triangles, Placement};

//! Physics module for collision detection and response
//!
//! Ray queries against level geometry: the downward ground probe and the
//! swept movement test that keeps the camera out of platforms.

pub mod collision;
pub mod collision_roles;
pub mod collision_world;

pub use collision::{
    CullMode,
    MeshSnapshot,
    Placement,
    Ray,
    RayHit,
    Triangle,
};
pub use collision_roles::CollisionRoles;
pub use collision_world::{Collidable, CollidableId, CollisionWorld};

//! # First-Person Camera
//!
//! The camera the collision core reads and corrects every frame.
//!
//! - [`first_person`] - Eye, look-at target, yaw/pitch and the
//!   grounded/airborne movement model
//! - [`projection`] - Perspective parameters for the external renderer

pub mod first_person;
pub mod projection;

pub use first_person::{FirstPersonCamera, MotionState};
pub use projection::Projection;

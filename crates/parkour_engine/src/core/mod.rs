//! # Core Engine Module
//!
//! Shared configuration used by every subsystem of the game loop.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration tree loaded from TOML or RON
//! - **Foundation**: Low-level utilities (math, time, logging)
//! - **Assets**: Mesh loading service and procedural level meshes

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;
pub use crate::assets;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    CameraConfig,
    CollisionConfig,
    EngineConfig,
    Config,
    ConfigError,
};

//! # Parkour Engine
//!
//! First-person movement and collision core for a small real-time 3D game
//! loop. Every frame the camera is turned by the mouse, probes for the
//! ground straight below it, moves by the keys held and is clamped against
//! platform geometry it would otherwise walk into.
//!
//! ## Features
//!
//! - **Ray Queries**: Möller-Trumbore nearest-hit over triangle soups
//! - **Transform Pipeline**: `Placement × NodeTransform`, identical to the renderer
//! - **Camera State Machine**: grounded/airborne movement with jumping and gravity
//! - **Headless Friendly**: pluggable clock and input sources
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parkour_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         engine.load_scene(Scene::from_config(&ApplicationConfig::default()));
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let mut app = MyApp;
//!     Engine::run(&config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod physics;
pub mod input;
pub mod camera;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError, AppEvent,
        Engine, EngineError,
        foundation::{
            math::{Vec3, Mat4},
            time::{Clock, ManualClock, SystemClock, Timer},
        },
        assets::{MeshAsset, MeshLibrary, MeshLoader, PrimitiveShape},
        camera::{FirstPersonCamera, MotionState},
        input::{InputManager, InputSnapshot, InputSource, KeyCode, MovementKeys},
        physics::{CollisionRoles, CollisionWorld, Placement},
        scene::{FrameReport, LevelConfig, Scene},
        core::config::{ApplicationConfig, CameraConfig, CollisionConfig, EngineConfig, Config, ConfigError},
    };
}

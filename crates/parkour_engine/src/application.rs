//! Application trait and lifecycle management

use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::engine::{Engine, EngineError};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a game session with the engine.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the engine is created. Load the scene here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame before the scene advances. Feed input events or
    /// adjust collidables here.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Render the application
    ///
    /// Called after the scene advanced. The renderer lives outside the engine;
    /// read the corrected camera from `engine.scene()` here.
    fn render(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        Ok(())
    }

    /// Handle application events
    ///
    /// Called when the application receives events (window events, input, etc.)
    fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
        // Default implementation forwards to engine
        engine.handle_event(event)
    }

    /// Cleanup the application
    ///
    /// Called when the application is shutting down.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Window was resized
    WindowResized {
        /// New window width
        width: u32,
        /// New window height
        height: u32,
    },

    /// Window close requested
    WindowCloseRequested,

    /// Window gained focus
    WindowFocused,

    /// Window lost focus
    WindowUnfocused,

    /// Key input event
    KeyInput {
        /// The key that was pressed/released
        key: crate::input::KeyCode,
        /// Whether the key was pressed (true) or released (false)
        pressed: bool,
    },

    /// Mouse movement
    MouseMoved {
        /// New X coordinate
        x: f64,
        /// New Y coordinate
        y: f64,
    },
}

//! # Unified Configuration System
//!
//! All tunables of the game loop in one serializable tree. Values load from
//! TOML or RON through the [`Config`] trait and are validated before a scene
//! is built from them.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging, frame limits, time stepping
//! - **Camera Config**: start pose, projection, movement, gravity
//! - **Collision Config**: clamp epsilon, sweep tolerance, face culling
//! - **Level Config**: meshes and collidable instances

use serde::{Deserialize, Serialize};

use crate::physics::collision::CullMode;
use crate::scene::level::LevelConfig;

// Re-export from the old config module for compatibility
pub use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Core loop behavior: logging and how time advances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Stop after this many frames (headless sessions)
    pub max_frames: Option<u64>,
    /// Advance a simulated clock by this many seconds per frame instead of wall time
    pub fixed_timestep: Option<f32>,
    /// Upper bound for a single frame's delta time
    pub max_delta_time: Option<f32>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            max_frames: None,
            fixed_timestep: None,
            max_delta_time: Some(0.25),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Stop after `frames` frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Drive time with a fixed step instead of the wall clock
    pub fn with_fixed_timestep(mut self, step: f32) -> Self {
        self.fixed_timestep = Some(step);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(step) = self.fixed_timestep {
            if !(step > 0.0 && step.is_finite()) {
                return Err(ConfigError::Invalid(format!("fixed_timestep must be positive, got {step}")));
            }
        }
        if let Some(max) = self.max_delta_time {
            if max <= 0.0 {
                return Err(ConfigError::Invalid(format!("max_delta_time must be positive, got {max}")));
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Camera Configuration
///
/// Start pose, projection parameters and the movement model of the
/// first-person camera. Angles are in degrees, distances in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position when the scene starts
    pub start_position: [f32; 3],
    /// Initial yaw; 0 looks down -Z, positive turns left
    pub yaw_degrees: f32,
    /// Initial pitch; positive looks up
    pub pitch_degrees: f32,
    /// Pitch is clamped to +/- this value
    pub max_pitch_degrees: f32,
    /// Distance from the eye to the look-at point
    pub look_distance: f32,
    /// Vertical field of view
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Viewport size used for the initial aspect ratio
    pub viewport: (u32, u32),
    /// Walking speed in units per second
    pub move_speed: f32,
    /// Speed factor while sprinting
    pub sprint_multiplier: f32,
    /// Degrees of rotation per pixel of mouse movement
    pub mouse_sensitivity: f32,
    /// Upward velocity applied by a jump
    pub jump_velocity: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Height above the ground at which a grounded camera starts falling
    pub ground_tolerance: f32,
    /// Smoothed delta time before the first frame
    pub initial_smoothed_delta: f32,
    /// Weight of the newest frame in the smoothed delta
    pub delta_smoothing: f32,
}

impl CameraConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.look_distance <= 0.0 {
            return Err(ConfigError::Invalid("look_distance must be positive".to_string()));
        }
        if !(0.0..90.0).contains(&self.max_pitch_degrees) {
            return Err(ConfigError::Invalid("max_pitch_degrees must be in [0, 90)".to_string()));
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if self.viewport.0 == 0 || self.viewport.1 == 0 {
            return Err(ConfigError::Invalid("viewport must not be empty".to_string()));
        }
        if self.gravity < 0.0 || self.move_speed < 0.0 || self.jump_velocity < 0.0 {
            return Err(ConfigError::Invalid("speeds and gravity must not be negative".to_string()));
        }
        if !(0.0..=1.0).contains(&self.delta_smoothing) {
            return Err(ConfigError::Invalid("delta_smoothing must be in [0, 1]".to_string()));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 2.0, 5.0],
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
            max_pitch_degrees: 89.0,
            look_distance: 1.0,
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            viewport: (1280, 720),
            move_speed: 40.0,
            sprint_multiplier: 1.5,
            mouse_sensitivity: 0.1,
            jump_velocity: 12.0,
            gravity: 30.0,
            ground_tolerance: 0.25,
            initial_smoothed_delta: 0.16,
            delta_smoothing: 0.1,
        }
    }
}

/// # Collision Configuration
///
/// Tolerances of the ground probe and the movement sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Gap kept between the eye and any surface it is clamped against
    pub clamp_epsilon: f32,
    /// Movements shorter than this are not swept; also the slack on hit distances
    pub sweep_tolerance: f32,
    /// Which triangle faces rays may hit
    pub cull_mode: CullMode,
}

impl CollisionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clamp_epsilon < 0.0 || self.sweep_tolerance <= 0.0 {
            return Err(ConfigError::Invalid(
                "clamp_epsilon must be >= 0 and sweep_tolerance > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            clamp_epsilon: 0.1,
            sweep_tolerance: 1e-4,
            cull_mode: CullMode::None,
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Camera and movement configuration
    pub camera: CameraConfig,
    /// Collision tolerances
    pub collision: CollisionConfig,
    /// Level to load
    pub level: LevelConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.camera.validate()?;
        self.collision.validate()?;
        self.level.validate()?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_defaults_are_valid() {
        ApplicationConfig::default().validate().unwrap();
    }

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let mut config = ApplicationConfig::default();
        config.collision.clamp_epsilon = 0.05;
        config.engine = config.engine.with_max_frames(120).with_fixed_timestep(1.0 / 60.0);

        let text = config.render(ConfigFormat::Toml).unwrap();
        let parsed = ApplicationConfig::parse(&text, ConfigFormat::Toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_ron_roundtrip_keeps_values() {
        let mut config = ApplicationConfig::default();
        config.camera.fov_degrees = 75.0;
        config.level.meshes.clear();
        let text = config.render(ConfigFormat::Ron).unwrap();
        assert_eq!(ApplicationConfig::parse(&text, ConfigFormat::Ron).unwrap(), config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = "[collision]\nclamp_epsilon = 0.2\ncull_mode = \"back\"\n";
        let config = ApplicationConfig::parse(text, ConfigFormat::Toml).unwrap();

        assert_eq!(config.collision.clamp_epsilon, 0.2);
        assert_eq!(config.collision.cull_mode, CullMode::Back);
        assert_eq!(config.collision.sweep_tolerance, 1e-4);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ApplicationConfig::default();
        config.camera.near = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ApplicationConfig::default();
        config.collision.sweep_tolerance = 0.0;
        assert!(config.validate().is_err());

        let mut config = ApplicationConfig::default();
        config.engine.fixed_timestep = Some(-1.0);
        assert!(config.validate().is_err());
    }
}

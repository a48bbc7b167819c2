//! Core engine implementation
//!
//! The engine owns time, input and the active scene, and drives an
//! [`Application`] through the frame loop until it quits or reaches the
//! configured frame limit.

use std::time::Duration;

use crate::{
    application::{AppError, AppEvent, Application},
    core::config::{ApplicationConfig, ConfigError, EngineConfig},
    foundation::time::{Clock, ManualClock, SystemClock, Timer},
    input::{InputManager, InputSource, KeyCode},
    scene::{FrameReport, Scene},
};
use thiserror::Error;

/// Main engine struct
///
/// The engine coordinates all subsystems and manages the main loop.
pub struct Engine {
    /// Input handling system
    pub input: InputManager,

    /// Active scene, if one is loaded
    scene: Option<Scene>,

    /// Frame timing
    timer: Timer,

    /// Time source sampled once per frame
    clock: Box<dyn Clock>,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;

        let clock: Box<dyn Clock> = match config.fixed_timestep {
            Some(step) => {
                log::info!("Using fixed timestep of {:.4}s", step);
                Box::new(ManualClock::with_auto_step(Duration::from_secs_f32(step)))
            }
            None => Box::new(SystemClock::new()),
        };
        let timer = Timer::new(clock.as_ref()).with_max_delta(config.max_delta_time);

        Ok(Self {
            input: InputManager::new(),
            scene: None,
            timer,
            clock,
            config,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(config: &ApplicationConfig, app: &mut T) -> Result<(), EngineError> {
        config.validate()?;
        let mut engine = Self::new(config.engine.clone())?;

        // Initialize application
        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");

        while engine.running {
            let delta_time = engine.timer.update(engine.clock.as_ref());

            // Update application
            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

            // Advance the scene
            engine.update(delta_time);

            // Render
            app.render(&mut engine)
                .map_err(|e| EngineError::ApplicationError(format!("App render: {}", e)))?;
        }

        // Cleanup
        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames ({:.1} fps average)",
            engine.timer.frame_count(),
            engine.timer.average_fps()
        );
        Ok(())
    }

    /// Advance the active scene by one frame
    pub fn update(&mut self, delta_time: f32) -> Option<FrameReport> {
        let input = self.input.snapshot();
        let report = self.scene.as_mut().map(|scene| scene.update(delta_time, &input));

        if let Some(max) = self.config.max_frames {
            if self.timer.frame_count() >= max {
                log::info!("Reached frame limit of {}", max);
                self.running = false;
            }
        }

        report
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) -> Result<(), AppError> {
        match event {
            AppEvent::WindowCloseRequested => {
                self.quit();
            }
            AppEvent::WindowResized { width, height } => {
                if let Some(scene) = self.scene.as_mut() {
                    scene.camera_mut().resize(width, height);
                }
            }
            AppEvent::WindowUnfocused => {
                self.input.clear();
            }
            AppEvent::WindowFocused => {
                // Re-anchor the cursor so the jump back does not turn the camera
                self.input.reset_mouse();
            }
            AppEvent::KeyInput { key: KeyCode::Escape, pressed: true } => {
                self.quit();
            }
            AppEvent::KeyInput { key, pressed } => {
                self.input.handle_key_input(key, pressed);
            }
            AppEvent::MouseMoved { x, y } => {
                self.input.handle_mouse_move(x, y);
            }
        }

        Ok(())
    }

    /// Make `scene` the active scene, returning the previous one
    pub fn load_scene(&mut self, scene: Scene) -> Option<Scene> {
        log::info!("Loading scene '{}'", scene.name());
        self.scene.replace(scene)
    }

    /// Remove the active scene
    pub fn unload_scene(&mut self) -> Option<Scene> {
        self.scene.take()
    }

    /// Get the active scene
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Get mutable access to the active scene
    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingApp {
        updates: u32,
        cleaned_up: bool,
        fail_at: Option<u32>,
    }

    impl CountingApp {
        fn new() -> Self {
            Self {
                updates: 0,
                cleaned_up: false,
                fail_at: None,
            }
        }
    }

    impl Application for CountingApp {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            engine.load_scene(Scene::from_config(&ApplicationConfig::default()));
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            self.updates += 1;
            if self.fail_at == Some(self.updates) {
                return Err(AppError::Custom("scripted failure".to_string()));
            }
            self.handle_event(engine, AppEvent::KeyInput { key: KeyCode::W, pressed: true })
        }

        fn cleanup(&mut self, _engine: &mut Engine) {
            self.cleaned_up = true;
        }
    }

    fn headless(frames: u64) -> ApplicationConfig {
        let mut config = ApplicationConfig::default();
        config.engine = config.engine.with_max_frames(frames).with_fixed_timestep(1.0 / 60.0);
        config
    }

    #[test]
    fn test_run_stops_at_frame_limit() {
        let mut app = CountingApp::new();
        Engine::run(&headless(12), &mut app).unwrap();

        assert_eq!(app.updates, 12);
        assert!(app.cleaned_up);
    }

    #[test]
    fn test_update_error_aborts_run() {
        let mut app = CountingApp::new();
        app.fail_at = Some(3);

        let err = Engine::run(&headless(10), &mut app).unwrap_err();
        assert!(matches!(err, EngineError::ApplicationError(_)));
        assert!(!app.cleaned_up);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = headless(1);
        config.collision.sweep_tolerance = -1.0;
        assert!(matches!(
            Engine::run(&config, &mut CountingApp::new()),
            Err(EngineError::ConfigError(_))
        ));
    }

    #[test]
    fn test_events_reach_input_and_camera() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.load_scene(Scene::from_config(&ApplicationConfig::default()));

        engine.handle_event(AppEvent::KeyInput { key: KeyCode::Space, pressed: true }).unwrap();
        assert!(engine.input.is_key_down(KeyCode::Space));

        engine.handle_event(AppEvent::WindowResized { width: 600, height: 600 }).unwrap();
        let aspect = engine.scene().unwrap().camera().projection().aspect;
        assert!((aspect - 1.0).abs() < 1e-6);

        engine.handle_event(AppEvent::WindowUnfocused).unwrap();
        assert!(!engine.input.is_key_down(KeyCode::Space));

        engine.handle_event(AppEvent::KeyInput { key: KeyCode::Escape, pressed: true }).unwrap();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_update_without_scene_is_harmless() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        assert!(engine.update(0.016).is_none());
        assert!(engine.unload_scene().is_none());
    }
}

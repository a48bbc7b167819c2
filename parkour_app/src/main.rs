//! Headless parkour session
//!
//! Loads an [`ApplicationConfig`] (TOML or RON, path as first argument) or
//! falls back to the built-in level, then plays a scripted run through the
//! engine loop: turn towards the platform, walk, jump, sprint and strafe.
//! The corrected camera is logged every frame at `debug` and periodically at
//! `info`.

use parkour_engine::foundation::logging;
use parkour_engine::prelude::*;

/// Frames to run when the configuration sets no limit
const DEFAULT_FRAMES: u64 = 240;

/// Frame rate of the simulated clock when the configuration sets none
const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

/// Frames between `info` camera lines
const INFO_EVERY: u64 = 30;

/// Window events to inject, keyed by the frame they fire on
fn demo_script() -> Vec<(u64, AppEvent)> {
    let key = |key, pressed| AppEvent::KeyInput { key, pressed };
    vec![
        // Anchor the cursor, then turn left about 32 degrees towards the platform
        (0, AppEvent::MouseMoved { x: 640.0, y: 360.0 }),
        (5, AppEvent::MouseMoved { x: 324.0, y: 360.0 }),
        (10, key(KeyCode::W, true)),
        (40, key(KeyCode::Space, true)),
        (41, key(KeyCode::Space, false)),
        (60, key(KeyCode::LeftShift, true)),
        (90, key(KeyCode::LeftShift, false)),
        (120, key(KeyCode::W, false)),
        (130, key(KeyCode::D, true)),
        (150, key(KeyCode::D, false)),
        (160, AppEvent::WindowResized { width: 1920, height: 1080 }),
        (170, key(KeyCode::Space, true)),
        (171, key(KeyCode::Space, false)),
    ]
}

struct ParkourApp {
    config: ApplicationConfig,
    script: Vec<(u64, AppEvent)>,
    cursor: usize,
    frame: u64,
    clamps: u32,
    jumps: u32,
}

impl ParkourApp {
    fn new(config: ApplicationConfig, script: Vec<(u64, AppEvent)>) -> Self {
        Self {
            config,
            script,
            cursor: 0,
            frame: 0,
            clamps: 0,
            jumps: 0,
        }
    }
}

impl Application for ParkourApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Building level '{}'", self.config.level.name);
        engine.load_scene(Scene::from_config(&self.config));
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        while let Some((frame, event)) = self.script.get(self.cursor).cloned() {
            if frame > self.frame {
                break;
            }
            log::debug!("Frame {}: injecting {:?}", self.frame, event);
            self.handle_event(engine, event)?;
            self.cursor += 1;
        }
        Ok(())
    }

    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let scene = engine
            .scene()
            .ok_or_else(|| AppError::Custom("no scene loaded".to_string()))?;

        if let Some(report) = scene.last_report() {
            if report.correction.is_some() {
                self.clamps += 1;
            }
            if report.jumped {
                self.jumps += 1;
            }

            log::debug!(
                "Frame {}: eye {:?} target {:?} ground {:?} {:?}",
                self.frame,
                report.eye,
                report.target,
                report.ground_y,
                report.motion_state
            );
            if self.frame % INFO_EVERY == 0 {
                log::info!(
                    "Frame {}: eye ({:.2}, {:.2}, {:.2}) yaw {:.1} pitch {:.1} ground {:?} {:?}",
                    self.frame,
                    report.eye.x,
                    report.eye.y,
                    report.eye.z,
                    scene.camera().yaw(),
                    scene.camera().pitch(),
                    report.ground_y,
                    report.motion_state
                );
            }
        }

        self.frame += 1;
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        if let Some(scene) = engine.unload_scene() {
            log::info!(
                "Session over after {} frames ({:.2}s simulated): final eye {:?}, {} jumps, {} clamped moves",
                scene.frame_loop().frames(),
                scene.frame_loop().elapsed(),
                scene.camera().eye(),
                self.jumps,
                self.clamps
            );
        }
    }
}

/// Configuration from `path`, or the built-in defaults, bounded for a headless run
fn load_config(path: Option<&str>) -> Result<ApplicationConfig, ConfigError> {
    let mut config = match path {
        Some(path) => ApplicationConfig::load_from_file(path)?,
        None => ApplicationConfig::default(),
    };

    if config.engine.max_frames.is_none() {
        config.engine.max_frames = Some(DEFAULT_FRAMES);
    }
    if config.engine.fixed_timestep.is_none() {
        config.engine.fixed_timestep = Some(DEFAULT_TIMESTEP);
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1);
    let config = load_config(path.as_deref())?;

    logging::init(&config.engine.log_level);
    match &path {
        Some(path) => log::info!("Loaded configuration from {}", path),
        None => log::info!("Using built-in configuration"),
    }

    let mut app = ParkourApp::new(config.clone(), demo_script());
    Engine::run(&config, &mut app)?;

    Ok(())
}

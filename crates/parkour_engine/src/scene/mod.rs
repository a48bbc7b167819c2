//! Scene: the camera, the collidable level and the loop that ties them
//!
//! A scene is built once from configuration. Every level variant runs
//! through the same [`FrameUpdateLoop`]; levels differ only in which
//! instances they register and with what roles.

pub mod frame_loop;
pub mod level;

#[cfg(test)]
mod tests;

pub use frame_loop::{FrameReport, FrameUpdateLoop};
pub use level::{InstanceConfig, LevelConfig, MeshEntry, SurfaceRole};

use crate::assets::MeshLoader;
use crate::camera::FirstPersonCamera;
use crate::core::config::ApplicationConfig;
use crate::input::InputSnapshot;
use crate::physics::CollisionWorld;

/// A running level
#[derive(Debug)]
pub struct Scene {
    name: String,
    camera: FirstPersonCamera,
    world: CollisionWorld,
    frame_loop: FrameUpdateLoop,
    last_report: Option<FrameReport>,
}

impl Scene {
    /// Build the configured level from its own procedural meshes
    pub fn from_config(config: &ApplicationConfig) -> Self {
        Self::with_loader(config, &config.level.mesh_library())
    }

    /// Build the configured level, loading meshes through `loader`
    pub fn with_loader(config: &ApplicationConfig, loader: &dyn MeshLoader) -> Self {
        let world = config.level.build_collision_world(loader);
        Self::new(
            config.level.name.clone(),
            FirstPersonCamera::from_config(&config.camera),
            world,
            FrameUpdateLoop::new(&config.camera, config.collision),
        )
    }

    /// Assemble a scene from parts
    pub fn new(
        name: impl Into<String>,
        camera: FirstPersonCamera,
        world: CollisionWorld,
        frame_loop: FrameUpdateLoop,
    ) -> Self {
        let name = name.into();
        log::info!("Scene '{}' ready, camera at {:?}", name, camera.eye());
        Self {
            name,
            camera,
            world,
            frame_loop,
            last_report: None,
        }
    }

    /// Advance one frame
    pub fn update(&mut self, delta_time: f32, input: &InputSnapshot) -> FrameReport {
        let report = self.frame_loop.tick(delta_time, input, &mut self.camera, &mut self.world);
        self.last_report = Some(report);
        report
    }

    /// Level name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Camera as corrected by the last update
    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    /// Mutable camera, e.g. to teleport or resize
    pub fn camera_mut(&mut self) -> &mut FirstPersonCamera {
        &mut self.camera
    }

    /// Collidable instances
    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    /// Mutable collidables, e.g. to move a platform
    pub fn world_mut(&mut self) -> &mut CollisionWorld {
        &mut self.world
    }

    /// Frame loop state
    pub fn frame_loop(&self) -> &FrameUpdateLoop {
        &self.frame_loop
    }

    /// Result of the most recent update
    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }
}

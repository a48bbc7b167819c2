//! Frame loop scenarios over real levels


use crate::assets::PrimitiveShape;
use crate::core::config::{ApplicationConfig, CameraConfig};
use crate::foundation::math::Vec3;
use crate::physics::{Collidable, CollisionRoles, CollisionWorld, Placement};
use crate::scene::{LevelConfig, Scene};

/// Frame time that keeps the smoothed delta at its initial 0.16
pub(super) const STEADY_DT: f32 = 0.16;

/// Scene for `level` with the camera starting at `eye` facing `yaw_degrees`
pub(super) fn scene_at(level: LevelConfig, eye: [f32; 3], yaw_degrees: f32) -> Scene {
    let config = ApplicationConfig {
        camera: CameraConfig {
            start_position: eye,
            yaw_degrees,
            ..CameraConfig::default()
        },
        level,
        ..ApplicationConfig::default()
    };
    Scene::from_config(&config)
}

/// World holding one flat 10x10 platform at height `h`
pub(super) fn flat_platform_world(h: f32) -> CollisionWorld {
    let snapshot = PrimitiveShape::plane(5.0, 5.0).build().collision_snapshot();
    let mut world = CollisionWorld::new();
    world.register(Collidable::new(
        "platform",
        Some(snapshot),
        Placement::at(Vec3::new(0.0, h, 0.0)),
        CollisionRoles::PLATFORM,
    ));
    world
}

//! Per-frame camera update with ground probe and movement sweep
//!
//! One tick runs, in order: time smoothing, mouse look, the downward ground
//! probe, movement intent with vertical integration, and finally the sweep
//! that pulls the eye back out of any platform it was moved into.

use crate::camera::{FirstPersonCamera, MotionState};
use crate::core::config::{CameraConfig, CollisionConfig};
use crate::foundation::math::Vec3;
use crate::input::{InputSnapshot, MovementKeys};
use crate::physics::{CollisionRoles, CollisionWorld, Ray};

/// Minimum |normal.y| of a surface the camera can land on when a sweep hits it
const WALKABLE_NORMAL_Y: f32 = 0.7;

/// What one tick did, for the renderer and for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Raw delta time fed to the tick
    pub delta_time: f32,
    /// Smoothed delta time movement was scaled by
    pub smoothed_delta: f32,
    /// Ground height after the tick, from the probe or a landing sweep
    pub ground_y: Option<f32>,
    /// Offset applied by the sweep clamp, if it triggered
    pub correction: Option<Vec3>,
    /// Whether a jump started this tick
    pub jumped: bool,
    /// Motion state after the tick
    pub motion_state: MotionState,
    /// Eye after the tick
    pub eye: Vec3,
    /// Look-at point after the tick
    pub target: Vec3,
}

/// Frame update state carried between ticks
#[derive(Debug, Clone)]
pub struct FrameUpdateLoop {
    smoothed_delta: f32,
    delta_smoothing: f32,
    elapsed: f32,
    anim_time: f32,
    frames: u64,

    move_speed: f32,
    sprint_multiplier: f32,
    mouse_sensitivity: f32,

    collision: CollisionConfig,
}

impl FrameUpdateLoop {
    /// Create the loop from camera and collision tuning
    pub fn new(camera: &CameraConfig, collision: CollisionConfig) -> Self {
        Self {
            smoothed_delta: camera.initial_smoothed_delta,
            delta_smoothing: camera.delta_smoothing,
            elapsed: 0.0,
            anim_time: 0.0,
            frames: 0,
            move_speed: camera.move_speed,
            sprint_multiplier: camera.sprint_multiplier,
            mouse_sensitivity: camera.mouse_sensitivity,
            collision,
        }
    }

    /// Smoothed delta time used for the most recent movement
    pub fn smoothed_delta(&self) -> f32 {
        self.smoothed_delta
    }

    /// Raw time accumulated over all ticks
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Animation clock for animated meshes
    pub fn anim_time(&self) -> f32 {
        self.anim_time
    }

    /// Restart the animation clock
    pub fn reset_anim_time(&mut self) {
        self.anim_time = 0.0;
    }

    /// Ticks run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Collision tolerances in use
    pub fn collision(&self) -> &CollisionConfig {
        &self.collision
    }

    /// Run one frame
    pub fn tick(
        &mut self,
        delta_time: f32,
        input: &InputSnapshot,
        camera: &mut FirstPersonCamera,
        world: &mut CollisionWorld,
    ) -> FrameReport {
        self.frames += 1;
        self.elapsed += delta_time;
        self.smoothed_delta =
            self.smoothed_delta * (1.0 - self.delta_smoothing) + delta_time * self.delta_smoothing;
        let step = self.smoothed_delta;
        self.anim_time += delta_time;

        // Mouse right turns right, mouse down looks down
        let (dx, dy) = input.mouse_delta;
        camera.rotate(-dx * self.mouse_sensitivity, -dy * self.mouse_sensitivity);

        let ground_y = self.probe_ground(camera.eye(), world);
        camera.set_ground(ground_y);

        let start = camera.eye();

        let mut speed = self.move_speed * step;
        if input.keys.contains(MovementKeys::SPRINT) {
            speed *= self.sprint_multiplier;
        }
        let forward = input.forward_axis();
        if forward != 0.0 {
            camera.move_forward_back(forward * speed);
        }
        let strafe = input.strafe_axis();
        if strafe != 0.0 {
            camera.move_left_right(strafe * speed);
        }
        let jumped = input.keys.contains(MovementKeys::JUMP) && camera.jump();
        camera.integrate_vertical(step);

        let correction = self.sweep(start, camera, world);

        let report = FrameReport {
            delta_time,
            smoothed_delta: step,
            ground_y: camera.ground_y(),
            correction,
            jumped,
            motion_state: camera.motion_state(),
            eye: camera.eye(),
            target: camera.target(),
        };
        log::trace!("Frame {}: {:?}", self.frames, report);
        report
    }

    /// Height to stand at below `eye`, biased up by the clamp epsilon
    pub fn probe_ground(&self, eye: Vec3, world: &mut CollisionWorld) -> Option<f32> {
        world
            .cast(&Ray::down(eye), CollisionRoles::GROUND_PROBE, self.collision.cull_mode)
            .map(|hit| hit.point.y + self.collision.clamp_epsilon)
    }

    /// Clamp the move from `start` to the camera's eye against sweep geometry
    ///
    /// Returns the correction applied to eye and target.
    pub fn sweep(
        &self,
        start: Vec3,
        camera: &mut FirstPersonCamera,
        world: &mut CollisionWorld,
    ) -> Option<Vec3> {
        let movement = camera.eye() - start;
        let length = movement.magnitude();
        if length <= self.collision.sweep_tolerance || !world.has_role(CollisionRoles::SWEEP) {
            return None;
        }

        let ray = Ray::normalized(start, movement, self.collision.sweep_tolerance)?;
        let hit = world.cast(&ray, CollisionRoles::SWEEP, self.collision.cull_mode)?;
        if hit.distance > length + self.collision.sweep_tolerance {
            return None;
        }

        let direction = ray.direction;
        let clamped = hit.point - direction * self.collision.clamp_epsilon;
        let correction = clamped - camera.eye();
        camera.translate(correction);
        log::debug!(
            "Movement clamped at {:.3} of {:.3} (triangle {}), eye now {:?}",
            hit.distance,
            length,
            hit.triangle,
            camera.eye()
        );

        // Fell onto a top surface, which is now the ground
        if direction.y < 0.0
            && hit.normal.y.abs() > WALKABLE_NORMAL_Y
            && camera.motion_state() == MotionState::Airborne
        {
            camera.set_ground(Some(hit.point.y + self.collision.clamp_epsilon));
            camera.land();
        }

        Some(correction)
    }
}

impl Default for FrameUpdateLoop {
    fn default() -> Self {
        Self::new(&CameraConfig::default(), CollisionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_smoothed_delta_starts_from_initial_value() {
        let mut frame_loop = FrameUpdateLoop::default();
        let mut camera = FirstPersonCamera::default();
        let mut world = CollisionWorld::new();

        let report = frame_loop.tick(0.06, &InputSnapshot::default(), &mut camera, &mut world);
        assert_relative_eq!(report.smoothed_delta, 0.16 * 0.9 + 0.06 * 0.1, epsilon = 1e-6);
        assert_relative_eq!(frame_loop.elapsed(), 0.06, epsilon = 1e-6);
        assert_relative_eq!(frame_loop.anim_time(), 0.06, epsilon = 1e-6);
        assert_eq!(frame_loop.frames(), 1);

        frame_loop.reset_anim_time();
        frame_loop.tick(0.02, &InputSnapshot::default(), &mut camera, &mut world);
        assert_relative_eq!(frame_loop.anim_time(), 0.02, epsilon = 1e-6);
        assert_relative_eq!(frame_loop.elapsed(), 0.08, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_world_has_no_ground_and_no_correction() {
        let mut frame_loop = FrameUpdateLoop::default();
        let mut camera = FirstPersonCamera::default();
        let mut world = CollisionWorld::new();

        let input = InputSnapshot::keys(MovementKeys::FORWARD);
        let report = frame_loop.tick(0.016, &input, &mut camera, &mut world);

        assert!(report.ground_y.is_none());
        assert!(report.correction.is_none());
        assert_eq!(report.motion_state, MotionState::Airborne);
    }

    #[test]
    fn test_mouse_delta_turns_camera() {
        let mut frame_loop = FrameUpdateLoop::default();
        let mut camera = FirstPersonCamera::default();
        let mut world = CollisionWorld::new();

        frame_loop.tick(0.016, &InputSnapshot::mouse(100.0, 50.0), &mut camera, &mut world);

        // Inverted and scaled by the sensitivity
        assert_relative_eq!(camera.yaw(), 350.0, epsilon = 1e-4);
        assert_relative_eq!(camera.pitch(), -5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_sprint_scales_speed() {
        let mut world = CollisionWorld::new();
        let config = CameraConfig {
            gravity: 0.0,
            ..CameraConfig::default()
        };

        let mut walk = FirstPersonCamera::from_config(&config);
        let mut sprint = FirstPersonCamera::from_config(&config);
        FrameUpdateLoop::new(&config, CollisionConfig::default())
            .tick(0.16, &InputSnapshot::keys(MovementKeys::FORWARD), &mut walk, &mut world);
        FrameUpdateLoop::new(&config, CollisionConfig::default()).tick(
            0.16,
            &InputSnapshot::keys(MovementKeys::FORWARD | MovementKeys::SPRINT),
            &mut sprint,
            &mut world,
        );

        let start = Vec3::new(0.0, 2.0, 5.0);
        assert_relative_eq!((walk.eye() - start).magnitude(), 40.0 * 0.16, epsilon = 1e-4);
        assert_relative_eq!((sprint.eye() - start).magnitude(), 40.0 * 0.16 * 1.5, epsilon = 1e-4);
    }
}

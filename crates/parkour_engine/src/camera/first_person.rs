//! First-person camera with a grounded/airborne movement model
//!
//! Orientation is stored as absolute yaw and pitch in degrees. Yaw 0 looks
//! down -Z and positive yaw turns left; positive pitch looks up. Walking
//! uses the horizontal part of the view direction only, so looking at the
//! floor does not slow the player down.
//!
//! Movement primitives never test collision. The frame loop moves the
//! camera tentatively, then corrects the eye through [`FirstPersonCamera::translate`].

use crate::core::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3, WORLD_UP};

use super::projection::Projection;

/// Vertical movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    /// Standing on the ground; the eye tracks the ground height
    Grounded,
    /// Jumping or falling under gravity
    Airborne,
}

/// First-person camera
#[derive(Debug, Clone)]
pub struct FirstPersonCamera {
    eye: Vec3,
    target: Vec3,
    yaw: f32,
    pitch: f32,
    max_pitch: f32,
    look_distance: f32,

    vertical_velocity: f32,
    ground_y: Option<f32>,
    state: MotionState,

    jump_velocity: f32,
    gravity: f32,
    ground_tolerance: f32,

    projection: Projection,
}

impl FirstPersonCamera {
    /// Camera at `eye` looking along `yaw`/`pitch` with default tuning
    pub fn new(eye: Vec3, yaw_degrees: f32, pitch_degrees: f32) -> Self {
        let config = CameraConfig {
            start_position: [eye.x, eye.y, eye.z],
            yaw_degrees,
            pitch_degrees,
            ..CameraConfig::default()
        };
        Self::from_config(&config)
    }

    /// Camera set up from configuration
    ///
    /// The camera starts airborne with no known ground; the first ground
    /// probe decides where it lands.
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self {
            eye: utils::vec3(config.start_position),
            target: Vec3::zeros(),
            yaw: 0.0,
            pitch: 0.0,
            max_pitch: config.max_pitch_degrees,
            look_distance: config.look_distance,
            vertical_velocity: 0.0,
            ground_y: None,
            state: MotionState::Airborne,
            jump_velocity: config.jump_velocity,
            gravity: config.gravity,
            ground_tolerance: config.ground_tolerance,
            projection: Projection::new(
                config.fov_degrees,
                config.viewport.0,
                config.viewport.1,
                config.near,
                config.far,
            ),
        };
        camera.rotate(config.yaw_degrees, config.pitch_degrees);
        camera
    }

    /// Eye position
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Look-at point
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Absolute yaw in degrees, in `[0, 360)`
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Absolute pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current vertical velocity (positive is up)
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Height the camera stands at, `None` when no ground was found below it
    pub fn ground_y(&self) -> Option<f32> {
        self.ground_y
    }

    /// Grounded or airborne
    pub fn motion_state(&self) -> MotionState {
        self.state
    }

    /// Whether the camera stands on the ground
    pub fn is_grounded(&self) -> bool {
        self.state == MotionState::Grounded
    }

    /// Unit view direction derived from yaw and pitch
    pub fn look_direction(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = utils::deg_to_rad(self.yaw).sin_cos();
        let (pitch_sin, pitch_cos) = utils::deg_to_rad(self.pitch).sin_cos();
        Vec3::new(-yaw_sin * pitch_cos, pitch_sin, -yaw_cos * pitch_cos)
    }

    /// Horizontal walking direction
    pub fn flat_forward(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = utils::deg_to_rad(self.yaw).sin_cos();
        Vec3::new(-yaw_sin, 0.0, -yaw_cos)
    }

    /// Horizontal direction to the camera's right
    pub fn right(&self) -> Vec3 {
        self.flat_forward().cross(&WORLD_UP)
    }

    /// Recompute the look-at point from the eye and the absolute angles
    pub fn refresh_look(&mut self) {
        self.target = self.eye + self.look_direction() * self.look_distance;
    }

    /// Add to the absolute angles and recompute the look-at point
    ///
    /// Pitch is clamped short of straight up or down.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(360.0);
        self.pitch = (self.pitch + delta_pitch).clamp(-self.max_pitch, self.max_pitch);
        self.refresh_look();
    }

    /// Walk along the view direction; negative speeds walk backwards
    pub fn move_forward_back(&mut self, signed_speed: f32) {
        self.translate(self.flat_forward() * signed_speed);
    }

    /// Strafe; positive speeds go left, negative right
    pub fn move_left_right(&mut self, signed_speed: f32) {
        self.translate(-self.right() * signed_speed);
    }

    /// Move eye and look-at point together, keeping the orientation
    pub fn translate(&mut self, delta: Vec3) {
        self.eye += delta;
        self.target += delta;
    }

    /// Teleport the eye, keeping the orientation
    pub fn set_eye(&mut self, eye: Vec3) {
        self.translate(eye - self.eye);
    }

    /// Record the result of this frame's ground probe
    pub fn set_ground(&mut self, ground_y: Option<f32>) {
        self.ground_y = ground_y;
    }

    /// Start a jump; ignored unless grounded
    pub fn jump(&mut self) -> bool {
        if self.state != MotionState::Grounded {
            return false;
        }
        self.vertical_velocity = self.jump_velocity;
        self.set_state(MotionState::Airborne);
        true
    }

    /// Stop falling and stand at the current height
    pub fn land(&mut self) {
        self.vertical_velocity = 0.0;
        self.set_state(MotionState::Grounded);
    }

    /// Advance vertical motion by `dt` seconds against the recorded ground
    pub fn integrate_vertical(&mut self, dt: f32) {
        if self.state == MotionState::Grounded {
            match self.ground_y {
                Some(ground) if self.eye.y - ground <= self.ground_tolerance => {
                    // Follow the ground, including small steps up
                    self.translate(Vec3::new(0.0, ground - self.eye.y, 0.0));
                    return;
                }
                _ => {
                    // Walked off a ledge or lost the ground entirely
                    self.vertical_velocity = 0.0;
                    self.set_state(MotionState::Airborne);
                }
            }
        }

        self.vertical_velocity -= self.gravity * dt;
        self.translate(Vec3::new(0.0, self.vertical_velocity * dt, 0.0));

        if let Some(ground) = self.ground_y {
            if self.vertical_velocity <= 0.0 && self.eye.y <= ground {
                self.translate(Vec3::new(0.0, ground - self.eye.y, 0.0));
                self.land();
            }
        }
    }

    fn set_state(&mut self, state: MotionState) {
        if self.state != state {
            log::debug!(
                "Camera {:?} -> {:?} at y={:.3} (ground {:?})",
                self.state,
                state,
                self.eye.y,
                self.ground_y
            );
            self.state = state;
        }
    }

    /// View matrix for the renderer
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.eye, self.target, WORLD_UP)
    }

    /// Projection parameters
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Projection matrix for the renderer
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// Viewport changed size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grounded_at(y: f32) -> FirstPersonCamera {
        let mut camera = FirstPersonCamera::new(Vec3::new(0.0, y, 0.0), 0.0, 0.0);
        camera.set_ground(Some(y));
        camera.land();
        camera
    }

    #[test]
    fn test_default_orientation_looks_down_negative_z() {
        let camera = FirstPersonCamera::new(Vec3::new(1.0, 2.0, 3.0), 0.0, 0.0);
        assert_relative_eq!(camera.look_direction(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(camera.target(), Vec3::new(1.0, 2.0, 2.0), epsilon = 1e-6);
        assert_relative_eq!(camera.right(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_rotation_is_idempotent() {
        let mut camera = FirstPersonCamera::new(Vec3::new(0.0, 1.0, 0.0), 37.0, -12.0);
        let before = camera.target();

        camera.rotate(0.0, 0.0);
        camera.rotate(0.0, 0.0);
        camera.refresh_look();

        assert_relative_eq!(camera.target(), before, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_uses_absolute_angles() {
        let mut a = FirstPersonCamera::new(Vec3::zeros(), 0.0, 0.0);
        a.rotate(30.0, 10.0);
        a.rotate(60.0, -5.0);

        let b = FirstPersonCamera::new(Vec3::zeros(), 90.0, 5.0);
        assert_relative_eq!(a.target(), b.target(), epsilon = 1e-5);

        // Positive yaw turns left: 90 degrees looks down -X
        assert_relative_eq!(b.flat_forward(), Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FirstPersonCamera::default();
        camera.rotate(0.0, 500.0);
        assert_relative_eq!(camera.pitch(), 89.0);
        camera.rotate(0.0, -1000.0);
        assert_relative_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn test_movement_carries_target_along() {
        let mut camera = FirstPersonCamera::new(Vec3::zeros(), 0.0, -45.0);
        let offset = camera.target() - camera.eye();

        camera.move_forward_back(2.0);
        camera.move_left_right(1.0);

        // Walking ignores pitch
        assert_relative_eq!(camera.eye(), Vec3::new(-1.0, 0.0, -2.0), epsilon = 1e-6);
        assert_relative_eq!(camera.target() - camera.eye(), offset, epsilon = 1e-6);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut camera = grounded_at(0.0);
        assert!(camera.jump());
        assert_eq!(camera.motion_state(), MotionState::Airborne);
        assert_relative_eq!(camera.vertical_velocity(), 12.0);
        assert!(!camera.jump());
    }

    #[test]
    fn test_jump_arc_lands_on_ground() {
        let mut camera = grounded_at(1.0);
        camera.jump();

        let mut peak = camera.eye().y;
        for _ in 0..200 {
            camera.integrate_vertical(0.01);
            peak = peak.max(camera.eye().y);
            if camera.is_grounded() {
                break;
            }
        }

        assert!(camera.is_grounded());
        assert!(peak > 3.0);
        assert_relative_eq!(camera.eye().y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.vertical_velocity(), 0.0);
    }

    #[test]
    fn test_no_ground_means_falling() {
        let mut camera = grounded_at(0.0);
        camera.set_ground(None);
        camera.integrate_vertical(0.1);

        assert_eq!(camera.motion_state(), MotionState::Airborne);
        assert!(camera.eye().y < 0.0);
    }

    #[test]
    fn test_grounded_follows_small_steps_but_falls_off_ledges() {
        let mut camera = grounded_at(0.0);

        camera.set_ground(Some(0.2));
        camera.integrate_vertical(0.016);
        assert!(camera.is_grounded());
        assert_relative_eq!(camera.eye().y, 0.2);

        camera.set_ground(Some(-3.0));
        camera.integrate_vertical(0.016);
        assert_eq!(camera.motion_state(), MotionState::Airborne);
    }

    #[test]
    fn test_ground_at_zero_is_real_ground() {
        let mut camera = FirstPersonCamera::new(Vec3::new(0.0, 0.05, 0.0), 0.0, 0.0);
        camera.set_ground(Some(0.0));
        camera.integrate_vertical(0.1);

        assert!(camera.is_grounded());
        assert_relative_eq!(camera.eye().y, 0.0);
    }
}

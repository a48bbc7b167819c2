//! Math utilities and types
//!
//! Provides the fundamental math types shared by collision, camera and the
//! external renderer.

pub use nalgebra::{Matrix4, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// World up axis (Y-up, right-handed)
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert a config-friendly array into a vector
    pub fn vec3(v: [f32; 3]) -> Vec3 {
        Vec3::new(v[0], v[1], v[2])
    }
}

/// Extension trait for Mat4 with the matrices an immediate-mode renderer needs
pub trait Mat4Ext {
    /// OpenGL style perspective projection (`gluPerspective`), `fov_y` in radians
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Right-handed look-at view matrix (`gluLookAt`)
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Translation followed by non-uniform scale (`glTranslatef` then `glScalef`)
    fn translate_scale(translation: Vec3, scale: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let f = 1.0 / (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = f / aspect;
        result[(1, 1)] = f;
        result[(2, 2)] = (far + near) / (near - far);
        result[(2, 3)] = (2.0 * far * near) / (near - far);
        result[(3, 2)] = -1.0;
        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }

    fn translate_scale(translation: Vec3, scale: Vec3) -> Mat4 {
        Mat4::new_translation(&translation) * Mat4::new_nonuniform_scaling(&scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_translate_scale_applies_scale_first() {
        let m = Mat4::translate_scale(Vec3::new(-8.0, -3.0, -8.0), Vec3::new(1.0, 0.3, 0.5));
        let p = m.transform_point(&Point3::new(2.0, 10.0, 4.0));

        assert_relative_eq!(p.coords, Vec3::new(-6.0, 0.0, -6.0), epsilon = 1e-5);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let view = Mat4::look_at(eye, Vec3::new(1.0, 2.0, 0.0), WORLD_UP);
        let p = view.transform_point(&Point3::from(eye));

        assert_relative_eq!(p.coords, Vec3::zeros(), epsilon = EPSILON);

        // Target lies straight ahead, down the -Z axis of view space
        let t = view.transform_point(&Point3::new(1.0, 2.0, 0.0));
        assert_relative_eq!(t.coords, Vec3::new(0.0, 0.0, -3.0), epsilon = 1e-5);
    }

    #[test]
    fn test_perspective_maps_near_plane_to_minus_one() {
        let proj = Mat4::perspective(utils::deg_to_rad(60.0), 1.5, 0.1, 1000.0);
        let clip = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);

        assert_relative_eq!(clip.z / clip.w, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_degree_conversion() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI, epsilon = EPSILON);
    }
}

//! # Perspective Projection
//!
//! Projection parameters handed to the external renderer together with the
//! camera's view matrix.
//!
//! ## Coordinate System
//! Standard right-handed Y-up view space looking down -Z, mapped to OpenGL
//! clip space (`gluPerspective` conventions).

use crate::foundation::math::{utils, Mat4, Mat4Ext};

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Projection {
    /// Create a projection for a viewport of `width` x `height` pixels
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view in degrees (stored as radians)
    /// * `width`, `height` - Viewport size; a zero height falls back to 1
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    #[allow(clippy::cast_precision_loss)]
    pub fn new(fov_degrees: f32, width: u32, height: u32, near: f32, far: f32) -> Self {
        Self {
            fov: utils::deg_to_rad(fov_degrees),
            aspect: width as f32 / height.max(1) as f32,
            near,
            far,
        }
    }

    /// Update the aspect ratio after the viewport changed size
    ///
    /// A minimized window reports a zero-sized viewport; the previous aspect
    /// ratio is kept in that case.
    #[allow(clippy::cast_precision_loss)]
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to empty viewport {}x{}", width, height);
            return;
        }

        let aspect = width as f32 / height as f32;
        // Only log significant changes to keep resize drags quiet
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Perspective projection matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }
}

impl Default for Projection {
    /// 60 degree field of view on a 1280x720 viewport, clipping 0.1 to 1000
    fn default() -> Self {
        Self::new(60.0, 1280, 720, 0.1, 1000.0)
    }
}

//! Provides the perspective camera a capture is framed through.
//!
//! The camera is a plain parameter block; the surface derives the combined
//! view-projection transform from it at render time. No orbit or interactive
//! controls live here.

use glam::{Mat4, Vec3};

/// A perspective camera looking from `eye` towards `target`.
///
/// The default framing matches the hidden capture viewport this crate was
/// built for: eye at (0, 2, 5), looking at the origin, 50 degree vertical
/// field of view.
///
/// # Examples
/// ```
/// use modelshot::Camera;
///
/// let camera = Camera::default();
/// assert_eq!(camera.fov_y_degrees, 50.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 5.0),
            target: Vec3::ZERO,
            fov_y_degrees: 50.0,
        }
    }
}

impl Camera {
    /// Computes the combined view-projection matrix for the given aspect ratio.
    ///
    /// Near and far planes are derived from the eye-target distance so the
    /// framed subject stays inside the depth range.
    ///
    /// # Examples
    /// ```
    /// use modelshot::Camera;
    ///
    /// let vp = Camera::default().view_projection(1.0);
    /// let clip = vp * Camera::default().target.extend(1.0);
    /// assert!(clip.w > 0.0);
    /// ```
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);

        let dist = (self.target - self.eye).length().max(1e-3);
        let near = dist * 0.01;
        let far = dist * 100.0;
        let proj = Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), aspect, near, far);

        proj * view
    }
}

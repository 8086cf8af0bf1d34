//! Fixed chase camera above and behind the player

use glam::{Mat4, Vec3};

use super::matrix::{look_at, perspective};

pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 10.0, 20.0);
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 5.0, 0.0);
pub const LIGHT_POSITION: Vec3 = Vec3::new(0.0, 10.0, 20.0);
pub const FOV_Y_DEGREES: f32 = 40.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 200.0;

/// Owns the projection and view matrices
#[derive(Debug, Clone)]
pub struct Camera {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    aspect: f32,
    projection: Mat4,
    view: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            fov_y: FOV_Y_DEGREES.to_radians(),
            near: Z_NEAR,
            far: Z_FAR,
            aspect,
            projection: Mat4::IDENTITY,
            view: look_at(CAMERA_EYE, CAMERA_TARGET, Vec3::Y),
        };
        camera.update_projection(aspect);
        camera
    }

    /// Recompute the projection for a new viewport shape
    pub fn update_projection(&mut self, aspect: f32) {
        if !aspect.is_finite() || aspect <= 0.0 {
            log::warn!("Ignoring invalid aspect ratio {}", aspect);
            return;
        }
        self.aspect = aspect;
        self.projection = perspective(self.fov_y, aspect, self.near, self.far);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_origin_is_on_screen() {
        let camera = Camera::new(16.0 / 9.0);
        let clip = camera.projection() * camera.view() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1.0 && ndc.y.abs() < 1.0);
        assert!((0.0..1.0).contains(&ndc.z));
        // Below the look-at target, so in the lower half of the screen
        assert!(ndc.y < 0.0);
    }

    #[test]
    fn test_update_projection_tracks_aspect() {
        let mut camera = Camera::new(1.0);
        let square = camera.projection();
        camera.update_projection(2.0);
        assert_eq!(camera.aspect(), 2.0);
        assert_ne!(camera.projection(), square);

        camera.update_projection(0.0);
        assert_eq!(camera.aspect(), 2.0);
    }
}

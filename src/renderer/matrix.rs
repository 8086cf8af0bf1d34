//! Projection, view, model-view and normal matrices
//!
//! Right-handed, y up, depth in [0, 1] as wgpu expects.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Object placement: translation, non-uniform scale, roll about x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
    /// Radians about the x axis (the rolling axis for forward motion)
    pub rotation: f32,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            scale: Vec3::ONE,
            rotation: 0.0,
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Model matrix: T * R * S
    pub fn model(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_x(self.rotation),
            self.position,
        )
    }
}

pub fn perspective(fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_y_radians, aspect.max(f32::EPSILON), near, far)
}

pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up)
}

pub fn model_view(view: &Mat4, transform: &Transform) -> Mat4 {
    *view * transform.model()
}

/// Inverse-transpose of the upper 3x3, padded back to 4x4 for the uniform.
///
/// Falls back to the plain upper 3x3 if it is singular (zero scale).
pub fn normal_matrix(model_view: &Mat4) -> Mat4 {
    let upper = Mat3::from_mat4(*model_view);
    let det = upper.determinant();
    let normal = if det.abs() > f32::EPSILON {
        upper.inverse().transpose()
    } else {
        upper
    };
    Mat4::from_mat3(normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_model_applies_scale_then_rotation_then_translation() {
        let t = Transform::at(Vec3::new(1.0, 2.0, 3.0))
            .with_scale(Vec3::new(2.0, 1.0, 1.0))
            .with_rotation(FRAC_PI_2);
        // +y rotated a quarter turn about x lands on +z
        let p = t.model().transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!(approx(p, Vec3::new(1.0, 2.0, 4.0)), "{p}");
        let q = t.model().transform_point3(Vec3::X);
        assert!(approx(q, Vec3::new(3.0, 2.0, 3.0)), "{q}");
    }

    #[test]
    fn test_normal_matrix_keeps_normals_perpendicular() {
        let view = look_at(Vec3::new(0.0, 10.0, 20.0), Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        let t = Transform::at(Vec3::ZERO).with_scale(Vec3::new(150.0, 0.4, 180.0));
        let mv = model_view(&view, &t);
        let nm = normal_matrix(&mv);

        // A slanted surface: tangent and normal at 45 degrees in object space
        let tangent = mv.transform_vector3(Vec3::new(1.0, -1.0, 0.0));
        let normal = nm.transform_vector3(Vec3::new(1.0, 1.0, 0.0));
        assert!(tangent.normalize().dot(normal.normalize()).abs() < 1e-4);

        // Plain model-view would skew the normal
        let skewed = mv.transform_vector3(Vec3::new(1.0, 1.0, 0.0));
        assert!(tangent.normalize().dot(skewed.normalize()).abs() > 1e-3);
    }

    #[test]
    fn test_normal_matrix_of_singular_scale_is_finite() {
        let t = Transform::at(Vec3::ZERO).with_scale(Vec3::new(0.0, 1.0, 1.0));
        let nm = normal_matrix(&t.model());
        assert!(nm.is_finite());
    }

    #[test]
    fn test_perspective_maps_near_and_far_to_wgpu_depth() {
        let proj = perspective(40f32.to_radians(), 16.0 / 9.0, 0.1, 200.0);
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -0.1));
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -200.0));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }
}

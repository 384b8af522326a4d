//! Camera driving frustum extraction and the tracer origin

use crate::core::types::{Vec3, Mat4, Quat};
use crate::math::frustum::{Frustum, SectionFrustum};
use crate::world::position::{BlockPosition, SectionPosition};

/// Camera with position, rotation, and projection parameters.
///
/// Fields are private so every mutation goes through a setter that bumps
/// `revision`.
pub struct Camera {
    position: Vec3,
    rotation: Quat,
    /// Vertical field of view in radians
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    revision: u64,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.05,
            far: 1024.0,
            revision: 0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Monotonic counter, bumped by every setter
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Section the camera eye is in
    pub fn section_position(&self) -> SectionPosition {
        BlockPosition::from_vec3(self.position).section_position()
    }

    pub fn set_position(&mut self, position: Vec3) {
        if self.position == position {
            return;
        }
        self.position = position;
        self.revision += 1;
    }

    /// Set rotation from euler angles (yaw, pitch in radians)
    pub fn set_rotation_euler(&mut self, yaw: f32, pitch: f32) {
        self.rotation = Quat::from_euler(glam::EulerRot::YXZ, yaw, pitch, 0.0);
        self.revision += 1;
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
        self.revision += 1;
    }

    pub fn set_clip(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.revision += 1;
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position);
        rotation_matrix * translation_matrix
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Snapshot of the current frustum, tagged with the camera revision
    pub fn frustum(&self) -> CameraFrustum {
        CameraFrustum {
            frustum: Frustum::from_view_projection(&self.view_projection()),
            revision: self.revision,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(8.0, 8.0, 8.0), 70.0, 16.0 / 9.0)
    }
}

/// Frustum planes extracted from a [`Camera`] at a given revision
#[derive(Clone, Copy, Debug)]
pub struct CameraFrustum {
    pub frustum: Frustum,
    pub revision: u64,
}

impl SectionFrustum for CameraFrustum {
    fn contains_section(&self, position: SectionPosition) -> bool {
        self.frustum.intersects_section(position)
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions() {
        let camera = Camera::default();

        // Default camera looks down -Z
        let forward = camera.forward();
        assert!((forward.z - (-1.0)).abs() < 0.001);
    }

    #[test]
    fn test_view_matrix_translation() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(10.0, 0.0, 0.0));

        let view = camera.view_matrix();
        // View matrix should translate world origin to (-10, 0, 0) in camera space
        let origin_in_camera = view.transform_point3(Vec3::ZERO);
        assert!((origin_in_camera.x - (-10.0)).abs() < 0.001);
    }

    #[test]
    fn test_revision_bumps_on_change() {
        let mut camera = Camera::default();
        assert_eq!(camera.revision(), 0);

        camera.set_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.revision(), 1);

        // Same position is not a change
        camera.set_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.revision(), 1);

        camera.set_rotation_euler(0.5, 0.1);
        camera.set_aspect(800.0, 600.0);
        assert_eq!(camera.revision(), 3);
        assert_eq!(camera.frustum().revision, 3);
    }

    #[test]
    fn test_section_position() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(-0.5, 33.0, 17.0));
        assert_eq!(camera.section_position(), SectionPosition::new(-1, 2, 1));
    }

    #[test]
    fn test_frustum_culls_behind() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(8.0, 8.0, 8.0));
        let frustum = camera.frustum();

        // Camera looks towards -Z
        assert!(frustum.contains_section(SectionPosition::new(0, 0, -2)));
        assert!(!frustum.contains_section(SectionPosition::new(0, 0, 5)));
    }
}

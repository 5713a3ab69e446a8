use glam::{Mat4, Vec3};

/// Perspective camera placed on the +z axis, looking toward -z with +y up.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32, distance: f32) -> Self {
        Self {
            fov_deg,
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, distance),
        }
    }

    /// Sets `aspect = width / height`.
    ///
    /// Zero-area sizes keep the previous aspect; the ratio would be inf or NaN.
    pub fn set_aspect_from_size(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = width as f32 / height as f32;
        true
    }

    /// View matrix (world → camera).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    /// Projection matrix with wgpu depth range `[0, 1]`.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn aspect_follows_size() {
        let mut cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0, 5.0);
        assert!(cam.set_aspect_from_size(400, 300));
        assert_eq!(cam.aspect, 400.0 / 300.0);
    }

    #[test]
    fn zero_size_keeps_aspect() {
        let mut cam = PerspectiveCamera::new(75.0, 1.5, 0.1, 1000.0, 5.0);
        assert!(!cam.set_aspect_from_size(0, 300));
        assert!(!cam.set_aspect_from_size(400, 0));
        assert_eq!(cam.aspect, 1.5);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = PerspectiveCamera::new(75.0, 4.0 / 3.0, 0.1, 2000.0, 500.0);
        let clip = cam.view_projection_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn points_behind_camera_have_negative_w() {
        let cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 2000.0, 500.0);
        let clip = cam.view_projection_matrix() * Vec4::new(0.0, 0.0, 900.0, 1.0);
        assert!(clip.w < 0.0);
    }
}

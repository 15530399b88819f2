use cgmath::{perspective, Deg, Matrix4, Point3, Rad, SquareMatrix, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}

/// Fixed overview camera for the campus scene.
///
/// Looks down on the quad from a raised vantage point. Only the aspect
/// ratio changes at runtime, in response to window resizes.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            eye: Point3::new(0.0, 12.0, 30.0),
            target: Point3::new(0.0, 5.0, 0.0),
            up: Vector3::unit_y(),
            aspect,
            fovy: Rad::from(Deg(75.0)),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.update_view_proj();
        camera
    }

    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    /// Updates the aspect ratio from a surface size and rebuilds the uniform
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_view_proj();
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_aspect_is_idempotent() {
        let mut a = Camera::new(1.0);
        let mut b = Camera::new(1.0);
        a.set_aspect(1920, 1080);
        b.set_aspect(1920, 1080);
        b.set_aspect(1920, 1080);
        assert_eq!(a.uniform.view_proj, b.uniform.view_proj);
    }

    #[test]
    fn zero_height_resize_keeps_previous_aspect() {
        let mut camera = Camera::new(1.5);
        camera.set_aspect(800, 0);
        assert_eq!(camera.aspect, 1.5);
    }

    #[test]
    fn uniform_tracks_eye_position() {
        let camera = Camera::new(1.0);
        assert_eq!(camera.uniform.view_position, [0.0, 12.0, 30.0, 1.0]);
    }
}

pub mod camera;

pub use camera::{Camera, CameraUniform, OPENGL_TO_WGPU_MATRIX};

//! Graphics layer: scene container, procedural geometry, camera, and the
//! wgpu rendering backend.

pub mod camera;
pub mod geometry;
pub mod object;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use camera::Camera;
pub use object::{Object, Pass};
pub use rendering::RenderEngine;
pub use scene::{ObjectId, Scene};

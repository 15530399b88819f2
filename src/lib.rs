//! Quadrangle
//!
//! A time-of-day-driven 3D campus scene built on wgpu and winit. The
//! whole campus (school, trees, actors, sky) is generated procedurally;
//! a static table of 24 per-hour recipes decides what the scene looks
//! like at any hour of the day.

pub mod animation;
pub mod app;
pub mod builders;
pub mod composer;
pub mod error;
pub mod gfx;
pub mod lighting;
pub mod recipe;
pub mod sky;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::CampusApp;
pub use composer::{ComposerConfig, SceneComposer};
pub use lighting::SunControl;

/// Creates an application following the wall clock with default settings
pub fn default() -> CampusApp {
    CampusApp::new(ComposerConfig::default())
}

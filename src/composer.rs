//! Scene composer
//!
//! Ties the whole campus together: builds the static scenery and actor
//! pools once, then drives the sky, lighting and animation subsystems
//! from the hour-indexed recipe table. The composer owns no GPU state;
//! rendering goes through a borrowed [`RenderEngine`] so every subsystem
//! stays testable without a device.

use chrono::Timelike;
use log::{info, warn};

use crate::animation::AnimationSystem;
use crate::builders;
use crate::error::{FrameError, ResizeError};
use crate::gfx::{Camera, RenderEngine, Scene};
use crate::lighting::{LightingSystem, SunControl};
use crate::recipe;
use crate::sky::SkySystem;

/// Startup options for the composer.
#[derive(Debug, Clone, Copy)]
pub struct ComposerConfig {
    /// Which path drives the sun each tick.
    pub sun_control: SunControl,
    /// Enables the reserved sky-motion hook.
    pub sky_motion: bool,
    /// Pin the scene to one hour instead of following the wall clock.
    pub fixed_hour: Option<i32>,
    /// Seed for every placement that uses randomness.
    pub seed: u64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            sun_control: SunControl::Recipe,
            sky_motion: false,
            fixed_hour: None,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    Ready,
    Disposed,
}

pub struct SceneComposer {
    scene: Scene,
    camera: Camera,
    sky: SkySystem,
    lighting: LightingSystem,
    animation: AnimationSystem,
    config: ComposerConfig,
    hour: i32,
    title: &'static str,
    state: ComposerState,
    frozen: bool,
}

impl SceneComposer {
    /// Builds the full campus and applies the starting hour's recipe.
    pub fn new(config: ComposerConfig, width: u32, height: u32) -> Self {
        let mut scene = Scene::new();

        let grounds = builders::build_grounds(&mut scene);
        builders::build_school(&mut scene);
        builders::build_signature_tree(&mut scene, config.seed);
        builders::build_forest(&mut scene, config.seed.wrapping_add(1));

        let animation = AnimationSystem::new(&mut scene, grounds.flag, config.seed.wrapping_add(2));

        let mut camera = Camera::new(width as f32 / height.max(1) as f32);
        camera.update_view_proj();

        let mut composer = Self {
            scene,
            camera,
            sky: SkySystem::new(config.seed.wrapping_add(3), config.sky_motion),
            lighting: LightingSystem::new(config.sun_control),
            animation,
            config,
            hour: -1,
            title: "",
            state: ComposerState::Ready,
            frozen: false,
        };
        composer.set_hour(config.fixed_hour.unwrap_or_else(wall_clock_hour));
        composer
    }

    /// Applies the recipe for an hour to all three subsystems.
    pub fn set_hour(&mut self, hour: i32) {
        if self.state == ComposerState::Disposed {
            return;
        }
        let recipe = recipe::lookup(hour);
        self.hour = i32::from(recipe.hour);
        self.title = recipe.title;
        info!("applying hour {} recipe: {}", recipe.hour, recipe.title);

        self.sky.apply(recipe, &mut self.scene);
        self.lighting.apply(recipe, &mut self.scene);
        self.animation.apply(recipe.animations, &mut self.scene);
    }

    /// Per-frame tick. Frozen or disposed composers do nothing.
    pub fn update(&mut self, seconds: f64) {
        if self.state == ComposerState::Disposed || self.frozen {
            return;
        }

        if self.config.fixed_hour.is_none() {
            let hour = wall_clock_hour();
            if hour != self.hour {
                self.set_hour(hour);
            }
        }

        self.animation.advance(seconds, &mut self.scene);
        self.lighting.advance(seconds);
        self.sky.advance(seconds);
        self.camera.update_view_proj();
    }

    /// Draws the current frame.
    ///
    /// A lost or outdated surface reconfigures and skips the frame; any
    /// other failure freezes the composer so a broken swapchain cannot
    /// spam the log every frame.
    pub fn render(&mut self, engine: &mut RenderEngine) -> Result<(), FrameError> {
        if self.state == ComposerState::Disposed {
            return Err(FrameError::Disposed);
        }
        if self.frozen {
            return Ok(());
        }

        match engine.render_frame(
            &mut self.scene,
            &self.camera.uniform,
            self.lighting.rig(),
            self.sky.sky_uniform(),
        ) {
            Ok(()) => Ok(()),
            Err(FrameError::SurfaceAcquire(
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
            )) => {
                warn!("surface lost, reconfiguring");
                engine.reconfigure();
                Ok(())
            }
            Err(err) => {
                warn!("freezing after render failure: {}", err);
                self.frozen = true;
                Err(err)
            }
        }
    }

    /// Propagates a window resize to the camera and the render target.
    pub fn handle_resize(
        &mut self,
        engine: &mut RenderEngine,
        width: u32,
        height: u32,
    ) -> Result<(), ResizeError> {
        if self.state == ComposerState::Disposed {
            return Err(ResizeError::Disposed);
        }
        engine.resize(width, height)?;
        self.camera.set_aspect(width, height);
        self.camera.update_view_proj();
        Ok(())
    }

    /// Tears the scene down. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.state == ComposerState::Disposed {
            return;
        }
        self.scene.clear();
        self.state = ComposerState::Disposed;
        info!("composer disposed");
    }

    pub fn state(&self) -> ComposerState {
        self.state
    }

    pub fn hour(&self) -> i32 {
        self.hour
    }

    /// Title of the active recipe, e.g. "School Arrival".
    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}

fn wall_clock_hour() -> i32 {
    chrono::Local::now().hour() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(hour: i32) -> SceneComposer {
        SceneComposer::new(
            ComposerConfig {
                fixed_hour: Some(hour),
                ..ComposerConfig::default()
            },
            1280,
            720,
        )
    }

    #[test]
    fn school_arrival_scene() {
        let composer = fixed(8);
        assert_eq!(composer.hour(), 8);
        assert_eq!(composer.title(), "School Arrival");
        assert!(composer.scene().objects().any(|o| o.name == "bus_body" && o.visible));
        assert!(composer.scene().objects().any(|o| o.name == "cloud_layer"));
        assert!(!composer.scene().objects().any(|o| o.name == "star_field"));
    }

    #[test]
    fn deep_night_scene() {
        let composer = fixed(2);
        assert!(composer.scene().objects().any(|o| o.name == "star_field"));
        assert!(!composer.scene().objects().any(|o| o.name == "bus_body" && o.visible));
        assert!(composer
            .lighting
            .rig()
            .point_lights
            .iter()
            .any(|l| l.radius == 20.0));
    }

    #[test]
    fn midnight_scene() {
        let composer = fixed(0);
        assert_eq!(composer.title(), "Midnight Serenity");
        assert!(composer.scene().objects().any(|o| o.name == "star_field"));
        assert!(composer.scene().objects().any(|o| o.name == "moon"));
        assert!(composer.scene().objects().any(|o| o.name == "owl_body" && o.visible));
        assert_eq!(composer.lighting.rig().sun_intensity, 0.0);
        let security = composer
            .lighting
            .rig()
            .point_lights
            .iter()
            .filter(|l| l.radius == 20.0)
            .count();
        assert_eq!(security, 5);
    }

    #[test]
    fn out_of_range_hour_falls_back_to_midnight() {
        let composer = fixed(99);
        assert_eq!(composer.hour(), 0);
    }

    #[test]
    fn update_moves_visible_actors() {
        let mut composer = fixed(8);
        let before = composer
            .scene()
            .objects()
            .find(|o| o.name == "bus_body")
            .unwrap()
            .transform;
        composer.update(3.2);
        let after = composer
            .scene()
            .objects()
            .find(|o| o.name == "bus_body")
            .unwrap()
            .transform;
        assert_ne!(before, after);
    }

    #[test]
    fn dispose_is_idempotent_and_empties_the_scene() {
        let mut composer = fixed(8);
        composer.dispose();
        assert_eq!(composer.state(), ComposerState::Disposed);
        assert_eq!(composer.scene().object_count(), 0);
        composer.dispose();
        assert_eq!(composer.state(), ComposerState::Disposed);
    }

    #[test]
    fn disposed_composer_ignores_updates_and_hour_changes() {
        let mut composer = fixed(8);
        composer.dispose();
        composer.set_hour(2);
        assert_eq!(composer.hour(), 8);
        composer.update(1.0);
        assert_eq!(composer.scene().object_count(), 0);
    }
}

//! Sky subsystem
//!
//! Owns the gradient dome and the weather scenery: a star field, the moon
//! disc, and a cloud layer. A recipe's raw weather flags are first pushed
//! through the day/night override (daytime always gets clouds and never
//! stars or moon), then the scenery objects are created or destroyed
//! lazily to match. Applying the same recipe twice creates nothing new.

use std::f32::consts::{PI, TAU};

use cgmath::{Matrix4, Rad, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::builders::rgba;
use crate::gfx::geometry::{generate_cube, generate_sphere, GeometryData};
use crate::gfx::resources::global_bindings::SkyUBOContent;
use crate::gfx::resources::material::Material;
use crate::gfx::{Object, ObjectId, Pass, Scene};
use crate::recipe::{SceneRecipe, WeatherFlags};

const STAR_COUNT: usize = 150;
const CLOUD_COUNT: usize = 12;
const PUFFS_PER_CLOUD: usize = 8;

/// Applies the day/night override to a recipe's raw weather flags.
///
/// Hours 6 through 18 force clouds on and stars and moon off; outside
/// that range the raw flags pass through untouched.
pub fn effective_weather(hour: i32, raw: WeatherFlags) -> WeatherFlags {
    let daytime = (6..=18).contains(&hour);
    WeatherFlags {
        stars: raw.stars && !daytime,
        moon: raw.moon && !daytime,
        clouds: raw.clouds || daytime,
    }
}

pub struct SkySystem {
    dome: Option<ObjectId>,
    stars: Option<ObjectId>,
    moon: Option<ObjectId>,
    clouds: Option<ObjectId>,
    gradient: SkyUBOContent,
    motion_enabled: bool,
    seed: u64,
}

impl SkySystem {
    pub fn new(seed: u64, motion_enabled: bool) -> Self {
        Self {
            dome: None,
            stars: None,
            moon: None,
            clouds: None,
            gradient: SkyUBOContent::default(),
            motion_enabled,
            seed,
        }
    }

    /// Applies a recipe: gradient colors plus lazy weather scenery.
    pub fn apply(&mut self, recipe: &SceneRecipe, scene: &mut Scene) {
        self.gradient = SkyUBOContent {
            top_color: recipe.sky_top.as_array(),
            bottom_color: recipe.sky_bottom.as_array(),
            ..SkyUBOContent::default()
        };

        if self.dome.is_none() {
            self.register_materials(scene);
            let dome = generate_sphere(32, 32).transformed(&Matrix4::from_scale(200.0));
            self.dome =
                Some(scene.add_object(Object::from_geometry("sky_dome", &dome).with_pass(Pass::Sky)));
        }

        let weather = effective_weather(i32::from(recipe.hour), recipe.weather);

        match (weather.stars, self.stars) {
            (true, None) => {
                let field = self.star_field();
                self.stars = Some(scene.add_object(
                    Object::from_geometry("star_field", &field)
                        .with_material("star")
                        .with_pass(Pass::Stars),
                ));
            }
            (false, Some(id)) => {
                scene.remove_object(id);
                self.stars = None;
            }
            _ => {}
        }

        match (weather.moon, self.moon) {
            (true, None) => {
                let disc = generate_sphere(16, 16).transformed(
                    &(Matrix4::from_translation(Vector3::new(50.0, 40.0, -30.0))
                        * Matrix4::from_scale(3.0)),
                );
                self.moon = Some(scene.add_object(
                    Object::from_geometry("moon", &disc)
                        .with_material("moon")
                        .with_pass(Pass::Stars),
                ));
            }
            (false, Some(id)) => {
                scene.remove_object(id);
                self.moon = None;
            }
            _ => {}
        }

        match (weather.clouds, self.clouds) {
            (true, None) => {
                let layer = self.cloud_layer();
                self.clouds = Some(scene.add_object(
                    Object::from_geometry("cloud_layer", &layer)
                        .with_material("cloud")
                        .with_pass(Pass::Stars),
                ));
            }
            (false, Some(id)) => {
                scene.remove_object(id);
                self.clouds = None;
            }
            _ => {}
        }
    }

    /// Reserved hook for twinkle and cloud drift.
    pub fn advance(&mut self, _seconds: f64) {
        if !self.motion_enabled {
            return;
        }
        // No continuous sky motion in the current design.
    }

    /// Gradient parameters for the sky shader.
    pub fn sky_uniform(&self) -> SkyUBOContent {
        self.gradient
    }

    fn register_materials(&self, scene: &mut Scene) {
        scene.material_manager.add_material(
            Material::new("star", rgba(0xFFFFFF, 1.0)).with_emission(1.0, 1.0, 1.0, 1.0),
        );
        let glow = 68.0 / 255.0;
        scene.material_manager.add_material(
            Material::new("moon", rgba(0xFFFACD, 1.0)).with_emission(glow, glow, glow, 1.0),
        );
        scene
            .material_manager
            .add_material(Material::new("cloud", rgba(0xFFFFFF, 1.0)).with_alpha(0.9));
    }

    /// Small cubes scattered on a shell well outside the campus.
    fn star_field(&self) -> GeometryData {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut field = GeometryData::new();
        for _ in 0..STAR_COUNT {
            let radius = 150.0 + rng.random::<f32>() * 50.0;
            let theta = rng.random::<f32>() * TAU;
            let phi = rng.random::<f32>() * PI;
            let position = Vector3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            );
            field.merge(&generate_cube().transformed(
                &(Matrix4::from_translation(position) * Matrix4::from_scale(0.6)),
            ));
        }
        field
    }

    /// Twelve puff clusters baked into one mesh.
    fn cloud_layer(&self) -> GeometryData {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(1));
        let mut layer = GeometryData::new();
        let puff = generate_sphere(12, 12);

        for _ in 0..CLOUD_COUNT {
            let cloud_position = Vector3::new(
                (rng.random::<f32>() - 0.5) * 300.0,
                15.0 + rng.random::<f32>() * 25.0,
                (rng.random::<f32>() - 0.5) * 300.0,
            );
            let cloud_scale = 0.8 + rng.random::<f32>() * 0.7;
            let cloud_transform = Matrix4::from_translation(cloud_position)
                * Matrix4::from_angle_y(Rad(rng.random::<f32>() * TAU))
                * Matrix4::from_scale(cloud_scale);

            for i in 0..PUFFS_PER_CLOUD {
                let angle = i as f32 / PUFFS_PER_CLOUD as f32 * TAU;
                let ring = 2.0 + rng.random::<f32>() * 3.0;
                let offset = Vector3::new(
                    angle.cos() * ring + (rng.random::<f32>() - 0.5) * 2.0,
                    (rng.random::<f32>() - 0.5) * 1.5,
                    angle.sin() * ring + (rng.random::<f32>() - 0.5) * 2.0,
                );
                let radius = 1.5 + rng.random::<f32>() * 2.5;
                let puff_scale = radius * (0.8 + rng.random::<f32>() * 0.4);
                layer.merge(&puff.clone().transformed(
                    &(cloud_transform
                        * Matrix4::from_translation(offset)
                        * Matrix4::from_scale(puff_scale)),
                ));
            }
        }
        layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe;

    #[test]
    fn daytime_forces_clouds_and_hides_stars() {
        let raw = WeatherFlags { stars: true, moon: true, clouds: false };
        let noon = effective_weather(12, raw);
        assert!(noon.clouds);
        assert!(!noon.stars);
        assert!(!noon.moon);

        let midnight = effective_weather(0, raw);
        assert!(midnight.stars);
        assert!(midnight.moon);
        assert!(!midnight.clouds);
    }

    #[test]
    fn apply_is_idempotent_on_object_count() {
        let mut scene = Scene::new();
        let mut sky = SkySystem::new(3, false);
        let recipe = recipe::lookup(2);
        sky.apply(recipe, &mut scene);
        let count = scene.object_count();
        sky.apply(recipe, &mut scene);
        assert_eq!(scene.object_count(), count);
    }

    #[test]
    fn night_to_day_swaps_stars_for_clouds() {
        let mut scene = Scene::new();
        let mut sky = SkySystem::new(3, false);
        sky.apply(recipe::lookup(2), &mut scene);
        assert!(scene.objects().any(|o| o.name == "star_field"));

        sky.apply(recipe::lookup(12), &mut scene);
        assert!(!scene.objects().any(|o| o.name == "star_field"));
        assert!(scene.objects().any(|o| o.name == "cloud_layer"));
    }

    #[test]
    fn gradient_follows_the_recipe() {
        let mut scene = Scene::new();
        let mut sky = SkySystem::new(3, false);
        let recipe = recipe::lookup(12);
        sky.apply(recipe, &mut scene);
        let uniform = sky.sky_uniform();
        assert_eq!(uniform.top_color, recipe.sky_top.as_array());
        assert_eq!(uniform.bottom_color, recipe.sky_bottom.as_array());
        assert_eq!(uniform.offset, 33.0);
    }
}

//! Lighting subsystem
//!
//! Produces the [`LightRig`] the renderer uploads each frame: sun, moon,
//! ambient term, and the point lights for the security lamps and the lit
//! classroom windows. Sun placement comes either straight from the recipe
//! (the default) or from a continuous day-progress sweep; exactly one of
//! the two drives the sun in any given tick.

use cgmath::{InnerSpace, Vector3};

use crate::builders::grounds::{LAMP_FIXTURE_MATERIAL, SECURITY_LIGHT_POSITIONS};
use crate::gfx::resources::global_bindings::{LightRig, PointLightRaw};
use crate::gfx::Scene;
use crate::recipe::{Rgb, SceneRecipe};

/// Lit classroom windows on the entrance face, two rows of six.
pub const WINDOW_LIGHT_POSITIONS: [[f32; 3]; 12] = [
    [-7.5, 6.0, -0.9],
    [-5.0, 6.0, -0.9],
    [-2.5, 6.0, -0.9],
    [0.0, 6.0, -0.9],
    [2.5, 6.0, -0.9],
    [5.0, 6.0, -0.9],
    [-7.5, 8.5, -0.9],
    [-5.0, 8.5, -0.9],
    [-2.5, 8.5, -0.9],
    [0.0, 8.5, -0.9],
    [2.5, 8.5, -0.9],
    [5.0, 8.5, -0.9],
];

const SECURITY_COLOR: u32 = 0xFFFF99;
const WINDOW_COLOR: u32 = 0xFFFFCC;
const MOON_ANCHOR: [f32; 3] = [50.0, 40.0, -30.0];

/// Which path drives sun direction and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SunControl {
    /// Sun parameters assigned from the recipe on each hour change.
    #[default]
    Recipe,
    /// Smooth sweep across the sky from a day-progress angle.
    Continuous,
}

pub struct LightingSystem {
    mode: SunControl,
    rig: LightRig,
    hour: i32,
    security_on: bool,
    classroom_on: bool,
}

fn normalized_or_up(v: [f32; 3]) -> [f32; 3] {
    let v = Vector3::new(v[0], v[1], v[2]);
    if v.magnitude2() > 1e-8 {
        let n = v.normalize();
        [n.x, n.y, n.z]
    } else {
        [0.0, 1.0, 0.0]
    }
}

impl LightingSystem {
    pub fn new(mode: SunControl) -> Self {
        Self {
            mode,
            rig: LightRig::default(),
            hour: 0,
            security_on: false,
            classroom_on: false,
        }
    }

    pub fn mode(&self) -> SunControl {
        self.mode
    }

    /// The rig for the next frame's global uniform upload.
    pub fn rig(&self) -> &LightRig {
        &self.rig
    }

    /// Applies a recipe's light parameters and toggles the lamp fixtures.
    pub fn apply(&mut self, recipe: &SceneRecipe, scene: &mut Scene) {
        self.hour = i32::from(recipe.hour);
        self.security_on = recipe.animations.security_light || self.is_night();
        self.classroom_on = recipe.animations.classroom_lights;

        if self.mode == SunControl::Recipe {
            self.rig.sun_direction = normalized_or_up(recipe.sun_position);
            self.rig.sun_color = recipe.sun_color.as_array();
            self.rig.sun_intensity = recipe.sun_intensity;
        }
        self.rig.ambient_color = recipe.ambient_color.as_array();
        self.rig.ambient_intensity = recipe.ambient_intensity;

        // Moonlight follows the clock, not the recipe's moon flag
        self.rig.moon_direction = normalized_or_up(MOON_ANCHOR);
        self.rig.moon_intensity = if self.is_night() {
            0.2 + (1.0 - recipe.sun_intensity).max(0.0) * 0.3
        } else {
            0.0
        };

        self.rebuild_point_lights(0.0);

        if let Some(fixture) = scene
            .material_manager
            .get_material_mut(&LAMP_FIXTURE_MATERIAL.to_string())
        {
            let glow = 68.0 / 255.0;
            fixture.emissive = [glow, glow, 0.0];
            fixture.emissive_intensity = if self.security_on { 1.0 } else { 0.0 };
        }
    }

    /// Per-frame work: lamp flicker, and in continuous mode the sun sweep.
    pub fn advance(&mut self, seconds: f64) {
        if self.mode == SunControl::Continuous {
            self.sweep_sun(seconds);
        }
        self.rebuild_point_lights(seconds as f32);
    }

    fn is_night(&self) -> bool {
        self.hour >= 19 || self.hour <= 6
    }

    fn rebuild_point_lights(&mut self, seconds: f32) {
        self.rig.point_lights.clear();

        if self.security_on {
            let intensity = 0.5 + (seconds * 10.0).sin() * 0.1;
            for (x, z) in SECURITY_LIGHT_POSITIONS {
                self.rig.point_lights.push(PointLightRaw {
                    position: [x, 7.5, z],
                    intensity,
                    color: Rgb::from_hex(SECURITY_COLOR).as_array(),
                    radius: 20.0,
                });
            }
        }

        if self.classroom_on {
            for (i, position) in WINDOW_LIGHT_POSITIONS.iter().enumerate() {
                self.rig.point_lights.push(PointLightRaw {
                    position: *position,
                    intensity: 0.3 + (seconds * 5.0 + i as f32).sin() * 0.05,
                    color: Rgb::from_hex(WINDOW_COLOR).as_array(),
                    radius: 10.0,
                });
            }
        }
    }

    /// Continuous sun: an arc across the sky keyed on time of day, with
    /// the color blended warm-morning to white-noon to warm-evening.
    fn sweep_sun(&mut self, seconds: f64) {
        let day_progress = (seconds.rem_euclid(86_400.0) / 86_400.0) as f32;
        let angle = day_progress * std::f32::consts::TAU - std::f32::consts::FRAC_PI_2;
        let x = angle.cos() * 50.0;
        let y = (angle.sin() * 50.0).max(-10.0);
        self.rig.sun_direction = normalized_or_up([x, y, 0.0]);
        self.rig.sun_intensity = if y > 0.0 { 1.0 } else { 0.0 };

        let hour = day_progress * 24.0;
        let morning = Rgb::from_hex(0xFFB347).as_array();
        let noon = Rgb::from_hex(0xFFFFFF).as_array();
        let evening = Rgb::from_hex(0xFF6B35).as_array();
        let (from, to, t) = if hour < 12.0 {
            (morning, noon, ((hour - 6.0) / 6.0).clamp(0.0, 1.0))
        } else {
            (noon, evening, ((hour - 12.0) / 6.0).clamp(0.0, 1.0))
        };
        self.rig.sun_color = [
            from[0] + (to[0] - from[0]) * t,
            from[1] + (to[1] - from[1]) * t,
            from[2] + (to[2] - from[2]) * t,
        ];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::grounds::build_grounds;
    use crate::recipe;

    #[test]
    fn recipe_mode_takes_sun_from_the_table() {
        let mut scene = Scene::new();
        build_grounds(&mut scene);
        let mut lighting = LightingSystem::new(SunControl::Recipe);
        let noon = recipe::lookup(12);
        lighting.apply(noon, &mut scene);
        assert_eq!(lighting.rig().sun_intensity, noon.sun_intensity);
        assert!(lighting.rig().sun_direction[1] > 0.0);
    }

    #[test]
    fn moonlight_is_a_clock_rule() {
        let mut scene = Scene::new();
        build_grounds(&mut scene);
        let mut lighting = LightingSystem::new(SunControl::Recipe);

        lighting.apply(recipe::lookup(22), &mut scene);
        assert!(lighting.rig().moon_intensity > 0.2);

        lighting.apply(recipe::lookup(12), &mut scene);
        assert_eq!(lighting.rig().moon_intensity, 0.0);
    }

    #[test]
    fn classroom_lights_add_twelve_windows() {
        let mut scene = Scene::new();
        build_grounds(&mut scene);
        let mut lighting = LightingSystem::new(SunControl::Recipe);

        // Hour 8 has classroom lights on and is not a security-light hour
        lighting.apply(recipe::lookup(8), &mut scene);
        assert_eq!(lighting.rig().point_lights.len(), 12);
    }

    #[test]
    fn night_turns_security_lamps_on_and_lights_the_fixture() {
        let mut scene = Scene::new();
        build_grounds(&mut scene);
        let mut lighting = LightingSystem::new(SunControl::Recipe);
        lighting.apply(recipe::lookup(23), &mut scene);

        assert!(lighting
            .rig()
            .point_lights
            .iter()
            .any(|l| l.radius == 20.0));
        let fixture = scene
            .material_manager
            .get_material(&LAMP_FIXTURE_MATERIAL.to_string())
            .unwrap();
        assert!(fixture.emissive_intensity > 0.0);
    }

    #[test]
    fn continuous_mode_ignores_recipe_sun_but_keeps_ambient() {
        let mut scene = Scene::new();
        build_grounds(&mut scene);
        let mut lighting = LightingSystem::new(SunControl::Continuous);
        let noon = recipe::lookup(12);
        lighting.apply(noon, &mut scene);
        assert_eq!(lighting.rig().ambient_intensity, noon.ambient_intensity);

        // 09:00 of day progress puts the sun up in the east half
        lighting.advance(9.0 * 3600.0);
        assert!(lighting.rig().sun_direction[1] > 0.0);
        assert!(lighting.rig().sun_intensity > 0.0);
    }

    #[test]
    fn flicker_stays_near_base_intensity() {
        let mut scene = Scene::new();
        build_grounds(&mut scene);
        let mut lighting = LightingSystem::new(SunControl::Recipe);
        lighting.apply(recipe::lookup(8), &mut scene);
        lighting.advance(1.7);
        for light in &lighting.rig().point_lights {
            assert!(light.intensity >= 0.25 && light.intensity <= 0.35);
        }
    }
}

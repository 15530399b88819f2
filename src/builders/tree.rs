//! Signature tree and perimeter forest
//!
//! One large hand-tuned conifer stands beside the school; a ring of 23
//! smaller trees surrounds the campus. Randomness (needle scatter, forest
//! trunk heights) comes from a caller-supplied seed so a rebuilt scene is
//! identical frame to frame.

use std::f32::consts::TAU;

use cgmath::{Matrix4, Rad, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{boxed, rgba};
use crate::gfx::geometry::{generate_cone, generate_cylinder, generate_disc, GeometryData};
use crate::gfx::resources::material::Material;
use crate::gfx::{Object, Scene};

const TREE_X: f32 = -12.0;
const TREE_Z: f32 = 6.0;

/// Foliage layers of the signature tree: cone radius, height, center
/// height, color, opacity. Wider and darker at the bottom, narrow and
/// pale at the crown.
const FOLIAGE_LAYERS: [(f32, f32, f32, u32, f32); 6] = [
    (5.5, 2.0, 4.0, 0x0F4F0F, 1.0),
    (4.8, 2.0, 5.5, 0x228B22, 0.95),
    (4.0, 2.0, 7.0, 0x32CD32, 0.9),
    (3.2, 2.0, 8.5, 0x3CB371, 0.85),
    (2.4, 2.0, 10.0, 0x90EE90, 0.8),
    (1.6, 1.5, 11.2, 0x98FB98, 0.75),
];

/// Forest tree positions and scales, as `(x, z, scale)`.
const FOREST_POSITIONS: [(f32, f32, f32); 23] = [
    (-25.0, -15.0, 0.8),
    (-20.0, -20.0, 1.2),
    (-15.0, -18.0, 0.9),
    (-30.0, -10.0, 1.1),
    (-35.0, -5.0, 0.7),
    (25.0, -10.0, 1.0),
    (30.0, -5.0, 0.8),
    (35.0, 0.0, 1.3),
    (28.0, 5.0, 0.9),
    (32.0, 10.0, 1.1),
    (-40.0, 5.0, 0.6),
    (-35.0, 10.0, 1.0),
    (-30.0, 15.0, 0.8),
    (-25.0, 12.0, 1.2),
    (-45.0, -25.0, 0.5),
    (-40.0, -30.0, 0.7),
    (40.0, -15.0, 0.6),
    (45.0, -20.0, 0.8),
    (50.0, -10.0, 0.5),
    (-18.0, 20.0, 0.9),
    (20.0, 25.0, 0.7),
    (-25.0, 25.0, 1.0),
    (35.0, 20.0, 0.8),
];

fn at(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

/// Builds the large conifer beside the school.
pub fn build_signature_tree(scene: &mut Scene, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);

    scene.add_material("bark", rgba(0x654321, 1.0));
    scene.add_material("grass", rgba(0x228B22, 1.0));
    scene
        .material_manager
        .add_material(Material::new("needle", rgba(0x8B4513, 1.0)).with_alpha(0.7));
    for (i, (_, _, _, hex, alpha)) in FOLIAGE_LAYERS.iter().enumerate() {
        scene
            .material_manager
            .add_material(Material::new(&format!("foliage_{}", i), rgba(*hex, 1.0)).with_alpha(*alpha));
    }

    // Trunk with eight bark ridges welded on
    let mut trunk = generate_cylinder(0.7, 8.0, 16).transformed(&at(TREE_X, 4.0, TREE_Z));
    for i in 0..8 {
        let angle = i as f32 / 8.0 * TAU;
        let ridge = boxed(0.05, 8.0, 0.1, 0.0, 0.0, 0.72).transformed(
            &(at(TREE_X, 4.0, TREE_Z) * Matrix4::from_angle_y(Rad(angle))),
        );
        trunk.merge(&ridge);
    }
    scene.add_object(Object::from_geometry("tree_trunk", &trunk).with_material("bark"));

    for (i, (radius, height, y, _, _)) in FOLIAGE_LAYERS.iter().enumerate() {
        let mut layer = generate_cone(*radius, *height, 16).transformed(&at(TREE_X, *y, TREE_Z));
        if i == FOLIAGE_LAYERS.len() - 1 {
            // Crown spike rides with the top layer
            layer.merge(&generate_cone(0.3, 1.0, 8).transformed(&at(TREE_X, 12.5, TREE_Z)));
        }
        scene.add_object(
            Object::from_geometry(&format!("tree_layer_{}", i), &layer)
                .with_material(&format!("foliage_{}", i)),
        );
    }

    scene.add_object(
        Object::from_geometry(
            "tree_grass",
            &generate_disc(3.5, 24).transformed(&at(TREE_X, 0.01, TREE_Z)),
        )
        .with_material("grass"),
    );

    // Scatter of fallen needles around the base
    let mut needles = GeometryData::new();
    for _ in 0..20 {
        let angle = rng.random::<f32>() * TAU;
        let radius = 1.0 + rng.random::<f32>() * 2.0;
        let needle = boxed(0.4, 0.02, 0.06, 0.0, 0.0, 0.0).transformed(
            &(at(
                TREE_X + angle.cos() * radius,
                0.05,
                TREE_Z + angle.sin() * radius,
            ) * Matrix4::from_angle_y(Rad(rng.random::<f32>() * TAU))),
        );
        needles.merge(&needle);
    }
    scene.add_object(Object::from_geometry("fallen_needles", &needles).with_material("needle"));
}

/// Builds the perimeter forest, merged into one mesh per material.
pub fn build_forest(scene: &mut Scene, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);

    scene.add_material("conifer_dark", rgba(0x0F4F0F, 1.0));
    scene.add_material("conifer_mid", rgba(0x228B22, 1.0));
    scene.add_material("conifer_bright", rgba(0x32CD32, 1.0));
    scene.add_material("conifer_pale", rgba(0x90EE90, 1.0));

    let mut trunks = GeometryData::new();
    let mut dark = GeometryData::new();
    let mut mid = GeometryData::new();
    let mut bright = GeometryData::new();
    let mut pale = GeometryData::new();
    let mut grass = GeometryData::new();

    for (x, z, s) in FOREST_POSITIONS {
        let trunk_height = 6.0 + rng.random::<f32>() * 4.0;

        trunks.merge(
            &generate_cylinder(0.5 * s, trunk_height, 10).transformed(&at(x, trunk_height * 0.5, z)),
        );
        dark.merge(
            &generate_cone(3.5 * s, 1.5 * s, 12).transformed(&at(x, 0.7 * trunk_height, z)),
        );
        mid.merge(
            &generate_cone(2.8 * s, 1.5 * s, 12).transformed(&at(x, 0.85 * trunk_height, z)),
        );
        bright.merge(&generate_cone(2.0 * s, 1.2 * s, 12).transformed(&at(x, trunk_height, z)));
        pale.merge(&generate_cone(1.2 * s, 1.0 * s, 12).transformed(&at(x, 1.1 * trunk_height, z)));
        pale.merge(
            &generate_cone(0.2 * s, 0.8 * s, 8).transformed(&at(x, 1.2 * trunk_height, z)),
        );
        grass.merge(&generate_disc(2.0 * s, 16).transformed(&at(x, 0.01, z)));
    }

    // The bark material is shared with the signature tree when both
    // builders run; register it here too so the forest stands alone.
    if scene
        .material_manager
        .get_material(&"bark".to_string())
        .is_none()
    {
        scene.add_material("bark", rgba(0x654321, 1.0));
    }
    if scene
        .material_manager
        .get_material(&"grass".to_string())
        .is_none()
    {
        scene.add_material("grass", rgba(0x228B22, 1.0));
    }

    scene.add_object(Object::from_geometry("forest_trunks", &trunks).with_material("bark"));
    scene.add_object(Object::from_geometry("forest_canopy_dark", &dark).with_material("conifer_dark"));
    scene.add_object(Object::from_geometry("forest_canopy_mid", &mid).with_material("conifer_mid"));
    scene.add_object(
        Object::from_geometry("forest_canopy_bright", &bright).with_material("conifer_bright"),
    );
    scene.add_object(Object::from_geometry("forest_canopy_pale", &pale).with_material("conifer_pale"));
    scene.add_object(Object::from_geometry("forest_grass", &grass).with_material("grass"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_tree_layers_get_paler_toward_the_crown() {
        let mut scene = Scene::new();
        build_signature_tree(&mut scene, 7);
        let bottom = scene
            .material_manager
            .get_material(&"foliage_0".to_string())
            .unwrap();
        let top = scene
            .material_manager
            .get_material(&"foliage_5".to_string())
            .unwrap();
        assert!(top.base_color[1] > bottom.base_color[1]);
        assert!(top.base_color[3] < bottom.base_color[3]);
    }

    #[test]
    fn same_seed_builds_identical_needle_scatter() {
        let mut a = Scene::new();
        let mut b = Scene::new();
        build_signature_tree(&mut a, 42);
        build_signature_tree(&mut b, 42);
        let needles_a = a.objects().find(|o| o.name == "fallen_needles").unwrap();
        let needles_b = b.objects().find(|o| o.name == "fallen_needles").unwrap();
        assert_eq!(
            needles_a.meshes[0].vertices(),
            needles_b.meshes[0].vertices()
        );
    }

    #[test]
    fn forest_collapses_23_trees_into_6_objects() {
        let mut scene = Scene::new();
        build_forest(&mut scene, 1);
        assert_eq!(scene.object_count(), 6);
        let trunks = scene.objects().find(|o| o.name == "forest_trunks").unwrap();
        let one_trunk = generate_cylinder(0.5, 7.0, 10);
        assert_eq!(
            trunks.meshes[0].vertex_count() as usize,
            one_trunk.vertex_count() * 23
        );
    }
}

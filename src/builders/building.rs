//! School building construction
//!
//! Assembles the modern cube-composition school: three stacked cube
//! volumes on a paved platform, a glass curtain wall with a mullion
//! grid, the entrance canopy and portal, and the surrounding street
//! furniture. All dimensions are in meters with the platform centered
//! on the origin.

use std::f32::consts::FRAC_PI_4;

use cgmath::{Matrix4, Rad, Vector3};

use super::{boxed, rgba};
use crate::gfx::geometry::{generate_cone, generate_cylinder, GeometryData};
use crate::gfx::resources::material::Material;
use crate::gfx::{Object, Scene};
use crate::recipe::Rgb;

/// Material id of the entrance LED strip, emissive around the clock.
pub const LED_STRIP_MATERIAL: &str = "led_strip";

fn cylinder_at(radius: f32, height: f32, x: f32, y: f32, z: f32) -> GeometryData {
    generate_cylinder(radius, height, 16)
        .transformed(&Matrix4::from_translation(Vector3::new(x, y, z)))
}

fn emission(hex: u32) -> [f32; 3] {
    Rgb::from_hex(hex).as_array()
}

/// Builds the school and registers its materials on the scene.
pub fn build_school(scene: &mut Scene) {
    scene.add_material("platform", rgba(0x505050, 1.0));
    scene.add_material("ghost_white", rgba(0xF8F8FF, 0.95));
    scene.add_material("royal_blue", rgba(0x4169E1, 1.0));
    scene.add_material("sky_blue", rgba(0x87CEEB, 1.0));
    scene.add_material("glass", rgba(0x87CEEB, 0.4));
    scene.add_material("door_glass", rgba(0x87CEEB, 0.3));
    scene.add_material("steel", rgba(0x2F4F4F, 1.0));
    scene.add_material("canopy_blue", rgba(0x4169E1, 0.9));
    scene.add_material("roof_blue", rgba(0x4169E1, 0.8));
    scene.add_material("accent_coral", rgba(0xFF6347, 0.7));
    scene.add_material("sculpture_coral", rgba(0xFF6347, 1.0));

    let led = emission(0x004444);
    scene.material_manager.add_material(
        Material::new(LED_STRIP_MATERIAL, rgba(0x00FFFF, 1.0))
            .with_emission(led[0], led[1], led[2], 1.0),
    );
    let sign = emission(0x111111);
    scene.material_manager.add_material(
        Material::new("sign", rgba(0x2F4F4F, 1.0)).with_emission(sign[0], sign[1], sign[2], 1.0),
    );
    let kiosk = emission(0x001122);
    scene.material_manager.add_material(
        Material::new("kiosk", rgba(0x2F4F4F, 1.0)).with_emission(kiosk[0], kiosk[1], kiosk[2], 1.0),
    );

    // Cube volumes and platform
    add(scene, "school_platform", "platform", boxed(20.0, 0.5, 16.0, 0.0, 0.25, 0.0));
    add(scene, "school_main", "ghost_white", boxed(12.0, 8.0, 12.0, 0.0, 4.0, 0.0));
    add(scene, "school_annex", "royal_blue", boxed(8.0, 6.0, 8.0, -8.0, 3.0, -4.0));
    add(scene, "school_tower", "sky_blue", boxed(6.0, 4.0, 6.0, 6.0, 6.0, -2.0));

    // Glass curtain wall on the entrance face plus the two side facades
    let mut glass = boxed(11.8, 7.8, 0.05, 0.0, 4.0, 6.1);
    glass.merge(&boxed(7.8, 5.8, 0.05, -8.0, 3.0, 0.1));
    glass.merge(&boxed(5.8, 3.8, 0.05, 6.0, 6.0, 1.1));
    add(scene, "school_glass", "glass", glass);

    // Mullion grid, pillars, portal frame, planters and benches all share
    // the dark steel material, so they are welded into one mesh.
    let mut steel = GeometryData::new();
    for i in 0..4 {
        steel.merge(&boxed(0.05, 8.0, 0.05, -4.5 + i as f32 * 3.0, 4.0, 6.15));
    }
    for i in 0..3 {
        steel.merge(&boxed(12.0, 0.05, 0.05, 0.0, 2.0 + i as f32 * 2.0, 6.15));
    }
    steel.merge(&cylinder_at(0.2, 3.0, -3.0, 1.5, 8.0));
    steel.merge(&cylinder_at(0.2, 3.0, 3.0, 1.5, 8.0));
    steel.merge(&boxed(4.0, 6.0, 0.2, 0.0, 3.0, 6.2));
    steel.merge(&cylinder_at(1.5, 1.0, -12.0, 0.5, 2.0));
    steel.merge(&cylinder_at(1.5, 1.0, 12.0, 0.5, -2.0));
    steel.merge(&boxed(3.0, 0.3, 1.0, -8.0, 0.65, 10.0));
    steel.merge(&boxed(3.0, 0.3, 1.0, 8.0, 0.65, 10.0));
    add(scene, "school_steel", "steel", steel);

    // Entrance canopy and doors
    add(scene, "school_canopy", "canopy_blue", boxed(8.0, 0.3, 4.0, 0.0, 3.0, 8.0));
    let mut doors = boxed(1.8, 5.5, 0.05, -0.9, 3.0, 6.25);
    doors.merge(&boxed(1.8, 5.5, 0.05, 0.9, 3.0, 6.25));
    add(scene, "school_doors", "door_glass", doors);
    add(scene, "led_strip", LED_STRIP_MATERIAL, boxed(4.0, 0.05, 0.05, 0.0, 5.8, 6.3));

    // Roof slab and floating accent cubes
    add(scene, "school_roof", "roof_blue", boxed(12.2, 0.3, 12.2, 0.0, 8.15, 0.0));
    let mut accents = crate::gfx::geometry::generate_cube().transformed(
        &(Matrix4::from_translation(Vector3::new(-10.0, 6.0, 4.0))
            * Matrix4::from_angle_x(Rad(FRAC_PI_4))
            * Matrix4::from_angle_y(Rad(FRAC_PI_4))
            * Matrix4::from_scale(2.0)),
    );
    accents.merge(&crate::gfx::geometry::generate_cube().transformed(
        &(Matrix4::from_translation(Vector3::new(10.0, 5.0, -6.0))
            * Matrix4::from_angle_y(Rad(FRAC_PI_4))
            * Matrix4::from_angle_z(Rad(FRAC_PI_4))
            * Matrix4::from_scale(2.0)),
    ));
    add(scene, "school_accents", "accent_coral", accents);

    // Signage, the courtyard sculpture and the information kiosk
    add(scene, "school_sign", "sign", boxed(6.0, 1.0, 0.2, 0.0, 9.0, 0.5));
    add(
        scene,
        "school_sculpture",
        "sculpture_coral",
        generate_cone(0.5, 3.0, 8)
            .transformed(&Matrix4::from_translation(Vector3::new(-15.0, 1.5, -3.0))),
    );
    add(scene, "school_kiosk", "kiosk", boxed(1.0, 2.5, 0.2, 15.0, 1.25, 0.0));
}

fn add(scene: &mut Scene, name: &str, material: &str, geometry: GeometryData) {
    scene.add_object(Object::from_geometry(name, &geometry).with_material(material));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_registers_objects_and_materials() {
        let mut scene = Scene::new();
        build_school(&mut scene);
        assert_eq!(scene.object_count(), 14);
        assert!(scene
            .material_manager
            .get_material(&"glass".to_string())
            .is_some());
        assert!(scene
            .material_manager
            .get_material(&LED_STRIP_MATERIAL.to_string())
            .is_some());
    }

    #[test]
    fn glass_materials_are_translucent() {
        let mut scene = Scene::new();
        build_school(&mut scene);
        let glass = scene
            .material_manager
            .get_material(&"glass".to_string())
            .unwrap();
        assert!((glass.base_color[3] - 0.4).abs() < 1e-6);
        let doors = scene
            .material_manager
            .get_material(&"door_glass".to_string())
            .unwrap();
        assert!((doors.base_color[3] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn led_strip_is_emissive() {
        let mut scene = Scene::new();
        build_school(&mut scene);
        let led = scene
            .material_manager
            .get_material(&LED_STRIP_MATERIAL.to_string())
            .unwrap();
        assert!(led.emissive[1] > 0.0);
        assert!(led.emissive_intensity > 0.0);
    }
}

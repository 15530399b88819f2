//! Campus grounds
//!
//! The paved ground plane, the flagpole with its flag, and the five
//! security light poles around the perimeter. The flag object is handed
//! back by id so the animation subsystem can wave it directly instead of
//! hunting for it by color.

use cgmath::{Matrix4, Vector3};

use super::{boxed, rgba};
use crate::gfx::geometry::{generate_cylinder, generate_plane, generate_sphere, GeometryData};
use crate::gfx::resources::material::Material;
use crate::gfx::{Object, ObjectId, Scene};

/// Material id of the security lamp fixtures, toggled by the lighting system.
pub const LAMP_FIXTURE_MATERIAL: &str = "lamp_fixture";

/// Pole bases of the five perimeter security lights, as `(x, z)`.
pub const SECURITY_LIGHT_POSITIONS: [(f32, f32); 5] =
    [(-20.0, 15.0), (20.0, 15.0), (-20.0, -15.0), (20.0, -15.0), (0.0, 20.0)];

/// Object ids the rest of the scene needs to reach back into the grounds.
pub struct GroundsHandles {
    pub flag: ObjectId,
}

pub fn build_grounds(scene: &mut Scene) -> GroundsHandles {
    scene.add_material("ground", rgba(0x404040, 1.0));
    scene.add_material("pole_gray", rgba(0x333333, 1.0));
    scene.add_material("flag_red", rgba(0xFF0000, 1.0));
    scene
        .material_manager
        .add_material(Material::new(LAMP_FIXTURE_MATERIAL, rgba(0xFFFF99, 1.0)));

    scene.add_object(
        Object::from_geometry("ground", &generate_plane(200.0, 200.0, 1, 1)).with_material("ground"),
    );

    // Flagpole next to the entrance plaza
    let pole = generate_cylinder(0.1, 9.0, 12)
        .transformed(&Matrix4::from_translation(Vector3::new(18.0, 4.5, 4.0)));
    scene.add_object(Object::from_geometry("flagpole", &pole).with_material("pole_gray"));

    // The flag mesh is offset from its own origin so that a yaw on the
    // object swings the cloth around the pole.
    let cloth = boxed(1.5, 1.0, 0.05, 0.85, 0.0, 0.0);
    let mut flag = Object::from_geometry("flag", &cloth).with_material("flag_red");
    flag.set_translation(Vector3::new(18.0, 8.2, 4.0));
    let flag = scene.add_object(flag);

    // Security light poles and their lamp heads. The heads share one
    // material so the lighting system can switch them on together.
    let mut poles = GeometryData::new();
    let mut fixtures = GeometryData::new();
    for (x, z) in SECURITY_LIGHT_POSITIONS {
        poles.merge(
            &generate_cylinder(0.1, 8.0, 12)
                .transformed(&Matrix4::from_translation(Vector3::new(x, 4.0, z))),
        );
        fixtures.merge(
            &generate_sphere(8, 8).transformed(
                &(Matrix4::from_translation(Vector3::new(x, 7.5, z)) * Matrix4::from_scale(0.5)),
            ),
        );
    }
    scene.add_object(Object::from_geometry("light_poles", &poles).with_material("pole_gray"));
    scene.add_object(
        Object::from_geometry("lamp_fixtures", &fixtures).with_material(LAMP_FIXTURE_MATERIAL),
    );

    GroundsHandles { flag }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounds_expose_a_flag_handle() {
        let mut scene = Scene::new();
        let handles = build_grounds(&mut scene);
        let flag = scene.get_object(handles.flag).unwrap();
        assert_eq!(flag.name, "flag");
    }

    #[test]
    fn five_security_lights_share_one_fixture_mesh() {
        let mut scene = Scene::new();
        build_grounds(&mut scene);
        let fixtures = scene
            .objects()
            .find(|o| o.name == "lamp_fixtures")
            .unwrap();
        let sphere = generate_sphere(8, 8);
        assert_eq!(
            fixtures.meshes[0].vertex_count() as usize,
            sphere.vertex_count() * 5
        );
    }
}

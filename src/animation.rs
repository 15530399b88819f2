//! Animation subsystem
//!
//! All animated actors are built once up front and parked invisible; a
//! recipe toggles pool visibility and `advance` perturbs the visible
//! pools with continuous functions of time and actor index. Transforms
//! are absolute functions of time, so pausing and resuming never drifts
//! an actor away from its base position. Invisible pools get no per-frame
//! work at all.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Matrix4, Rad, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::builders::{boxed, rgba};
use crate::gfx::geometry::{generate_cylinder, generate_sphere, GeometryData};
use crate::gfx::resources::material::Material;
use crate::gfx::{Object, ObjectId, Scene};
use crate::recipe::AnimationFlags;

const STUDENT_COUNT: usize = 8;
const BIRD_COUNT: usize = 5;
const FIREFLY_COUNT: usize = 15;

const STUDENT_COLORS: [u32; 8] = [
    0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, 0xFFA500, 0x800080,
];

struct DriftingActor {
    body: ObjectId,
    head: ObjectId,
    base: Vector3<f32>,
}

struct Bird {
    body: ObjectId,
    wings: ObjectId,
    base: Vector3<f32>,
}

struct Firefly {
    id: ObjectId,
    material: String,
    base: Vector3<f32>,
}

pub struct AnimationSystem {
    bus: Vec<ObjectId>,
    students: Vec<DriftingActor>,
    teacher: DriftingActor,
    birds: Vec<Bird>,
    owl: DriftingActor,
    fireflies: Vec<Firefly>,
    flag: ObjectId,
    active: AnimationFlags,
}

fn at(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

impl AnimationSystem {
    /// Builds every actor pool, all parked invisible. The flag object is
    /// handed over by the grounds builder.
    pub fn new(scene: &mut Scene, flag: ObjectId, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let bus = Self::build_bus(scene);
        let students = Self::build_students(scene, &mut rng);
        let teacher = Self::build_teacher(scene);
        let birds = Self::build_birds(scene, &mut rng);
        let owl = Self::build_owl(scene);
        let fireflies = Self::build_fireflies(scene, &mut rng);

        if let Some(cloth) = scene.get_object_mut(flag) {
            cloth.visible = false;
        }

        Self {
            bus,
            students,
            teacher,
            birds,
            owl,
            fireflies,
            flag,
            active: AnimationFlags::NONE,
        }
    }

    /// Toggles pool visibility to match a recipe's animation flags.
    pub fn apply(&mut self, flags: AnimationFlags, scene: &mut Scene) {
        self.active = flags;

        for id in &self.bus {
            set_visible(scene, *id, flags.bus);
        }
        for student in &self.students {
            set_visible(scene, student.body, flags.students);
            set_visible(scene, student.head, flags.students);
        }
        set_visible(scene, self.teacher.body, flags.teacher);
        set_visible(scene, self.teacher.head, flags.teacher);
        for bird in &self.birds {
            set_visible(scene, bird.body, flags.birds);
            set_visible(scene, bird.wings, flags.birds);
        }
        set_visible(scene, self.owl.body, flags.owl);
        set_visible(scene, self.owl.head, flags.owl);
        for firefly in &self.fireflies {
            set_visible(scene, firefly.id, flags.fireflies);
        }
        set_visible(scene, self.flag, flags.flag_raised);
    }

    /// Per-frame actor motion. Only visible pools are touched.
    pub fn advance(&mut self, seconds: f64, scene: &mut Scene) {
        let t = seconds as f32;

        if self.active.bus {
            let x = -30.0 + (t * 0.5).sin() * 5.0;
            for id in &self.bus {
                if let Some(object) = scene.get_object_mut(*id) {
                    object.set_translation(Vector3::new(x, 0.0, 10.0));
                }
            }
        }

        if self.active.students {
            for (i, student) in self.students.iter().enumerate() {
                let phase = i as f32;
                let offset = Vector3::new((t + phase).sin() * 0.6, 0.0, (t + phase).cos() * 0.6);
                let position = student.base + offset;
                for id in [student.body, student.head] {
                    if let Some(object) = scene.get_object_mut(id) {
                        object.set_translation(position);
                    }
                }
            }
        }

        if self.active.teacher {
            let yaw = Rad((t * 2.0).sin() * 0.3);
            let transform = Matrix4::from_translation(self.teacher.base) * Matrix4::from_angle_y(yaw);
            for id in [self.teacher.body, self.teacher.head] {
                if let Some(object) = scene.get_object_mut(id) {
                    object.set_transform(transform);
                }
            }
        }

        if self.active.birds {
            for (i, bird) in self.birds.iter().enumerate() {
                let phase = i as f32;
                let bob = (t * 2.0 + phase).sin() * 0.5;
                let roll = Rad((t * 3.0 + phase).sin() * 0.2);
                let flap = Rad((t * 10.0 + phase).sin() * 0.5);
                let position = bird.base + Vector3::new(0.0, bob, 0.0);
                if let Some(body) = scene.get_object_mut(bird.body) {
                    body.set_transform(
                        Matrix4::from_translation(position) * Matrix4::from_angle_z(roll),
                    );
                }
                if let Some(wings) = scene.get_object_mut(bird.wings) {
                    wings.set_transform(
                        Matrix4::from_translation(position) * Matrix4::from_angle_z(roll + flap),
                    );
                }
            }
        }

        if self.active.owl {
            let yaw = Rad((t * 0.5).sin() * 0.8);
            let transform = Matrix4::from_translation(self.owl.base) * Matrix4::from_angle_y(yaw);
            for id in [self.owl.body, self.owl.head] {
                if let Some(object) = scene.get_object_mut(id) {
                    object.set_transform(transform);
                }
            }
        }

        if self.active.fireflies {
            for (i, firefly) in self.fireflies.iter().enumerate() {
                let phase = i as f32;
                let drift = Vector3::new(
                    (t + phase).sin() * 0.5,
                    (t * 2.0 + phase).cos() * 0.3,
                    (t * 1.5 + phase).sin() * 0.5,
                );
                if let Some(object) = scene.get_object_mut(firefly.id) {
                    object.set_translation(firefly.base + drift);
                }
                if let Some(material) = scene.material_manager.get_material_mut(&firefly.material) {
                    material.emissive_intensity = (0.2 + (t * 4.0 + phase).sin() * 0.2).max(0.0);
                }
            }
        }

        if self.active.flag_raised {
            if let Some(cloth) = scene.get_object_mut(self.flag) {
                let base = cloth.transform.w.truncate();
                cloth.set_transform(
                    Matrix4::from_translation(base)
                        * Matrix4::from_angle_y(Rad((t * 3.0).sin() * 0.1)),
                );
            }
        }
    }

    fn build_bus(scene: &mut Scene) -> Vec<ObjectId> {
        scene.add_material("bus_yellow", rgba(0xFFD700, 1.0));
        scene.add_material("bus_wheel", rgba(0x333333, 1.0));
        scene
            .material_manager
            .add_material(Material::new("bus_window", rgba(0x87CEEB, 1.0)).with_alpha(0.7));

        let body = boxed(8.0, 3.0, 3.0, 0.0, 1.5, 0.0);

        // Wheel cylinders laid on their side, axle along z
        let mut wheels = GeometryData::new();
        let wheel = generate_cylinder(0.8, 0.3, 12)
            .transformed(&Matrix4::from_angle_x(Rad(FRAC_PI_2)));
        for (x, z) in [(-2.5, 1.5), (-2.5, -1.5), (2.5, 1.5), (2.5, -1.5)] {
            wheels.merge(&wheel.clone().transformed(&at(x, 0.8, z)));
        }

        let mut windows = GeometryData::new();
        for i in 0..4 {
            windows.merge(&boxed(1.5, 1.0, 0.1, -2.5 + i as f32 * 1.5, 2.5, 1.55));
        }

        let mut ids = Vec::new();
        for (name, material, geometry) in [
            ("bus_body", "bus_yellow", body),
            ("bus_wheels", "bus_wheel", wheels),
            ("bus_windows", "bus_window", windows),
        ] {
            let mut object = Object::from_geometry(name, &geometry)
                .with_material(material)
                .with_visible(false);
            object.set_translation(Vector3::new(-50.0, 0.0, 10.0));
            ids.push(scene.add_object(object));
        }
        ids
    }

    fn build_students(scene: &mut Scene, rng: &mut StdRng) -> Vec<DriftingActor> {
        scene.add_material("skin", rgba(0xFFDBAC, 1.0));

        let body_geometry =
            generate_cylinder(0.3, 1.5, 10).transformed(&at(0.0, 0.75, 0.0));
        let head_geometry = generate_sphere(8, 8)
            .transformed(&(at(0.0, 1.8, 0.0) * Matrix4::from_scale(0.3)));

        (0..STUDENT_COUNT)
            .map(|i| {
                let material = format!("student_{}", i);
                scene.add_material(&material, rgba(STUDENT_COLORS[i], 1.0));

                let base = Vector3::new(
                    (rng.random::<f32>() - 0.5) * 20.0,
                    0.0,
                    (rng.random::<f32>() - 0.5) * 15.0,
                );
                let mut body = Object::from_geometry(&format!("student_{}_body", i), &body_geometry)
                    .with_material(&material)
                    .with_visible(false);
                body.set_translation(base);
                let mut head = Object::from_geometry(&format!("student_{}_head", i), &head_geometry)
                    .with_material("skin")
                    .with_visible(false);
                head.set_translation(base);

                DriftingActor {
                    body: scene.add_object(body),
                    head: scene.add_object(head),
                    base,
                }
            })
            .collect()
    }

    fn build_teacher(scene: &mut Scene) -> DriftingActor {
        scene.add_material("teacher_blue", rgba(0x4169E1, 1.0));

        let base = Vector3::new(-2.5, 3.0, -1.0);
        let body_geometry = generate_cylinder(0.4, 2.0, 10).transformed(&at(0.0, 1.0, 0.0));
        let head_geometry = generate_sphere(8, 8)
            .transformed(&(at(0.0, 2.35, 0.0) * Matrix4::from_scale(0.35)));

        let mut body = Object::from_geometry("teacher_body", &body_geometry)
            .with_material("teacher_blue")
            .with_visible(false);
        body.set_translation(base);
        let mut head = Object::from_geometry("teacher_head", &head_geometry)
            .with_material("skin")
            .with_visible(false);
        head.set_translation(base);

        DriftingActor {
            body: scene.add_object(body),
            head: scene.add_object(head),
            base,
        }
    }

    fn build_birds(scene: &mut Scene, rng: &mut StdRng) -> Vec<Bird> {
        scene.add_material("bird_body", rgba(0x8B4513, 1.0));
        scene.add_material("bird_wing", rgba(0x654321, 1.0));

        let body_geometry = generate_sphere(6, 6).transformed(&Matrix4::from_scale(0.1));
        let mut wing_geometry = boxed(0.3, 0.02, 0.1, -0.15, 0.0, 0.0);
        wing_geometry.merge(&boxed(0.3, 0.02, 0.1, 0.15, 0.0, 0.0));

        (0..BIRD_COUNT)
            .map(|i| {
                let angle = i as f32 / BIRD_COUNT as f32 * std::f32::consts::TAU;
                let base = Vector3::new(
                    -12.0 + angle.cos() * 8.0,
                    12.0 + rng.random::<f32>() * 4.0,
                    8.0 + angle.sin() * 8.0,
                );
                let mut body = Object::from_geometry(&format!("bird_{}_body", i), &body_geometry)
                    .with_material("bird_body")
                    .with_visible(false);
                body.set_translation(base);
                let mut wings = Object::from_geometry(&format!("bird_{}_wings", i), &wing_geometry)
                    .with_material("bird_wing")
                    .with_visible(false);
                wings.set_translation(base);

                Bird {
                    body: scene.add_object(body),
                    wings: scene.add_object(wings),
                    base,
                }
            })
            .collect()
    }

    fn build_owl(scene: &mut Scene) -> DriftingActor {
        scene.add_material("owl_eye", rgba(0xFFFF00, 1.0));

        let base = Vector3::new(-10.0, 10.0, 8.0);
        let body_geometry = generate_sphere(8, 8).transformed(&Matrix4::from_scale(0.3));
        let mut eyes = generate_sphere(6, 6)
            .transformed(&(at(-0.1, 0.1, 0.25) * Matrix4::from_scale(0.08)));
        eyes.merge(
            &generate_sphere(6, 6).transformed(&(at(0.1, 0.1, 0.25) * Matrix4::from_scale(0.08))),
        );

        let mut body = Object::from_geometry("owl_body", &body_geometry)
            .with_material("bird_body")
            .with_visible(false);
        body.set_translation(base);
        let mut head = Object::from_geometry("owl_eyes", &eyes)
            .with_material("owl_eye")
            .with_visible(false);
        head.set_translation(base);

        DriftingActor {
            body: scene.add_object(body),
            head: scene.add_object(head),
            base,
        }
    }

    fn build_fireflies(scene: &mut Scene, rng: &mut StdRng) -> Vec<Firefly> {
        let geometry = generate_sphere(6, 6).transformed(&Matrix4::from_scale(0.05));
        let glow = 68.0 / 255.0;

        (0..FIREFLY_COUNT)
            .map(|i| {
                // Each firefly pulses its own material
                let material = format!("firefly_{}", i);
                scene.material_manager.add_material(
                    Material::new(&material, rgba(0xFFFF00, 1.0))
                        .with_emission(glow, glow, 0.0, 0.2),
                );

                let base = Vector3::new(
                    -12.0 + (rng.random::<f32>() - 0.5) * 16.0,
                    2.0 + rng.random::<f32>() * 6.0,
                    8.0 + (rng.random::<f32>() - 0.5) * 16.0,
                );
                let mut object = Object::from_geometry(&format!("firefly_{}", i), &geometry)
                    .with_material(&material)
                    .with_visible(false);
                object.set_translation(base);

                Firefly {
                    id: scene.add_object(object),
                    material,
                    base,
                }
            })
            .collect()
    }
}

fn set_visible(scene: &mut Scene, id: ObjectId, visible: bool) {
    if let Some(object) = scene.get_object_mut(id) {
        object.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::grounds::build_grounds;
    use crate::recipe;

    fn setup() -> (Scene, AnimationSystem) {
        let mut scene = Scene::new();
        let handles = build_grounds(&mut scene);
        let animation = AnimationSystem::new(&mut scene, handles.flag, 11);
        (scene, animation)
    }

    #[test]
    fn everything_starts_invisible() {
        let (scene, animation) = setup();
        for id in &animation.bus {
            assert!(!scene.get_object(*id).unwrap().visible);
        }
        assert!(!scene.get_object(animation.flag).unwrap().visible);
        for firefly in &animation.fireflies {
            assert!(!scene.get_object(firefly.id).unwrap().visible);
        }
    }

    #[test]
    fn morning_recipe_wakes_the_bus_and_raises_the_flag() {
        let (mut scene, mut animation) = setup();
        let morning = recipe::lookup(8);
        animation.apply(morning.animations, &mut scene);

        for id in &animation.bus {
            assert!(scene.get_object(*id).unwrap().visible);
        }
        assert_eq!(
            scene.get_object(animation.flag).unwrap().visible,
            morning.animations.flag_raised
        );
        assert!(!scene.get_object(animation.owl.body).unwrap().visible);
    }

    #[test]
    fn hidden_pools_keep_their_transforms() {
        let (mut scene, mut animation) = setup();
        animation.apply(AnimationFlags::NONE, &mut scene);

        let before = scene.get_object(animation.owl.body).unwrap().transform;
        animation.advance(12.5, &mut scene);
        let after = scene.get_object(animation.owl.body).unwrap().transform;
        assert_eq!(before, after);
    }

    #[test]
    fn bus_oscillates_but_stays_on_its_lane() {
        let (mut scene, mut animation) = setup();
        let flags = AnimationFlags { bus: true, ..AnimationFlags::NONE };
        animation.apply(flags, &mut scene);

        for step in 0..50 {
            animation.advance(step as f64 * 0.3, &mut scene);
            let body = scene.get_object(animation.bus[0]).unwrap();
            let x = body.transform.w.x;
            assert!((-35.0..=-25.0).contains(&x));
            assert_eq!(body.transform.w.z, 10.0);
        }
    }

    #[test]
    fn wings_flap_independently_of_the_body() {
        let (mut scene, mut animation) = setup();
        let flags = AnimationFlags { birds: true, ..AnimationFlags::NONE };
        animation.apply(flags, &mut scene);
        animation.advance(0.4, &mut scene);

        let bird = &animation.birds[0];
        let body = scene.get_object(bird.body).unwrap().transform;
        let wings = scene.get_object(bird.wings).unwrap().transform;
        assert_ne!(body, wings);
    }

    #[test]
    fn firefly_glow_pulses_with_time() {
        let (mut scene, mut animation) = setup();
        let flags = AnimationFlags { fireflies: true, ..AnimationFlags::NONE };
        animation.apply(flags, &mut scene);

        animation.advance(0.0, &mut scene);
        let a = scene
            .material_manager
            .get_material(&"firefly_0".to_string())
            .unwrap()
            .emissive_intensity;
        animation.advance(0.4, &mut scene);
        let b = scene
            .material_manager
            .get_material(&"firefly_0".to_string())
            .unwrap()
            .emissive_intensity;
        assert_ne!(a, b);
        assert!(b >= 0.0);
    }

    #[test]
    fn same_seed_places_actors_identically() {
        let (_, a) = setup();
        let (_, b) = setup();
        assert_eq!(a.students[3].base, b.students[3].base);
        assert_eq!(a.fireflies[7].base, b.fireflies[7].base);
    }
}

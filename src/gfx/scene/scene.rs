use crate::gfx::object::Object;
use crate::gfx::resources::material::{Material, MaterialManager};

/// Stable handle to an object in a [`Scene`].
///
/// Handles index into tombstoned slots, so removing one object never
/// invalidates the handles of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// Container for all objects and materials making up the campus
pub struct Scene {
    slots: Vec<Option<Object>>,
    pub material_manager: MaterialManager,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            material_manager: MaterialManager::new(),
        }
    }

    /// Adds an object and returns its stable handle
    pub fn add_object(&mut self, object: Object) -> ObjectId {
        // Reuse the first free slot before growing
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(object);
                return ObjectId(index);
            }
        }
        self.slots.push(Some(object));
        ObjectId(self.slots.len() - 1)
    }

    /// Removes an object, dropping its GPU buffers with it
    pub fn remove_object(&mut self, id: ObjectId) -> Option<Object> {
        self.slots.get_mut(id.0).and_then(|slot| slot.take())
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Iterates over live objects
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut Object> {
        self.slots.iter_mut().filter_map(|slot| slot.as_mut())
    }

    /// Number of live objects
    pub fn object_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Removes every object; material definitions stay registered
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Creates a material and adds it to the material manager
    pub fn add_material(&mut self, name: &str, base_color: [f32; 4]) -> &mut Material {
        self.material_manager
            .add_material(Material::new(name, base_color));
        self.material_manager
            .get_material_mut(&name.to_string())
            .expect("material was just inserted")
    }

    /// Convenience method for creating materials with opaque RGB colors
    pub fn add_material_rgb(&mut self, name: &str, r: f32, g: f32, b: f32) -> &mut Material {
        self.add_material(name, [r, g, b, 1.0])
    }

    /// Gets material for rendering an object, falling back to the default
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.material_id.as_ref())
    }

    /// Total triangle count across live objects, for logging
    pub fn triangle_count(&self) -> u32 {
        self.objects()
            .map(|obj| obj.meshes.iter().map(|m| m.index_count() / 3).sum::<u32>())
            .sum()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;

    fn cube(name: &str) -> Object {
        Object::from_geometry(name, &generate_cube())
    }

    #[test]
    fn handles_survive_removal() {
        let mut scene = Scene::new();
        let a = scene.add_object(cube("a"));
        let b = scene.add_object(cube("b"));
        let c = scene.add_object(cube("c"));

        assert!(scene.remove_object(b).is_some());
        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.get_object(a).map(|o| o.name.as_str()), Some("a"));
        assert_eq!(scene.get_object(c).map(|o| o.name.as_str()), Some("c"));
        assert!(scene.get_object(b).is_none());
    }

    #[test]
    fn removed_slot_is_reused() {
        let mut scene = Scene::new();
        let a = scene.add_object(cube("a"));
        scene.remove_object(a);
        let b = scene.add_object(cube("b"));
        assert_eq!(a, b);
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn double_remove_is_a_no_op() {
        let mut scene = Scene::new();
        let a = scene.add_object(cube("a"));
        assert!(scene.remove_object(a).is_some());
        assert!(scene.remove_object(a).is_none());
    }

    #[test]
    fn clear_keeps_materials() {
        let mut scene = Scene::new();
        scene.add_material_rgb("brick", 0.7, 0.3, 0.2);
        scene.add_object(cube("a"));
        scene.clear();
        assert_eq!(scene.object_count(), 0);
        assert!(scene
            .material_manager
            .get_material(&"brick".to_string())
            .is_some());
    }
}

//! Material system for the campus renderer
//!
//! Materials use a Lambert plus emissive model; the stylized scene never
//! needs metalness or image textures. Materials are stored centrally in
//! MaterialManager and objects reference them by ID, so pooled actors can
//! share one definition while the fireflies each own a pulsing one.

use std::collections::HashMap;
use wgpu::Device;

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Material ID for referencing materials
pub type MaterialId = String;

/// GPU uniform data for materials, must match the shader struct exactly
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Material bind group management
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(device, "Material Bind Group");

        MaterialBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(&mut self, device: &Device, ubo: &MaterialUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Material Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

/// Material definition shared between objects
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,

    material_ubo: Option<MaterialUBO>,
    material_bindings: Option<MaterialBindings>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
            material_ubo: None,
            material_bindings: None,
        }
    }
}

impl Material {
    pub fn new(name: &str, base_color: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
            material_ubo: None,
            material_bindings: None,
        }
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set emissive color and intensity
    pub fn with_emission(mut self, r: f32, g: f32, b: f32, intensity: f32) -> Self {
        self.emissive = [r, g, b];
        self.emissive_intensity = intensity.max(0.0);
        self
    }

    /// Updates GPU resources for this material
    pub fn update_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        if self.material_ubo.is_none() {
            self.material_ubo = Some(MaterialUBO::new(device));
        }

        if self.material_bindings.is_none() {
            let mut bindings = MaterialBindings::new(device);
            if let Some(ubo) = &self.material_ubo {
                bindings.create_bind_group(device, ubo);
            }
            self.material_bindings = Some(bindings);
        }

        let uniform_data = MaterialUniform {
            base_color: self.base_color,
            emissive: self.emissive,
            emissive_intensity: self.emissive_intensity,
        };

        if let Some(ubo) = &mut self.material_ubo {
            ubo.update_content(queue, uniform_data);
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.material_bindings.as_ref().map(|b| b.bind_groups())
    }

    /// Gets the bind group layout for pipeline creation
    pub fn get_bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.material_bindings
            .as_ref()
            .map(|b| b.bind_group_layouts())
    }
}

/// Centralized storage for all materials in the scene
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material_id: MaterialId,
}

impl MaterialManager {
    pub fn new() -> Self {
        let mut manager = Self {
            materials: HashMap::new(),
            default_material_id: "default".to_string(),
        };

        manager
            .materials
            .insert("default".to_string(), Material::default());

        manager
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get_material(&self, id: &MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    pub fn get_default_material(&self) -> &Material {
        self.materials
            .get(&self.default_material_id)
            .expect("default material always exists")
    }

    /// Gets material for an object with fallback to default
    pub fn get_material_for_object(&self, material_id: Option<&MaterialId>) -> &Material {
        match material_id {
            Some(id) => self
                .get_material(id)
                .unwrap_or_else(|| self.get_default_material()),
            None => self.get_default_material(),
        }
    }

    pub fn list_materials(&self) -> Vec<&MaterialId> {
        self.materials.keys().collect()
    }

    /// Updates GPU resources for all materials
    pub fn update_all_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue);
        }
    }

    /// Material bind group layout for pipeline creation.
    ///
    /// All materials share the same layout, so the default one serves.
    pub fn get_bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.get_default_material().get_bind_group_layout()
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_material_falls_back_to_default() {
        let manager = MaterialManager::new();
        let id = "nope".to_string();
        assert_eq!(manager.get_material_for_object(Some(&id)).name, "Default");
        assert_eq!(manager.get_material_for_object(None).name, "Default");
    }

    #[test]
    fn emission_builder_clamps_intensity() {
        let material = Material::new("glow", [1.0, 1.0, 0.8, 1.0]).with_emission(
            1.0, 1.0, 0.5, -2.0,
        );
        assert_eq!(material.emissive_intensity, 0.0);
    }
}

//! Global uniform bindings for camera, lighting, and sky data
//!
//! Manages the per-frame uniform buffers shared across all objects: the
//! camera matrices and light rig in group 0, and the sky gradient
//! parameters used by the dome pipeline.

use crate::{
    gfx::camera::camera::CameraUniform,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Maximum number of point lights the shader loops over.
///
/// 12 classroom windows plus the five security lamps leaves headroom.
pub const MAX_POINT_LIGHTS: usize = 20;

/// One point light as laid out in the uniform buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub radius: f32,
}

/// Global uniform buffer content structure
///
/// MUST match the Globals struct in the shaders exactly, including the
/// vec3 alignment padding expressed here by the interleaved scalars.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],

    sun_direction: [f32; 3],
    sun_intensity: f32,
    sun_color: [f32; 3],
    ambient_intensity: f32,
    ambient_color: [f32; 3],
    moon_intensity: f32,
    moon_direction: [f32; 3],
    point_light_count: f32,

    point_lights: [PointLightRaw; MAX_POINT_LIGHTS],
}

unsafe impl bytemuck::Pod for GlobalUBOContent {}
unsafe impl bytemuck::Zeroable for GlobalUBOContent {}

/// CPU-side description of every light affecting the lit pass.
///
/// Computed by the lighting subsystem each frame and uploaded here.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    /// Direction pointing from the scene toward the sun
    pub sun_direction: [f32; 3],
    pub sun_color: [f32; 3],
    pub sun_intensity: f32,
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub moon_direction: [f32; 3],
    pub moon_intensity: f32,
    pub point_lights: Vec<PointLightRaw>,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            sun_direction: [0.0, 1.0, 0.0],
            sun_color: [1.0, 1.0, 1.0],
            sun_intensity: 1.0,
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.5,
            moon_direction: [0.0, 1.0, 0.0],
            moon_intensity: 0.0,
            point_lights: Vec::new(),
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Uploads camera and light rig state into the global uniform buffer.
///
/// Point lights beyond [`MAX_POINT_LIGHTS`] are dropped.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    rig: &LightRig,
) {
    let mut point_lights = [PointLightRaw::default(); MAX_POINT_LIGHTS];
    let count = rig.point_lights.len().min(MAX_POINT_LIGHTS);
    point_lights[..count].copy_from_slice(&rig.point_lights[..count]);

    let content = GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,

        sun_direction: rig.sun_direction,
        sun_intensity: rig.sun_intensity,
        sun_color: rig.sun_color,
        ambient_intensity: rig.ambient_intensity,
        ambient_color: rig.ambient_color,
        moon_intensity: rig.moon_intensity,
        moon_direction: rig.moon_direction,
        point_light_count: count as f32,

        point_lights,
    };

    ubo.update_content(queue, content);
}

/// Manages the bind group for global uniforms, bound to slot 0 in every
/// render pipeline.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
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

/// Sky gradient parameters, matching the SkyParams shader struct
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyUBOContent {
    pub top_color: [f32; 3],
    pub offset: f32,
    pub bottom_color: [f32; 3],
    pub exponent: f32,
}

impl Default for SkyUBOContent {
    fn default() -> Self {
        Self {
            top_color: [0.53, 0.81, 0.92],
            offset: 33.0,
            bottom_color: [0.69, 0.88, 0.9],
            exponent: 0.8,
        }
    }
}

pub type SkyUBO = UniformBuffer<SkyUBOContent>;

/// Bind group for the sky gradient, slot 1 of the sky pipeline
pub struct SkyBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl SkyBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(device, "Sky Bind Group");

        SkyBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &SkyUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Sky Bind Group"),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_ubo_content_matches_shader_layout() {
        // 16 (view_position) + 64 (view_proj) + 64 (light scalars) + 20 * 32
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 144 + 20 * 32);
        assert_eq!(std::mem::size_of::<PointLightRaw>(), 32);
        assert_eq!(std::mem::size_of::<SkyUBOContent>(), 32);
    }

    #[test]
    fn light_rigs_compare_by_value() {
        let mut a = LightRig::default();
        a.point_lights.push(PointLightRaw {
            position: [0.0, 7.5, 0.0],
            intensity: 0.5,
            color: [1.0, 1.0, 0.6],
            radius: 20.0,
        });
        let b = a.clone();
        assert_eq!(a, b);
        a.point_lights[0].intensity = 0.6;
        assert_ne!(a, b);
    }
}

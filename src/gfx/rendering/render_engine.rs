//! WGPU-based rendering engine for the campus scene
//!
//! Owns the surface, device, depth buffer, and the three pipelines the
//! scene needs: the gradient sky dome, unlit emissive elements, and the
//! lit pass for everything else. Object and material GPU buffers are
//! created lazily on the first frame that draws them, so the scene can be
//! built and tested without a GPU.

use std::sync::Arc;
use wgpu::{Device, TextureFormat};

use crate::error::{ConstructionError, FrameError, ResizeError};
use crate::gfx::{
    camera::camera::CameraUniform,
    object::{DrawObject, Pass},
    resources::{
        global_bindings::{
            update_global_ubo, GlobalBindings, GlobalUBO, LightRig, SkyBindings, SkyUBO,
            SkyUBOContent,
        },
        texture_resource::TextureResource,
    },
    scene::Scene,
};
use crate::wgpu_utils::{
    binding_builder::{BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

const SCENE_SHADER: &str = include_str!("../../shaders/scene.wgsl");
const SKY_SHADER: &str = include_str!("../../shaders/sky.wgsl");
const STARS_SHADER: &str = include_str!("../../shaders/stars.wgsl");

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    sky_ubo: SkyUBO,
    sky_bindings: SkyBindings,
    transform_layout: BindGroupLayoutWithDesc,
}

impl RenderEngine {
    /// Creates a new render engine for the given window.
    ///
    /// Initializes wgpu, creates the depth buffer and global uniform
    /// buffers, and registers the three scene pipelines for lazy creation.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, ConstructionError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(ConstructionError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        let sky_ubo = SkyUBO::new_with_data(&device, &SkyUBOContent::default());
        let mut sky_bindings = SkyBindings::new(&device);
        sky_bindings.create_bind_group(&device, &sky_ubo);

        let transform_layout = BindGroupLayoutBuilder::new()
            .next_binding_vertex(binding_types::uniform())
            .create(&device, "Transform Bind Group");

        // Materials build their own layouts later; wgpu deduplicates
        // structurally identical layouts, so this copy is compatible.
        let material_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(&device, "Material Bind Group");

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader("scene.wgsl", SCENE_SHADER);
        pipeline_manager.load_shader("sky.wgsl", SKY_SHADER);
        pipeline_manager.load_shader("stars.wgsl", STARS_SHADER);

        pipeline_manager.register_pipeline(
            "Scene",
            PipelineConfig::default_with_shader("scene.wgsl")
                .with_label("Scene Pipeline")
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layouts().clone(),
                    transform_layout.layout.clone(),
                    material_layout.layout.clone(),
                ])
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_blend(wgpu::BlendState::ALPHA_BLENDING)
                .with_color_format(format),
        );

        pipeline_manager.register_pipeline(
            "Sky",
            PipelineConfig::default_with_shader("sky.wgsl")
                .with_label("Sky Pipeline")
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layouts().clone(),
                    sky_bindings.bind_group_layouts().clone(),
                ])
                // The camera sits inside the dome
                .with_cull_mode(None)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_depth_read_only()
                .with_color_format(format),
        );

        pipeline_manager.register_pipeline(
            "Stars",
            PipelineConfig::default_with_shader("stars.wgsl")
                .with_label("Stars Pipeline")
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layouts().clone(),
                    transform_layout.layout.clone(),
                    material_layout.layout.clone(),
                ])
                .with_cull_mode(None)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_depth_read_only()
                .with_blend(wgpu::BlendState::ALPHA_BLENDING)
                .with_color_format(format),
        );

        log::info!("render engine ready, surface {}x{} {:?}", width, height, format);

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            sky_ubo,
            sky_bindings,
            transform_layout,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> TextureFormat {
        self.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigures the surface with the current settings, used to recover
    /// from a lost surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Resizes the render target, recreating the depth buffer to match
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ResizeError> {
        if width == 0 || height == 0 {
            return Err(ResizeError::ZeroArea { width, height });
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");

        Ok(())
    }

    /// Renders one frame: sky dome, then lit geometry, then unlit emissives.
    ///
    /// Uploads the camera, light rig, and sky gradient first, then creates
    /// any missing object or material GPU resources before encoding.
    pub fn render_frame(
        &mut self,
        scene: &mut Scene,
        camera: &CameraUniform,
        rig: &LightRig,
        sky: SkyUBOContent,
    ) -> Result<(), FrameError> {
        update_global_ubo(&mut self.global_ubo, &self.queue, *camera, rig);
        self.sky_ubo.update_content(&self.queue, sky);

        for object in scene.objects_mut() {
            if object.gpu_resources.is_none() {
                object.init_gpu_resources(&self.device, &self.transform_layout.layout);
            } else if object.transform_dirty() {
                object.update_transform(&self.queue);
            }
        }
        scene
            .material_manager
            .update_all_gpu_resources(&self.device, &self.queue);

        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: sky.bottom_color[0] as f64,
                            g: sky.bottom_color[1] as f64,
                            b: sky.bottom_color[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);

            // Sky dome first, without depth writes
            if let Some(pipeline) = self.pipeline_manager.get_pipeline("Sky") {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(1, self.sky_bindings.bind_groups(), &[]);
                for object in scene.objects() {
                    if object.visible && object.pass == Pass::Sky {
                        render_pass.draw_object(object);
                    }
                }
            }

            // Lit campus geometry
            if let Some(pipeline) = self.pipeline_manager.get_pipeline("Scene") {
                render_pass.set_pipeline(pipeline);
                for object in scene.objects() {
                    if !object.visible || object.pass != Pass::Lit {
                        continue;
                    }
                    let Some(transform_bind_group) = object.get_transform_bind_group() else {
                        continue;
                    };
                    let material = scene.get_material_for_object(object);
                    let Some(material_bind_group) = material.get_bind_group() else {
                        continue;
                    };
                    render_pass.set_bind_group(1, transform_bind_group, &[]);
                    render_pass.set_bind_group(2, material_bind_group, &[]);
                    render_pass.draw_object(object);
                }
            }

            // Unlit emissives (stars, moon, clouds) over everything at dome depth
            if let Some(pipeline) = self.pipeline_manager.get_pipeline("Stars") {
                render_pass.set_pipeline(pipeline);
                for object in scene.objects() {
                    if !object.visible || object.pass != Pass::Stars {
                        continue;
                    }
                    let Some(transform_bind_group) = object.get_transform_bind_group() else {
                        continue;
                    };
                    let material = scene.get_material_for_object(object);
                    let Some(material_bind_group) = material.get_bind_group() else {
                        continue;
                    };
                    render_pass.set_bind_group(1, transform_bind_group, &[]);
                    render_pass.set_bind_group(2, material_bind_group, &[]);
                    render_pass.draw_object(object);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        Ok(())
    }
}

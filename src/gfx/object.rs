use std::ops::Range;

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3};
use wgpu::Device;

use super::geometry::GeometryData;
use super::scene::vertex::Vertex3D;

/// Which pipeline an object is drawn with.
///
/// `Lit` geometry receives sun, moon, ambient and point lighting. `Sky` is
/// the gradient dome. `Stars` covers unlit emissive elements drawn inside
/// the dome without depth writes (stars, moon disc, cloud puffs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Lit,
    Sky,
    Stars,
}

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex3D>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;
        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let (vertices, indices) = geometry.to_scene_format();
        Self::new(vertices, indices)
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

/// GPU resources backing one object
pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub transform: Matrix4<f32>,
    pub material_id: Option<String>,
    pub visible: bool,
    pub pass: Pass,
    /// None until `init_gpu_resources` runs; the scene stays fully usable
    /// without a GPU, buffers appear on the first rendered frame.
    pub gpu_resources: Option<ObjectGpuResources>,
    transform_dirty: bool,
}

impl Object {
    /// Create a new lit, visible object with identity transformation
    pub fn new(name: &str, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.to_string(),
            meshes,
            transform: Matrix4::identity(),
            material_id: None,
            visible: true,
            pass: Pass::Lit,
            gpu_resources: None,
            transform_dirty: true,
        }
    }

    pub fn from_geometry(name: &str, geometry: &GeometryData) -> Self {
        Self::new(name, vec![Mesh::from_geometry(geometry)])
    }

    pub fn with_material(mut self, material_id: &str) -> Self {
        self.material_id = Some(material_id.to_string());
        self
    }

    pub fn with_pass(mut self, pass: Pass) -> Self {
        self.pass = pass;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set translation
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.transform = Matrix4::from_translation(translation);
        self.transform_dirty = true;
    }

    /// Set rotation around Y axis
    pub fn set_rotation_y(&mut self, angle: Deg<f32>) {
        self.transform = Matrix4::from_angle_y(angle);
        self.transform_dirty = true;
    }

    /// Replace the whole transform
    pub fn set_transform(&mut self, transform: Matrix4<f32>) {
        self.transform = transform;
        self.transform_dirty = true;
    }

    /// Build a transform from translation, Y rotation, and non-uniform scale
    pub fn set_transform_trs(
        &mut self,
        translation: Vector3<f32>,
        rotation_y: Deg<f32>,
        scale: Vector3<f32>,
    ) {
        let t = Matrix4::from_translation(translation);
        let r = Matrix4::from_angle_y(rotation_y);
        let s = Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
        // Order matters: T * R * S
        self.set_transform(t * r * s);
    }

    pub fn transform_dirty(&self) -> bool {
        self.transform_dirty
    }

    /// Sync the transform to the GPU if resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            // cgmath matrices are column-major, which is what the GPU expects
            let transform_data: &[f32; 16] = self.transform.as_ref();
            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(transform_data),
            );
        }
        self.transform_dirty = false;
    }

    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    pub fn init_gpu_resources(
        &mut self,
        device: &Device,
        transform_layout: &wgpu::BindGroupLayout,
    ) {
        for mesh in self.meshes.iter_mut() {
            let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Vertex Buffer"),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            );

            let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Index Buffer"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                },
            );

            mesh.vertex_buffer = Some(vertex_buffer);
            mesh.index_buffer = Some(index_buffer);
        }

        let transform_data: &[f32; 16] = self.transform.as_ref();
        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Transform Uniform Buffer"),
                contents: bytemuck::cast_slice(transform_data),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
        });
        self.transform_dirty = false;
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // Skip drawing if not uploaded
        };
        let index_buffer = match &mesh.index_buffer {
            Some(buffer) => buffer,
            None => return,
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances.clone());
    }

    fn draw_object(&mut self, object: &'b Object) {
        for mesh in &object.meshes {
            self.draw_mesh(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;

    #[test]
    fn object_starts_without_gpu_resources() {
        let object = Object::from_geometry("cube", &generate_cube());
        assert!(object.gpu_resources.is_none());
        assert!(object.visible);
        assert_eq!(object.pass, Pass::Lit);
    }

    #[test]
    fn trs_transform_places_origin() {
        let mut object = Object::from_geometry("cube", &generate_cube());
        object.set_transform_trs(
            Vector3::new(1.0, 2.0, 3.0),
            Deg(90.0),
            Vector3::new(2.0, 2.0, 2.0),
        );
        let translation = object.transform.w;
        assert!((translation.x - 1.0).abs() < 1e-6);
        assert!((translation.y - 2.0).abs() < 1e-6);
        assert!((translation.z - 3.0).abs() < 1e-6);
    }
}

//! Procedural geometry generation
//!
//! Every shape in the campus scene is generated at runtime from these
//! primitives; no model files are loaded. All generators use a Y-up
//! coordinate system and counter-clockwise winding.

use cgmath::{InnerSpace, Matrix4, Transform, Vector3};

pub mod primitives;

pub use primitives::*;

/// Generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bakes a transform into the vertex data.
    ///
    /// Positions go through the full matrix, normals through its linear
    /// part and are renormalized. Used by the builders to weld many small
    /// parts into one mesh instead of spending an object on each.
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        for position in &mut self.vertices {
            let p = matrix.transform_point(cgmath::Point3::new(
                position[0],
                position[1],
                position[2],
            ));
            *position = [p.x, p.y, p.z];
        }
        for normal in &mut self.normals {
            let n = matrix
                .transform_vector(Vector3::new(normal[0], normal[1], normal[2]))
                .normalize();
            *normal = [n.x, n.y, n.z];
        }
    }

    /// Returns a transformed copy
    pub fn transformed(mut self, matrix: &Matrix4<f32>) -> Self {
        self.transform(matrix);
        self
    }

    /// Appends another geometry, offsetting its indices
    pub fn merge(&mut self, other: &GeometryData) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Convert to the vertex format used by the renderer
    pub fn to_scene_format(&self) -> (Vec<crate::gfx::scene::vertex::Vertex3D>, Vec<u32>) {
        use crate::gfx::scene::vertex::Vertex3D;

        let vertices: Vec<Vertex3D> = (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Matrix4;

    #[test]
    fn merge_offsets_indices() {
        let mut a = generate_cube();
        let b = generate_cube();
        a.merge(&b);
        assert_eq!(a.vertices.len(), 48);
        assert_eq!(a.indices.len(), 72);
        assert_eq!(*a.indices.iter().max().unwrap(), 47);
    }

    #[test]
    fn transform_moves_positions_not_normal_lengths() {
        let mut cube = generate_cube();
        cube.transform(&Matrix4::from_translation(cgmath::Vector3::new(
            5.0, 0.0, 0.0,
        )));
        assert!((cube.vertices[0][0] - 4.5).abs() < 1e-6);
        for n in &cube.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }
}

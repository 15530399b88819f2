//! # Primitive Shape Generation
//!
//! Functions to generate the basic 3D shapes the scene builders compose:
//! cubes for structure, spheres for foliage and actors, planes for the
//! grounds, cylinders for trunks and pillars, and cones for the conifers.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes and
/// per-face normals pointing outward.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    let positions = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    let normals = [
        [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.normals = normals.to_vec();

    data.indices = vec![
        0, 1, 2,    2, 3, 0,
        4, 5, 6,    6, 7, 4,
        8, 9, 10,   10, 11, 8,
        12, 13, 14, 14, 15, 12,
        16, 17, 18, 18, 19, 16,
        20, 21, 22, 22, 23, 20,
    ];

    data
}

/// Generate a UV sphere of radius 1.0 centered at the origin
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI

            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.vertices.push([x, y, z]);
            // Normal equals position on a unit sphere
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate a horizontal plane in the XZ plane with its normal pointing up
///
/// # Arguments
/// * `width` - Extent along X
/// * `depth` - Extent along Z
/// * `width_segments` - Subdivisions along X
/// * `depth_segments` - Subdivisions along Z
pub fn generate_plane(
    width: f32,
    depth: f32,
    width_segments: u32,
    depth_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for z in 0..=d_segs {
        let v = z as f32 / d_segs as f32;
        let pos_z = (v - 0.5) * depth;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, 0.0, pos_z]);
            data.normals.push([0.0, 1.0, 0.0]);
        }
    }

    // Counter-clockwise when viewed from above (+Y)
    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.push(i);
            data.indices.push(i + 1);
            data.indices.push(next_row);

            data.indices.push(next_row);
            data.indices.push(i + 1);
            data.indices.push(next_row + 1);
        }
    }

    data
}

/// Generate a capped cylinder along the Y axis
///
/// # Arguments
/// * `radius` - Radius of the cylinder
/// * `height` - Height, extending from -height/2 to height/2 in Y
/// * `segments` - Number of circular segments
pub fn generate_cylinder(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Side vertices, bottom and top ring interleaved
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let x = radius * cos_a;
        let z = radius * sin_a;

        data.vertices.push([x, -half_height, z]);
        data.normals.push([cos_a, 0.0, sin_a]);

        data.vertices.push([x, half_height, z]);
        data.normals.push([cos_a, 0.0, sin_a]);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = (i + 1) * 2;
        let top_next = bottom_next + 1;

        data.indices.push(bottom_current);
        data.indices.push(bottom_next);
        data.indices.push(top_current);

        data.indices.push(top_current);
        data.indices.push(bottom_next);
        data.indices.push(top_next);
    }

    // Cap center vertices
    let center_bottom_idx = data.vertices.len() as u32;
    data.vertices.push([0.0, -half_height, 0.0]);
    data.normals.push([0.0, -1.0, 0.0]);

    let center_top_idx = data.vertices.len() as u32;
    data.vertices.push([0.0, half_height, 0.0]);
    data.normals.push([0.0, 1.0, 0.0]);

    for i in 0..segs {
        let current = i * 2;
        let next = (i + 1) * 2;

        data.indices.push(center_bottom_idx);
        data.indices.push(current);
        data.indices.push(next);
    }

    for i in 0..segs {
        let current = i * 2 + 1;
        let next = (i + 1) * 2 + 1;

        data.indices.push(center_top_idx);
        data.indices.push(next);
        data.indices.push(current);
    }

    data
}

/// Generate a cone along the Y axis with a closed base
///
/// The base circle sits at -height/2 and the apex at +height/2.
///
/// # Arguments
/// * `radius` - Base radius
/// * `height` - Height along Y
/// * `segments` - Number of circular segments
pub fn generate_cone(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Slant normal: radial component scaled by height, Y by radius
    let slant_len = (radius * radius + height * height).sqrt();
    let ny = radius / slant_len;
    let nr = height / slant_len;

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();

        data.vertices.push([radius * cos_a, -half_height, radius * sin_a]);
        data.normals.push([nr * cos_a, ny, nr * sin_a]);

        // One apex vertex per segment keeps the slant normals smooth
        data.vertices.push([0.0, half_height, 0.0]);
        data.normals.push([nr * cos_a, ny, nr * sin_a]);
    }

    for i in 0..segs {
        let base_current = i * 2;
        let apex_current = base_current + 1;
        let base_next = (i + 1) * 2;

        data.indices.push(base_current);
        data.indices.push(base_next);
        data.indices.push(apex_current);
    }

    // Base cap
    let center_idx = data.vertices.len() as u32;
    data.vertices.push([0.0, -half_height, 0.0]);
    data.normals.push([0.0, -1.0, 0.0]);

    for i in 0..segs {
        let current = i * 2;
        let next = (i + 1) * 2;

        data.indices.push(center_idx);
        data.indices.push(current);
        data.indices.push(next);
    }

    data
}

/// Generate a flat disc at y = 0 facing up
///
/// A triangle fan around the origin, used for the grass circles under
/// the trees.
pub fn generate_disc(radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);

    data.vertices.push([0.0, 0.0, 0.0]);
    data.normals.push([0.0, 1.0, 0.0]);

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        data.vertices.push([radius * angle.cos(), 0.0, radius * angle.sin()]);
        data.normals.push([0.0, 1.0, 0.0]);
    }

    for i in 0..segs {
        data.indices.push(0);
        data.indices.push(i + 2);
        data.indices.push(i + 1);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert!(sphere.vertices.len() > 0);
        assert!(sphere.indices.len() > 0);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        for n in &plane.normals {
            assert_eq!(*n, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_cylinder_generation() {
        let cyl = generate_cylinder(1.0, 2.0, 12);
        assert_eq!(cyl.vertices.len(), (13 * 2 + 2) as usize);
        // 12 side quads + 2 caps of 12 triangles each
        assert_eq!(cyl.triangle_count(), 12 * 2 + 24);
    }

    #[test]
    fn test_cone_generation() {
        let cone = generate_cone(1.0, 2.0, 8);
        // 8 slant triangles + 8 base triangles
        assert_eq!(cone.triangle_count(), 16);
        let max_y = cone
            .vertices
            .iter()
            .map(|v| v[1])
            .fold(f32::MIN, f32::max);
        assert!((max_y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_disc_generation() {
        let disc = generate_disc(3.5, 16);
        assert_eq!(disc.triangle_count(), 16);
        for v in &disc.vertices {
            assert_eq!(v[1], 0.0);
        }
        for n in &disc.normals {
            assert_eq!(*n, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn generators_are_deterministic() {
        let a = generate_sphere(16, 12);
        let b = generate_sphere(16, 12);
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.indices, b.indices);
    }
}

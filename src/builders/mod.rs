//! Procedural builders for the static campus
//!
//! Each builder registers its materials on the scene and adds a small
//! number of objects, welding parts that share a material into one mesh
//! with [`GeometryData::merge`]. The builders only produce static
//! scenery; animated actors live in the animation subsystem.

pub mod building;
pub mod grounds;
pub mod tree;

pub use building::build_school;
pub use grounds::{build_grounds, GroundsHandles};
pub use tree::{build_forest, build_signature_tree};

use crate::gfx::geometry::{generate_cube, GeometryData};
use crate::recipe::Rgb;
use cgmath::{Matrix4, Vector3};

/// Expands a `0xRRGGBB` color into the `[r, g, b, a]` form materials use.
pub(crate) fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let [r, g, b] = Rgb::from_hex(hex).as_array();
    [r, g, b, alpha]
}

/// A unit cube scaled to `(w, h, d)` and moved to `(x, y, z)`.
pub(crate) fn boxed(w: f32, h: f32, d: f32, x: f32, y: f32, z: f32) -> GeometryData {
    generate_cube().transformed(
        &(Matrix4::from_translation(Vector3::new(x, y, z))
            * Matrix4::from_nonuniform_scale(w, h, d)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_decodes_channels() {
        let c = rgba(0x4169E1, 0.9);
        assert!((c[0] - 65.0 / 255.0).abs() < 1e-6);
        assert!((c[1] - 105.0 / 255.0).abs() < 1e-6);
        assert!((c[2] - 225.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[3], 0.9);
    }

    #[test]
    fn boxed_bakes_scale_and_translation() {
        let g = boxed(2.0, 4.0, 6.0, 10.0, 0.0, 0.0);
        let max_x = g.vertices.iter().map(|v| v[0]).fold(f32::MIN, f32::max);
        let max_y = g.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        assert!((max_x - 11.0).abs() < 1e-5);
        assert!((max_y - 2.0).abs() < 1e-5);
    }
}

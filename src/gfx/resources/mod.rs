pub mod global_bindings;
pub mod material;
pub mod texture_resource;

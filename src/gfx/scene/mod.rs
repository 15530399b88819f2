pub mod scene;
pub mod vertex;

pub use scene::{ObjectId, Scene};

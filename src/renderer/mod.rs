//! Backend-agnostic rendering
//!
//! Builds triangle lists from a read-only `GameState`. Any GPU or canvas
//! backend can upload the vertices as-is.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::build_scene;
pub use vertex::Vertex;

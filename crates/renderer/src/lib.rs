//! Render-side seam for OpenSky: mesh data, the scene backend that owns
//! uploaded meshes, and the chase camera.

pub mod camera;
pub mod mesh;
pub mod scene;
pub mod vertex;

pub use camera::*;
pub use mesh::*;
pub use scene::*;
pub use vertex::*;

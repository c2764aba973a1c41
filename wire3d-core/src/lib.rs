/// Wire3D Core Library - wireframe geometry, projection and rasterization
///
/// This library provides the stateless pipeline behind the ASCII renderer:
/// mesh normalization, rotation, perspective projection, integer line
/// drawing and frame compositing. It performs no terminal I/O.

pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod projection;
pub mod raster;
pub mod transform;

// Re-export commonly used types
pub use config::{Glyphs, OutOfBoundsPolicy, RenderConfig};
pub use error::{MeshError, RenderError};
pub use frame::{FrameRenderer, Grid};
pub use geometry::{Edge, Mesh, MeshConfig, Preset, Vertex, VertexId};
pub use projection::{Camera, ScreenPoint};
pub use raster::{rasterize, Line};
pub use transform::{RotationPolicy, RotationState, Transform};

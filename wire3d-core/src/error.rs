//! Error types for mesh construction and frame rendering.

use thiserror::Error;

/// Errors raised while building or normalizing a mesh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// Every vertex sits at the origin, so there is nothing to scale by
    #[error("Degenerate mesh: all {vertex_count} vertices are at the origin")]
    Degenerate { vertex_count: usize },

    /// A mesh needs at least one vertex
    #[error("Mesh has no vertices")]
    Empty,

    /// Edge references a vertex that does not exist (1-based index)
    #[error("Edge {edge} references vertex {index}, valid range is 1..={vertex_count}")]
    EdgeOutOfRange {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },

    /// Edge joins a vertex to itself (1-based index)
    #[error("Edge {edge} joins vertex {index} to itself")]
    SelfLoop { edge: usize, index: usize },
}

/// Errors raised while projecting and compositing a frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// Vertex depth plus camera distance is zero
    #[error("Projection singularity at vertex {vertex}: z + d = {depth}")]
    ProjectionSingularity { vertex: usize, depth: f64 },

    /// A projected cell lies outside the grid
    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// Render configuration failed validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl RenderError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Wireframe geometry: vertices, validated edges and built-in meshes
use nalgebra::Point3;

use crate::error::MeshError;
use crate::transform::RotationPolicy;

/// A model-space vertex
pub type Vertex = Point3<f64>;

/// Index into a mesh's vertex list (0-based, validated at construction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An unordered pair of distinct vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: VertexId,
    pub b: VertexId,
}

/// A wireframe mesh with immutable vertices and edges
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Mesh {
    /// Build a mesh from 1-based edge pairs, rejecting bad indices and self loops.
    pub fn from_one_based(
        vertices: Vec<Vertex>,
        edges: &[(usize, usize)],
    ) -> Result<Self, MeshError> {
        if vertices.is_empty() {
            return Err(MeshError::Empty);
        }

        let vertex_count = vertices.len();
        let resolve = |edge: usize, index: usize| {
            if index == 0 || index > vertex_count {
                Err(MeshError::EdgeOutOfRange {
                    edge,
                    index,
                    vertex_count,
                })
            } else {
                Ok(VertexId(index - 1))
            }
        };

        let edges = edges
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| {
                if a == b {
                    return Err(MeshError::SelfLoop { edge: i, index: a });
                }
                Ok(Edge {
                    a: resolve(i, a)?,
                    b: resolve(i, b)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { vertices, edges })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    /// Largest absolute coordinate over all vertices
    pub fn max_extent(&self) -> f64 {
        self.vertices
            .iter()
            .flat_map(|v| v.coords.iter())
            .fold(0.0_f64, |acc, c| acc.max(c.abs()))
    }

    /// Scale every vertex so the largest coordinate magnitude becomes 1.
    ///
    /// Returns the scale factor that was applied.
    pub fn normalize(&mut self) -> Result<f64, MeshError> {
        let max_elem = self.max_extent();
        if max_elem == 0.0 {
            return Err(MeshError::Degenerate {
                vertex_count: self.vertices.len(),
            });
        }

        let scale = 1.0 / max_elem;
        for vertex in &mut self.vertices {
            vertex.coords *= scale;
        }
        Ok(scale)
    }
}

/// Startup description of a mesh
#[derive(Debug, Clone, PartialEq)]
pub struct MeshConfig {
    pub vertices: Vec<Vertex>,
    /// 1-based vertex index pairs
    pub edges: Vec<(usize, usize)>,
    pub normalize: bool,
}

impl MeshConfig {
    /// Validate the edges and normalize once if requested
    pub fn build(&self) -> Result<Mesh, MeshError> {
        let mut mesh = Mesh::from_one_based(self.vertices.clone(), &self.edges)?;
        if self.normalize {
            let scale = mesh.normalize()?;
            log::info!("Normalized {} vertices by {:.4}", mesh.vertices.len(), scale);
        }
        Ok(mesh)
    }
}

/// Edge list shared by the hexahedral presets: two rings of four plus
/// the four connectors between them.
const HEXAHEDRON_EDGES: [(usize, usize); 12] = [
    (1, 2),
    (2, 3),
    (3, 4),
    (4, 1),
    (5, 6),
    (6, 7),
    (7, 8),
    (8, 5),
    (1, 5),
    (2, 6),
    (3, 7),
    (4, 8),
];

/// Built-in mesh and rotation pairings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Irregular hexahedron, normalized, all axes spinning
    #[default]
    SkewedBox,
    /// Unit cube, already unit-scaled, spinning about X and Z
    UnitCube,
}

impl Preset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "box" | "skewed-box" => Some(Self::SkewedBox),
            "cube" | "unit-cube" => Some(Self::UnitCube),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SkewedBox => "box",
            Self::UnitCube => "cube",
        }
    }

    pub fn mesh_config(self) -> MeshConfig {
        let vertices = match self {
            Self::SkewedBox => vec![
                Point3::new(-2.0, -2.0, -2.0),
                Point3::new(1.0, -1.0, -1.0),
                Point3::new(2.0, 2.0, -2.0),
                Point3::new(-2.0, 2.0, -2.0),
                Point3::new(-2.5, -2.5, 2.5),
                Point3::new(2.0, -2.0, 2.0),
                Point3::new(2.0, 2.0, 2.0),
                Point3::new(-2.0, 2.0, 2.0),
            ],
            Self::UnitCube => vec![
                Point3::new(-1.0, -1.0, -1.0),
                Point3::new(1.0, -1.0, -1.0),
                Point3::new(1.0, 1.0, -1.0),
                Point3::new(-1.0, 1.0, -1.0),
                Point3::new(-1.0, -1.0, 1.0),
                Point3::new(1.0, -1.0, 1.0),
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(-1.0, 1.0, 1.0),
            ],
        };

        MeshConfig {
            vertices,
            edges: HEXAHEDRON_EDGES.to_vec(),
            normalize: matches!(self, Self::SkewedBox),
        }
    }

    pub fn rotation_policy(self) -> RotationPolicy {
        match self {
            Self::SkewedBox => RotationPolicy::WrapModulo,
            Self::UnitCube => RotationPolicy::ResetAtThreshold,
        }
    }
}

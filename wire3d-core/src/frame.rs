/// Occupancy grid and frame compositing
use crate::config::{Glyphs, OutOfBoundsPolicy, RenderConfig};
use crate::error::RenderError;
use crate::geometry::Mesh;
use crate::projection::{Camera, ScreenPoint};
use crate::raster::{clip_segment, rasterize};
use crate::transform::RotationState;

/// Frame-scoped occupancy grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, point: ScreenPoint) -> Option<usize> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        self.index(point).is_some()
    }

    /// Nearest in-grid cell, or `None` for an empty grid
    pub fn clamp(&self, point: ScreenPoint) -> Option<ScreenPoint> {
        if self.cells.is_empty() {
            return None;
        }
        Some(ScreenPoint::new(
            point.x.clamp(0, self.width as i32 - 1),
            point.y.clamp(0, self.height as i32 - 1),
        ))
    }

    pub fn is_lit(&self, point: ScreenPoint) -> bool {
        self.index(point).map_or(false, |i| self.cells[i])
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Light a cell, resolving off-grid points according to `policy`.
    ///
    /// Returns whether a cell was written.
    pub fn mark(&mut self, point: ScreenPoint, policy: OutOfBoundsPolicy) -> Result<bool, RenderError> {
        if let Some(i) = self.index(point) {
            self.cells[i] = true;
            return Ok(true);
        }

        match policy {
            OutOfBoundsPolicy::Skip => {
                log::debug!("Skipping off-grid cell ({}, {})", point.x, point.y);
                Ok(false)
            }
            OutOfBoundsPolicy::Clamp => {
                let Some(pinned) = self.clamp(point) else {
                    return Ok(false);
                };
                log::debug!(
                    "Clamping off-grid cell ({}, {}) to ({}, {})",
                    point.x,
                    point.y,
                    pinned.x,
                    pinned.y
                );
                self.cells[pinned.y as usize * self.width + pinned.x as usize] = true;
                Ok(true)
            }
            OutOfBoundsPolicy::Fail => Err(self.out_of_bounds(point)),
        }
    }

    fn out_of_bounds(&self, point: ScreenPoint) -> RenderError {
        RenderError::OutOfBounds {
            x: point.x,
            y: point.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Fit an edge into the grid before it is walked.
    ///
    /// `Skip` clips the segment to the grid, `Clamp` pins both endpoints,
    /// `Fail` rejects an off-grid endpoint. Only on-grid cells are ever
    /// visited, however far the endpoints were thrown.
    pub fn fit_segment(
        &self,
        start: ScreenPoint,
        end: ScreenPoint,
        policy: OutOfBoundsPolicy,
    ) -> Result<Option<(ScreenPoint, ScreenPoint)>, RenderError> {
        match policy {
            OutOfBoundsPolicy::Skip => Ok(clip_segment(start, end, self.width, self.height)),
            OutOfBoundsPolicy::Clamp => Ok(self.clamp(start).zip(self.clamp(end))),
            OutOfBoundsPolicy::Fail => {
                for point in [start, end] {
                    if !self.contains(point) {
                        return Err(self.out_of_bounds(point));
                    }
                }
                Ok(Some((start, end)))
            }
        }
    }

    /// Serialize top row first, each cell as ` <glyph> `, rows joined by newlines
    pub fn render(&self, glyphs: Glyphs) -> String {
        self.rows(glyphs).collect::<Vec<_>>().join("\n")
    }

    /// Serialized rows, top row first
    pub fn rows(&self, glyphs: Glyphs) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks(self.width.max(1)).map(move |row| {
            let mut line = String::with_capacity(row.len() * 3);
            for &lit in row {
                line.push(' ');
                line.push(if lit { glyphs.filled } else { glyphs.blank });
                line.push(' ');
            }
            line
        })
    }
}

/// Turns a mesh and rotation into one frame of text
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    camera: Camera,
    glyphs: Glyphs,
    policy: OutOfBoundsPolicy,
}

impl FrameRenderer {
    pub fn new(config: &RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Self {
            camera: Camera::from_config(config),
            glyphs: config.glyphs,
            policy: config.out_of_bounds,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mark projected vertices and rasterized edges on a fresh grid
    pub fn compose(&self, mesh: &Mesh, rotation: &RotationState) -> Result<Grid, RenderError> {
        let mut grid = Grid::new(self.camera.width, self.camera.height);
        let projected = self.camera.project_mesh(mesh, rotation)?;

        for &point in &projected {
            grid.mark(point, self.policy)?;
        }

        for edge in mesh.edges() {
            let a = projected[edge.a.index()];
            let b = projected[edge.b.index()];
            let Some((a, b)) = grid.fit_segment(a, b, self.policy)? else {
                continue;
            };
            for point in rasterize(a.x, a.y, b.x, b.y) {
                grid.mark(point, self.policy)?;
            }
        }

        log::trace!(
            "Composed frame at ({:.3}, {:.3}, {:.3}): {} cells lit",
            rotation.x,
            rotation.y,
            rotation.z,
            grid.lit_count()
        );
        Ok(grid)
    }

    /// Compose and serialize one frame
    pub fn render_frame(&self, mesh: &Mesh, rotation: &RotationState) -> Result<String, RenderError> {
        Ok(self.compose(mesh, rotation)?.render(self.glyphs))
    }
}

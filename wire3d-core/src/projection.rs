/// Perspective projection from model space into grid coordinates
use nalgebra::{Matrix3, Point3};

use crate::config::{RenderConfig, EPSILON};
use crate::error::RenderError;
use crate::geometry::Mesh;
use crate::transform::{RotationState, Transform};

/// Integer grid coordinates: column `x`, row `y` (row 0 is the top)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fixed camera on the -Z axis, `distance` units from the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub distance: f64,
    pub width: usize,
    pub height: usize,
}

impl Camera {
    pub fn new(distance: f64, width: usize, height: usize) -> Self {
        Self {
            distance,
            width,
            height,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.camera_distance, config.grid_width, config.grid_height)
    }

    /// Project a rotated point to continuous grid space.
    ///
    /// `vertex` only labels the error when the depth denominator vanishes.
    pub fn project(&self, point: &Point3<f64>, vertex: usize) -> Result<(f64, f64), RenderError> {
        let depth = point.z + self.distance;
        if depth.abs() < EPSILON || !depth.is_finite() {
            return Err(RenderError::ProjectionSingularity { vertex, depth });
        }

        let x_proj = point.x / depth;
        let y_proj = point.y / depth;

        let screen_x = (x_proj + 1.0) * (self.width as f64 - 1.0) * 0.5;
        let screen_y = (1.0 - y_proj) * (self.height as f64 - 1.0) * 0.5;

        if !screen_x.is_finite() || !screen_y.is_finite() {
            return Err(RenderError::ProjectionSingularity { vertex, depth });
        }
        Ok((screen_x, screen_y))
    }

    /// Project and truncate toward zero to a grid cell.
    ///
    /// A point so close to the camera plane that its cell does not fit in
    /// `i32` is reported as a singularity rather than saturated.
    pub fn project_to_screen(
        &self,
        point: &Point3<f64>,
        vertex: usize,
    ) -> Result<ScreenPoint, RenderError> {
        let (x, y) = self.project(point, vertex)?;
        let representable = |c: f64| c.trunc() >= f64::from(i32::MIN) && c.trunc() <= f64::from(i32::MAX);
        if !representable(x) || !representable(y) {
            return Err(RenderError::ProjectionSingularity {
                vertex,
                depth: point.z + self.distance,
            });
        }
        Ok(ScreenPoint::new(x as i32, y as i32))
    }

    /// Rotate and project every mesh vertex, in vertex order
    pub fn project_mesh(
        &self,
        mesh: &Mesh,
        rotation: &RotationState,
    ) -> Result<Vec<ScreenPoint>, RenderError> {
        let matrix: Matrix3<f64> = Transform::rotation_matrix(rotation);
        mesh.vertices()
            .iter()
            .enumerate()
            .map(|(i, v)| self.project_to_screen(&Transform::apply(&matrix, v), i))
            .collect()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

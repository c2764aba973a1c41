//! Startup-time render configuration and its defaults.

use std::time::Duration;

use crate::error::RenderError;
use crate::transform::RotationPolicy;

/// Tolerance used when guarding divisions against a zero denominator.
pub const EPSILON: f64 = 1e-9;

/// Default output grid width in cells.
pub const DEFAULT_GRID_WIDTH: usize = 40;

/// Default output grid height in cells.
pub const DEFAULT_GRID_HEIGHT: usize = 40;

/// Distance from the camera to the model-space origin.
pub const DEFAULT_CAMERA_DISTANCE: f64 = 3.0;

/// Rotation added per tick, in radians.
pub const DEFAULT_ROTATION_DELTA: f64 = std::f64::consts::PI * 0.01;

/// Target frames per second.
pub const DEFAULT_FPS: u32 = 60;

/// Glyph pair used to serialize the occupancy grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub blank: char,
    pub filled: char,
}

impl Glyphs {
    pub fn new(blank: char, filled: char) -> Self {
        Self { blank, filled }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::new(' ', '#')
    }
}

/// What to do with a cell that projects outside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfBoundsPolicy {
    /// Drop the cell
    #[default]
    Skip,
    /// Pin the cell to the nearest border cell
    Clamp,
    /// Abort the frame with [`RenderError::OutOfBounds`]
    Fail,
}

/// Everything the pipeline needs besides the mesh itself
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub camera_distance: f64,
    pub rotation_delta: f64,
    pub fps: u32,
    pub glyphs: Glyphs,
    pub out_of_bounds: OutOfBoundsPolicy,
}

impl RenderConfig {
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    pub fn with_camera_distance(mut self, distance: f64) -> Self {
        self.camera_distance = distance;
        self
    }

    pub fn with_out_of_bounds(mut self, policy: OutOfBoundsPolicy) -> Self {
        self.out_of_bounds = policy;
        self
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(RenderError::invalid_config(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if !self.camera_distance.is_finite() || self.camera_distance <= 0.0 {
            return Err(RenderError::invalid_config(format!(
                "camera distance must be positive, got {}",
                self.camera_distance
            )));
        }
        if !self.rotation_delta.is_finite() {
            return Err(RenderError::invalid_config("rotation delta must be finite"));
        }
        if self.fps == 0 {
            return Err(RenderError::invalid_config("frame rate must be at least 1"));
        }
        Ok(())
    }

    /// Reject a delta the rotation policy cannot keep inside `[0, 2π)`.
    ///
    /// `ResetAtThreshold` only resets on the way up, so it needs a
    /// non-negative delta. `WrapModulo` accepts either sign.
    pub fn validate_rotation(&self, policy: RotationPolicy) -> Result<(), RenderError> {
        self.validate()?;
        if policy == RotationPolicy::ResetAtThreshold && self.rotation_delta < 0.0 {
            return Err(RenderError::invalid_config(format!(
                "rotation delta must be non-negative for {:?}, got {}",
                policy, self.rotation_delta
            )));
        }
        Ok(())
    }

    /// Fixed sleep between frames.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            rotation_delta: DEFAULT_ROTATION_DELTA,
            fps: DEFAULT_FPS,
            glyphs: Glyphs::default(),
            out_of_bounds: OutOfBoundsPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 40);
        assert_eq!(config.glyphs, Glyphs::new(' ', '#'));
    }

    #[test]
    fn test_frame_duration() {
        let config = RenderConfig::default();
        assert_eq!(config.frame_duration(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_negative_delta_needs_wrapping_policy() {
        let mut config = RenderConfig::default();
        config.rotation_delta = -0.1;
        assert!(config.validate().is_ok());
        assert!(config.validate_rotation(RotationPolicy::WrapModulo).is_ok());
        assert!(matches!(
            config.validate_rotation(RotationPolicy::ResetAtThreshold),
            Err(RenderError::InvalidConfig { .. })
        ));

        let default = RenderConfig::default();
        assert!(default.validate_rotation(RotationPolicy::ResetAtThreshold).is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let empty = RenderConfig::default().with_grid(0, 40);
        assert!(matches!(
            empty.validate(),
            Err(RenderError::InvalidConfig { .. })
        ));

        let behind = RenderConfig::default().with_camera_distance(-1.0);
        assert!(behind.validate().is_err());

        let mut stalled = RenderConfig::default();
        stalled.fps = 0;
        assert!(stalled.validate().is_err());

        let mut spinning = RenderConfig::default();
        spinning.rotation_delta = f64::NAN;
        assert!(spinning.validate().is_err());
    }
}

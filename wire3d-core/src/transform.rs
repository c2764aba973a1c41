/// 3D rotation matrices and rotation state
use std::f64::consts::TAU;

use nalgebra::{Matrix3, Point3};

/// How the rotation state advances each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    /// Every axis advances by delta, then wraps with a Euclidean remainder.
    /// The excess past a full turn is kept.
    #[default]
    WrapModulo,
    /// Only X and Z advance. An axis that reaches a full turn snaps back to
    /// exactly zero, dropping the excess.
    ResetAtThreshold,
}

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Advance by one tick under the given policy.
    pub fn advance(&mut self, delta: f64, policy: RotationPolicy) {
        match policy {
            RotationPolicy::WrapModulo => {
                self.x = wrap(self.x + delta);
                self.y = wrap(self.y + delta);
                self.z = wrap(self.z + delta);
            }
            RotationPolicy::ResetAtThreshold => {
                self.x = reset_at_threshold(self.x + delta);
                self.z = reset_at_threshold(self.z + delta);
            }
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

fn wrap(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

fn reset_at_threshold(angle: f64) -> f64 {
    if angle >= TAU {
        0.0
    } else {
        angle
    }
}

/// Rotation matrix builder
pub struct Transform;

impl Transform {
    /// Rotation about the X axis
    pub fn rotation_x(theta: f64) -> Matrix3<f64> {
        let (s, c) = theta.sin_cos();
        Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, c, -s,
            0.0, s, c,
        )
    }

    /// Rotation about the Y axis
    pub fn rotation_y(theta: f64) -> Matrix3<f64> {
        let (s, c) = theta.sin_cos();
        Matrix3::new(
            c, 0.0, s,
            0.0, 1.0, 0.0,
            -s, 0.0, c,
        )
    }

    /// Rotation about the Z axis
    pub fn rotation_z(theta: f64) -> Matrix3<f64> {
        let (s, c) = theta.sin_cos();
        Matrix3::new(
            c, -s, 0.0,
            s, c, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    /// Combined rotation `Rx * Ry * Rz`.
    ///
    /// The order matters: Z is the innermost factor, so it acts on the
    /// vertex first.
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix3<f64> {
        Self::rotation_x(rotation.x) * Self::rotation_y(rotation.y) * Self::rotation_z(rotation.z)
    }

    /// Apply a rotation matrix to a model-space point
    pub fn apply(matrix: &Matrix3<f64>, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(matrix * point.coords)
    }
}

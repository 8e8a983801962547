use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

use ultraviolet::{DVec2, DVec3};

/// Vector math the engine needs, implemented for the planar and spatial
/// `ultraviolet` double-precision vectors.
pub trait Vector:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + AddAssign
{
    /// Number of components.
    const DIM: usize;

    fn zero() -> Self;

    /// Euclidean norm.
    fn mag(&self) -> f64;

    fn mag_sq(&self) -> f64;

    /// True when every component is finite.
    fn is_finite(&self) -> bool;

    /// Builds a vector from exactly `DIM` components.
    fn from_slice(components: &[f64]) -> Option<Self>;

    fn to_vec(&self) -> Vec<f64>;
}

impl Vector for DVec2 {
    const DIM: usize = 2;

    fn zero() -> Self {
        DVec2::zero()
    }

    fn mag(&self) -> f64 {
        DVec2::mag(self)
    }

    fn mag_sq(&self) -> f64 {
        DVec2::mag_sq(self)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn from_slice(components: &[f64]) -> Option<Self> {
        match *components {
            [x, y] => Some(DVec2::new(x, y)),
            _ => None,
        }
    }

    fn to_vec(&self) -> Vec<f64> {
        vec![self.x, self.y]
    }
}

impl Vector for DVec3 {
    const DIM: usize = 3;

    fn zero() -> Self {
        DVec3::zero()
    }

    fn mag(&self) -> f64 {
        DVec3::mag(self)
    }

    fn mag_sq(&self) -> f64 {
        DVec3::mag_sq(self)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    fn from_slice(components: &[f64]) -> Option<Self> {
        match *components {
            [x, y, z] => Some(DVec3::new(x, y, z)),
            _ => None,
        }
    }

    fn to_vec(&self) -> Vec<f64> {
        vec![self.x, self.y, self.z]
    }
}

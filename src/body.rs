use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::vector::Vector;

/// Represents a point mass in the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Body<V> {
    /// Optional display name.
    pub label: Option<String>,
    /// Position vector.
    pub pos: V,
    /// Velocity vector.
    pub vel: V,
    /// Acceleration from the most recent step (zero before the first step).
    pub acc: V,
    /// Mass of the body.
    pub mass: f64,
}

impl<V: Vector> Body<V> {
    /// Creates a new Body with the given properties.
    /// Initial acceleration is zero.
    pub fn new(pos: V, vel: V, mass: f64) -> Self {
        Self {
            label: None,
            pos,
            vel,
            acc: V::zero(),
            mass,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn speed(&self) -> f64 {
        self.vel.mag()
    }

    pub fn momentum(&self) -> V {
        self.vel * self.mass
    }

    /// Position and velocity after one step of `dt` under acceleration `acc`.
    ///
    /// The position advances with the velocity from before this step's
    /// velocity update; the velocity then advances with `acc`.
    pub fn next_state(&self, acc: V, dt: f64) -> (V, V) {
        let pos = self.pos + self.vel * dt;
        let vel = self.vel + acc * dt;
        (pos, vel)
    }

    /// Checks the construction-time invariants for the body at `index`.
    pub(crate) fn validate(&self, index: usize) -> Result<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SimError::invalid(format!(
                "body {index}: mass must be finite and > 0, got {}",
                self.mass
            )));
        }
        if !self.pos.is_finite() {
            return Err(SimError::invalid(format!(
                "body {index}: position must be finite"
            )));
        }
        if !self.vel.is_finite() {
            return Err(SimError::invalid(format!(
                "body {index}: velocity must be finite"
            )));
        }
        Ok(())
    }
}

/// Construction input for one body, independent of dimensionality.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub position: Vec<f64>,
    /// Empty means the zero vector.
    #[serde(default)]
    pub velocity: Vec<f64>,
    pub mass: f64,
}

impl BodySpec {
    pub fn new(position: Vec<f64>, velocity: Vec<f64>, mass: f64) -> Self {
        Self {
            label: None,
            position,
            velocity,
            mass,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Converts into a body of a concrete dimensionality.
    pub fn to_body<V: Vector>(&self, index: usize) -> Result<Body<V>> {
        let pos = V::from_slice(&self.position).ok_or_else(|| {
            SimError::invalid(format!(
                "body {index}: position has {} components, expected {}",
                self.position.len(),
                V::DIM
            ))
        })?;
        let vel = if self.velocity.is_empty() {
            V::zero()
        } else {
            V::from_slice(&self.velocity).ok_or_else(|| {
                SimError::invalid(format!(
                    "body {index}: velocity has {} components, expected {}",
                    self.velocity.len(),
                    V::DIM
                ))
            })?
        };

        let mut body = Body::new(pos, vel, self.mass);
        body.label = self.label.clone();
        Ok(body)
    }
}

impl<V: Vector> From<&Body<V>> for BodySpec {
    fn from(body: &Body<V>) -> Self {
        Self {
            label: body.label.clone(),
            position: body.pos.to_vec(),
            velocity: body.vel.to_vec(),
            mass: body.mass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ultraviolet::{DVec2, DVec3};

    #[test]
    fn next_state_uses_pre_update_velocity() {
        let body = Body::new(DVec2::new(0.0, -5.0), DVec2::new(3.0, 0.0), 1000.0);
        let (pos, vel) = body.next_state(DVec2::new(0.0, 10.0), 0.01);

        assert_eq!(pos, DVec2::new(3.0 * 0.01, -5.0));
        assert_eq!(vel, DVec2::new(3.0, 10.0 * 0.01));
    }

    #[test]
    fn spec_without_velocity_is_at_rest() {
        let spec = BodySpec::new(vec![1.0, 2.0, 3.0], vec![], 5.0).with_label("probe");
        let body: Body<DVec3> = spec.to_body(0).unwrap();

        assert_eq!(body.vel, DVec3::zero());
        assert_eq!(body.acc, DVec3::zero());
        assert_eq!(body.label.as_deref(), Some("probe"));
    }

    #[test]
    fn spec_dimension_mismatch_is_rejected() {
        let spec = BodySpec::new(vec![1.0, 2.0], vec![0.0, 0.0, 1.0], 5.0);
        let err = spec.to_body::<DVec2>(4).unwrap_err();
        assert!(err.to_string().contains("body 4: velocity has 3 components"));

        let err = spec.to_body::<DVec3>(4).unwrap_err();
        assert!(err.to_string().contains("position has 2 components"));
    }

    #[test]
    fn non_positive_mass_is_rejected() {
        for mass in [0.0, -1.0, f64::NAN] {
            let body = Body::new(DVec2::zero(), DVec2::zero(), mass);
            assert!(matches!(
                body.validate(0),
                Err(SimError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn non_finite_state_is_rejected() {
        let bad_pos = Body::new(DVec2::new(f64::INFINITY, 0.0), DVec2::zero(), 1.0);
        let err = bad_pos.validate(2).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("body 2: position must be finite"));

        let bad_vel = Body::new(DVec3::zero(), DVec3::new(0.0, f64::NAN, 0.0), 1.0);
        let err = bad_vel.validate(0).unwrap_err();
        assert!(err.to_string().contains("body 0: velocity must be finite"));
    }
}

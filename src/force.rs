//! Pairwise Newtonian gravity.

use crate::body::Body;
use crate::vector::Vector;

/// Direct O(n²) Newtonian gravity without softening.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gravity {
    /// Gravitational constant.
    pub g: f64,
}

impl Gravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// Net force on `bodies[target]` from every other body, summed in list order.
    ///
    /// The target is excluded by index, so distinct bodies sharing a position
    /// still interact. Such a pair has zero separation and yields a non-finite
    /// force; callers detect that rather than this function clamping it. A
    /// separation whose square overflows is likewise returned as a NaN force
    /// instead of a silently vanishing pull.
    pub fn force_on<V: Vector>(&self, target: usize, bodies: &[Body<V>]) -> V {
        let t = &bodies[target];
        let mut total = V::zero();

        for (i, s) in bodies.iter().enumerate() {
            if i == target {
                continue;
            }

            let d = s.pos - t.pos;
            let distance = d.mag();
            let distance_sq = distance * distance;
            if !distance_sq.is_finite() {
                return V::zero() * f64::NAN;
            }
            let magnitude = self.g * t.mass * s.mass / distance_sq;
            total += d * magnitude / distance;
        }

        total
    }

    /// Net force on every body, index-aligned with `bodies`.
    pub fn forces<V: Vector>(&self, bodies: &[Body<V>]) -> Vec<V> {
        (0..bodies.len()).map(|i| self.force_on(i, bodies)).collect()
    }

    /// Pairwise potential energy, `-G·mi·mj / r` over unordered pairs.
    pub fn potential_energy<V: Vector>(&self, bodies: &[Body<V>]) -> f64 {
        let mut energy = 0.0;
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                energy -= self.g * a.mass * b.mass / (b.pos - a.pos).mag();
            }
        }
        energy
    }
}

//! Ready-made initial conditions and dimension detection for body lists.

use ultraviolet::{DVec2, DVec3};

use crate::body::{Body, BodySpec};
use crate::error::{Result, SimError};

/// Dimensionality shared by every body of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Planar,
    Spatial,
}

impl Dimension {
    /// Detects the dimension of `specs`. Every position and every non-empty
    /// velocity must have the same length, 2 or 3.
    pub fn of(specs: &[BodySpec]) -> Result<Self> {
        let Some(first) = specs.first() else {
            return Err(SimError::invalid("scenario has no bodies"));
        };

        let dim = first.position.len();
        for (i, spec) in specs.iter().enumerate() {
            if spec.position.len() != dim {
                return Err(SimError::invalid(format!(
                    "body {i}: position has {} components, body 0 has {dim}",
                    spec.position.len()
                )));
            }
            if !spec.velocity.is_empty() && spec.velocity.len() != dim {
                return Err(SimError::invalid(format!(
                    "body {i}: velocity has {} components, position has {dim}",
                    spec.velocity.len()
                )));
            }
        }

        match dim {
            2 => Ok(Dimension::Planar),
            3 => Ok(Dimension::Spatial),
            n => Err(SimError::invalid(format!(
                "bodies must have 2 or 3 components, got {n}"
            ))),
        }
    }
}

/// Light body falling past a heavy one next to a second light body
/// moving the other way.
pub fn three_body() -> Vec<Body<DVec2>> {
    vec![
        Body::new(DVec2::new(0.0, -5.0), DVec2::new(3.0, 0.0), 1000.0),
        Body::new(DVec2::new(0.0, 0.0), DVec2::new(0.0, 0.0), 1e12),
        Body::new(DVec2::new(0.0, 2.0), DVec2::new(-5.6, 0.0), 1000.0),
    ]
}

pub fn asteroid_field() -> Vec<Body<DVec2>> {
    vec![
        Body::new(DVec2::new(0.0, 0.0), DVec2::new(0.0, 0.0), 1e12).with_label("Sun"),
        Body::new(DVec2::new(0.0, -5.0), DVec2::new(3.0, 0.0), 1000.0).with_label("Ceres"),
        Body::new(DVec2::new(0.0, 2.0), DVec2::new(-5.6, 0.0), 1000.0).with_label("Vesta"),
        Body::new(DVec2::new(4.0, 0.0), DVec2::new(0.0, 4.0), 25.0).with_label("Apophis"),
    ]
}

/// The three-body setup lifted out of the plane by small opposite
/// vertical velocities.
pub fn sun_io_apophis() -> Vec<Body<DVec3>> {
    vec![
        Body::new(DVec3::new(0.0, -5.0, 0.0), DVec3::new(3.0, 0.0, -0.05), 1000.0)
            .with_label("Io"),
        Body::new(DVec3::zero(), DVec3::zero(), 1e12).with_label("Sun"),
        Body::new(DVec3::new(0.0, 2.0, 0.0), DVec3::new(-5.6, 0.0, 0.05), 1000.0)
            .with_label("Apophis"),
    ]
}

/// Generates `n` bodies distributed in a uniform disc around a heavy
/// central body, on near-circular orbits for gravitational constant `g`.
/// The same `seed` always gives the same bodies.
pub fn uniform_disc(n: usize, g: f64, seed: u64) -> Vec<Body<DVec2>> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let inner_radius = 25.0;
    let outer_radius = (n as f64).sqrt() * 5.0 + inner_radius;

    let mut bodies: Vec<Body<DVec2>> = Vec::with_capacity(n);
    if n == 0 {
        return bodies;
    }

    bodies.push(Body::new(DVec2::zero(), DVec2::zero(), 1e6).with_label("center"));

    while bodies.len() < n {
        let a = rng.f64() * std::f64::consts::TAU;
        let (sin, cos) = a.sin_cos();

        // Uniform in area between the inner and outer radius
        let t = inner_radius / outer_radius;
        let r = rng.f64() * (1.0 - t * t) + t * t;
        let pos = DVec2::new(cos, sin) * outer_radius * r.sqrt();

        // Unit tangent; scaled to orbital speed below
        let vel = DVec2::new(sin, -cos);

        bodies.push(Body::new(pos, vel, 1.0));
    }

    bodies.sort_by(|a, b| a.pos.mag_sq().total_cmp(&b.pos.mag_sq()));

    // v = sqrt(G·M / r) with M the mass enclosed so far
    let mut enclosed = 0.0;
    for body in bodies.iter_mut() {
        enclosed += body.mass;
        if body.pos == DVec2::zero() {
            continue;
        }
        let v = (g * enclosed / body.pos.mag()).sqrt();
        body.vel *= v;
    }

    bodies
}

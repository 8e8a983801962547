use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use crate::{
    body::{Body, BodySpec},
    config::SimulationConfig,
    error::{Quantity, Result, SimError},
    force::Gravity,
    trajectory::{History, Trajectory},
    vector::Vector,
};

/// Where a simulation is in its fixed-length run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Constructed, no steps taken.
    Uninitialized,
    /// Some but not all steps taken.
    Running,
    /// Every step taken.
    Complete,
    /// A step produced a non-finite value. Terminal.
    Failed,
}

/// How a cancellable run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Complete,
    Cancelled { completed_steps: usize },
}

/// Manages the direct-summation N-body state and the fixed-step run over it.
#[derive(Debug)]
pub struct Simulation<V> {
    config: SimulationConfig,
    gravity: Gravity,
    /// Steps the run takes in total.
    step_count: usize,
    /// Steps taken so far.
    frame: usize,
    /// Collection of all bodies in the simulation. Membership never changes.
    bodies: Vec<Body<V>>,
    history: History<V>,
    failure: Option<SimError>,
    /// Whether to compute forces on rayon's pool.
    use_rayon: bool,
}

impl<V: Vector> Simulation<V> {
    /// Validates the inputs and records the initial sample of every body.
    ///
    /// Any acceleration the bodies carry in is cleared, so the initial
    /// sample always has zero acceleration.
    pub fn new(mut bodies: Vec<Body<V>>, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        for (i, body) in bodies.iter_mut().enumerate() {
            body.validate(i)?;
            body.acc = V::zero();
        }

        let step_count = config.step_count();
        if step_count == 0 {
            warn!(
                "time_step {} and simulation_time {} yield zero steps",
                config.time_step, config.simulation_time
            );
        }
        debug!(
            "Simulation with {} bodies in {}D, {} steps of {}s",
            bodies.len(),
            V::DIM,
            step_count,
            config.time_step
        );

        let history = History::start(&bodies, step_count);

        Ok(Self {
            config,
            gravity: Gravity::new(config.gravitational_constant),
            step_count,
            frame: 0,
            bodies,
            history,
            failure: None,
            use_rayon: false,
        })
    }

    /// Builds the bodies from dimension-independent specs.
    pub fn from_specs(specs: &[BodySpec], config: SimulationConfig) -> Result<Self> {
        let bodies = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| spec.to_body(i))
            .collect::<Result<Vec<_>>>()?;
        Self::new(bodies, config)
    }

    /// Sets whether to use Rayon for the force phase.
    pub fn set_use_rayon(&mut self, use_rayon: bool) {
        self.use_rayon = use_rayon;
    }

    pub fn status(&self) -> Status {
        if self.failure.is_some() {
            Status::Failed
        } else if self.frame == self.step_count {
            Status::Complete
        } else if self.frame == 0 {
            Status::Uninitialized
        } else {
            Status::Running
        }
    }

    /// Advances the simulation by one step.
    ///
    /// Returns `Ok(false)` once the run is complete. After a failure every
    /// call returns the same error.
    pub fn step(&mut self) -> Result<bool> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if self.frame >= self.step_count {
            return Ok(false);
        }

        let step = self.frame + 1;
        let forces = self.attract();

        let next = match self.integrate(step, &forces) {
            Ok(next) => next,
            Err(err) => {
                warn!("Step {} failed: {}", step, err);
                self.failure = Some(err.clone());
                return Err(err);
            }
        };

        for (body, (pos, vel, acc)) in self.bodies.iter_mut().zip(next) {
            body.pos = pos;
            body.vel = vel;
            body.acc = acc;
        }
        self.frame = step;
        self.history.record(self.config.timestamp(step), &self.bodies);
        trace!("Completed step {}/{}", step, self.step_count);

        if self.frame == self.step_count {
            info!(
                "Simulation complete: {} bodies, {} steps",
                self.bodies.len(),
                self.step_count
            );
        }
        Ok(true)
    }

    /// Steps until complete.
    pub fn run(&mut self) -> Result<&History<V>> {
        while self.step()? {}
        Ok(&self.history)
    }

    /// Steps until complete or until `cancel` is set. The flag is only read
    /// between steps.
    pub fn run_until_cancelled(&mut self, cancel: &AtomicBool) -> Result<RunOutcome> {
        loop {
            if self.status() == Status::Complete {
                return Ok(RunOutcome::Complete);
            }
            if cancel.load(Ordering::Relaxed) {
                debug!("Run cancelled after {} steps", self.frame);
                return Ok(RunOutcome::Cancelled {
                    completed_steps: self.frame,
                });
            }
            self.step()?;
        }
    }

    /// Net force on every body from the current, not yet updated, state.
    ///
    /// Every worker reads the same `&[Body]`; collecting the results is the
    /// barrier before any body is written.
    fn attract(&self) -> Vec<V> {
        let gravity = self.gravity;
        let bodies = self.bodies.as_slice();

        if self.use_rayon {
            (0..bodies.len())
                .into_par_iter()
                .map(|i| gravity.force_on(i, bodies))
                .collect()
        } else {
            gravity.forces(bodies)
        }
    }

    /// New position, velocity and acceleration of every body, or the first
    /// non-finite quantity found.
    fn integrate(&self, step: usize, forces: &[V]) -> Result<Vec<(V, V, V)>> {
        let dt = self.config.time_step;
        let degenerate = |body: usize, quantity: Quantity| SimError::DegenerateState {
            step,
            body,
            label: self.bodies[body].label.clone(),
            quantity,
        };

        let mut next = Vec::with_capacity(self.bodies.len());
        for (i, (body, &force)) in self.bodies.iter().zip(forces).enumerate() {
            if !force.is_finite() {
                return Err(degenerate(i, Quantity::Force));
            }
            let acc = force / body.mass;
            if !acc.is_finite() {
                return Err(degenerate(i, Quantity::Acceleration));
            }

            let (pos, vel) = body.next_state(acc, dt);
            if !pos.is_finite() {
                return Err(degenerate(i, Quantity::Position));
            }
            if !vel.is_finite() {
                return Err(degenerate(i, Quantity::Velocity));
            }
            next.push((pos, vel, acc));
        }
        Ok(next)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn bodies(&self) -> &[Body<V>] {
        &self.bodies
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn completed_steps(&self) -> usize {
        self.frame
    }

    /// The error that stopped the run, if any.
    pub fn failure(&self) -> Option<&SimError> {
        self.failure.as_ref()
    }

    pub fn history(&self) -> &History<V> {
        &self.history
    }

    pub fn trajectory(&self, body: usize) -> Option<&Trajectory<V>> {
        self.history.trajectory(body)
    }

    /// Time of every sample in a full run, recorded or not.
    pub fn timestamps(&self) -> Vec<f64> {
        self.config.timestamps()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    pub fn total_momentum(&self) -> V {
        let mut total = V::zero();
        for body in &self.bodies {
            total += body.momentum();
        }
        total
    }

    pub fn center_of_mass(&self) -> V {
        let mut weighted = V::zero();
        for body in &self.bodies {
            weighted += body.pos * body.mass;
        }
        weighted / self.total_mass()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.mass * b.vel.mag_sq())
            .sum()
    }

    pub fn potential_energy(&self) -> f64 {
        self.gravity.potential_energy(&self.bodies)
    }
}

//! Recorded per-body history.

use crate::body::Body;
use crate::vector::Vector;

/// Upper bound on samples reserved up front per body; longer runs grow.
const MAX_RESERVED_SAMPLES: usize = 1 << 16;

/// One snapshot of one body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectorySample<V> {
    /// `step_index * time_step`.
    pub time: f64,
    pub position: V,
    /// Norm of the velocity at this sample.
    pub speed: f64,
    /// Norm of the acceleration computed during the step that produced
    /// this sample. Zero for the initial sample.
    pub acceleration: f64,
}

/// Append-only sequence of samples for a single body.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory<V> {
    samples: Vec<TrajectorySample<V>>,
}

impl<V: Vector> Trajectory<V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, time: f64, body: &Body<V>) {
        self.samples.push(TrajectorySample {
            time,
            position: body.pos,
            speed: body.vel.mag(),
            acceleration: body.acc.mag(),
        });
    }

    pub fn samples(&self) -> &[TrajectorySample<V>] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&TrajectorySample<V>> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&TrajectorySample<V>> {
        self.samples.last()
    }

    pub fn positions(&self) -> impl Iterator<Item = V> + '_ {
        self.samples.iter().map(|s| s.position)
    }

    pub fn speeds(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.speed)
    }

    pub fn accelerations(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.acceleration)
    }
}

/// Trajectories of every body in a run, index-aligned with the body list
/// and with each other by step number.
#[derive(Clone, Debug, PartialEq)]
pub struct History<V> {
    trajectories: Vec<Trajectory<V>>,
    timestamps: Vec<f64>,
}

impl<V: Vector> History<V> {
    /// Starts a history for `bodies` with room for `step_count` steps after
    /// the initial sample, which is recorded immediately.
    pub fn start(bodies: &[Body<V>], step_count: usize) -> Self {
        let capacity = step_count.saturating_add(1).min(MAX_RESERVED_SAMPLES);
        let mut history = Self {
            trajectories: (0..bodies.len())
                .map(|_| Trajectory::with_capacity(capacity))
                .collect(),
            timestamps: Vec::with_capacity(capacity),
        };
        history.record(0.0, bodies);
        history
    }

    /// Appends one sample per body, all stamped with `time`.
    pub fn record(&mut self, time: f64, bodies: &[Body<V>]) {
        debug_assert_eq!(bodies.len(), self.trajectories.len());
        for (trajectory, body) in self.trajectories.iter_mut().zip(bodies) {
            trajectory.record(time, body);
        }
        self.timestamps.push(time);
    }

    pub fn trajectories(&self) -> &[Trajectory<V>] {
        &self.trajectories
    }

    pub fn trajectory(&self, body: usize) -> Option<&Trajectory<V>> {
        self.trajectories.get(body)
    }

    /// Times of the samples recorded so far.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Number of samples recorded per body.
    pub fn sample_count(&self) -> usize {
        self.timestamps.len()
    }
}

//! Run parameters and the TOML scenario format.
//!
//! A scenario file pairs a [`SimulationConfig`] with the initial state of
//! every body:
//!
//! ```toml
//! [simulation]
//! time_step = 0.01
//! simulation_time = 5.0
//! # gravitational_constant = 6.6743e-11
//! # step_count_rule = "ceiling"
//!
//! [[bodies]]
//! label = "Sun"
//! position = [0.0, 0.0]
//! mass = 1e12
//!
//! [[bodies]]
//! label = "Ceres"
//! position = [0.0, -5.0]
//! velocity = [3.0, 0.0]
//! mass = 1000.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::body::BodySpec;
use crate::error::{Result, SimError};

/// Newtonian constant of gravitation, m^3 kg^-1 s^-2.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Largest number of steps a run may take.
pub const MAX_STEP_COUNT: usize = u32::MAX as usize;

/// How the number of steps is derived from the run length and step size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepCountRule {
    /// `floor(simulation_time * trunc(1 / time_step))`. Matches the
    /// historical output of this model and is the default.
    #[default]
    Truncated,
    /// `ceil(simulation_time / time_step)`.
    Ceiling,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seconds per step.
    pub time_step: f64,
    /// Total seconds to simulate.
    pub simulation_time: f64,
    #[serde(default = "default_gravitational_constant")]
    pub gravitational_constant: f64,
    #[serde(default)]
    pub step_count_rule: StepCountRule,
}

fn default_gravitational_constant() -> f64 {
    GRAVITATIONAL_CONSTANT
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(0.01, 5.0)
    }
}

impl SimulationConfig {
    pub fn new(time_step: f64, simulation_time: f64) -> Self {
        Self {
            time_step,
            simulation_time,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            step_count_rule: StepCountRule::default(),
        }
    }

    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    pub fn with_step_count_rule(mut self, rule: StepCountRule) -> Self {
        self.step_count_rule = rule;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SimError::invalid(format!(
                "time_step must be finite and > 0, got {}",
                self.time_step
            )));
        }
        if !(self.simulation_time.is_finite() && self.simulation_time > 0.0) {
            return Err(SimError::invalid(format!(
                "simulation_time must be finite and > 0, got {}",
                self.simulation_time
            )));
        }
        if !self.gravitational_constant.is_finite() {
            return Err(SimError::invalid(format!(
                "gravitational_constant must be finite, got {}",
                self.gravitational_constant
            )));
        }
        let steps = self.raw_step_count();
        if !(steps <= MAX_STEP_COUNT as f64) {
            return Err(SimError::invalid(format!(
                "simulation_time {} at time_step {} needs {steps} steps, at most {MAX_STEP_COUNT} allowed",
                self.simulation_time, self.time_step
            )));
        }
        Ok(())
    }

    fn raw_step_count(&self) -> f64 {
        match self.step_count_rule {
            StepCountRule::Truncated => {
                (self.simulation_time * (1.0 / self.time_step).trunc()).floor()
            }
            StepCountRule::Ceiling => (self.simulation_time / self.time_step).ceil(),
        }
    }

    /// Number of steps a run takes. Assumes a validated config.
    pub fn step_count(&self) -> usize {
        self.raw_step_count() as usize
    }

    /// Time of sample `index`.
    pub fn timestamp(&self, index: usize) -> f64 {
        index as f64 * self.time_step
    }

    /// `[0, dt, 2·dt, …]`, one entry per recorded sample.
    pub fn timestamps(&self) -> Vec<f64> {
        (0..=self.step_count()).map(|i| self.timestamp(i)).collect()
    }
}

/// A complete run description: parameters plus initial bodies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub simulation: SimulationConfig,
    pub bodies: Vec<BodySpec>,
}

impl ScenarioFile {
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a scenario from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let scenario = Self::from_toml_str(&content)?;
        tracing::debug!(
            "Loaded scenario {:?} with {} bodies",
            path,
            scenario.bodies.len()
        );
        Ok(scenario)
    }

    /// Save a scenario to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

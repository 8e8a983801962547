//! Error types for simulation construction and stepping

use std::fmt;

use thiserror::Error;

/// Result type for simulation operations
pub type Result<T, E = SimError> = std::result::Result<T, E>;

/// Which per-body quantity went non-finite during a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    Force,
    Acceleration,
    Position,
    Velocity,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Force => "force",
            Quantity::Acceleration => "acceleration",
            Quantity::Position => "position",
            Quantity::Velocity => "velocity",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while building or advancing a simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Bad inputs detected at construction time. Fix the inputs and rebuild.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A step produced a non-finite value. The simulation is no longer usable.
    #[error("non-finite {quantity} for body {body}{} at step {step}", label_suffix(.label))]
    DegenerateState {
        step: usize,
        body: usize,
        label: Option<String>,
        quantity: Quantity,
    },
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, SimError::DegenerateState { .. })
    }
}

fn label_suffix(label: &Option<String>) -> String {
    label
        .as_deref()
        .map(|l| format!(" ({l})"))
        .unwrap_or_default()
}

pub mod body;
pub mod c_api;
pub mod config;
pub mod error;
pub mod force;
pub mod report;
pub mod scenario;
pub mod simulation;
pub mod trajectory;
pub mod vector;

pub use body::{Body, BodySpec};
pub use config::{GRAVITATIONAL_CONSTANT, MAX_STEP_COUNT, ScenarioFile, SimulationConfig, StepCountRule};
pub use error::{Quantity, Result, SimError};
pub use force::Gravity;
pub use scenario::Dimension;
pub use simulation::{RunOutcome, Simulation, Status};
pub use trajectory::{History, Trajectory, TrajectorySample};
pub use vector::Vector;
pub use ultraviolet::{DVec2, DVec3};

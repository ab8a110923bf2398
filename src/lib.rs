pub use cgmath;
pub use controller::{ConstantController, Controller};
pub use coverage::{Cell, CoverageGrid};
pub use environment::{Environment, EnvironmentAttributes};
pub use error::{Error, Result};
pub use pose::Pose;
pub use population::evaluate_population;
pub use sensor::Sensor;
pub use simulation::{EvaluationParams, RunState, Simulation, TickOutcome, DEFAULT_TIME_STEP};
pub use util::Interval;
pub use vehicle::{Vehicle, VehicleAttributes, WheelSpeeds};

pub mod controller;
mod coverage;
mod environment;
mod error;
pub mod math;
mod population;
mod pose;
mod sensor;
mod simulation;
mod util;
pub mod vehicle;

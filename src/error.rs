use crate::simulation::RunState;
use thiserror::Error;

/// Errors emitted when a simulation is misconfigured or misused.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A configuration value that cannot be used (e.g. a non-positive radius).
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// The obstacle at this index has a non-finite end point.
    #[error("obstacle {0} has non-finite coordinates")]
    InvalidObstacle(usize),
    /// A run was requested while the simulation was not idle.
    #[error("simulation must be idle to start a run, but is {0:?}")]
    NotIdle(RunState),
}

/// Shorthand for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

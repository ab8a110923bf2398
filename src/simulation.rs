use crate::controller::Controller;
use crate::coverage::{Cell, CoverageGrid};
use crate::environment::Environment;
use crate::pose::Pose;
use crate::vehicle::{Vehicle, VehicleAttributes};
use crate::{Error, Result};
use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The fixed time step of an evaluation run, in s.
pub const DEFAULT_TIME_STEP: f64 = 0.005; // s

/// The lifecycle of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Initialised and ready to run.
    Idle,
    /// Ticking through a run.
    Running,
    /// The run is complete; call [Simulation::init] to start another.
    Finished,
}

/// The parameters of a single evaluation run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluationParams {
    /// Where the vehicle starts.
    pub start: Pose,
    /// The simulated duration of the run in s.
    pub duration: f64,
    /// The time step in s.
    pub time_step: f64,
}

impl EvaluationParams {
    /// Creates run parameters with the default time step.
    pub fn new(start: Pose, duration: f64) -> Self {
        Self {
            start,
            duration,
            time_step: DEFAULT_TIME_STEP,
        }
    }
}

/// What happened during a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the vehicle hit an obstacle and was moved back.
    pub collided: bool,
    /// The grid cell the vehicle ended the tick in, if it is inside the grid.
    pub cell: Option<Cell>,
    /// Whether a visit was recorded for `cell`.
    pub marked: bool,
}

/// A single vehicle exploring an environment under the command of a controller.
///
/// All per-run state lives here, including the coverage grid, so concurrent
/// simulations only share the read-only [Environment].
pub struct Simulation<'a, C> {
    /// The environment being explored.
    environment: &'a Environment,
    /// The vehicle.
    vehicle: Vehicle,
    /// The source of motor commands.
    controller: C,
    /// The visit counts for this run.
    coverage: CoverageGrid,
    /// The lifecycle state.
    state: RunState,
    /// The simulated time since the run started, in s.
    elapsed: f64,
    /// The number of ticks simulated since the run started.
    ticks: u64,
    /// The cell in which the last visit was recorded.
    prev_cell: Option<Cell>,
    /// The number of ticks on which the vehicle collided.
    collisions: u64,
}

impl<'a, C: Controller> Simulation<'a, C> {
    /// Creates a new simulation, initialised with the vehicle at the origin.
    pub fn new(
        environment: &'a Environment,
        attributes: &VehicleAttributes,
        controller: C,
    ) -> Result<Self> {
        let mut sim = Self {
            environment,
            vehicle: Vehicle::new(attributes)?,
            controller,
            coverage: environment.coverage_grid(),
            state: RunState::Idle,
            elapsed: 0.0,
            ticks: 0,
            prev_cell: None,
            collisions: 0,
        };
        sim.init(Pose::default());
        Ok(sim)
    }

    /// Prepares a new run starting from `start`.
    ///
    /// Places the vehicle, clears the coverage grid and the run clock,
    /// and primes the sensor readings for the first tick.
    pub fn init(&mut self, start: Pose) {
        self.vehicle.set_pose(start);
        self.vehicle.refresh_sensors(self.environment.obstacles());
        self.coverage = self.environment.coverage_grid();
        self.state = RunState::Idle;
        self.elapsed = 0.0;
        self.ticks = 0;
        self.prev_cell = None;
        self.collisions = 0;
    }

    /// Gets the lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Gets a reference to the vehicle.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Gets a reference to this run's coverage grid.
    pub fn coverage(&self) -> &CoverageGrid {
        &self.coverage
    }

    /// Gets a reference to the environment.
    pub fn environment(&self) -> &'a Environment {
        self.environment
    }

    /// The simulated time since the run started, in s.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// The number of ticks simulated since the run started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The number of ticks on which the vehicle collided.
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// Consumes the simulation, returning its controller.
    pub fn into_controller(self) -> C {
        self.controller
    }

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f64) -> TickOutcome {
        let environment = self.environment;
        let obstacles = environment.obstacles();

        // Drive
        let activations = self.controller.compute(self.vehicle.readings());
        self.vehicle.apply_command(activations);
        let old_pose = self.vehicle.pose();
        let new_pose = self.vehicle.next_pose(dt);
        self.vehicle.move_to(new_pose);

        // Sense from the new pose, before any collision rollback
        self.vehicle.refresh_sensors(obstacles);

        // Only the position is rolled back; the new heading is kept
        let collided = self.vehicle.collides_with(obstacles);
        if collided {
            let mut pose = self.vehicle.pose();
            trace!("collision at {:?}, rolling back to {:?}", pose.pos, old_pose.pos);
            pose.pos = old_pose.pos;
            self.vehicle.move_to(pose);
            self.collisions += 1;
        }

        let (cell, marked) = self.mark_coverage();

        self.elapsed += dt;
        self.ticks += 1;

        TickOutcome {
            collided,
            cell,
            marked,
        }
    }

    /// Records a visit to the vehicle's cell if it differs from the last
    /// recorded cell in BOTH column and row. A move to a neighbour in the
    /// same row or column is not recorded; fitness values depend on this.
    fn mark_coverage(&mut self) -> (Option<Cell>, bool) {
        let pos = self.vehicle.position();
        let cell = match self.coverage.cell_of(pos) {
            Some(cell) => cell,
            None => {
                trace!("vehicle at {:?} is outside the coverage grid", pos);
                return (None, false);
            }
        };

        let is_new = match self.prev_cell {
            Some(prev) => prev.x != cell.x && prev.y != cell.y,
            None => true,
        };
        if is_new {
            self.coverage.visit(cell);
            self.prev_cell = Some(cell);
        }
        (Some(cell), is_new)
    }

    /// Runs the simulation for `duration` seconds in steps of `dt` seconds.
    ///
    /// The run must be [RunState::Idle]; it is [RunState::Finished] afterwards.
    pub fn run(&mut self, duration: f64, dt: f64) -> Result<()> {
        if self.state != RunState::Idle {
            return Err(Error::NotIdle(self.state));
        }
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(Error::InvalidConfig("duration must be non-negative"));
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(Error::InvalidConfig("time step must be positive"));
        }

        let ticks = tick_count(duration, dt);
        debug!("running {} ticks of {} s from {:?}", ticks, dt, self.vehicle.pose());

        self.state = RunState::Running;
        for _ in 0..ticks {
            self.step(dt);
        }
        self.state = RunState::Finished;

        debug!(
            "finished at {:?}: {} cells visited, {} collisions, fitness {}",
            self.vehicle.pose(),
            self.coverage.visited_cells(),
            self.collisions,
            self.fitness()
        );
        Ok(())
    }

    /// Reduces the coverage grid to a fitness score. [Read more](CoverageGrid::fitness).
    pub fn fitness(&self) -> f64 {
        self.coverage.fitness()
    }

    /// Initialises and runs the simulation, then returns the fitness.
    pub fn evaluate(&mut self, params: &EvaluationParams) -> Result<f64> {
        self.init(params.start);
        self.run(params.duration, params.time_step)?;
        Ok(self.fitness())
    }
}

/// The number of ticks of length `dt` needed for the elapsed time to reach `duration`.
///
/// Durations within rounding error of a whole number of ticks get exactly that many.
fn tick_count(duration: f64, dt: f64) -> u64 {
    let n = duration / dt;
    let rounded = n.round();
    if (n - rounded).abs() <= 1e-9 * rounded.max(1.0) {
        rounded as u64
    } else {
        n.ceil() as u64
    }
}

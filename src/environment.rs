use crate::coverage::CoverageGrid;
use crate::math::{LineSegment2d, Point2d};
use crate::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The extents and grid resolution of an environment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnvironmentAttributes {
    /// The width of the modelled area in m.
    pub width: f64,
    /// The height of the modelled area in m.
    pub height: f64,
    /// The edge length of a coverage grid cell in m.
    pub subdivision_size: f64,
}

/// An immutable set of obstacles, plus the shape of the coverage grid laid over them.
///
/// An environment holds no per-run state, so one instance can be shared by
/// any number of concurrent simulations.
#[derive(Clone, Debug)]
pub struct Environment {
    obstacles: Vec<LineSegment2d>,
    attributes: EnvironmentAttributes,
    cols: usize,
    rows: usize,
}

impl Environment {
    /// Creates an environment from a list of obstacles.
    pub fn new(obstacles: Vec<LineSegment2d>, attributes: &EnvironmentAttributes) -> Result<Self> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(attributes.width) || !positive(attributes.height) {
            return Err(Error::InvalidConfig("environment extents must be positive"));
        }
        if !positive(attributes.subdivision_size) {
            return Err(Error::InvalidConfig("subdivision size must be positive"));
        }
        if let Some(idx) = obstacles.iter().position(|o| !o.is_finite()) {
            return Err(Error::InvalidObstacle(idx));
        }

        let cells = |extent: f64| (extent / attributes.subdivision_size).ceil() as usize;
        Ok(Self {
            cols: cells(attributes.width),
            rows: cells(attributes.height),
            obstacles,
            attributes: *attributes,
        })
    }

    /// Creates an environment enclosed by four walls along the edges of its extents.
    pub fn with_boundary(
        mut obstacles: Vec<LineSegment2d>,
        attributes: &EnvironmentAttributes,
    ) -> Result<Self> {
        let (w, h) = (attributes.width, attributes.height);
        let corners = [
            Point2d::new(0.0, 0.0),
            Point2d::new(w, 0.0),
            Point2d::new(w, h),
            Point2d::new(0.0, h),
        ];
        obstacles.extend((0..4).map(|i| LineSegment2d::from_ends(corners[i], corners[(i + 1) % 4])));
        Self::new(obstacles, attributes)
    }

    /// The obstacles in the environment.
    pub fn obstacles(&self) -> &[LineSegment2d] {
        &self.obstacles
    }

    /// The environment's attributes.
    pub fn attributes(&self) -> &EnvironmentAttributes {
        &self.attributes
    }

    /// The number of grid columns and rows.
    pub fn grid_size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Allocates a fresh, all-zero coverage grid for a single run.
    pub fn coverage_grid(&self) -> CoverageGrid {
        CoverageGrid::new(self.cols, self.rows, self.attributes.subdivision_size)
    }
}

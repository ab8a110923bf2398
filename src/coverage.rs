use crate::math::Point2d;

/// The column and row of a coverage grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Visit counts over a regular grid of square cells.
///
/// Counts only ever increase during a run. Each run must own its grid,
/// since the counts feed directly into that run's fitness.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverageGrid {
    cols: usize,
    rows: usize,
    cell_size: f64,
    visits: Vec<u32>,
}

impl CoverageGrid {
    /// Creates an all-zero grid. `cell_size` must be positive.
    pub(crate) fn new(cols: usize, rows: usize, cell_size: f64) -> Self {
        Self {
            cols,
            rows,
            cell_size,
            visits: vec![0; cols * rows],
        }
    }

    /// The edge length of a cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// The number of columns and rows.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Finds the cell containing `point`, or `None` if it lies outside the grid.
    pub fn cell_of(&self, point: Point2d) -> Option<Cell> {
        let index = |coord: f64, count: usize| {
            let i = (coord / self.cell_size).floor();
            (i >= 0.0 && i < count as f64).then(|| i as usize)
        };
        Some(Cell::new(index(point.x, self.cols)?, index(point.y, self.rows)?))
    }

    /// The number of times `cell` has been visited.
    pub fn visits(&self, cell: Cell) -> u32 {
        self.visits[self.offset(cell)]
    }

    /// Records a visit to `cell`.
    pub fn visit(&mut self, cell: Cell) {
        let offset = self.offset(cell);
        self.visits[offset] += 1;
    }

    /// Iterates over every cell and its visit count, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        self.visits
            .iter()
            .enumerate()
            .map(|(i, &v)| (Cell::new(i % self.cols, i / self.cols), v))
    }

    /// The number of cells visited at least once.
    pub fn visited_cells(&self) -> usize {
        self.visits.iter().filter(|&&v| v > 0).count()
    }

    /// Reduces the grid to a fitness score.
    ///
    /// Cells visited at most once add their count; cells visited more than
    /// once subtract it.
    pub fn fitness(&self) -> f64 {
        self.visits
            .iter()
            .map(|&v| if v <= 1 { v as i64 } else { -(v as i64) })
            .sum::<i64>() as f64
    }

    fn offset(&self, cell: Cell) -> usize {
        assert!(cell.x < self.cols && cell.y < self.rows, "cell {:?} is outside the grid", cell);
        cell.y * self.cols + cell.x
    }
}

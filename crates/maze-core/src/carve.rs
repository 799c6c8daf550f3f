//! Maze carving
//!
//! Iterative randomized depth-first search over a parity grid. Rooms sit on
//! odd/odd coordinates reachable from [`START`]; each move jumps two cells and
//! opens the wall cell in between.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::grid::{CellState, Grid};

/// Cell the carve is rooted at
pub const START: (usize, usize) = (1, 1);

/// Two-cell jumps in the four cardinal directions, in their initial order
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

/// Counters for a carving run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarveStats {
    /// Cells pushed onto the frontier, including the start cell
    pub pushes: usize,
    /// Backtracking pops
    pub pops: usize,
    /// Loop iterations (each one either pushes or pops)
    pub steps: usize,
}

/// Outcome of a single carving step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveStep {
    /// A new room was opened together with the wall leading to it
    Carved {
        from: (usize, usize),
        wall: (usize, usize),
        to: (usize, usize),
    },
    /// No unvisited room was reachable; the cell was popped
    Backtracked { at: (usize, usize) },
}

/// Resumable carving state.
///
/// Holds the grid exclusively until dropped. Calling [`Carver::step`] until it
/// returns `None` produces the same maze as [`carve`]; stopping earlier leaves
/// an unfinished but consistent maze.
#[derive(Debug)]
pub struct Carver<'g> {
    grid: &'g mut Grid,
    frontier: Vec<(usize, usize)>,
    /// Shuffled in place every step; the order carries over between steps
    directions: [(isize, isize); 4],
    stats: CarveStats,
}

impl<'g> Carver<'g> {
    /// Open the start cell and seed the frontier with it
    pub fn new(grid: &'g mut Grid) -> Self {
        let mut frontier = Vec::with_capacity(grid.width() * grid.height() / 4);
        grid.open(START.0, START.1);
        frontier.push(START);

        Self {
            grid,
            frontier,
            directions: DIRECTIONS,
            stats: CarveStats {
                pushes: 1,
                ..CarveStats::default()
            },
        }
    }

    /// Run one iteration: carve toward the first unvisited room in a freshly
    /// shuffled direction order, or backtrack if there is none.
    ///
    /// Returns `None` once the frontier is empty.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<CarveStep> {
        let &(x, y) = self.frontier.last()?;
        self.stats.steps += 1;

        self.directions.shuffle(rng);
        for (dx, dy) in self.directions {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if !self.grid.is_interior(nx, ny) {
                continue;
            }

            let to = (nx as usize, ny as usize);
            if self.grid.get(to.0, to.1) != Ok(CellState::Wall) {
                continue;
            }

            let wall = ((x as isize + dx / 2) as usize, (y as isize + dy / 2) as usize);
            self.grid.open(wall.0, wall.1);
            self.grid.open(to.0, to.1);
            self.frontier.push(to);
            self.stats.pushes += 1;

            return Some(CarveStep::Carved {
                from: (x, y),
                wall,
                to,
            });
        }

        self.frontier.pop();
        self.stats.pops += 1;
        Some(CarveStep::Backtracked { at: (x, y) })
    }

    /// Step until the frontier is drained
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        while self.step(rng).is_some() {}
    }

    pub fn is_done(&self) -> bool {
        self.frontier.is_empty()
    }

    pub fn stats(&self) -> CarveStats {
        self.stats
    }

    /// Current path from the start cell to the cell being expanded
    pub fn frontier(&self) -> &[(usize, usize)] {
        &self.frontier
    }

    /// Read-only view of the grid being carved
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }
}

/// Carve a perfect maze into an all-wall grid
pub fn carve<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> CarveStats {
    let mut carver = Carver::new(grid);
    carver.run(rng);
    carver.stats()
}

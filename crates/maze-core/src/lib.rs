//! maze-core: Perfect maze generation
//!
//! This crate contains the grid model and the carving algorithm with no I/O
//! dependencies. Export to text and images lives in `maze-export`.

use thiserror::Error;

mod carve;
mod grid;
mod rng;

pub use carve::{CarveStats, CarveStep, Carver, DIRECTIONS, START, carve};
pub use grid::{CellState, Grid, MIN_DIMENSION};
pub use rng::MazeRng;

/// Grid construction and access errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid dimensions {width}x{height}: both must be at least 3 and the cell count must fit in memory")]
    InvalidDimensions { width: usize, height: usize },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("cell ({x}, {y}) is on the border and cannot be carved")]
    BorderWrite { x: usize, y: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A finished maze together with what is needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    /// Seed the carving RNG was created with (also reported for entropy runs)
    pub seed: u64,
    pub stats: CarveStats,
}

/// Generate a perfect maze of the given size.
///
/// Supplying a seed makes the output reproducible; `None` draws a fresh seed
/// from entropy, which is reported back in [`Maze::seed`].
pub fn generate(width: usize, height: usize, seed: Option<u64>) -> Result<Maze, MazeError> {
    let mut grid = Grid::new(width, height)?;
    let mut rng = match seed {
        Some(seed) => MazeRng::new(seed),
        None => MazeRng::from_entropy(),
    };

    let stats = carve(&mut grid, &mut rng);

    log::debug!(
        "generated {}x{} maze with seed {}: {} rooms, {} steps",
        width,
        height,
        rng.seed(),
        stats.pushes,
        stats.steps
    );

    Ok(Maze {
        grid,
        seed: rng.seed(),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_rejects_small_dimensions() {
        assert_eq!(
            generate(2, 11, Some(1)),
            Err(MazeError::InvalidDimensions {
                width: 2,
                height: 11
            })
        );
        assert!(generate(11, 0, None).is_err());
    }

    #[test]
    fn test_generate_with_seed_is_reproducible() {
        let a = generate(11, 11, Some(42)).unwrap();
        let b = generate(11, 11, Some(42)).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.seed, 42);
    }

    #[test]
    fn test_generate_reports_entropy_seed() {
        let maze = generate(9, 7, None).unwrap();
        let replay = generate(9, 7, Some(maze.seed)).unwrap();
        assert_eq!(maze.grid, replay.grid);
    }

    #[test]
    fn test_error_messages() {
        let err = MazeError::OutOfBounds {
            x: 5,
            y: 1,
            width: 5,
            height: 5,
        };
        assert_eq!(err.to_string(), "cell (5, 1) is outside the 5x5 grid");
    }
}

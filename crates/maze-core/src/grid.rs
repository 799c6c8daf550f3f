//! Grid model
//!
//! A dense, fixed-size array of wall/passage cells addressed by `(x, y)`,
//! with `x` in `0..width` and `y` in `0..height`.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::MazeError;

/// Smallest width or height that still leaves one interior cell to seed from
pub const MIN_DIMENSION: usize = 3;

/// State of a single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Wall = 1,
    Passage = 0,
}

impl CellState {
    /// Numeric form used by the text dump (wall = 1, passage = 0)
    pub const fn as_bit(self) -> u8 {
        self as u8
    }

    pub const fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            0 => Some(CellState::Passage),
            1 => Some(CellState::Wall),
            _ => None,
        }
    }

    pub const fn is_passage(self) -> bool {
        matches!(self, CellState::Passage)
    }

    /// Character used by the `Display` debug view
    pub const fn symbol(self) -> char {
        match self {
            CellState::Wall => '#',
            CellState::Passage => ' ',
        }
    }
}

/// Rectangular maze grid.
///
/// Border cells can never be set to [`CellState::Passage`]; every mutation goes
/// through [`Grid::set`], which rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "GridRepr", try_from = "GridRepr")]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major cell states, `cells[y * width + x]`
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a grid with every cell set to wall
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        let len = width
            .checked_mul(height)
            .filter(|_| width >= MIN_DIMENSION && height >= MIN_DIMENSION)
            .ok_or(MazeError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Wall; len],
        })
    }

    /// Build a grid from row-major cell states.
    ///
    /// All rows must have the same length and the border must be solid wall.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, MazeError>
    where
        R: AsRef<[CellState]>,
    {
        let height = rows.len();
        let width = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        let mut grid = Grid::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MazeError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &state) in row.iter().enumerate() {
                grid.set(x, y, state)?;
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a coordinate lies inside the grid
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Check if a coordinate lies on the outer ring of the grid
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    /// Check if a signed coordinate is strictly inside the border
    pub fn is_interior(&self, x: isize, y: isize) -> bool {
        x > 0 && y > 0 && x < self.width as isize - 1 && y < self.height as isize - 1
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, MazeError> {
        if !self.in_bounds(x, y) {
            return Err(MazeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Get the state of a cell
    pub fn get(&self, x: usize, y: usize) -> Result<CellState, MazeError> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set the state of a cell.
    ///
    /// Writing a passage onto the border fails with [`MazeError::BorderWrite`].
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<(), MazeError> {
        let i = self.index(x, y)?;
        if state.is_passage() && self.is_border(x, y) {
            return Err(MazeError::BorderWrite { x, y });
        }
        self.cells[i] = state;
        Ok(())
    }

    /// Open an interior cell. Only the carver calls this, and only with
    /// coordinates it has already checked against the interior.
    pub(crate) fn open(&mut self, x: usize, y: usize) {
        debug_assert!(self.is_interior(x as isize, y as isize));
        let i = y * self.width + x;
        self.cells[i] = CellState::Passage;
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Iterate over `(x, y, state)` for every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &state)| (i % self.width, i / self.width, state))
    }

    pub fn passage_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_passage()).count()
    }

    /// In-bounds 4-neighbours of a cell (up, right, down, left)
    pub fn neighbors4(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        const OFFSETS: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
        OFFSETS.into_iter().filter_map(move |(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            self.in_bounds(nx, ny).then_some((nx, ny))
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Serialized form; deserializing re-runs the grid validation
#[derive(Serialize, Deserialize)]
struct GridRepr {
    width: usize,
    height: usize,
    rows: Vec<Vec<CellState>>,
}

impl From<Grid> for GridRepr {
    fn from(grid: Grid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            rows: grid.rows().map(|row| row.to_vec()).collect(),
        }
    }
}

impl TryFrom<GridRepr> for Grid {
    type Error = MazeError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let grid = Grid::from_rows(&repr.rows)?;
        if grid.width != repr.width || grid.height != repr.height {
            return Err(MazeError::InvalidDimensions {
                width: repr.width,
                height: repr.height,
            });
        }
        Ok(grid)
    }
}

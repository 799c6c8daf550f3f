//! maze-export: Output formats for finished mazes
//!
//! Everything here takes the grid by shared reference; exporting never
//! changes a maze.

use thiserror::Error;

use maze_core::MazeError;

mod raster;
mod save;
mod text;

pub use raster::{PASSAGE_LUMA, WALL_LUMA, from_raster, save_png, to_raster};
pub use save::{MazeFile, MazeHeader, SAVE_VERSION, load_maze, save_maze};
pub use text::{parse_text, read_text, to_text, write_text};

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Invalid grid: {0}")]
    Grid(#[from] MazeError),

    #[error("Incompatible maze file version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Grid {width}x{height} is too large for an image")]
    ImageTooLarge { width: usize, height: usize },

    #[error("Invalid maze file header")]
    InvalidHeader,
}

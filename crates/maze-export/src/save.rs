//! JSON maze files
//!
//! A versioned header plus the grid, so a saved maze records how to
//! regenerate it.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use maze_core::{Grid, Maze};

use crate::ExportError;

/// Current maze file format version
pub const SAVE_VERSION: u32 = 1;

/// Maze file header for versioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeHeader {
    /// Magic identifier
    pub magic: String,
    /// File format version
    pub version: u32,
    pub width: usize,
    pub height: usize,
    /// Seed that reproduces the grid
    pub seed: u64,
    /// Seconds since the Unix epoch at save time
    pub timestamp: u64,
}

impl MazeHeader {
    const MAGIC: &'static str = "MAZE";

    pub fn new(maze: &Maze) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            width: maze.grid.width(),
            height: maze.grid.height(),
            seed: maze.seed,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        if self.magic != Self::MAGIC {
            return Err(ExportError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(ExportError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Complete maze file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeFile {
    pub header: MazeHeader,
    pub grid: Grid,
}

/// Save a generated maze to a JSON file
pub fn save_maze(maze: &Maze, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = MazeFile {
        header: MazeHeader::new(maze),
        grid: maze.grid.clone(),
    };

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &file)?;
    writer.flush()?;
    log::info!("saved maze (seed {}) to {}", maze.seed, path.display());
    Ok(())
}

/// Load a maze file, checking the header against the grid
pub fn load_maze(path: impl AsRef<Path>) -> Result<MazeFile, ExportError> {
    let reader = BufReader::new(File::open(path)?);
    let file: MazeFile = serde_json::from_reader(reader)?;

    file.header.validate()?;
    if file.header.width != file.grid.width() || file.header.height != file.grid.height() {
        return Err(ExportError::InvalidHeader);
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::generate;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("maze-save-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_save_and_load() {
        let maze = generate(9, 7, Some(5)).unwrap();
        let path = temp_path("roundtrip");
        save_maze(&maze, &path).unwrap();

        let file = load_maze(&path).unwrap();
        assert_eq!(file.grid, maze.grid);
        assert_eq!(file.header.seed, 5);
        assert_eq!((file.header.width, file.header.height), (9, 7));
        assert_eq!(generate(9, 7, Some(file.header.seed)).unwrap().grid, file.grid);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_header_validation() {
        let maze = generate(5, 5, Some(1)).unwrap();
        let mut header = MazeHeader::new(&maze);
        assert!(header.validate().is_ok());

        header.version = 9;
        assert!(matches!(
            header.validate(),
            Err(ExportError::IncompatibleVersion {
                expected: 1,
                found: 9
            })
        ));

        header.magic = "NOPE".to_string();
        assert!(matches!(header.validate(), Err(ExportError::InvalidHeader)));
    }

    #[test]
    fn test_load_rejects_mismatched_header() {
        let maze = generate(5, 5, Some(1)).unwrap();
        let mut file = MazeFile {
            header: MazeHeader::new(&maze),
            grid: maze.grid.clone(),
        };
        file.header.width = 7;

        let path = temp_path("mismatch");
        std::fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();
        assert!(matches!(load_maze(&path), Err(ExportError::InvalidHeader)));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_maze(temp_path("missing")),
            Err(ExportError::Io(_))
        ));
    }
}

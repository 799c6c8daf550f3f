//! Text dump of a maze grid
//!
//! Row-major nested list of 0/1 values (0 = passage, 1 = wall), one row per line:
//!
//! ```text
//! [
//!   [1, 1, 1],
//!   [1, 0, 1],
//!   [1, 1, 1],
//! ]
//! ```

use std::fs;
use std::path::Path;

use maze_core::{CellState, Grid};

use crate::ExportError;

/// Serialize a grid to its text dump
pub fn to_text(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.height() * (grid.width() * 3 + 6) + 4);
    out.push_str("[\n");
    for row in grid.rows() {
        let cells: Vec<String> = row.iter().map(|c| c.as_bit().to_string()).collect();
        out.push_str("  [");
        out.push_str(&cells.join(", "));
        out.push_str("],\n");
    }
    out.push(']');
    out
}

/// Parse a text dump back into a grid.
///
/// Blank lines are ignored and the trailing comma after a row is optional.
pub fn parse_text(input: &str) -> Result<Grid, ExportError> {
    let mut rows: Vec<Vec<CellState>> = Vec::new();
    let mut opened = false;
    let mut closed = false;

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if closed {
            return Err(parse_error(line_no, "content after closing bracket"));
        }

        match line {
            "[" if !opened => opened = true,
            "]" if opened => closed = true,
            _ if !opened => return Err(parse_error(line_no, "expected opening '['")),
            _ => rows.push(parse_row(line, line_no)?),
        }
    }

    if !closed {
        return Err(parse_error(input.lines().count(), "missing closing ']'"));
    }
    Ok(Grid::from_rows(&rows)?)
}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<CellState>, ExportError> {
    let line = line.strip_suffix(',').unwrap_or(line).trim_end();
    let inner = line
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .ok_or_else(|| parse_error(line_no, "row must be wrapped in '[' and ']'"))?;

    inner
        .split(',')
        .map(|field| {
            let field = field.trim();
            field
                .parse::<u8>()
                .ok()
                .and_then(CellState::from_bit)
                .ok_or_else(|| parse_error(line_no, &format!("invalid cell value {:?}", field)))
        })
        .collect()
}

fn parse_error(line: usize, reason: &str) -> ExportError {
    ExportError::Parse {
        line,
        reason: reason.to_string(),
    }
}

/// Write the text dump to a file
pub fn write_text(grid: &Grid, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    fs::write(path, to_text(grid))?;
    log::info!(
        "wrote {}x{} maze text to {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(())
}

/// Read a text dump from a file
pub fn read_text(path: impl AsRef<Path>) -> Result<Grid, ExportError> {
    let input = fs::read_to_string(path)?;
    parse_text(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> Grid {
        let mut grid = Grid::new(3, 4).unwrap();
        grid.set(1, 1, CellState::Passage).unwrap();
        grid.set(1, 2, CellState::Passage).unwrap();
        grid
    }

    #[test]
    fn test_to_text_layout() {
        assert_eq!(
            to_text(&small_grid()),
            "[\n  [1, 1, 1],\n  [1, 0, 1],\n  [1, 0, 1],\n  [1, 1, 1],\n]"
        );
    }

    #[test]
    fn test_parse_text_roundtrip() {
        let grid = small_grid();
        assert_eq!(parse_text(&to_text(&grid)).unwrap(), grid);
    }

    #[test]
    fn test_parse_text_is_lenient_about_whitespace() {
        let input = "\n[\n[1,1,1]\n\n  [1, 0, 1] ,\n[1,1,1],\n]\n";
        let grid = parse_text(input).unwrap();
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(1, 1), Ok(CellState::Passage));
    }

    #[test]
    fn test_parse_text_errors() {
        let bad_value = "[\n  [1, 1, 1],\n  [1, 2, 1],\n  [1, 1, 1],\n]";
        assert!(matches!(
            parse_text(bad_value),
            Err(ExportError::Parse { line: 3, .. })
        ));

        let unclosed = "[\n  [1, 1, 1],\n";
        assert!(matches!(parse_text(unclosed), Err(ExportError::Parse { .. })));

        let no_open = "  [1, 1, 1],\n]";
        assert!(matches!(
            parse_text(no_open),
            Err(ExportError::Parse { line: 1, .. })
        ));

        let trailing = "[\n  [1, 1, 1],\n  [1, 1, 1],\n  [1, 1, 1],\n]\n[";
        assert!(matches!(
            parse_text(trailing),
            Err(ExportError::Parse { line: 6, .. })
        ));

        let ragged = "[\n  [1, 1, 1],\n  [1, 1],\n  [1, 1, 1],\n]";
        assert!(matches!(parse_text(ragged), Err(ExportError::Grid(_))));

        let open_border = "[\n  [1, 0, 1],\n  [1, 0, 1],\n  [1, 1, 1],\n]";
        assert!(matches!(parse_text(open_border), Err(ExportError::Grid(_))));
    }

    #[test]
    fn test_write_and_read_file() {
        let path = std::env::temp_dir().join(format!("maze-text-{}.txt", std::process::id()));
        let grid = small_grid();
        write_text(&grid, &path).unwrap();
        assert_eq!(read_text(&path).unwrap(), grid);
        fs::remove_file(&path).unwrap();
    }
}

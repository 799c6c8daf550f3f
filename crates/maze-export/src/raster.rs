//! Monochrome bitmap rendering, one pixel per cell

use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};

use maze_core::{CellState, Grid};

use crate::ExportError;

pub const PASSAGE_LUMA: u8 = 255;
pub const WALL_LUMA: u8 = 0;

/// Pixel dimensions for a grid, if both sides fit the image coordinate type
fn image_dimensions(width: usize, height: usize) -> Result<(u32, u32), ExportError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(ExportError::ImageTooLarge { width, height }),
    }
}

/// Render a grid as a single-channel image: passages white, walls black
pub fn to_raster(grid: &Grid) -> Result<GrayImage, ExportError> {
    let (width, height) = image_dimensions(grid.width(), grid.height())?;
    let mut img = GrayImage::new(width, height);
    // Both iterate row-major over the same dimensions
    for (pixel, (_, _, state)) in img.pixels_mut().zip(grid.cells()) {
        *pixel = Luma([match state {
            CellState::Passage => PASSAGE_LUMA,
            CellState::Wall => WALL_LUMA,
        }]);
    }
    Ok(img)
}

/// Rebuild a grid from a rendered image; light pixels are passages
pub fn from_raster(img: &GrayImage) -> Result<Grid, ExportError> {
    let rows: Vec<Vec<CellState>> = img
        .rows()
        .map(|row| {
            row.map(|Luma([luma])| {
                if *luma >= 128 {
                    CellState::Passage
                } else {
                    CellState::Wall
                }
            })
            .collect()
        })
        .collect();
    Ok(Grid::from_rows(&rows)?)
}

/// Write the rendered grid as a PNG file
pub fn save_png(grid: &Grid, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    to_raster(grid)?.save_with_format(path, ImageFormat::Png)?;
    log::info!(
        "wrote {}x{} maze image to {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(())
}

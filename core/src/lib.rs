#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;

pub use catalog::*;
pub use error::*;
pub use playback::*;
pub use program::*;
pub use runner::*;
pub use types::*;

mod catalog;
mod error;
mod playback;
mod program;
mod runner;
mod types;

/// Color of one pixel in the static board artwork.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellColor {
    Black,
    White,
    Green,
}

/// The static pixel-art layout the board is drawn from. Purely decorative for
/// gameplay, but its dimensions define the grid bounds level data is validated
/// against.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
    pixels: Array2<CellColor>,
}

impl PixelGrid {
    pub fn logo() -> Self {
        let dim = (LOGO_ROWS.len(), LOGO_ROWS[0].len());
        let pixels = Array2::from_shape_fn(dim, |(row, col)| LOGO_ROWS[row][col]);
        Self { pixels }
    }

    /// Grid bounds as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        let dim = self.pixels.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn color_at(&self, coords: Coord2) -> CellColor {
        self.pixels[coords.to_nd_index()]
    }
}

impl Index<Coord2> for PixelGrid {
    type Output = CellColor;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.pixels[coords.to_nd_index()]
    }
}

#[rustfmt::skip]
const LOGO_ROWS: [[CellColor; 12]; 15] = {
    use CellColor::{Black as B, Green as G, White as W};
    [
        [B, B, B, B, B, B, B, B, B, B, B, B],
        [B, W, W, W, W, W, W, W, W, W, W, B],
        [B, W, B, B, B, B, B, B, B, B, W, B],
        [B, W, G, B, G, B, G, B, B, B, W, B],
        [B, W, B, B, B, B, B, B, B, B, W, B],
        [B, W, B, G, G, B, G, G, B, B, W, B],
        [B, W, B, B, B, B, B, B, B, B, W, B],
        [B, W, B, B, B, B, B, B, B, B, W, B],
        [B, W, W, W, W, W, W, W, W, W, W, B],
        [B, B, B, B, B, B, B, B, B, B, B, B],
        [W, W, W, W, B, B, B, B, W, W, W, W],
        [W, B, B, B, B, B, B, B, B, B, B, W],
        [B, B, B, W, B, W, B, W, B, W, B, B],
        [B, B, W, B, W, B, W, B, W, B, B, B],
        [B, B, B, B, B, B, B, B, B, B, B, B],
    ]
};

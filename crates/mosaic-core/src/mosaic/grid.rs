//! The mosaic grid.

use std::sync::Arc;

use super::size::BaseplateSize;
use crate::palette::{Palette, PaletteEntry};

/// An N×N grid of palette entries, row-major.
///
/// Cells are stored as indices into the palette the grid was built from,
/// and the grid keeps that palette alive, so every cell always refers to an
/// existing, unmodified entry. Grids are immutable; a new build produces a
/// new grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicGrid {
    size: BaseplateSize,
    palette: Arc<Palette>,
    cells: Vec<usize>,
}

impl MosaicGrid {
    /// Create a grid from palette indices.
    ///
    /// Returns `None` if the number of cells is not N*N or any index is
    /// outside the palette.
    pub fn from_indices(
        size: BaseplateSize,
        palette: Arc<Palette>,
        cells: Vec<usize>,
    ) -> Option<Self> {
        if cells.len() != size.cell_count() || cells.iter().any(|&i| i >= palette.len()) {
            return None;
        }
        Some(Self {
            size,
            palette,
            cells,
        })
    }

    /// Grid size.
    #[inline]
    pub fn size(&self) -> BaseplateSize {
        self.size
    }

    /// Grid dimension N.
    #[inline]
    pub fn dimension(&self) -> u32 {
        self.size.get()
    }

    /// The palette the cells refer to.
    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    /// Palette indices, row-major.
    pub fn indices(&self) -> &[usize] {
        &self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Entry at column `x`, row `y`.
    pub fn entry(&self, x: u32, y: u32) -> Option<&PaletteEntry> {
        let n = self.dimension();
        if x >= n || y >= n {
            return None;
        }
        let idx = self.cells[(y * n + x) as usize];
        self.palette.get(idx)
    }

    /// Iterate `(x, y, entry)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &PaletteEntry)> {
        let n = self.dimension();
        let entries = self.palette.entries();
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &idx)| (i as u32 % n, i as u32 / n, &entries[idx]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_indices_validates() {
        let palette = Arc::new(Palette::fallback());
        let size = BaseplateSize::S16;

        assert!(MosaicGrid::from_indices(size, palette.clone(), vec![0; 256]).is_some());
        assert!(MosaicGrid::from_indices(size, palette.clone(), vec![0; 255]).is_none());
        assert!(MosaicGrid::from_indices(size, palette.clone(), vec![5; 256]).is_none());
    }

    #[test]
    fn test_row_major_access() {
        let palette = Arc::new(Palette::fallback());
        let cells: Vec<usize> = (0..256).map(|i| if i == 17 { 2 } else { 1 }).collect();
        let grid = MosaicGrid::from_indices(BaseplateSize::S16, palette, cells).unwrap();

        // Index 17 is column 1 of row 1
        assert_eq!(grid.entry(1, 1).unwrap().name, "Red");
        assert_eq!(grid.entry(0, 1).unwrap().name, "White");
        assert!(grid.entry(16, 0).is_none());

        let (x, y, entry) = grid.cells().nth(17).unwrap();
        assert_eq!((x, y), (1, 1));
        assert_eq!(entry.name, "Red");
        assert_eq!(grid.cells().count(), 256);
    }
}

//! Bit-packed tile shapes
//!
//! A tile is normalized to its bounding box and stored as one packed row per
//! occupied row, each row spread over as many `u64` pages as the tile is wide.
//! The first and last occupied column of every row is cached at construction
//! so range checks never have to scan the row.

use crate::bits::word;
use crate::io::configuration::LANE_BITS;
use crate::io::error::{Result, TilingError};
use crate::spatial::context::Context;
use std::collections::BTreeSet;
use std::fmt;

/// A placeable tile: one orientation of a polyomino
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileShape {
    width: u32,
    height: usize,
    pages: usize,
    rows: Vec<u64>,
    first: Vec<u32>,
    last: Vec<u32>,
    origin: (i32, i32),
    cell_count: usize,
}

impl TileShape {
    /// Build a tile from cell coordinates, allowing at most `limit` columns
    ///
    /// Cells are normalized by subtracting the minimum x and y. Duplicate
    /// cells are ignored.
    ///
    /// # Errors
    ///
    /// - [`TilingError::EmptyTile`] when `cells` is empty
    /// - [`TilingError::TileOutOfRange`] when a normalized column is `limit` or more
    /// - [`TilingError::DetachedRow`] when a row of the bounding box has no cells
    pub fn new(cells: &[(i32, i32)], limit: u32) -> Result<Self> {
        let unique: BTreeSet<(i32, i32)> = cells.iter().copied().collect();

        let Some(min_x) = unique.iter().map(|&(x, _)| x).min() else {
            return Err(TilingError::EmptyTile);
        };
        let min_y = unique.iter().map(|&(_, y)| y).min().unwrap_or(0);

        let mut width = 0u32;
        let mut height = 0usize;
        let mut relative = Vec::with_capacity(unique.len());
        for &(x, y) in &unique {
            let column = i64::from(x) - i64::from(min_x);
            let Some(column) = u32::try_from(column).ok().filter(|&c| c < limit) else {
                return Err(TilingError::TileOutOfRange { column, limit });
            };
            let row = (i64::from(y) - i64::from(min_y)) as usize;
            width = width.max(column + 1);
            height = height.max(row + 1);
            relative.push((column, row));
        }

        let occupied: BTreeSet<usize> = relative.iter().map(|&(_, row)| row).collect();
        // Rows are sorted, so the first index out of step is the first gap
        let gap = (0..height)
            .zip(&occupied)
            .find_map(|(expected, &row)| (expected != row).then_some(expected));
        if let Some(row) = gap {
            return Err(TilingError::DetachedRow { row });
        }

        let pages = width.div_ceil(LANE_BITS) as usize;
        let mut rows = vec![0u64; height * pages];
        for &(column, row) in &relative {
            let page = (column / LANE_BITS) as usize;
            if let Some(lane) = rows.get_mut(row * pages + page) {
                *lane |= 1 << (column % LANE_BITS);
            }
        }

        let mut first = Vec::with_capacity(height);
        let mut last = Vec::with_capacity(height);
        for (index, row) in rows.chunks_exact(pages).enumerate() {
            let (Some(low), Some(high)) = (row_lowest(row), row_highest(row)) else {
                return Err(TilingError::DetachedRow { row: index });
            };
            first.push(low);
            last.push(high);
        }

        Ok(Self {
            width,
            height,
            pages,
            rows,
            first,
            last,
            origin: (min_x, min_y),
            cell_count: relative.len(),
        })
    }

    /// Build a tile whose rows must fit a single lane
    ///
    /// # Errors
    ///
    /// Same as [`TileShape::new`] with a limit of one lane
    pub fn single_lane(cells: &[(i32, i32)]) -> Result<Self> {
        Self::new(cells, LANE_BITS)
    }

    /// Build a tile that must fit the strip described by `context`
    ///
    /// # Errors
    ///
    /// Same as [`TileShape::new`] with the strip width as limit
    pub fn for_context(cells: &[(i32, i32)], context: &Context) -> Result<Self> {
        Self::new(cells, context.width())
    }

    /// Bounding box width in columns
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Bounding box height in rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Lanes per packed row
    pub const fn pages(&self) -> usize {
        self.pages
    }

    /// Number of cells covered
    pub const fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Minimum (x, y) of the input cells
    pub const fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Column of the leftmost cell in the lowest row
    ///
    /// When this tile covers the lowest, leftmost empty cell of a frontier,
    /// that cell is necessarily this one.
    pub fn anchor(&self) -> u32 {
        self.first.first().copied().unwrap_or(0)
    }

    /// Packed lanes of row `index`
    pub fn row(&self, index: usize) -> Option<&[u64]> {
        let start = index * self.pages;
        self.rows.get(start..start + self.pages)
    }

    /// Packed rows from the lowest up
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        self.rows.chunks_exact(self.pages)
    }

    /// First and last occupied column of row `index`
    pub fn span(&self, index: usize) -> Option<(u32, u32)> {
        Some((*self.first.get(index)?, *self.last.get(index)?))
    }

    /// Cells in the original coordinates the tile was built from
    pub fn cells(&self) -> Vec<(i32, i32)> {
        let mut cells = Vec::with_capacity(self.cell_count);
        for (row_index, row) in self.rows().enumerate() {
            for (page, &lane) in row.iter().enumerate() {
                let mut bits = lane;
                while bits != 0 {
                    let bit = word::lowest_set(bits);
                    bits &= bits - 1;
                    let column = page as u32 * LANE_BITS + bit;
                    cells.push((
                        self.origin.0 + column as i32,
                        self.origin.1 + row_index as i32,
                    ));
                }
            }
        }
        cells
    }

    /// Cells relative to the bounding box's lower-left corner
    pub fn relative_cells(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        let (ox, oy) = self.origin;
        self.cells()
            .into_iter()
            .map(move |(x, y)| ((x - ox) as u32, (y - oy) as usize))
    }
}

fn row_lowest(row: &[u64]) -> Option<u32> {
    row.iter()
        .enumerate()
        .find(|&(_, &lane)| lane != 0)
        .map(|(page, &lane)| page as u32 * LANE_BITS + word::lowest_set(lane))
}

fn row_highest(row: &[u64]) -> Option<u32> {
    row.iter()
        .enumerate()
        .rev()
        .find(|&(_, &lane)| lane != 0)
        .map(|(page, &lane)| page as u32 * LANE_BITS + word::highest_set(lane))
}

impl fmt::Display for TileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: BTreeSet<(u32, usize)> = self.relative_cells().collect();
        for row in (0..self.height).rev() {
            let line: String = (0..self.width)
                .map(|column| {
                    if cells.contains(&(column, row)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

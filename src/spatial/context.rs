//! Per-run strip configuration and the row kernels that depend on its width
//!
//! Every strip row is stored as `pages` consecutive `u64` lanes. The width
//! class picks the kernel used to shift, test and merge tile rows into strip
//! rows: one lane, a [`WideRow`], or a general page-splitting loop.

use crate::bits::{WideRow, word};
use crate::io::configuration::LANE_BITS;
use crate::io::error::{Result, TilingError};
use smallvec::SmallVec;

/// A cell of the strip: column `x` in `[0, width)`, absolute row `y` from the floor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column, 0 being the left wall
    pub x: u32,
    /// Row, 0 being the first row of the strip
    pub y: usize,
}

impl Cell {
    /// Create a cell
    pub const fn new(x: u32, y: usize) -> Self {
        Self { x, y }
    }
}

/// Row representation chosen for a strip width
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthClass {
    /// Width fits in one lane
    SingleWord,
    /// Width fits in two lanes, handled as a [`WideRow`]
    DoubleWord,
    /// Wider strips, handled page by page
    Paged {
        /// Lanes per row
        pages: usize,
    },
}

impl WidthClass {
    /// Class for a strip of `width` columns
    pub const fn for_width(width: u32) -> Self {
        if width <= LANE_BITS {
            Self::SingleWord
        } else if width <= 2 * LANE_BITS {
            Self::DoubleWord
        } else {
            Self::Paged {
                pages: width.div_ceil(LANE_BITS) as usize,
            }
        }
    }

    /// Lanes per row
    pub const fn pages(self) -> usize {
        match self {
            Self::SingleWord => 1,
            Self::DoubleWord => 2,
            Self::Paged { pages } => pages,
        }
    }
}

/// Immutable configuration shared by every frontier and tile of one search run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context {
    width: u32,
    class: WidthClass,
    last_mask: u64,
}

impl Context {
    /// Create the context for a strip of `width` columns
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::InvalidWidth`] when `width` is zero or does not fit in a `u32`
    pub fn new(width: usize) -> Result<Self> {
        let Ok(columns) = u32::try_from(width) else {
            return Err(TilingError::InvalidWidth { width });
        };
        if columns == 0 {
            return Err(TilingError::InvalidWidth { width });
        }

        let class = WidthClass::for_width(columns);
        let last_width = columns - (class.pages() as u32 - 1) * LANE_BITS;

        Ok(Self {
            width: columns,
            class,
            last_mask: word::low_mask(last_width),
        })
    }

    /// Strip width in columns
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Row representation in use
    pub const fn class(&self) -> WidthClass {
        self.class
    }

    /// Lanes per row
    pub const fn pages(&self) -> usize {
        self.class.pages()
    }

    /// Mask isolating the valid bits of the final page
    pub const fn last_mask(&self) -> u64 {
        self.last_mask
    }

    /// Number of valid columns in `page`
    pub const fn page_width(&self, page: usize) -> u32 {
        if page + 1 < self.pages() {
            LANE_BITS
        } else {
            self.width - (self.pages() as u32 - 1) * LANE_BITS
        }
    }

    /// Mask of the valid bits in `page`
    pub const fn page_mask(&self, page: usize) -> u64 {
        if page + 1 < self.pages() {
            u64::MAX
        } else {
            self.last_mask
        }
    }

    /// A row with every column filled
    pub fn full_row(&self) -> SmallVec<[u64; 4]> {
        (0..self.pages()).map(|page| self.page_mask(page)).collect()
    }

    /// Whether every column of `row` is filled
    pub fn row_is_full(&self, row: &[u64]) -> bool {
        row.iter()
            .enumerate()
            .all(|(page, &lane)| lane & self.page_mask(page) == self.page_mask(page))
    }

    /// Leftmost empty column of `row`, skipping over full pages
    pub fn first_gap(&self, row: &[u64]) -> Option<u32> {
        match self.class {
            WidthClass::SingleWord => {
                let lane = row.first().copied().unwrap_or(0);
                let column = word::lowest_unset(lane);
                (column < self.width).then_some(column)
            }
            WidthClass::DoubleWord => {
                let column = WideRow::from_slice(row).lowest_unset();
                (column < self.width).then_some(column)
            }
            WidthClass::Paged { .. } => row.iter().enumerate().find_map(|(page, &lane)| {
                let column = word::lowest_unset(lane);
                (column < self.page_width(page)).then(|| page as u32 * LANE_BITS + column)
            }),
        }
    }

    /// Whether `tile_row` moved right by `shift` columns intersects `row`
    ///
    /// The caller has already checked that the shifted tile row stays inside the strip.
    pub fn overlaps(&self, row: &[u64], tile_row: &[u64], shift: u32) -> bool {
        match self.class {
            WidthClass::SingleWord => {
                let lane = row.first().copied().unwrap_or(0);
                let tile = tile_row.first().copied().unwrap_or(0);
                (tile << shift) & lane != 0
            }
            WidthClass::DoubleWord => {
                let shifted = WideRow::from_slice(tile_row) << shift;
                !(shifted & WideRow::from_slice(row)).is_zero()
            }
            WidthClass::Paged { .. } => {
                let mut hit = false;
                for_each_split(tile_row, shift, |page, bits| {
                    hit |= row.get(page).copied().unwrap_or(0) & bits != 0;
                });
                hit
            }
        }
    }

    /// OR `tile_row` moved right by `shift` columns into `row`
    pub fn merge(&self, row: &mut [u64], tile_row: &[u64], shift: u32) {
        match self.class {
            WidthClass::SingleWord => {
                let tile = tile_row.first().copied().unwrap_or(0);
                if let Some(lane) = row.first_mut() {
                    *lane |= tile << shift;
                }
            }
            WidthClass::DoubleWord => {
                let merged = WideRow::from_slice(row) | (WideRow::from_slice(tile_row) << shift);
                merged.write_to(row);
            }
            WidthClass::Paged { .. } => {
                for_each_split(tile_row, shift, |page, bits| {
                    if let Some(lane) = row.get_mut(page) {
                        *lane |= bits;
                    }
                });
            }
        }
    }

    /// Write the left-right mirror image of `row` into `out`
    pub fn mirror_into(&self, row: &[u64], out: &mut [u64]) {
        match self.class {
            WidthClass::SingleWord => {
                let lane = row.first().copied().unwrap_or(0);
                if let Some(slot) = out.first_mut() {
                    *slot = word::mirror(lane, self.width);
                }
            }
            WidthClass::DoubleWord => {
                WideRow::from_slice(row).mirror(self.width).write_to(out);
            }
            WidthClass::Paged { pages } => {
                for (slot, &lane) in out.iter_mut().zip(row.iter().rev()) {
                    *slot = word::reverse(lane);
                }
                let spare = pages as u32 * LANE_BITS - self.width;
                shift_pages_down(out, spare);
            }
        }
    }

    /// Mirror image of `row` as a new row
    pub fn mirrored(&self, row: &[u64]) -> SmallVec<[u64; 4]> {
        let mut out: SmallVec<[u64; 4]> = SmallVec::from_elem(0, self.pages());
        self.mirror_into(row, &mut out);
        out
    }

    /// Read `len` (at most 64) columns starting at `start`
    ///
    /// `row == None` reads a completely filled row. Columns outside the
    /// strip read as filled, so walls behave like placed cells.
    pub fn window(&self, row: Option<&[u64]>, start: i64, len: u32) -> u64 {
        debug_assert!(len <= LANE_BITS);
        let all: u64 = word::low_mask(len);
        let Some(row) = row else {
            return all;
        };

        let width = i64::from(self.width);
        let end = start + i64::from(len);
        let mut out = 0u64;

        // Left wall
        if start < 0 {
            out |= word::low_mask::<u64>((-start).min(i64::from(len)) as u32);
        }
        // Right wall
        if end > width {
            let inside = (width - start).max(0).min(i64::from(len)) as u32;
            out |= all & !word::low_mask::<u64>(inside);
        }

        let from = start.max(0);
        let to = end.min(width);
        if from < to {
            let count = (to - from) as u32;
            let page = (from / i64::from(LANE_BITS)) as usize;
            let bit = (from % i64::from(LANE_BITS)) as u32;
            let low = row.get(page).copied().unwrap_or(0) >> bit;
            let high = if bit == 0 {
                0
            } else {
                row.get(page + 1).copied().unwrap_or(0) << (LANE_BITS - bit)
            };
            let bits = (low | high) & word::low_mask::<u64>(count);
            out |= bits << (from - start) as u32;
        }

        out
    }
}

/// Split a paged tile row moved right by `shift` columns into per-page contributions
///
/// Each tile page lands on at most two strip pages, so rows spanning any number
/// of pages are handled.
fn for_each_split(tile_row: &[u64], shift: u32, mut visit: impl FnMut(usize, u64)) {
    let page_shift = (shift / LANE_BITS) as usize;
    let bit_shift = shift % LANE_BITS;

    for (page, &lane) in tile_row.iter().enumerate() {
        if lane == 0 {
            continue;
        }
        let target = page + page_shift;
        visit(target, lane << bit_shift);
        if bit_shift > 0 {
            let carry = lane >> (LANE_BITS - bit_shift);
            if carry != 0 {
                visit(target + 1, carry);
            }
        }
    }
}

/// Shift a multi-page row towards column 0 by `shift` (< 64) columns
fn shift_pages_down(lanes: &mut [u64], shift: u32) {
    if shift == 0 {
        return;
    }
    let mut carry = 0u64;
    for lane in lanes.iter_mut().rev() {
        let next_carry = *lane << (LANE_BITS - shift);
        *lane = (*lane >> shift) | carry;
        carry = next_carry;
    }
}

//! Canonical, immutable snapshot of the exposed boundary of a partial strip tiling
//!
//! Rows below `base` are completely filled and never stored. The retained rows
//! start at the first row that still has a gap, so two frontiers with the same
//! retained rows describe the same search state whatever their height.

use crate::algorithm::pruning::Prune;
use crate::bits::word;
use crate::io::configuration::HASH_MULTIPLIER;
use crate::spatial::{Cell, Context, TileShape};
use std::hash::{Hash, Hasher};

/// Exposed boundary of a partially tiled strip
///
/// Never mutated: placements return a new frontier.
#[derive(Clone, Debug)]
pub struct Frontier {
    base: usize,
    pages: usize,
    rows: Vec<u64>,
    hash: u64,
}

impl Frontier {
    /// The frontier of an untouched strip
    pub fn empty(context: &Context) -> Self {
        Self {
            base: 0,
            pages: context.pages(),
            rows: Vec::new(),
            hash: 0,
        }
    }

    /// Build a reduced frontier from raw rows starting at absolute row `base`
    ///
    /// `rows` holds `context.pages()` lanes per row. Bits outside the strip are
    /// cleared, leading full rows are folded into the base and trailing empty
    /// rows are dropped.
    pub fn from_rows(context: &Context, base: usize, mut rows: Vec<u64>) -> Self {
        let pages = context.pages();
        rows.truncate(rows.len() - rows.len() % pages);
        for row in rows.chunks_exact_mut(pages) {
            for (page, lane) in row.iter_mut().enumerate() {
                *lane &= context.page_mask(page);
            }
        }
        while rows.len() >= pages && rows.iter().rev().take(pages).all(|&lane| lane == 0) {
            rows.truncate(rows.len() - pages);
        }
        Self::reduced(context, base, rows)
    }

    /// Trim leading full rows and compute the hash
    fn reduced(context: &Context, base: usize, mut rows: Vec<u64>) -> Self {
        let pages = context.pages();
        let full = rows
            .chunks_exact(pages)
            .take_while(|row| context.row_is_full(row))
            .count();
        rows.drain(..full * pages);

        let hash = rolling_hash(&rows);
        Self {
            base: base + full,
            pages,
            rows,
            hash,
        }
    }

    /// Absolute index of the first retained row; every row below it is full
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Number of retained rows
    pub const fn row_count(&self) -> usize {
        self.rows.len() / self.pages
    }

    /// Lanes of retained row `index`, counted from the base
    pub fn row(&self, index: usize) -> Option<&[u64]> {
        let start = index * self.pages;
        self.rows.get(start..start + self.pages)
    }

    /// Retained rows from the base up
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        self.rows.chunks_exact(self.pages)
    }

    /// Hash of the retained rows; a straight frontier hashes to 0
    pub const fn rolling_hash(&self) -> u64 {
        self.hash
    }

    /// Whether the boundary is flat: the success condition of a search
    pub const fn is_straight(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether `cell` is covered
    pub fn is_filled(&self, cell: Cell) -> bool {
        if cell.y < self.base {
            return true;
        }
        let page = (cell.x / u64::BITS) as usize;
        self.row(cell.y - self.base)
            .and_then(|row| row.get(page))
            .is_some_and(|&lane| (lane >> (cell.x % u64::BITS)) & 1 == 1)
    }

    /// The lowest, then leftmost, uncovered cell
    ///
    /// Any tiling has to cover this cell next, which keeps the branching
    /// factor down to the number of tiles. When every retained row is full the
    /// cell is the start of the row above them.
    pub fn find_empty(&self, context: &Context) -> Cell {
        for (index, row) in self.rows().enumerate() {
            if let Some(x) = context.first_gap(row) {
                return Cell::new(x, self.base + index);
            }
        }
        Cell::new(0, self.base + self.row_count())
    }

    /// Column of the tile's bounding box when its anchor lands on `cell`
    fn origin_column(cell: Cell, tile: &TileShape) -> i64 {
        i64::from(cell.x) - i64::from(tile.anchor())
    }

    /// Whether `tile` fits with its anchor on `cell`, inside the walls and
    /// without overlapping covered cells
    pub fn can_place(&self, context: &Context, cell: Cell, tile: &TileShape) -> bool {
        if cell.y < self.base {
            return false;
        }
        let origin = Self::origin_column(cell, tile);
        let Ok(shift) = u32::try_from(origin) else {
            return false;
        };
        let start = cell.y - self.base;

        for (index, tile_row) in tile.rows().enumerate() {
            let Some((first, last)) = tile.span(index) else {
                return false;
            };
            if !word::span_fits(first, last, origin, context.width()) {
                return false;
            }
            if let Some(row) = self.row(start + index) {
                if context.overlaps(row, tile_row, shift) {
                    return false;
                }
            }
        }
        true
    }

    /// The frontier after placing `tile` with its anchor on `cell`
    ///
    /// The placement must satisfy [`Frontier::can_place`].
    #[must_use]
    pub fn place(&self, context: &Context, cell: Cell, tile: &TileShape) -> Self {
        debug_assert!(self.can_place(context, cell, tile));
        let shift = u32::try_from(Self::origin_column(cell, tile)).unwrap_or(0);
        let start = cell.y.saturating_sub(self.base);
        let needed = self.row_count().max(start + tile.height());

        let mut rows = Vec::with_capacity(needed * self.pages);
        rows.extend_from_slice(&self.rows);
        rows.resize(needed * self.pages, 0);

        for (index, tile_row) in tile.rows().enumerate() {
            let from = (start + index) * self.pages;
            if let Some(row) = rows.get_mut(from..from + self.pages) {
                context.merge(row, tile_row, shift);
            }
        }

        let next = Self::reduced(context, self.base, rows);
        debug_assert!(
            next.row(0).is_none_or(|row| !context.row_is_full(row)),
            "frontier not reduced after placement"
        );
        next
    }

    /// Like [`Frontier::place`], but `None` when `prune` rejects the result
    ///
    /// A rejected placement leads nowhere and should be discarded; it is not an error.
    pub fn place_pruned<P: Prune + ?Sized>(
        &self,
        context: &Context,
        cell: Cell,
        tile: &TileShape,
        prune: &P,
    ) -> Option<Self> {
        let next = self.place(context, cell, tile);
        (!prune.rejects(context, &next)).then_some(next)
    }

    /// Left-right mirror image with the same base
    #[must_use]
    pub fn mirrored(&self, context: &Context) -> Self {
        let mut rows = vec![0u64; self.rows.len()];
        for (source, target) in self
            .rows
            .chunks_exact(self.pages)
            .zip(rows.chunks_exact_mut(self.pages))
        {
            context.mirror_into(source, target);
        }
        let hash = rolling_hash(&rows);
        Self {
            base: self.base,
            pages: self.pages,
            rows,
            hash,
        }
    }
}

/// Multiplicative rolling hash over lanes; no lanes hash to 0
pub fn rolling_hash(lanes: &[u64]) -> u64 {
    lanes.iter().fold(0, |hash, &lane| fold_lane(hash, lane))
}

/// Feed one lane into a rolling hash
pub const fn fold_lane(hash: u64, lane: u64) -> u64 {
    (hash ^ lane).wrapping_add(1).wrapping_mul(HASH_MULTIPLIER)
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.pages == other.pages && self.rows == other.rows
    }
}

impl Eq for Frontier {}

impl Hash for Frontier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

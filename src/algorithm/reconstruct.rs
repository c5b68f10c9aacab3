//! Witness tilings rebuilt from the search graph
//!
//! A successful search ends on a straight frontier. Walking the predecessor
//! links back to the empty strip yields the placements that produced it, which
//! together cover a `width × height` rectangle exactly.

use crate::algorithm::equivalence::Equivalence;
use crate::algorithm::memo::{NodeId, SearchGraph, Step};
use crate::spatial::TileShape;
use bitvec::prelude::*;
use ndarray::Array2;

/// One tile placed in the strip
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Index of the tile in the search's tile list
    pub tile: usize,
    /// Strip column of the tile's bounding box left edge
    pub x: u32,
    /// Strip row of the tile's bounding box bottom edge
    pub y: usize,
}

impl Placement {
    /// Placement matching a search step
    pub fn from_step(step: Step, tiles: &[TileShape]) -> Option<Self> {
        let tile = tiles.get(step.tile)?;
        Some(Self {
            tile: step.tile,
            x: step.cell.x.checked_sub(tile.anchor())?,
            y: step.cell.y,
        })
    }

    /// Strip cells covered by this placement
    pub fn cells<'a>(&self, tile: &'a TileShape) -> impl Iterator<Item = (u32, usize)> + 'a {
        let (x, y) = (self.x, self.y);
        tile.relative_cells()
            .map(move |(column, row)| (x + column, y + row))
    }
}

/// A witness tiling of the strip's first `height` rows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tiling {
    /// Strip width in columns
    pub width: u32,
    /// Number of rows covered exactly
    pub height: usize,
    /// Placements in the order the search made them
    pub placements: Vec<Placement>,
}

impl Tiling {
    /// Rebuild the tiling ending with `last` applied to frontier `id`
    ///
    /// Returns `None` when links were not recorded or a step names an unknown tile.
    pub fn reconstruct<E>(
        graph: &SearchGraph<E>,
        tiles: &[TileShape],
        width: u32,
        id: NodeId,
        last: Step,
    ) -> Option<Self>
    where
        E: Equivalence,
    {
        if !graph.records_links() {
            return None;
        }

        let mut steps = graph.path_to(id);
        steps.push(last);

        let placements = steps
            .into_iter()
            .map(|step| Placement::from_step(step, tiles))
            .collect::<Option<Vec<_>>>()?;

        let height = placements
            .iter()
            .filter_map(|placement| {
                tiles
                    .get(placement.tile)
                    .map(|tile| placement.y + tile.height())
            })
            .max()
            .unwrap_or(0);

        Some(Self {
            width,
            height,
            placements,
        })
    }

    /// Number of placements
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the tiling places nothing
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// The (tile, placement) pairs in order, ready for a renderer
    pub fn pieces<'a>(
        &'a self,
        tiles: &'a [TileShape],
    ) -> impl Iterator<Item = (&'a TileShape, Placement)> + 'a {
        self.placements
            .iter()
            .filter_map(|&placement| tiles.get(placement.tile).map(|tile| (tile, placement)))
    }

    /// Whether the placements cover the `width × height` rectangle exactly once
    pub fn verify(&self, tiles: &[TileShape]) -> bool {
        let width = self.width as usize;
        let mut covered = bitvec![0; width * self.height];

        for placement in &self.placements {
            let Some(tile) = tiles.get(placement.tile) else {
                return false;
            };
            for (x, y) in placement.cells(tile) {
                let x = x as usize;
                if x >= width || y >= self.height {
                    return false;
                }
                let index = y * width + x;
                if covered.get(index).as_deref() != Some(&false) {
                    return false;
                }
                covered.set(index, true);
            }
        }

        covered.all()
    }

    /// Grid of placement numbers (1-based, 0 for uncovered), row 0 first
    pub fn label_grid(&self, tiles: &[TileShape]) -> Array2<usize> {
        let mut grid = Array2::zeros((self.height, self.width as usize));
        for (number, placement) in self.placements.iter().enumerate() {
            let Some(tile) = tiles.get(placement.tile) else {
                continue;
            };
            for (x, y) in placement.cells(tile) {
                if let Some(slot) = grid.get_mut([y, x as usize]) {
                    *slot = number + 1;
                }
            }
        }
        grid
    }
}

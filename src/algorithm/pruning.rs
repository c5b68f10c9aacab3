//! Early rejection of dead-end frontiers
//!
//! Pruning is optional: omitting it never changes whether a strip is
//! tileable, only how much of the state space is explored.

use crate::algorithm::frontier::Frontier;
use crate::io::configuration::{LANE_BITS, MAX_PATTERN_ROWS};
use crate::io::error::{Result, TilingError};
use crate::spatial::Context;
use std::collections::BTreeSet;
use std::fmt;

/// Decides whether a freshly placed frontier is unsalvageable
pub trait Prune {
    /// Whether `frontier` can be discarded without losing any tiling
    fn rejects(&self, context: &Context, frontier: &Frontier) -> bool;
}

/// Accepts every frontier
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPruning;

impl Prune for NoPruning {
    fn rejects(&self, _context: &Context, _frontier: &Frontier) -> bool {
        false
    }
}

impl<F> Prune for F
where
    F: Fn(&Context, &Frontier) -> bool,
{
    fn rejects(&self, context: &Context, frontier: &Frontier) -> bool {
        self(context, frontier)
    }
}

/// A small forbidden local configuration of filled and empty cells
///
/// Only the cells named at construction are compared; the rest of the
/// bounding box is "don't care".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    filled: Vec<u64>,
    masks: Vec<u64>,
    width: u32,
}

impl Pattern {
    /// Build a pattern from cells that must be filled and cells that must be empty
    ///
    /// Both sets are normalized together by their common minimum x and y.
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::InvalidPattern`] when the pattern has no cells,
    /// names a cell as both filled and empty, is wider than one lane or
    /// taller than [`MAX_PATTERN_ROWS`]
    pub fn new(filled: &[(i32, i32)], empty: &[(i32, i32)]) -> Result<Self> {
        let filled: BTreeSet<(i32, i32)> = filled.iter().copied().collect();
        let empty: BTreeSet<(i32, i32)> = empty.iter().copied().collect();

        if let Some(&(x, y)) = filled.intersection(&empty).next() {
            return Err(TilingError::InvalidPattern {
                reason: format!("cell ({x}, {y}) is both filled and empty"),
            });
        }

        let all = || filled.iter().chain(empty.iter());
        let Some(min_x) = all().map(|&(x, _)| x).min() else {
            return Err(TilingError::InvalidPattern {
                reason: "pattern has no cells".to_string(),
            });
        };
        let min_y = all().map(|&(_, y)| y).min().unwrap_or(0);
        let max_x = all().map(|&(x, _)| x).max().unwrap_or(min_x);
        let max_y = all().map(|&(_, y)| y).max().unwrap_or(min_y);

        let span = i64::from(max_x) - i64::from(min_x) + 1;
        let width = match u32::try_from(span) {
            Ok(width) if width <= LANE_BITS => width,
            _ => {
                return Err(TilingError::InvalidPattern {
                    reason: format!("pattern is {span} columns wide, at most {LANE_BITS} allowed"),
                });
            }
        };
        let rows = i64::from(max_y) - i64::from(min_y) + 1;
        let height = match usize::try_from(rows) {
            Ok(height) if height <= MAX_PATTERN_ROWS => height,
            _ => {
                return Err(TilingError::InvalidPattern {
                    reason: format!("pattern is {rows} rows tall, at most {MAX_PATTERN_ROWS} allowed"),
                });
            }
        };

        let mut filled_rows = vec![0u64; height];
        let mut masks = vec![0u64; height];
        for (&(x, y), is_filled) in filled
            .iter()
            .map(|cell| (cell, true))
            .chain(empty.iter().map(|cell| (cell, false)))
        {
            let bit = 1u64 << (x - min_x);
            let row = (y - min_y) as usize;
            if let Some(mask) = masks.get_mut(row) {
                *mask |= bit;
            }
            if is_filled {
                if let Some(lane) = filled_rows.get_mut(row) {
                    *lane |= bit;
                }
            }
        }

        Ok(Self {
            filled: filled_rows,
            masks,
            width,
        })
    }

    /// Bounding box width in columns
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Bounding box height in rows
    pub const fn height(&self) -> usize {
        self.masks.len()
    }

    /// Whether the pattern matches with its lower-left corner at column `x`
    /// and retained row `row` (`-1` is the full row just below the frontier)
    pub fn matches_at(&self, context: &Context, frontier: &Frontier, x: i64, row: isize) -> bool {
        self.masks
            .iter()
            .zip(&self.filled)
            .enumerate()
            .all(|(offset, (&mask, &filled))| {
                let target = row + offset as isize;
                let lanes = if target < 0 {
                    None
                } else {
                    // Rows above the retained ones are empty
                    Some(frontier.row(target as usize).unwrap_or(&[]))
                };
                context.window(lanes, x, self.width) & mask == filled
            })
    }

    /// Whether the pattern occurs anywhere along the frontier
    ///
    /// Scans every column offset that keeps the pattern at most one column
    /// into either wall, and every row from the full row below the frontier
    /// to the last retained row.
    pub fn occurs_in(&self, context: &Context, frontier: &Frontier) -> bool {
        let last_column = i64::from(context.width()) - i64::from(self.width) + 1;
        (-1..frontier.row_count() as isize).any(|row| {
            (-1..=last_column).any(|x| self.matches_at(context, frontier, x, row))
        })
    }
}

/// Rejects frontiers containing any of a set of forbidden patterns
///
/// A straight frontier is the goal state and is never rejected.
#[derive(Clone, Debug, Default)]
pub struct PatternPruner {
    patterns: Vec<Pattern>,
}

impl PatternPruner {
    /// Create a pruner from forbidden patterns
    pub const fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    /// Add a forbidden pattern
    pub fn push(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
    }

    /// Number of patterns checked
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no pattern is configured
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Prune for PatternPruner {
    fn rejects(&self, context: &Context, frontier: &Frontier) -> bool {
        !frontier.is_straight()
            && self
                .patterns
                .iter()
                .any(|pattern| pattern.occurs_in(context, frontier))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (&filled, &mask) in self.filled.iter().zip(&self.masks).rev() {
            let line: String = (0..self.width)
                .map(|column| {
                    let bit = 1u64 << column;
                    if mask & bit == 0 {
                        '?'
                    } else if filled & bit != 0 {
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

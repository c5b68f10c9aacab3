//! Frontier equivalence strategies for the search memo
//!
//! The frontier itself only knows exact equality. Strategies decide which
//! frontiers the memo treats as the same search state, and hash consistently
//! with that decision.

use crate::algorithm::frontier::{Frontier, fold_lane};
use crate::spatial::Context;
use std::cmp::Ordering;

/// Which frontiers count as the same search state
pub trait Equivalence {
    /// Hash consistent with [`Equivalence::equivalent`]
    fn key(&self, context: &Context, frontier: &Frontier) -> u64;

    /// Whether `a` and `b` are the same search state
    fn equivalent(&self, context: &Context, a: &Frontier, b: &Frontier) -> bool;
}

/// Frontiers are equal only when their retained rows are identical
#[derive(Clone, Copy, Debug, Default)]
pub struct Exact;

impl Equivalence for Exact {
    fn key(&self, _context: &Context, frontier: &Frontier) -> u64 {
        frontier.rolling_hash()
    }

    fn equivalent(&self, _context: &Context, a: &Frontier, b: &Frontier) -> bool {
        a == b
    }
}

/// A frontier and its left-right mirror image are the same state
///
/// Any tiling of one mirrors into a tiling of the other, so only one of
/// them needs exploring.
#[derive(Clone, Copy, Debug, Default)]
pub struct MirrorFold;

impl Equivalence for MirrorFold {
    fn key(&self, context: &Context, frontier: &Frontier) -> u64 {
        // Per row, hash the larger of the row and its mirror
        let mut hash = 0;
        for row in frontier.rows() {
            let mirrored = context.mirrored(row);
            let canonical: &[u64] = match row.iter().rev().cmp(mirrored.iter().rev()) {
                Ordering::Less => &mirrored,
                Ordering::Equal | Ordering::Greater => row,
            };
            for &lane in canonical {
                hash = fold_lane(hash, lane);
            }
        }
        hash
    }

    fn equivalent(&self, context: &Context, a: &Frontier, b: &Frontier) -> bool {
        if a == b {
            return true;
        }
        a.row_count() == b.row_count()
            && a.rows()
                .zip(b.rows())
                .all(|(left, right)| context.mirrored(right).as_slice() == left)
    }
}

/// Exact or mirror-folded equivalence chosen at run time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Folding {
    /// Use [`Exact`]
    #[default]
    Exact,
    /// Use [`MirrorFold`]
    Mirror,
}

impl Folding {
    /// Mirror folding when `enabled`, exact otherwise
    pub const fn from_flag(enabled: bool) -> Self {
        if enabled { Self::Mirror } else { Self::Exact }
    }
}

impl Equivalence for Folding {
    fn key(&self, context: &Context, frontier: &Frontier) -> u64 {
        match self {
            Self::Exact => Exact.key(context, frontier),
            Self::Mirror => MirrorFold.key(context, frontier),
        }
    }

    fn equivalent(&self, context: &Context, a: &Frontier, b: &Frontier) -> bool {
        match self {
            Self::Exact => Exact.equivalent(context, a, b),
            Self::Mirror => MirrorFold.equivalent(context, a, b),
        }
    }
}

//! Exact tiling of fixed-width infinite strips by polyominoes
//!
//! Decides whether copies of a finite set of tiles can cover a strip of a
//! given width with no gaps and no overlaps, and produces a witness tiling.
//! The strip's partially tiled boundary is kept as a canonical bit-packed
//! frontier, explored depth-first with memoization, optional mirror folding
//! and optional pattern pruning.

#![forbid(unsafe_code)]

/// Backtracking search over strip frontiers: memo, pruning, reconstruction
pub mod algorithm;
/// Word-level and two-lane bit operations
pub mod bits;
/// Input/output operations and error handling
pub mod io;
/// Strip context, tile shapes and orientations
pub mod spatial;

pub use algorithm::search::{Outcome, SearchOptions, Tiler};
pub use io::error::{Result, TilingError};

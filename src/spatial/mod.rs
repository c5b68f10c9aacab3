//! Strip geometry and tile shapes
//!
//! This module contains spatial-related functionality including:
//! - The per-run strip context and its width-dependent row kernels
//! - Bit-packed tile shapes
//! - Orientation generation for tile cell sets

/// Strip configuration and row kernels
pub mod context;
/// Bit-packed tile shapes
pub mod tiles;
/// Rotations and reflections of cell sets
pub mod transform;

pub use context::{Cell, Context, WidthClass};
pub use tiles::TileShape;

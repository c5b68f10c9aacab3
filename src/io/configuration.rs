//! Search constants and runtime configuration defaults

/// Bits in one page (lane) of a strip row
pub const LANE_BITS: u32 = u64::BITS;

/// Tallest pruning pattern accepted, in rows
pub const MAX_PATTERN_ROWS: usize = 64;

/// Multiplier of the rolling frontier hash
pub const HASH_MULTIPLIER: u64 = 0x0000_0100_0000_01b3;

/// Strip width used when none is given on the command line
pub const DEFAULT_WIDTH: usize = 8;

// Refreshing the spinner every expansion dominates small searches
/// Number of expansions between progress refreshes
pub const PROGRESS_REFRESH_INTERVAL: usize = 4096;

/// Number of expansions between trace-level search reports
pub const SEARCH_TRACE_INTERVAL: usize = 65_536;

/// Width of the progress spinner message column
pub const PROGRESS_MESSAGE_WIDTH: usize = 48;

// Shape file markers
/// Marks an occupied tile cell, or a filled pattern cell
pub const FILLED_MARK: char = '#';
/// Marks a pattern cell that must be empty
pub const EMPTY_MARK: char = '.';
/// Lines starting with this are ignored by the shape parser
pub const COMMENT_MARK: char = ';';

/// Labels used when printing a tiling, cycled by placement index
pub const PLACEMENT_LABELS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Fixed seed used when tile shuffling is requested without a seed
pub const DEFAULT_SEED: u64 = 42;

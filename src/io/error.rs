//! Error types for tile construction, shape files and command-line validation

use std::fmt;
use std::path::PathBuf;

/// Main error type for all tiling operations
///
/// A strip that cannot be tiled is not an error: it is reported through
/// [`crate::algorithm::search::Outcome::Untileable`].
#[derive(Debug)]
pub enum TilingError {
    /// Strip width must be at least one column
    InvalidWidth {
        /// The rejected width
        width: usize,
    },

    /// A tile cell falls outside the representable width
    TileOutOfRange {
        /// Column of the offending cell, relative to the tile's leftmost cell
        column: i64,
        /// Number of columns the row type can hold
        limit: u32,
    },

    /// A tile was given without any cells
    EmptyTile,

    /// A tile's bounding box contains a row with no cells
    DetachedRow {
        /// Row index relative to the tile's lowest row
        row: usize,
    },

    /// A pruning pattern is malformed
    InvalidPattern {
        /// Description of what's wrong with the pattern
        reason: String,
    },

    /// Shape text could not be parsed
    Parse {
        /// One-based line number where the problem was found
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for TilingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidth { width } => {
                write!(f, "Strip width must be positive, got {width}")
            }
            Self::TileOutOfRange { column, limit } => {
                write!(
                    f,
                    "Tile column {column} is outside the representable width {limit}"
                )
            }
            Self::EmptyTile => write!(f, "Tile has no cells"),
            Self::DetachedRow { row } => {
                write!(f, "Tile row {row} has no cells inside the bounding box")
            }
            Self::InvalidPattern { reason } => write!(f, "Invalid pattern: {reason}"),
            Self::Parse { line, reason } => write!(f, "Parse error on line {line}: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for TilingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TilingError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for tiling results
pub type Result<T> = std::result::Result<T, TilingError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TilingError {
    TilingError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error carrying the path and operation
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> TilingError {
    TilingError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}

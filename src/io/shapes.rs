//! Text format for tiles and forbidden patterns
//!
//! Shapes are drawn as character grids separated by blank lines. The last
//! line of a block is row 0, so a pattern reads the way the strip grows:
//! floor at the bottom. In tile blocks `#` marks an occupied cell; in pattern
//! blocks `#` must be filled, `.` must be empty and anything else is ignored.
//! Lines starting with `;` are comments.

use crate::algorithm::pruning::Pattern;
use crate::io::configuration::{COMMENT_MARK, EMPTY_MARK, FILLED_MARK};
use crate::io::error::{Result, TilingError, file_system_error};
use crate::spatial::TileShape;
use crate::spatial::transform::Cells;
use std::path::Path;

/// A block of consecutive non-blank lines
struct Block<'a> {
    first_line: usize,
    lines: Vec<&'a str>,
}

impl Block<'_> {
    /// Cells holding `mark`, with the last line as row 0
    fn cells_marked(&self, mark: char) -> Cells {
        let top = self.lines.len().saturating_sub(1);
        self.lines
            .iter()
            .enumerate()
            .flat_map(|(line_index, line)| {
                let y = (top - line_index) as i32;
                line.chars()
                    .enumerate()
                    .filter(move |&(_, c)| c == mark)
                    .map(move |(x, _)| (x as i32, y))
            })
            .collect()
    }
}

fn blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block<'_>> = None;

    for (index, line) in text.lines().enumerate() {
        if line.trim_start().starts_with(COMMENT_MARK) {
            continue;
        }
        if line.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }
        current
            .get_or_insert_with(|| Block {
                first_line: index + 1,
                lines: Vec::new(),
            })
            .lines
            .push(line.trim_end());
    }
    if let Some(block) = current {
        blocks.push(block);
    }
    blocks
}

/// Parse tile blocks into cell sets, each at most `limit` columns wide
///
/// # Errors
///
/// Returns [`TilingError::Parse`] with the block's first line when a block has
/// no occupied cell, has an empty row or is wider than `limit`, and when the
/// text has no blocks
pub fn parse_tiles(text: &str, limit: u32) -> Result<Vec<Cells>> {
    let parsed = blocks(text)
        .iter()
        .map(|block| {
            let cells = block.cells_marked(FILLED_MARK);
            if cells.is_empty() {
                return Err(TilingError::Parse {
                    line: block.first_line,
                    reason: format!("tile has no '{FILLED_MARK}' cells"),
                });
            }
            TileShape::new(&cells, limit).map_err(|err| TilingError::Parse {
                line: block.first_line,
                reason: err.to_string(),
            })?;
            Ok(cells)
        })
        .collect::<Result<Vec<_>>>()?;

    if parsed.is_empty() {
        return Err(TilingError::Parse {
            line: 1,
            reason: "no tiles found".to_string(),
        });
    }
    Ok(parsed)
}

/// Parse pattern blocks into forbidden patterns
///
/// # Errors
///
/// Returns [`TilingError::Parse`] when a block does not form a valid pattern
pub fn parse_patterns(text: &str) -> Result<Vec<Pattern>> {
    blocks(text)
        .iter()
        .map(|block| {
            let filled = block.cells_marked(FILLED_MARK);
            let empty = block.cells_marked(EMPTY_MARK);
            Pattern::new(&filled, &empty).map_err(|err| TilingError::Parse {
                line: block.first_line,
                reason: err.to_string(),
            })
        })
        .collect()
}

/// Read and parse a tile file for a strip `limit` columns wide
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load_tiles(path: &Path, limit: u32) -> Result<Vec<Cells>> {
    let text =
        std::fs::read_to_string(path).map_err(|err| file_system_error(path, "read", err))?;
    parse_tiles(&text, limit)
}

/// Read and parse a pattern file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load_patterns(path: &Path) -> Result<Vec<Pattern>> {
    let text =
        std::fs::read_to_string(path).map_err(|err| file_system_error(path, "read", err))?;
    parse_patterns(&text)
}

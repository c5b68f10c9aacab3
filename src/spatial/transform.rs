//! Orientation generation for polyomino cell sets
//!
//! The solver treats every orientation as a separate placeable shape. These
//! helpers produce rotations (90°, 180°, 270°) and reflections, normalized
//! and deduplicated, in a stable order.

use std::collections::HashSet;

/// A tile as a list of (x, y) cells
pub type Cells = Vec<(i32, i32)>;

/// All distinct orientations of `cells`, the input orientation first
pub fn orientations(
    cells: &[(i32, i32)],
    include_rotations: bool,
    include_reflections: bool,
) -> Vec<Cells> {
    let base = normalize(cells);
    let mut transforms = vec![base.clone()];

    if include_rotations {
        let rot90 = rotate_90(&base);
        let rot180 = rotate_90(&rot90);
        let rot270 = rotate_90(&rot180);
        transforms.push(rot90);
        transforms.push(rot180);
        transforms.push(rot270);
    }

    if include_reflections {
        let current_len = transforms.len();
        for i in 0..current_len {
            if let Some(transform) = transforms.get(i) {
                let reflected = reflect(transform);
                transforms.push(reflected);
            }
        }
    }

    deduplicate(transforms)
}

/// Expand every tile into its orientations, dropping shapes repeated across tiles
pub fn expand_all(
    tiles: &[Cells],
    include_rotations: bool,
    include_reflections: bool,
) -> Vec<Cells> {
    let expanded = tiles
        .iter()
        .flat_map(|cells| orientations(cells, include_rotations, include_reflections))
        .collect();
    deduplicate(expanded)
}

/// Quarter turn counter-clockwise, normalized
pub fn rotate_90(cells: &[(i32, i32)]) -> Cells {
    normalize(&cells.iter().map(|&(x, y)| (-y, x)).collect::<Vec<_>>())
}

/// Left-right reflection, normalized
pub fn reflect(cells: &[(i32, i32)]) -> Cells {
    normalize(&cells.iter().map(|&(x, y)| (-x, y)).collect::<Vec<_>>())
}

/// Translate so the minimum x and y are zero, sort, and drop duplicates
pub fn normalize(cells: &[(i32, i32)]) -> Cells {
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
    let mut normalized: Cells = cells
        .iter()
        .map(|&(x, y)| (x - min_x, y - min_y))
        .collect();
    normalized.sort_unstable_by_key(|&(x, y)| (y, x));
    normalized.dedup();
    normalized
}

fn deduplicate(tiles: Vec<Cells>) -> Vec<Cells> {
    let mut seen = HashSet::new();
    let mut unique_tiles = Vec::new();

    for tile in tiles {
        let key = normalize(&tile);
        if seen.insert(key.clone()) {
            unique_tiles.push(key);
        }
    }

    unique_tiles
}

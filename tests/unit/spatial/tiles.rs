//! Tests for tile packing, range checks and cell round trips

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use striptile::TilingError;
    use striptile::spatial::{Context, TileShape};

    const L_TROMINO: [(i32, i32); 3] = [(0, 0), (1, 0), (1, 1)];

    fn as_set(cells: &[(i32, i32)]) -> BTreeSet<(i32, i32)> {
        cells.iter().copied().collect()
    }

    // Verifies rows, spans and anchor of a small L tile
    // Verified by packing rows top-down instead of bottom-up
    #[test]
    fn test_packed_rows() {
        let tile = TileShape::single_lane(&L_TROMINO).expect("Failed to build tile");
        assert_eq!(tile.width(), 2);
        assert_eq!(tile.height(), 2);
        assert_eq!(tile.pages(), 1);
        assert_eq!(tile.cell_count(), 3);
        assert_eq!(tile.row(0), Some(&[0b11u64][..]));
        assert_eq!(tile.row(1), Some(&[0b10u64][..]));
        assert_eq!(tile.row(2), None);
        assert_eq!(tile.span(0), Some((0, 1)));
        assert_eq!(tile.span(1), Some((1, 1)));
        assert_eq!(tile.anchor(), 0);
    }

    // Tests the anchor is the leftmost cell of the lowest row, not column 0
    #[test]
    fn test_anchor_offset() {
        let tile = TileShape::single_lane(&[(1, 0), (0, 1), (1, 1)]).expect("Failed to build tile");
        assert_eq!(tile.anchor(), 1);
        assert_eq!(tile.span(1), Some((0, 1)));
    }

    // Tests cells come back in the coordinates they went in with
    // Verified by dropping the origin from cells()
    #[test]
    fn test_cells_round_trip() {
        let input = [(5, 7), (6, 7), (6, 8), (7, 8)];
        let tile = TileShape::single_lane(&input).expect("Failed to build tile");
        assert_eq!(tile.origin(), (5, 7));
        assert_eq!(as_set(&tile.cells()), as_set(&input));

        let relative: BTreeSet<(u32, usize)> = tile.relative_cells().collect();
        let expected: BTreeSet<(u32, usize)> = [(0, 0), (1, 0), (1, 1), (2, 1)].into();
        assert_eq!(relative, expected);
    }

    #[test]
    fn test_negative_coordinates() {
        let input = [(-3, -1), (-2, -1), (-2, 0)];
        let tile = TileShape::single_lane(&input).expect("Failed to build tile");
        assert_eq!(tile.origin(), (-3, -1));
        assert_eq!(tile.row(0), Some(&[0b11u64][..]));
        assert_eq!(as_set(&tile.cells()), as_set(&input));
    }

    #[test]
    fn test_duplicates_ignored() {
        let tile = TileShape::single_lane(&[(0, 0), (0, 0), (1, 0)]).expect("Failed to build tile");
        assert_eq!(tile.cell_count(), 2);
    }

    // Tests construction errors
    // Verified by comparing the normalized column against the limit inclusively
    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            TileShape::single_lane(&[]),
            Err(TilingError::EmptyTile)
        ));
        assert!(matches!(
            TileShape::new(&[(0, 0), (5, 0)], 5),
            Err(TilingError::TileOutOfRange {
                column: 5,
                limit: 5
            })
        ));
        assert!(TileShape::new(&[(0, 0), (4, 0)], 5).is_ok());
        assert!(matches!(
            TileShape::single_lane(&[(0, 0), (64, 0)]),
            Err(TilingError::TileOutOfRange { column: 64, .. })
        ));
        assert!(matches!(
            TileShape::single_lane(&[(0, 0), (0, 2)]),
            Err(TilingError::DetachedRow { row: 1 })
        ));
    }

    // Tests a huge vertical gap is reported as a detached row, not allocated
    // Verified by checking for empty rows only after packing
    #[test]
    fn test_gap_rejected_before_packing() {
        assert!(matches!(
            TileShape::new(&[(0, i32::MIN), (0, i32::MAX)], 5),
            Err(TilingError::DetachedRow { row: 1 })
        ));
        assert!(matches!(
            TileShape::single_lane(&[(0, 0), (1, 0), (1, 1), (0, 3)]),
            Err(TilingError::DetachedRow { row: 2 })
        ));
    }

    #[test]
    fn test_full_lane_tile() {
        let tile = TileShape::single_lane(&[(0, 0), (63, 0)]).expect("Failed to build tile");
        assert_eq!(tile.width(), 64);
        assert_eq!(tile.row(0), Some(&[1u64 | 1 << 63][..]));
    }

    // Tests a tile wider than two lanes packs over three pages
    #[test]
    fn test_multi_page_tile() {
        let context = Context::new(200).expect("Failed to create context");
        let tile = TileShape::for_context(&[(0, 0), (129, 0)], &context)
            .expect("Failed to build tile");
        assert_eq!(tile.pages(), 3);
        assert_eq!(tile.row(0), Some(&[1u64, 0, 1 << 1][..]));
        assert_eq!(tile.span(0), Some((0, 129)));
        assert_eq!(tile.cells().len(), 2);
    }

    #[test]
    fn test_display() {
        let tile = TileShape::single_lane(&L_TROMINO).expect("Failed to build tile");
        assert_eq!(tile.to_string(), ".#\n##\n");
    }
}

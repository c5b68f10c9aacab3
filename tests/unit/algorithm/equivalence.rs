//! Tests for exact and mirror-folded frontier equivalence

#[cfg(test)]
mod tests {
    use striptile::algorithm::equivalence::{Equivalence, Exact, Folding, MirrorFold};
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use striptile::algorithm::frontier::Frontier;
    use striptile::spatial::transform::reflect;
    use striptile::spatial::{Cell, Context, TileShape};

    fn context(width: usize) -> Context {
        Context::new(width).expect("Failed to create context")
    }

    // Verifies an L placed at the left wall and its mirror at the right wall fold together
    // Verified by comparing rows unmirrored in MirrorFold::equivalent
    #[test]
    fn test_mirror_images_fold() {
        let context = context(5);
        let l_tile = TileShape::for_context(&[(0, 0), (1, 0), (1, 1)], &context)
            .expect("Failed to build tile");
        let mirrored_l = TileShape::for_context(&[(0, 0), (1, 0), (0, 1)], &context)
            .expect("Failed to build tile");

        let empty = Frontier::empty(&context);
        let left = empty.place(&context, Cell::new(0, 0), &l_tile);
        let right = empty.place(&context, Cell::new(3, 0), &mirrored_l);
        assert_eq!(right.row(0), Some(&[0b11000u64][..]));
        assert_eq!(right.row(1), Some(&[0b01000u64][..]));

        assert!(MirrorFold.equivalent(&context, &left, &right));
        assert_eq!(MirrorFold.key(&context, &left), MirrorFold.key(&context, &right));
        assert!(!Exact.equivalent(&context, &left, &right));
    }

    #[test]
    fn test_exact_key_is_rolling_hash() {
        let context = context(6);
        let frontier = Frontier::from_rows(&context, 0, vec![0b000111, 0b000001]);
        assert_eq!(Exact.key(&context, &frontier), frontier.rolling_hash());
        assert!(Exact.equivalent(&context, &frontier, &frontier.clone()));
    }

    // Tests folding never merges frontiers that are not mirror images
    #[test]
    fn test_mirror_fold_keeps_distinct_states() {
        let context = context(5);
        let a = Frontier::from_rows(&context, 0, vec![0b00011]);
        let b = Frontier::from_rows(&context, 0, vec![0b00110]);
        assert!(!MirrorFold.equivalent(&context, &a, &b));

        // Different heights never fold
        let tall = Frontier::from_rows(&context, 0, vec![0b00011, 0b00001]);
        assert!(!MirrorFold.equivalent(&context, &a, &tall));
    }

    // Tests the key is symmetric for a row that is its own mirror
    #[test]
    fn test_symmetric_rows() {
        let context = context(4);
        let left = Frontier::from_rows(&context, 0, vec![0b0011]);
        let right = Frontier::from_rows(&context, 0, vec![0b1100]);
        let middle = Frontier::from_rows(&context, 0, vec![0b0110]);
        assert!(MirrorFold.equivalent(&context, &left, &right));
        assert!(MirrorFold.equivalent(&context, &middle, &middle.mirrored(&context)));
        assert_eq!(middle, middle.mirrored(&context));
    }

    // Tests folding on strips wider than two lanes
    // Verified by not shifting out the spare bits of the paged mirror
    #[test]
    fn test_paged_mirror_fold() {
        let context = context(200);
        let a = Frontier::from_rows(&context, 0, vec![1, 0, 0, 0]);
        let b = Frontier::from_rows(&context, 0, vec![0, 0, 0, 1 << 7]);
        assert!(MirrorFold.equivalent(&context, &a, &b));
        assert_eq!(MirrorFold.key(&context, &a), MirrorFold.key(&context, &b));
        assert!(!Exact.equivalent(&context, &a, &b));
    }

    // Verifies mirrored placement sequences fold on two-lane and paged strips
    // Verified by mirroring WideRow without shifting out the spare high bits
    #[test]
    fn test_mirrored_sequences_fold() {
        let shapes: [&[(i32, i32)]; 3] = [
            &[(0, 0), (1, 0), (1, 1)],
            &[(0, 0), (1, 0), (1, 1), (2, 1)],
            &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (4, 1)],
        ];

        for (seed, width) in [(7, 70), (8, 128), (9, 129)] {
            let context = context(width);
            let pairs: Vec<(TileShape, TileShape)> = shapes
                .iter()
                .map(|cells| {
                    let tile = TileShape::for_context(cells, &context)
                        .expect("Failed to build tile");
                    let image = TileShape::for_context(&reflect(cells), &context)
                        .expect("Failed to build mirrored tile");
                    (tile, image)
                })
                .collect();

            let mut rng = StdRng::seed_from_u64(seed);
            let mut left = Frontier::empty(&context);
            let mut right = Frontier::empty(&context);
            let mut placements = 0;
            let mut asymmetric = 0;

            for _ in 0..2000 {
                let Some((tile, image)) = pairs.get(rng.random_range(0..pairs.len())) else {
                    continue;
                };
                let y = left.base() + rng.random_range(0..=left.row_count());
                let cell = Cell::new(rng.random_range(0..context.width()), y);
                if !left.can_place(&context, cell, tile) {
                    continue;
                }

                let column = i64::from(cell.x) - i64::from(tile.anchor());
                let mirrored_column =
                    i64::from(context.width()) - column - i64::from(tile.width());
                let mirrored_x = u32::try_from(mirrored_column + i64::from(image.anchor()))
                    .expect("Failed to mirror column");
                let mirrored_cell = Cell::new(mirrored_x, y);
                assert!(right.can_place(&context, mirrored_cell, image));

                left = left.place(&context, cell, tile);
                right = right.place(&context, mirrored_cell, image);
                placements += 1;

                assert_eq!(left.base(), right.base());
                assert_eq!(right, left.mirrored(&context));
                assert!(MirrorFold.equivalent(&context, &left, &right));
                assert!(MirrorFold.equivalent(&context, &right, &left));
                assert_eq!(MirrorFold.key(&context, &left), MirrorFold.key(&context, &right));
                if left != right {
                    asymmetric += 1;
                    assert!(!Exact.equivalent(&context, &left, &right));
                }
            }

            assert!(placements >= 20, "only {placements} placements at width {width}");
            assert!(asymmetric > 0);
        }
    }

    #[test]
    fn test_folding_delegates() {
        let context = context(5);
        let a = Frontier::from_rows(&context, 0, vec![0b00011]);
        let b = Frontier::from_rows(&context, 0, vec![0b11000]);

        assert_eq!(Folding::from_flag(false), Folding::Exact);
        assert_eq!(Folding::from_flag(true), Folding::Mirror);
        assert_eq!(Folding::default(), Folding::Exact);
        assert!(!Folding::Exact.equivalent(&context, &a, &b));
        assert!(Folding::Mirror.equivalent(&context, &a, &b));
        assert_eq!(
            Folding::Mirror.key(&context, &a),
            MirrorFold.key(&context, &a)
        );
    }
}

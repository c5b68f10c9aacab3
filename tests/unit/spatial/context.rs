//! Tests for width classes and the per-class row kernels

#[cfg(test)]
mod tests {
    use striptile::TilingError;
    use striptile::spatial::{Cell, Context, WidthClass};

    // Verifies the class boundaries at one and two lanes
    // Verified by comparing against the lane size exclusively
    #[test]
    fn test_width_classes() {
        let cases = [
            (1, WidthClass::SingleWord, 1),
            (5, WidthClass::SingleWord, 1),
            (64, WidthClass::SingleWord, 1),
            (65, WidthClass::DoubleWord, 2),
            (128, WidthClass::DoubleWord, 2),
            (129, WidthClass::Paged { pages: 3 }, 3),
            (200, WidthClass::Paged { pages: 4 }, 4),
        ];
        for (width, class, pages) in cases {
            let context = Context::new(width).expect("Failed to create context");
            assert_eq!(context.class(), class, "width {width}");
            assert_eq!(context.pages(), pages, "width {width}");
            assert_eq!(context.width() as usize, width);
        }
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(matches!(
            Context::new(0),
            Err(TilingError::InvalidWidth { width: 0 })
        ));
    }

    // Tests the final page mask only covers the strip's columns
    #[test]
    fn test_page_masks() {
        let narrow = Context::new(5).expect("Failed to create context");
        assert_eq!(narrow.last_mask(), 0b11111);
        assert_eq!(narrow.full_row().as_slice(), &[0b11111]);

        let full = Context::new(64).expect("Failed to create context");
        assert_eq!(full.last_mask(), u64::MAX);

        let wide = Context::new(65).expect("Failed to create context");
        assert_eq!(wide.last_mask(), 1);
        assert_eq!(wide.page_mask(0), u64::MAX);

        let paged = Context::new(200).expect("Failed to create context");
        assert_eq!(paged.page_width(0), 64);
        assert_eq!(paged.page_width(3), 8);
        assert_eq!(paged.page_mask(3), 0xFF);
        assert!(paged.row_is_full(&[u64::MAX, u64::MAX, u64::MAX, 0xFF]));
        assert!(!paged.row_is_full(&[u64::MAX, u64::MAX, u64::MAX, 0x7F]));
    }

    // Tests the leftmost gap search in every class
    // Verified by not skipping full pages in the paged kernel
    #[test]
    fn test_first_gap() {
        let narrow = Context::new(5).expect("Failed to create context");
        assert_eq!(narrow.first_gap(&[0b10111]), Some(3));
        assert_eq!(narrow.first_gap(&[0b11111]), None);

        let wide = Context::new(70).expect("Failed to create context");
        assert_eq!(wide.first_gap(&[u64::MAX, 0b1]), Some(65));
        assert_eq!(wide.first_gap(&[u64::MAX, 0b11_1111]), None);

        let paged = Context::new(200).expect("Failed to create context");
        assert_eq!(paged.first_gap(&[u64::MAX, u64::MAX, 0b0111, 0]), Some(131));
        assert_eq!(paged.first_gap(&[u64::MAX, u64::MAX, u64::MAX, 0xFF]), None);
    }

    // Tests a 4-wide tile row shifted across the lane boundary of a 70-wide strip
    #[test]
    fn test_merge_and_overlap_double_word() {
        let context = Context::new(70).expect("Failed to create context");
        let mut row = [0u64, 0];
        context.merge(&mut row, &[0b1111], 62);
        assert_eq!(row, [0b11 << 62, 0b11]);

        assert!(context.overlaps(&row, &[1], 63));
        assert!(context.overlaps(&row, &[1], 65));
        assert!(!context.overlaps(&row, &[1], 66));
        assert!(!context.overlaps(&row, &[1], 61));
    }

    // Tests a tile row spanning two pages landing on three strip pages
    // Verified by dropping the carry into the next page in the split
    #[test]
    fn test_merge_and_overlap_paged() {
        let context = Context::new(200).expect("Failed to create context");
        let mut row = [0u64; 4];
        context.merge(&mut row, &[1, 1], 100);
        assert_eq!(row, [0, 1 << 36, 1 << 36, 0]);

        context.merge(&mut row, &[0b11], 127);
        assert_eq!(row, [0, 1 << 36 | 1 << 63, 1 << 36 | 1, 0]);

        assert!(context.overlaps(&row, &[1], 164));
        assert!(!context.overlaps(&row, &[1], 165));
    }

    #[test]
    fn test_merge_single_word() {
        let context = Context::new(8).expect("Failed to create context");
        let mut row = [0b0000_0001u64];
        context.merge(&mut row, &[0b11], 2);
        assert_eq!(row, [0b0000_1101]);
        assert!(context.overlaps(&row, &[0b11], 1));
        assert!(!context.overlaps(&row, &[0b11], 4));
    }

    // Tests mirroring keeps bits inside the strip in each class
    // Verified by skipping the final shift in the paged mirror
    #[test]
    fn test_mirror() {
        let narrow = Context::new(5).expect("Failed to create context");
        assert_eq!(narrow.mirrored(&[0b00011]).as_slice(), &[0b11000]);

        let wide = Context::new(70).expect("Failed to create context");
        assert_eq!(wide.mirrored(&[1, 0]).as_slice(), &[0, 1 << 5]);

        let paged = Context::new(200).expect("Failed to create context");
        assert_eq!(paged.mirrored(&[1, 0, 0, 0]).as_slice(), &[0, 0, 0, 1 << 7]);
        let row = [0xDEAD_BEEF, 42, 1 << 63, 0x81];
        let twice = paged.mirrored(paged.mirrored(&row).as_slice());
        assert_eq!(twice.as_slice(), &row);
    }

    // Tests windows read the walls and missing rows as filled
    // Verified by treating left-wall columns as empty
    #[test]
    fn test_window_walls() {
        let context = Context::new(5).expect("Failed to create context");
        let row = [0b00101u64];
        assert_eq!(context.window(Some(&row), 0, 3), 0b101);
        assert_eq!(context.window(Some(&row), -1, 3), 0b011);
        assert_eq!(context.window(Some(&row), 3, 3), 0b100);
        assert_eq!(context.window(None, 2, 3), 0b111);
        assert_eq!(context.window(Some(&[]), 1, 2), 0);
    }

    #[test]
    fn test_window_across_pages() {
        let context = Context::new(70).expect("Failed to create context");
        let row = [1u64 << 63, 0b1];
        assert_eq!(context.window(Some(&row), 62, 4), 0b0110);
        assert_eq!(context.window(Some(&row), 68, 4), 0b1100);
    }

    #[test]
    fn test_cell_construction() {
        let cell = Cell::new(3, 7);
        assert_eq!((cell.x, cell.y), (3, 7));
        assert_eq!(Cell::default(), Cell::new(0, 0));
    }
}

//! Tests for configuration constants

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use striptile::io::configuration::{
        COMMENT_MARK, DEFAULT_WIDTH, EMPTY_MARK, FILLED_MARK, HASH_MULTIPLIER, LANE_BITS,
        MAX_PATTERN_ROWS, PLACEMENT_LABELS, PROGRESS_MESSAGE_WIDTH, PROGRESS_REFRESH_INTERVAL,
        SEARCH_TRACE_INTERVAL,
    };

    // Tests rows are packed into 64-bit lanes
    // Verified by changing the lane size
    #[test]
    fn test_lane_bits() {
        assert_eq!(LANE_BITS, 64);
    }

    // Tests patterns may be as tall as they may be wide
    #[test]
    fn test_pattern_row_limit() {
        assert_eq!(MAX_PATTERN_ROWS, LANE_BITS as usize);
    }

    // Tests the hash multiplier is odd so multiplication stays invertible
    #[test]
    fn test_hash_multiplier_odd() {
        assert_eq!(HASH_MULTIPLIER % 2, 1);
    }

    // Tests the shape file marks are distinct
    // Verified by setting the empty mark equal to the filled mark
    #[test]
    fn test_marks_distinct() {
        let marks: HashSet<char> = [FILLED_MARK, EMPTY_MARK, COMMENT_MARK].into();
        assert_eq!(marks.len(), 3);
    }

    // Tests every placement label is unique
    #[test]
    fn test_placement_labels_unique() {
        let labels: HashSet<char> = PLACEMENT_LABELS.chars().collect();
        assert_eq!(labels.len(), PLACEMENT_LABELS.chars().count());
        assert!(!labels.contains(&' '));
    }

    #[test]
    fn test_defaults() {
        assert!(DEFAULT_WIDTH > 0);
        assert!(PROGRESS_REFRESH_INTERVAL > 0);
        assert!(SEARCH_TRACE_INTERVAL >= PROGRESS_REFRESH_INTERVAL);
        assert!(PROGRESS_MESSAGE_WIDTH > 0);
    }
}

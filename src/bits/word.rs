//! Word-level bit queries shared by every row width class
//!
//! A lane is any primitive unsigned integer. Bit `i` of a lane stands for
//! column `i` of a strip row, so "lowest" always means leftmost.

use num_traits::{PrimInt, Unsigned};

/// Number of bits held by one lane of type `T`
pub fn lane_bits<T: PrimInt + Unsigned>() -> u32 {
    T::zero().count_zeros()
}

/// Index of the highest set bit
///
/// Calling this on an empty lane is a logic error; release builds return 0.
pub fn highest_set<T: PrimInt + Unsigned>(word: T) -> u32 {
    debug_assert!(word != T::zero(), "highest_set called on an empty lane");
    (lane_bits::<T>() - 1).saturating_sub(word.leading_zeros())
}

/// Index of the lowest set bit
///
/// Calling this on an empty lane is a logic error; release builds return the lane width.
pub fn lowest_set<T: PrimInt + Unsigned>(word: T) -> u32 {
    debug_assert!(word != T::zero(), "lowest_set called on an empty lane");
    word.trailing_zeros()
}

/// Index of the lowest unset bit, or the lane width when every bit is set
pub fn lowest_unset<T: PrimInt + Unsigned>(word: T) -> u32 {
    (!word).trailing_zeros()
}

/// Bit-reversed copy of the whole lane
pub fn reverse<T: PrimInt + Unsigned>(word: T) -> T {
    word.reverse_bits()
}

/// Mask with the lowest `width` bits set, saturating at a full lane
pub fn low_mask<T: PrimInt + Unsigned>(width: u32) -> T {
    if width >= lane_bits::<T>() {
        T::max_value()
    } else {
        (T::one() << width as usize) - T::one()
    }
}

/// Mirror the lowest `width` bits of a lane: column `c` moves to `width - 1 - c`
pub fn mirror<T: PrimInt + Unsigned>(word: T, width: u32) -> T {
    debug_assert!(width > 0 && width <= lane_bits::<T>());
    let spare = lane_bits::<T>().saturating_sub(width);
    word.reverse_bits() >> spare as usize
}

/// Whether a row spanning columns `first..=last` stays inside `[0, width)`
/// after being moved right by `offset` columns (left when negative)
pub const fn span_fits(first: u32, last: u32, offset: i64, width: u32) -> bool {
    let low = first as i64 + offset;
    let high = last as i64 + offset;
    low >= 0 && high < width as i64
}

/// Whether `word`, moved right by `offset` columns, still lies inside `[0, width)`
///
/// Reads the leading and trailing zero counts instead of performing the shift,
/// so offsets larger than the lane are fine. An empty lane always fits.
pub fn fits_shifted<T: PrimInt + Unsigned>(word: T, offset: i64, width: u32) -> bool {
    if word == T::zero() {
        return true;
    }
    span_fits(lowest_set(word), highest_set(word), offset, width)
}

/// Whether the lowest `width` bits of a lane are all set
pub fn is_full<T: PrimInt + Unsigned>(word: T, width: u32) -> bool {
    let mask = low_mask::<T>(width);
    word & mask == mask
}

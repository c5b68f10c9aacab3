//! Two-lane row type for strips wider than one lane but no wider than two
//!
//! Mirrors the single-lane queries in [`crate::bits::word`] across a 128-bit
//! value stored as a low and a high `u64`.

use crate::bits::word;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

/// Bits held by one half of a [`WideRow`]
const HALF: u32 = u64::BITS;

/// A 128-bit row split into two lanes, column `c` at bit `c`
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct WideRow {
    lo: u64,
    hi: u64,
}

impl WideRow {
    /// Number of columns a wide row can hold
    pub const BITS: u32 = 2 * HALF;

    /// Row with no bits set
    pub const ZERO: Self = Self { lo: 0, hi: 0 };

    /// Build from the low lane (columns 0..64) and high lane (columns 64..128)
    pub const fn from_lanes(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    /// Build from up to two lanes; missing lanes read as zero
    pub fn from_slice(lanes: &[u64]) -> Self {
        let mut lanes = lanes.iter().copied();
        let lo = lanes.next().unwrap_or(0);
        let hi = lanes.next().unwrap_or(0);
        Self { lo, hi }
    }

    /// The (low, high) lanes
    pub const fn lanes(self) -> (u64, u64) {
        (self.lo, self.hi)
    }

    /// Write both lanes into the front of `out`, ignoring missing slots
    pub fn write_to(self, out: &mut [u64]) {
        let mut slots = out.iter_mut();
        if let Some(slot) = slots.next() {
            *slot = self.lo;
        }
        if let Some(slot) = slots.next() {
            *slot = self.hi;
        }
    }

    /// Mask with the lowest `width` bits set, saturating at 128
    pub fn low_mask(width: u32) -> Self {
        if width >= HALF {
            Self {
                lo: u64::MAX,
                hi: word::low_mask(width - HALF),
            }
        } else {
            Self {
                lo: word::low_mask(width),
                hi: 0,
            }
        }
    }

    /// Whether no bit is set
    pub const fn is_zero(self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Index of the highest set bit; the row must not be zero
    pub fn highest_set(self) -> u32 {
        debug_assert!(!self.is_zero(), "highest_set called on an empty row");
        if self.hi == 0 {
            word::highest_set(self.lo)
        } else {
            HALF + word::highest_set(self.hi)
        }
    }

    /// Index of the lowest set bit; the row must not be zero
    pub fn lowest_set(self) -> u32 {
        debug_assert!(!self.is_zero(), "lowest_set called on an empty row");
        if self.lo == 0 {
            HALF + self.hi.trailing_zeros()
        } else {
            self.lo.trailing_zeros()
        }
    }

    /// Index of the lowest unset bit, or 128 when the row is full
    pub fn lowest_unset(self) -> u32 {
        if self.lo == u64::MAX {
            HALF + word::lowest_unset(self.hi)
        } else {
            word::lowest_unset(self.lo)
        }
    }

    /// Bit-reversed copy across all 128 bits
    #[must_use]
    pub const fn reverse(self) -> Self {
        Self {
            lo: self.hi.reverse_bits(),
            hi: self.lo.reverse_bits(),
        }
    }

    /// Mirror the lowest `width` columns: column `c` moves to `width - 1 - c`
    #[must_use]
    pub fn mirror(self, width: u32) -> Self {
        debug_assert!(width > 0 && width <= Self::BITS);
        self.reverse() >> (Self::BITS - width)
    }

    /// Whether this row, moved right by `offset` columns, still lies inside `[0, width)`
    pub fn fits_shifted(self, offset: i64, width: u32) -> bool {
        if self.is_zero() {
            return true;
        }
        word::span_fits(self.lowest_set(), self.highest_set(), offset, width)
    }

    /// Number of set bits
    pub const fn count_ones(self) -> u32 {
        self.lo.count_ones() + self.hi.count_ones()
    }
}

impl Shl<u32> for WideRow {
    type Output = Self;

    fn shl(self, shift: u32) -> Self {
        match shift {
            0 => self,
            s if s >= Self::BITS => Self::ZERO,
            s if s >= HALF => Self {
                lo: 0,
                hi: self.lo << (s - HALF),
            },
            s => Self {
                lo: self.lo << s,
                hi: (self.hi << s) | (self.lo >> (HALF - s)),
            },
        }
    }
}

impl Shr<u32> for WideRow {
    type Output = Self;

    fn shr(self, shift: u32) -> Self {
        match shift {
            0 => self,
            s if s >= Self::BITS => Self::ZERO,
            s if s >= HALF => Self {
                lo: self.hi >> (s - HALF),
                hi: 0,
            },
            s => Self {
                lo: (self.lo >> s) | (self.hi << (HALF - s)),
                hi: self.hi >> s,
            },
        }
    }
}

impl BitAnd for WideRow {
    type Output = Self;

    fn bitand(self, other: Self) -> Self {
        Self {
            lo: self.lo & other.lo,
            hi: self.hi & other.hi,
        }
    }
}

impl BitOr for WideRow {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        Self {
            lo: self.lo | other.lo,
            hi: self.hi | other.hi,
        }
    }
}

impl BitXor for WideRow {
    type Output = Self;

    fn bitxor(self, other: Self) -> Self {
        Self {
            lo: self.lo ^ other.lo,
            hi: self.hi ^ other.hi,
        }
    }
}

impl Not for WideRow {
    type Output = Self;

    fn not(self) -> Self {
        Self {
            lo: !self.lo,
            hi: !self.hi,
        }
    }
}

impl From<u128> for WideRow {
    fn from(value: u128) -> Self {
        Self {
            lo: value as u64,
            hi: (value >> HALF) as u64,
        }
    }
}

impl From<WideRow> for u128 {
    fn from(row: WideRow) -> Self {
        (u128::from(row.hi) << HALF) | u128::from(row.lo)
    }
}

impl fmt::Display for WideRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:064b}{:064b}", self.hi, self.lo)
    }
}

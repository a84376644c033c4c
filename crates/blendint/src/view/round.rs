//! Corner rounding flags.

use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Which corners of a view's outline are rounded.
///
/// Only the four corner bits are ever stored; [`RoundType::from_bits`]
/// discards everything else.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoundType(u8);

impl RoundType {
    pub const NONE: Self = Self(0);
    pub const TOP_LEFT: Self = Self(0x1);
    pub const TOP_RIGHT: Self = Self(0x2);
    pub const BOTTOM_RIGHT: Self = Self(0x4);
    pub const BOTTOM_LEFT: Self = Self(0x8);
    pub const TOP: Self = Self(0x1 | 0x2);
    pub const BOTTOM: Self = Self(0x4 | 0x8);
    pub const ALL: Self = Self(0xF);

    const MASK: u32 = 0xF;

    /// Build from raw bits, keeping only the corner bits.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self((bits & Self::MASK) as u8)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if every corner in `other` is set here.
    #[inline]
    pub const fn contains(self, other: RoundType) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for RoundType {
    type Output = RoundType;

    fn bitor(self, rhs: RoundType) -> RoundType {
        RoundType(self.0 | rhs.0)
    }
}

impl BitAnd for RoundType {
    type Output = RoundType;

    fn bitand(self, rhs: RoundType) -> RoundType {
        RoundType(self.0 & rhs.0)
    }
}

impl fmt::Debug for RoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundType({:#06b})", self.0)
    }
}

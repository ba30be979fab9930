//! Single binary digit.
//!
//! The bit-serial adder works one position at a time, so it needs a bit
//! type with half- and full-adder primitives rather than native integer
//! addition.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A single binary digit.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Bit {
    /// 0
    #[default]
    Zero = 0,
    /// 1
    One = 1,
}

impl Bit {
    /// Both bit values in order.
    pub const ALL: [Bit; 2] = [Bit::Zero, Bit::One];

    /// Build a bit from a boolean.
    #[inline]
    pub const fn from_bool(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }

    /// Build a bit from the lowest bit of `value`.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        Self::from_bool(value & 1 == 1)
    }

    /// Numeric value (0 or 1).
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Parse a `'0'` or `'1'` character.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }

    /// Character form.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    /// Logical complement.
    #[inline]
    pub const fn invert(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }

    /// Returns true if the bit is set.
    #[inline]
    pub const fn is_set(self) -> bool {
        matches!(self, Bit::One)
    }

    /// Full adder: adds `self + other + carry_in`, returns (sum, carry_out).
    #[inline]
    pub const fn full_add(self, other: Self, carry_in: Self) -> (Self, Self) {
        let total = self.to_u8() + other.to_u8() + carry_in.to_u8();
        (Self::from_u8(total % 2), Self::from_u8(total / 2))
    }
}

impl fmt::Debug for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u8())
    }
}

impl std::ops::Not for Bit {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.invert()
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        Bit::from_bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_adder_truth_table() {
        for a in Bit::ALL {
            for b in Bit::ALL {
                for c in Bit::ALL {
                    let total = a.to_u8() + b.to_u8() + c.to_u8();
                    let (sum, carry) = a.full_add(b, c);
                    assert_eq!(sum.to_u8() + 2 * carry.to_u8(), total,
                        "{:?} + {:?} + {:?}", a, b, c);
                }
            }
        }
    }

    #[test]
    fn test_invert() {
        assert_eq!(!Bit::Zero, Bit::One);
        assert_eq!(!Bit::One, Bit::Zero);
    }

    #[test]
    fn test_char_roundtrip() {
        for b in Bit::ALL {
            assert_eq!(Bit::from_char(b.to_char()), Some(b));
        }
        assert_eq!(Bit::from_char('2'), None);
    }
}

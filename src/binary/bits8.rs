//! Fixed-width 8-bit strings.
//!
//! [`Bits8`] is the textual view of a byte used throughout the adder trace:
//! always exactly eight `'0'`/`'1'` characters, most significant bit first.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize, Serializer, Deserializer};
use thiserror::Error;
use crate::binary::Bit;

/// An 8-bit word stored bit by bit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bits8 {
    /// Bits stored from least significant (index 0) to most significant (index 7)
    bits: [Bit; 8],
}

impl Bits8 {
    /// Number of bits.
    pub const WIDTH: usize = 8;

    /// `00000000`
    pub const ZERO: Bits8 = Bits8 { bits: [Bit::Zero; 8] };

    /// `00000001`
    pub const ONE: Bits8 = Bits8::from_byte(1);

    /// Build from a byte.
    pub const fn from_byte(value: u8) -> Self {
        let mut bits = [Bit::Zero; 8];
        let mut i = 0;
        while i < 8 {
            bits[i] = Bit::from_u8(value >> i);
            i += 1;
        }
        Self { bits }
    }

    /// Numeric value of the word.
    pub fn to_byte(&self) -> u8 {
        self.bits
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, bit)| acc | (bit.to_u8() << i))
    }

    /// Bit at `index`, where 0 is the least significant position.
    #[inline]
    pub const fn get(&self, index: usize) -> Bit {
        self.bits[index]
    }

    /// Set the bit at `index` (0 = LSB).
    #[inline]
    pub fn set(&mut self, index: usize, bit: Bit) {
        self.bits[index] = bit;
    }

    /// Most significant bit.
    #[inline]
    pub const fn msb(&self) -> Bit {
        self.bits[7]
    }

    /// Flip every bit.
    pub fn invert(&self) -> Self {
        let mut bits = self.bits;
        for bit in &mut bits {
            *bit = bit.invert();
        }
        Self { bits }
    }

    /// Returns true if every bit is clear.
    pub fn is_zero(&self) -> bool {
        self.bits.iter().all(|b| !b.is_set())
    }

    /// Parse a string like `"00101010"` or `"0b0010_1010"`.
    pub fn parse(s: &str) -> Result<Self, BitsParseError> {
        let s = s.trim();
        let s = s.strip_prefix("0b").unwrap_or(s);
        let digits: Vec<char> = s.chars().filter(|c| *c != '_').collect();

        if digits.len() != Self::WIDTH {
            return Err(BitsParseError::WrongLength { expected: Self::WIDTH, got: digits.len() });
        }

        let mut bits = [Bit::Zero; 8];
        for (i, c) in digits.iter().rev().enumerate() {
            bits[i] = Bit::from_char(*c).ok_or(BitsParseError::InvalidChar(*c))?;
        }

        Ok(Self { bits })
    }
}

impl fmt::Debug for Bits8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits8(0b{} = {})", self, self.to_byte())
    }
}

impl fmt::Display for Bits8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().rev() {
            write!(f, "{}", bit.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Bits8 {
    type Err = BitsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bits8::parse(s)
    }
}

impl From<u8> for Bits8 {
    fn from(value: u8) -> Self {
        Bits8::from_byte(value)
    }
}

impl From<Bits8> for u8 {
    fn from(bits: Bits8) -> Self {
        bits.to_byte()
    }
}

impl std::ops::Not for Bits8 {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.invert()
    }
}

// Serialized as the 8-character string so snapshots stay readable.
impl Serialize for Bits8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bits8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Bits8::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing bit strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitsParseError {
    #[error("expected {expected} bits, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("invalid bit character: '{0}' (expected 0/1)")]
    InvalidChar(char),
}

//! Ripple-carry addition over [`Bits8`].
//!
//! The sum is built one position at a time, least significant bit first,
//! exactly like a chain of full adders.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::binary::{Bit, Bits8};

/// What happened at one bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitStep {
    /// Position, 0 = least significant.
    pub position: usize,
    pub a: Bit,
    pub b: Bit,
    pub carry_in: Bit,
    pub sum_bit: Bit,
    pub carry_out: Bit,
}

impl BitStep {
    /// Column total before splitting into sum and carry (0..=3).
    pub fn total(&self) -> u8 {
        self.a.to_u8() + self.b.to_u8() + self.carry_in.to_u8()
    }
}

impl fmt::Display for BitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bit {}: {} + {} + {}(carry) = {} → bit={}, carry={}",
            self.position, self.a, self.b, self.carry_in, self.total(), self.sum_bit, self.carry_out
        )
    }
}

/// Output of [`add_binary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RippleSum {
    /// The 8-bit sum.
    pub bits: Bits8,
    /// Carry out of bit 7, reported rather than discarded.
    pub carry: Bit,
    /// One entry per position, LSB first.
    pub steps: Vec<BitStep>,
}

/// Add two 8-bit strings, returning the sum, the carry-out and the
/// per-position derivation.
pub fn add_binary(a: Bits8, b: Bits8) -> RippleSum {
    let mut bits = Bits8::ZERO;
    let mut carry = Bit::Zero;
    let mut steps = Vec::with_capacity(Bits8::WIDTH);

    for position in 0..Bits8::WIDTH {
        let (bit_a, bit_b) = (a.get(position), b.get(position));
        let (sum_bit, carry_out) = bit_a.full_add(bit_b, carry);
        bits.set(position, sum_bit);
        steps.push(BitStep {
            position,
            a: bit_a,
            b: bit_b,
            carry_in: carry,
            sum_bit,
            carry_out,
        });
        carry = carry_out;
    }

    RippleSum { bits, carry, steps }
}

/// Two's-complement negation: invert every bit, then add 1 through the same
/// ripple-carry chain.
pub fn twos_complement(bits: Bits8) -> Bits8 {
    add_binary(!bits, Bits8::ONE).bits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Bits8 {
        Bits8::parse(s).unwrap()
    }

    #[test]
    fn test_add_basic() {
        let sum = add_binary(bits("00000101"), bits("00000011"));
        assert_eq!(sum.bits.to_string(), "00001000");
        assert_eq!(sum.carry, Bit::Zero);
        assert_eq!(sum.steps.len(), 8);
    }

    #[test]
    fn test_add_reports_carry_out() {
        let sum = add_binary(bits("11111111"), bits("00000001"));
        assert!(sum.bits.is_zero());
        assert_eq!(sum.carry, Bit::One);
    }

    #[test]
    fn test_step_trace_format() {
        let sum = add_binary(bits("00000001"), bits("00000001"));
        assert_eq!(sum.steps[0].to_string(), "Bit 0: 1 + 1 + 0(carry) = 2 → bit=0, carry=1");
        assert_eq!(sum.steps[1].to_string(), "Bit 1: 0 + 0 + 1(carry) = 1 → bit=1, carry=0");
    }

    #[test]
    fn test_twos_complement() {
        assert_eq!(twos_complement(bits("00000011")).to_string(), "11111101");
        assert_eq!(twos_complement(bits("00000000")).to_string(), "00000000");
        assert_eq!(twos_complement(bits("10000000")).to_string(), "10000000");
        assert_eq!(twos_complement(bits("11111111")).to_string(), "00000001");
    }

    #[test]
    fn test_matches_native_addition() {
        for (a, b) in [(0u8, 0u8), (1, 254), (100, 50), (200, 100), (255, 255)] {
            let sum = add_binary(Bits8::from_byte(a), Bits8::from_byte(b));
            let (expected, overflowed) = a.overflowing_add(b);
            assert_eq!(sum.bits.to_byte(), expected);
            assert_eq!(sum.carry.is_set(), overflowed);
        }
    }
}

//! Condition flags.
//!
//! All three arithmetic components report the same four condition bits,
//! but each derives carry and overflow with its own rule. See
//! [`crate::binary::alu`], [`crate::adder`] and the datapath's ALU stage.

use std::fmt;
use serde::{Serialize, Deserialize};

/// The four condition bits: Z, N, C and V.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlagSet {
    /// Z: the 8-bit result is zero.
    pub zero: bool,
    /// N: bit 7 of the 8-bit result is set.
    pub negative: bool,
    /// C: carry out of bit 7, or borrow.
    pub carry: bool,
    /// V: signed overflow.
    pub overflow: bool,
}

impl FlagSet {
    /// Zero and negative bits derived from an 8-bit result, carry and
    /// overflow clear.
    #[inline]
    pub fn from_result(result: u8) -> Self {
        Self {
            zero: result == 0,
            negative: result & 0x80 != 0,
            carry: false,
            overflow: false,
        }
    }

    /// Pack into a status byte laid out like a 6502 `P` register
    /// (N=bit 7, V=bit 6, Z=bit 1, C=bit 0).
    pub fn to_status_byte(&self) -> u8 {
        (self.negative as u8) << 7
            | (self.overflow as u8) << 6
            | (self.zero as u8) << 1
            | self.carry as u8
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Z={} N={} C={} V={}",
            self.zero as u8, self.negative as u8, self.carry as u8, self.overflow as u8
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        assert_eq!(FlagSet::from_result(0), FlagSet { zero: true, ..FlagSet::default() });
        assert_eq!(FlagSet::from_result(0x80), FlagSet { negative: true, ..FlagSet::default() });
        assert_eq!(FlagSet::from_result(0x7F), FlagSet::default());
    }

    #[test]
    fn test_display() {
        let flags = FlagSet { zero: false, negative: true, carry: false, overflow: true };
        assert_eq!(flags.to_string(), "Z=0 N=1 C=0 V=1");
    }

    #[test]
    fn test_status_byte() {
        let flags = FlagSet { zero: true, negative: true, carry: true, overflow: true };
        assert_eq!(flags.to_status_byte(), 0b1100_0011);
        assert_eq!(FlagSet::default().to_status_byte(), 0);
    }
}

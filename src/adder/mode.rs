//! Operand interpretation: unsigned or two's complement.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::binary::Bits8;

/// How an 8-bit pattern is read as a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// 0 to 255.
    #[default]
    Unsigned,
    /// -128 to 127.
    TwosComplement,
}

impl Mode {
    /// Legal operand range in this mode.
    pub const fn range(self) -> RangeInclusive<i32> {
        match self {
            Mode::Unsigned => 0..=255,
            Mode::TwosComplement => -128..=127,
        }
    }

    /// Clamp `value` into [`Mode::range`].
    pub fn clamp(self, value: i32) -> i32 {
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }

    pub const fn name(self) -> &'static str {
        match self {
            Mode::Unsigned => "unsigned",
            Mode::TwosComplement => "twos-complement",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unsigned" | "u" => Ok(Mode::Unsigned),
            "twos-complement" | "twos" | "signed" | "s" => Ok(Mode::TwosComplement),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Returned when a mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode: {0} (expected unsigned or twos-complement)")]
pub struct UnknownMode(pub String);

/// Encode `value` as an 8-bit string.
///
/// Unsigned values are encoded directly; negative two's-complement values
/// as `256 + value`. Callers are expected to clamp into the mode's range
/// first, anything outside it keeps only its low 8 bits.
pub fn to_binary(value: i32, mode: Mode) -> Bits8 {
    let raw = match mode {
        Mode::TwosComplement if value < 0 => (1 << Bits8::WIDTH) + value,
        _ => value,
    };
    Bits8::from_byte((raw & 0xFF) as u8)
}

/// Decode an 8-bit string in the given mode.
pub fn from_binary(bits: Bits8, mode: Mode) -> i32 {
    let value = bits.to_byte() as i32;
    match mode {
        Mode::Unsigned => value,
        Mode::TwosComplement if value >= 1 << (Bits8::WIDTH - 1) => value - (1 << Bits8::WIDTH),
        Mode::TwosComplement => value,
    }
}

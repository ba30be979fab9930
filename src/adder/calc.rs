//! Full addition/subtraction with flags and a step-by-step derivation.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::debug;
use crate::adder::mode::{Mode, from_binary, to_binary};
use crate::adder::ripple::{add_binary, twos_complement};
use crate::binary::{Bit, Bits8, FlagSet};

/// Addition or subtraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdderOp {
    #[default]
    Add,
    Sub,
}

impl fmt::Display for AdderOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdderOp::Add => f.write_str("add"),
            AdderOp::Sub => f.write_str("sub"),
        }
    }
}

impl FromStr for AdderOp {
    type Err = UnknownAdderOp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "+" => Ok(AdderOp::Add),
            "sub" | "-" => Ok(AdderOp::Sub),
            _ => Err(UnknownAdderOp(s.to_string())),
        }
    }
}

/// Returned when an operation name is neither add nor sub.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown adder operation: {0} (expected add or sub)")]
pub struct UnknownAdderOp(pub String);

/// Everything the adder widget displays for one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdderReport {
    /// Result read back in the calculation's mode.
    pub result_decimal: i32,
    pub result_bits: Bits8,
    pub flags: FlagSet,
    /// Human-readable derivation, one line per entry.
    pub step_trace: Vec<String>,
}

/// Compute `a ± b` by ripple-carry simulation.
///
/// Subtraction is always `a + twos_complement(b)`, in both modes.
pub fn calculate(a: i32, b: i32, op: AdderOp, mode: Mode) -> AdderReport {
    let bits_a = to_binary(a, mode);
    let bits_b = to_binary(b, mode);

    let mut trace = Vec::new();
    let addend = match op {
        AdderOp::Add => {
            trace.push(format!("Addition: {} + {}", a, b));
            bits_b
        }
        AdderOp::Sub => {
            let negated = twos_complement(bits_b);
            trace.push(format!("Subtraction: {} - {}", a, b));
            trace.push(format!("Rewritten as: {} + (-{})", a, b));
            trace.push(format!("Two's complement of {}: {}", b, negated));
            negated
        }
    };

    trace.push(format!("Operand A: {}", bits_a));
    trace.push(format!("Operand B: {}", addend));
    trace.push(String::new());
    trace.push("Bitwise addition from right to left:".to_string());

    let sum = add_binary(bits_a, addend);
    trace.extend(sum.steps.iter().map(|step| step.to_string()));
    if sum.carry == Bit::One {
        trace.push(format!("Final carry: {}", sum.carry));
    }

    let result = from_binary(sum.bits, mode);
    let flags = adder_flags(a, b, op, mode, result, sum.bits, sum.carry);

    debug!(a, b, %op, %mode, result, %flags, "ripple-carry calculation");

    AdderReport {
        result_decimal: result,
        result_bits: sum.bits,
        flags,
        step_trace: trace,
    }
}

/// Flag rules of the serial adder.
///
/// N is only reported in two's-complement mode. In unsigned mode V mirrors
/// C. In two's-complement mode V compares the sign of `a` with the sign of
/// the effective second operand (flipped for subtraction) and the result.
fn adder_flags(a: i32, b: i32, op: AdderOp, mode: Mode, result: i32, bits: Bits8, carry: Bit) -> FlagSet {
    let carry = carry.is_set();
    let overflow = match mode {
        Mode::TwosComplement => {
            let a_sign = a < 0;
            let b_sign = match op {
                AdderOp::Add => b < 0,
                AdderOp::Sub => b >= 0,
            };
            let result_sign = result < 0;
            a_sign == b_sign && a_sign != result_sign
        }
        Mode::Unsigned => carry,
    };

    FlagSet {
        zero: result == 0,
        negative: mode == Mode::TwosComplement && bits.msb().is_set(),
        carry,
        overflow,
    }
}

/// A bit-serial adder configured for one interpretation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialAdder {
    mode: Mode,
}

impl SerialAdder {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    /// Switch interpretation mode.
    pub fn configure(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// [`to_binary`] in the configured mode.
    pub fn encode(&self, value: i32) -> Bits8 {
        to_binary(value, self.mode)
    }

    /// [`from_binary`] in the configured mode.
    pub fn decode(&self, bits: Bits8) -> i32 {
        from_binary(bits, self.mode)
    }

    /// [`calculate`] in the configured mode, with both operands clamped to
    /// the mode's range first.
    pub fn calculate(&self, a: i32, b: i32, op: AdderOp) -> AdderReport {
        calculate(self.mode.clamp(a), self.mode.clamp(b), op, self.mode)
    }
}

//! 8-bit arithmetic-logic unit.
//!
//! [`evaluate`] is the pure core: one operation in, one byte and a fresh
//! [`FlagSet`] out. [`Alu`] wraps it for callers that want to keep the last
//! result and flags around between calls.
//!
//! Flag rules:
//! - logical ops clear C and V
//! - add/inc: C = unsigned carry out of bit 7, V = same-sign operands gave
//!   an opposite-sign result
//! - sub/dec: C = borrow, V = opposite-sign operands and the result sign
//!   differs from the minuend
//! - shl/shr: C = the bit shifted out, V clear

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::binary::FlagSet;

/// The ten ALU operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AluOp {
    And,
    Or,
    Xor,
    Not,
    Add,
    Sub,
    Inc,
    Dec,
    Shl,
    Shr,
}

impl AluOp {
    /// Every operation, in display order.
    pub const ALL: [AluOp; 10] = [
        AluOp::And, AluOp::Or, AluOp::Xor, AluOp::Not,
        AluOp::Add, AluOp::Sub, AluOp::Inc, AluOp::Dec,
        AluOp::Shl, AluOp::Shr,
    ];

    /// Number of operands the operation reads (1 or 2).
    pub const fn arity(self) -> usize {
        match self {
            AluOp::Not | AluOp::Inc | AluOp::Dec | AluOp::Shl | AluOp::Shr => 1,
            _ => 2,
        }
    }

    /// Lowercase mnemonic.
    pub const fn name(self) -> &'static str {
        match self {
            AluOp::And => "and",
            AluOp::Or => "or",
            AluOp::Xor => "xor",
            AluOp::Not => "not",
            AluOp::Add => "add",
            AluOp::Sub => "sub",
            AluOp::Inc => "inc",
            AluOp::Dec => "dec",
            AluOp::Shl => "shl",
            AluOp::Shr => "shr",
        }
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AluOp {
    type Err = UnknownAluOp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        AluOp::ALL
            .into_iter()
            .find(|op| op.name() == lower)
            .ok_or_else(|| UnknownAluOp(s.to_string()))
    }
}

/// Returned when an operation name does not match any [`AluOp`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ALU operation: {0}")]
pub struct UnknownAluOp(pub String);

/// Result byte and flags of one ALU evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AluOutput {
    pub result: u8,
    pub flags: FlagSet,
}

/// Evaluate one operation. `b` is ignored by unary operations.
pub fn evaluate(op: AluOp, a: u8, b: u8) -> AluOutput {
    let (a_wide, b_wide) = (a as i32, b as i32);

    let raw = match op {
        AluOp::And => a_wide & b_wide,
        AluOp::Or => a_wide | b_wide,
        AluOp::Xor => a_wide ^ b_wide,
        AluOp::Not => !a_wide,
        AluOp::Add => a_wide + b_wide,
        AluOp::Sub => a_wide - b_wide,
        AluOp::Inc => a_wide + 1,
        AluOp::Dec => a_wide - 1,
        AluOp::Shl => a_wide << 1,
        AluOp::Shr => a_wide >> 1,
    };

    let result = (raw & 0xFF) as u8;
    let mut flags = FlagSet::from_result(result);

    let sign = |v: i32| v & 0x80 != 0;
    let sign_result = sign(raw);

    match op {
        AluOp::And | AluOp::Or | AluOp::Xor | AluOp::Not => {}
        AluOp::Add | AluOp::Inc => {
            let sign_b = if op == AluOp::Inc { false } else { sign(b_wide) };
            flags.carry = raw > 0xFF;
            flags.overflow = sign(a_wide) == sign_b && sign(a_wide) != sign_result;
        }
        AluOp::Sub | AluOp::Dec => {
            let sign_b = if op == AluOp::Dec { false } else { sign(b_wide) };
            flags.carry = raw < 0;
            flags.overflow = sign(a_wide) != sign_b && sign(a_wide) != sign_result;
        }
        AluOp::Shl => flags.carry = a & 0x80 != 0,
        AluOp::Shr => flags.carry = a & 0x01 != 0,
    }

    AluOutput { result, flags }
}

/// An ALU that remembers its last result and flags.
///
/// Each call fully overwrites both, so no reset is ever needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alu {
    result: u8,
    flags: FlagSet,
}

impl Alu {
    /// Create an ALU with a zero result and clear flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `op` and latch its output.
    pub fn apply(&mut self, op: AluOp, a: u8, b: u8) -> u8 {
        let out = evaluate(op, a, b);
        self.result = out.result;
        self.flags = out.flags;
        out.result
    }

    pub fn and(&mut self, a: u8, b: u8) -> u8 {
        self.apply(AluOp::And, a, b)
    }

    pub fn or(&mut self, a: u8, b: u8) -> u8 {
        self.apply(AluOp::Or, a, b)
    }

    pub fn xor(&mut self, a: u8, b: u8) -> u8 {
        self.apply(AluOp::Xor, a, b)
    }

    pub fn not(&mut self, a: u8) -> u8 {
        self.apply(AluOp::Not, a, 0)
    }

    pub fn add(&mut self, a: u8, b: u8) -> u8 {
        self.apply(AluOp::Add, a, b)
    }

    pub fn sub(&mut self, a: u8, b: u8) -> u8 {
        self.apply(AluOp::Sub, a, b)
    }

    /// `add(a, 1)`
    pub fn inc(&mut self, a: u8) -> u8 {
        self.apply(AluOp::Inc, a, 1)
    }

    /// `sub(a, 1)`
    pub fn dec(&mut self, a: u8) -> u8 {
        self.apply(AluOp::Dec, a, 1)
    }

    pub fn shl(&mut self, a: u8) -> u8 {
        self.apply(AluOp::Shl, a, 0)
    }

    pub fn shr(&mut self, a: u8) -> u8 {
        self.apply(AluOp::Shr, a, 0)
    }

    /// Result of the last operation.
    pub fn result(&self) -> u8 {
        self.result
    }

    /// Flags of the last operation.
    pub fn flags(&self) -> FlagSet {
        self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(zero: bool, negative: bool, carry: bool, overflow: bool) -> FlagSet {
        FlagSet { zero, negative, carry, overflow }
    }

    #[test]
    fn test_logical_ops() {
        let mut alu = Alu::new();

        assert_eq!(alu.and(42, 15), 10);
        assert_eq!(alu.flags(), flags(false, false, false, false));

        assert_eq!(alu.or(42, 15), 47);
        assert_eq!(alu.xor(42, 15), 37);

        assert_eq!(alu.not(42), 213);
        assert_eq!(alu.flags(), flags(false, true, false, false));

        assert_eq!(alu.and(42, 0), 0);
        assert_eq!(alu.flags(), flags(true, false, false, false));
    }

    #[test]
    fn test_add_signed_overflow() {
        let mut alu = Alu::new();
        assert_eq!(alu.add(100, 50), 150);
        assert_eq!(alu.flags(), flags(false, true, false, true));
    }

    #[test]
    fn test_add_unsigned_wrap() {
        let mut alu = Alu::new();
        assert_eq!(alu.add(200, 100), 44);
        assert_eq!(alu.flags(), flags(false, false, true, false));
    }

    #[test]
    fn test_sub() {
        let mut alu = Alu::new();
        assert_eq!(alu.sub(100, 30), 70);
        assert_eq!(alu.flags(), flags(false, false, false, false));

        assert_eq!(alu.sub(30, 100), 186);
        assert_eq!(alu.flags(), flags(false, true, true, false));

        // -128 - 1 overflows to +127
        assert_eq!(alu.sub(0x80, 1), 0x7F);
        assert_eq!(alu.flags(), flags(false, false, false, true));
    }

    #[test]
    fn test_inc_dec() {
        let mut alu = Alu::new();
        assert_eq!(alu.inc(42), 43);
        assert_eq!(alu.flags(), flags(false, false, false, false));

        assert_eq!(alu.inc(255), 0);
        assert_eq!(alu.flags(), flags(true, false, true, false));

        assert_eq!(alu.inc(127), 128);
        assert_eq!(alu.flags(), flags(false, true, false, true));

        assert_eq!(alu.dec(42), 41);
        assert_eq!(alu.dec(0), 255);
        assert_eq!(alu.flags(), flags(false, true, true, false));
    }

    #[test]
    fn test_shifts() {
        let mut alu = Alu::new();
        assert_eq!(alu.shl(42), 84);
        assert_eq!(alu.flags(), flags(false, false, false, false));

        assert_eq!(alu.shl(200), 144);
        assert_eq!(alu.flags(), flags(false, true, true, false));

        assert_eq!(alu.shr(42), 21);
        assert!(!alu.flags().carry);

        assert_eq!(alu.shr(43), 21);
        assert_eq!(alu.flags(), flags(false, false, true, false));

        assert_eq!(alu.shr(1), 0);
        assert_eq!(alu.flags(), flags(true, false, true, false));
    }

    #[test]
    fn test_edge_values() {
        let mut alu = Alu::new();
        assert_eq!(alu.and(255, 255), 255);
        assert_eq!(alu.flags(), flags(false, true, false, false));
        assert_eq!(alu.or(0, 0), 0);
        assert_eq!(alu.flags(), flags(true, false, false, false));
    }

    #[test]
    fn test_each_call_overwrites_state() {
        let mut alu = Alu::new();
        alu.add(200, 100);
        assert!(alu.flags().carry);
        alu.and(1, 1);
        assert_eq!(alu.result(), 1);
        assert!(!alu.flags().carry);
    }

    #[test]
    fn test_op_names() {
        for op in AluOp::ALL {
            assert_eq!(op.name().parse::<AluOp>().unwrap(), op);
        }
        assert_eq!("ADD".parse::<AluOp>().unwrap(), AluOp::Add);
        assert!("mul".parse::<AluOp>().is_err());
        assert_eq!(AluOp::Not.arity(), 1);
        assert_eq!(AluOp::Xor.arity(), 2);
    }
}

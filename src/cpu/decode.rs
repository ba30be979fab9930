//! Micro-operation decoder.
//!
//! Statements are free text like `MAR ← PC` or `r[2] <- alu`. Each one is
//! decoded once, when a program is loaded, into a [`MicroOp`]. Matching is
//! case-insensitive and ignores whitespace; `<-` is accepted for `←` and
//! registers may be written `R[n]` or `Rn`.
//!
//! Text that matches nothing decodes to [`MicroOp::Unknown`]. That is not
//! an error: executing it records "Unknown operation" and moves on.

use std::fmt;
use serde::{Serialize, Deserialize};

/// One datapath micro-operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MicroOp {
    /// `MAR ← PC`
    MarFromPc,
    /// `MDR ← Mem[MAR]`
    MdrFromMemory,
    /// `IR ← MDR`
    IrFromMdr,
    /// `PC ← PC + 1`
    IncrementPc,
    /// `A ← R[n]`
    BusAFromRegister(usize),
    /// `B ← R[n]`
    BusBFromRegister(usize),
    /// `ALU ← A + B`
    AluAdd,
    /// `ALU ← A - B`
    AluSub,
    /// `ALU ← A & B`
    AluAnd,
    /// `R[n] ← ALU`
    RegisterFromAlu(usize),
    /// `FLAGS ← ALU.flags`
    LatchFlags,
    /// `Mem[MAR] ← MDR`
    MemoryFromMdr,
    /// Anything else, kept verbatim.
    Unknown(String),
}

impl MicroOp {
    /// Decode one statement.
    pub fn parse(text: &str) -> MicroOp {
        let key = normalize(text);

        let op = match key.as_str() {
            "MAR←PC" => Some(MicroOp::MarFromPc),
            "MDR←MEM[MAR]" => Some(MicroOp::MdrFromMemory),
            "IR←MDR" => Some(MicroOp::IrFromMdr),
            "PC←PC+1" => Some(MicroOp::IncrementPc),
            "ALU←A+B" => Some(MicroOp::AluAdd),
            "ALU←A-B" => Some(MicroOp::AluSub),
            "ALU←A&B" => Some(MicroOp::AluAnd),
            "FLAGS←ALU.FLAGS" => Some(MicroOp::LatchFlags),
            "MEM[MAR]←MDR" => Some(MicroOp::MemoryFromMdr),
            _ => parse_register_transfer(&key),
        };

        op.unwrap_or_else(|| MicroOp::Unknown(text.trim().to_string()))
    }

    /// Returns true for [`MicroOp::Unknown`].
    pub fn is_unknown(&self) -> bool {
        matches!(self, MicroOp::Unknown(_))
    }
}

/// Uppercase, strip whitespace and spell the arrow one way.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
        .replace("<-", "←")
}

/// `A←R[n]`, `B←R[n]` and `R[n]←ALU`.
fn parse_register_transfer(key: &str) -> Option<MicroOp> {
    let (dest, src) = key.split_once('←')?;
    match (dest, src) {
        ("A", reg) => parse_register(reg).map(MicroOp::BusAFromRegister),
        ("B", reg) => parse_register(reg).map(MicroOp::BusBFromRegister),
        (reg, "ALU") => parse_register(reg).map(MicroOp::RegisterFromAlu),
        _ => None,
    }
}

/// `R[n]` or `Rn` to `n`.
fn parse_register(text: &str) -> Option<usize> {
    let rest = text.strip_prefix('R')?;
    let digits = rest
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .unwrap_or(rest);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for MicroOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MicroOp::MarFromPc => write!(f, "MAR ← PC"),
            MicroOp::MdrFromMemory => write!(f, "MDR ← Mem[MAR]"),
            MicroOp::IrFromMdr => write!(f, "IR ← MDR"),
            MicroOp::IncrementPc => write!(f, "PC ← PC + 1"),
            MicroOp::BusAFromRegister(n) => write!(f, "A ← R[{}]", n),
            MicroOp::BusBFromRegister(n) => write!(f, "B ← R[{}]", n),
            MicroOp::AluAdd => write!(f, "ALU ← A + B"),
            MicroOp::AluSub => write!(f, "ALU ← A - B"),
            MicroOp::AluAnd => write!(f, "ALU ← A & B"),
            MicroOp::RegisterFromAlu(n) => write!(f, "R[{}] ← ALU", n),
            MicroOp::LatchFlags => write!(f, "FLAGS ← ALU.flags"),
            MicroOp::MemoryFromMdr => write!(f, "Mem[MAR] ← MDR"),
            MicroOp::Unknown(text) => write!(f, "{}", text),
        }
    }
}

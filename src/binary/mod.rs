//! 8-bit binary primitives.
//!
//! This module provides the core types for working with bytes:
//! - [`Bit`] - a single binary digit with full-adder arithmetic
//! - [`Bits8`] - an 8-bit word rendered as a fixed-width bit string
//! - [`FlagSet`] - the Z/N/C/V condition bits
//! - [`alu`] - the 8-bit ALU engine

mod bit;
mod bits8;
mod flags;
pub mod alu;

pub use bit::Bit;
pub use bits8::{Bits8, BitsParseError};
pub use flags::FlagSet;
pub use alu::{Alu, AluOp, AluOutput, evaluate};

//! Bit-serial adder/subtractor.
//!
//! Computes 8-bit `A ± B` by explicit ripple-carry simulation instead of
//! native integer arithmetic, so every carry can be shown:
//! - [`mode`] - unsigned / two's-complement encoding and decoding
//! - [`ripple`] - the full-adder chain and two's-complement negation
//! - [`calc`] - flags and the step trace for a complete calculation
//!
//! The flag rules here are the adder's own and intentionally differ from
//! [`crate::binary::alu`] on some inputs.

pub mod mode;
pub mod ripple;
pub mod calc;

pub use mode::{Mode, UnknownMode, to_binary, from_binary};
pub use ripple::{BitStep, RippleSum, add_binary, twos_complement};
pub use calc::{AdderOp, AdderReport, SerialAdder, UnknownAdderOp, calculate};

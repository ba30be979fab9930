//! # ByteLab
//!
//! Interactive models of 8-bit computer arithmetic for teaching.
//!
//! Three independent components:
//! - [`binary::alu`]: an 8-bit ALU with Z/N/C/V flags
//! - [`adder`]: a bit-serial adder that shows every carry
//! - [`cpu`]: a micro-operation datapath stepped one register transfer
//!   at a time
//!
//! Each computes its flags with its own rules, the way the separate
//! teaching widgets they model do.

pub mod binary;
pub mod adder;
pub mod cpu;
pub mod asm;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use binary::{Alu, AluOp, AluOutput, Bit, Bits8, FlagSet, evaluate};
pub use adder::{AdderOp, AdderReport, Mode, SerialAdder, calculate};
pub use cpu::{Datapath, DatapathConfig, DatapathError, DatapathState, MicroOp, MicroProgram, RunState};
pub use asm::{assemble, AssemblerError, Snapshot, SnapshotError, load_snapshot, save_snapshot};

#[cfg(feature = "tui")]
pub use tui::run_stepper;

//! Micro-operation datapath.
//!
//! A teaching model of a CPU datapath:
//! - byte-wide memory (up to 256 cells, addressed by MAR)
//! - general registers `R[n]` plus PC, IR, MAR and MDR
//! - two ALU input buses, an ALU result latch and a flags register
//! - register-transfer statements decoded once into [`MicroOp`]s

pub mod config;
pub mod memory;
pub mod registers;
pub mod decode;
pub mod program;
pub mod clock;
pub mod execute;

pub use config::{DatapathConfig, DatapathConfigBuilder, ConfigError};
pub use memory::{Memory, MemoryError};
pub use registers::Registers;
pub use decode::MicroOp;
pub use program::{MicroProgram, Statement};
pub use clock::Clock;
pub use execute::{Datapath, DatapathError, DatapathState, RunState, StepOutcome, TraceEntry};

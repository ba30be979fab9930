//! Program text, presets and snapshots for the datapath.
//!
//! This module provides:
//! - An assembler (program text → micro-program) with diagnostics
//! - Program listings
//! - The built-in example programs
//! - JSON snapshot files

pub mod assembler;
pub mod disasm;
pub mod presets;
pub mod snapshot;

pub use assembler::{assemble, assemble_strict, validate, AssemblerError, Diagnostic};
pub use disasm::listing;
pub use presets::Preset;
pub use snapshot::{Snapshot, SnapshotError, load_snapshot, save_snapshot};

//! Datapath snapshots.
//!
//! A snapshot is a JSON document holding the program, the full datapath
//! state and the name of the preset it came from:
//!
//! ```json
//! { "microProgram": ["MAR ← PC"], "state": { ... }, "presetName": null }
//! ```
//!
//! Loading checks more than the JSON shape. Memory and register dimensions
//! must match the datapath configuration and the step pointer must lie
//! within the program.

use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::cpu::config::DatapathConfig;
use crate::cpu::execute::DatapathState;
use crate::cpu::program::MicroProgram;

/// Saved datapath: program, state and preset name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Stored as the statements' source text.
    pub micro_program: MicroProgram,
    pub state: DatapathState,
    #[serde(default)]
    pub preset_name: Option<String>,
}

impl Snapshot {
    /// Parse a snapshot. Only the JSON shape and byte ranges are checked
    /// here; see [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Serialize(e.to_string()))
    }

    /// Check the snapshot fits a datapath built from `config`.
    pub fn validate(&self, config: &DatapathConfig) -> Result<(), SnapshotError> {
        let memory = self.state.memory.size();
        if memory != config.memory_size {
            return Err(SnapshotError::MemorySize { expected: config.memory_size, got: memory });
        }

        let registers = self.state.registers.general.len();
        if registers != config.register_count {
            return Err(SnapshotError::RegisterCount { expected: config.register_count, got: registers });
        }

        let len = self.micro_program.len();
        if self.state.current_step > len {
            return Err(SnapshotError::StepOutOfRange { step: self.state.current_step, len });
        }
        if let Some(entry) = self.state.execution_trace.iter().find(|e| e.step >= len) {
            return Err(SnapshotError::StepOutOfRange { step: entry.step, len });
        }

        Ok(())
    }
}

/// Write a snapshot as pretty-printed JSON.
pub fn save_snapshot<P: AsRef<Path>>(path: P, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let json = snapshot.to_json()?;
    std::fs::write(path.as_ref(), json + "\n")
        .map_err(|e| SnapshotError::Io(e.to_string()))
}

/// Read a snapshot file. The result still needs validating against a
/// configuration, which [`crate::cpu::Datapath::import_state`] does.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, SnapshotError> {
    let json = std::fs::read_to_string(path.as_ref())
        .map_err(|e| SnapshotError::Io(e.to_string()))?;
    Snapshot::from_json(&json)
}

/// Errors that can occur when reading or restoring a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("malformed snapshot: {0}")]
    Parse(String),

    #[error("cannot serialize snapshot: {0}")]
    Serialize(String),

    #[error("snapshot has {got} memory cells, datapath has {expected}")]
    MemorySize { expected: usize, got: usize },

    #[error("snapshot has {got} registers, datapath has {expected}")]
    RegisterCount { expected: usize, got: usize },

    #[error("step {step} is outside a program of {len} statements")]
    StepOutOfRange { step: usize, len: usize },
}

//! Built-in example micro-programs.

use crate::cpu::program::MicroProgram;

/// A named, read-only example program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub statements: &'static [&'static str],
}

impl Preset {
    /// Decode the preset into a fresh program.
    pub fn program(&self) -> MicroProgram {
        MicroProgram::from_statements(self.statements.iter().copied())
    }
}

static PRESETS: [Preset; 3] = [
    Preset {
        name: "fetch-decode-execute",
        description: "Fetch the instruction at PC into IR and advance PC",
        statements: &[
            "MAR ← PC",
            "MDR ← Mem[MAR]",
            "IR ← MDR",
            "PC ← PC + 1",
        ],
    },
    Preset {
        name: "load-store",
        description: "Copy the byte at PC to the following cell",
        statements: &[
            "MAR ← PC",
            "MDR ← Mem[MAR]",
            "PC ← PC + 1",
            "MAR ← PC",
            "Mem[MAR] ← MDR",
        ],
    },
    Preset {
        name: "alu-operations",
        description: "Add, subtract and AND R[0] with R[1] into R[2]-R[4]",
        statements: &[
            "A ← R[0]",
            "B ← R[1]",
            "ALU ← A + B",
            "R[2] ← ALU",
            "FLAGS ← ALU.flags",
            "ALU ← A - B",
            "R[3] ← ALU",
            "FLAGS ← ALU.flags",
            "ALU ← A & B",
            "R[4] ← ALU",
            "FLAGS ← ALU.flags",
        ],
    },
];

/// Every preset, in display order.
pub fn list() -> &'static [Preset] {
    &PRESETS
}

/// Look a preset up by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

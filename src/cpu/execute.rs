//! Micro-operation execution engine.
//!
//! Holds the datapath state and steps through a loaded micro-program one
//! statement at a time.
//!
//! Status transitions:
//! - loading a program: any → `Idle`
//! - [`Datapath::run`]: → `Running`, [`Datapath::pause`]: `Running` → `Paused`
//! - executing the last statement: → `Completed`
//! - stepping past the end: back to step 0, `Completed` → `Idle`
//! - [`Datapath::reset`]: any → `Idle`

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use crate::asm::{self, presets, AssemblerError};
use crate::asm::snapshot::{Snapshot, SnapshotError};
use crate::binary::FlagSet;
use crate::cpu::config::{ConfigError, DatapathConfig};
use crate::cpu::decode::MicroOp;
use crate::cpu::program::MicroProgram;
use crate::cpu::{Memory, Registers};

/// Execution status of the datapath.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Loaded or reset, nothing executed yet.
    #[default]
    Idle,
    /// Stepping automatically on each clock tick.
    Running,
    /// Stopped mid-program.
    Paused,
    /// The last statement has executed.
    Completed,
}

/// One executed statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Index of the statement in the program.
    pub step: usize,
    /// Statement text.
    pub operation: String,
    /// Short description of the effect, e.g. `MAR = 5`.
    pub result: String,
}

/// Everything a step can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatapathState {
    pub registers: Registers,
    pub memory: Memory,
    pub bus_a: u8,
    pub bus_b: u8,
    pub alu_result: u8,
    /// Flags computed by the last ALU micro-op.
    pub alu_flags: FlagSet,
    /// Flags visible to the program; only `FLAGS ← ALU.flags` updates them.
    pub flags: FlagSet,
    /// Index of the next statement to execute.
    pub current_step: usize,
    pub execution_trace: Vec<TraceEntry>,
    pub status: RunState,
}

impl DatapathState {
    /// Zeroed state sized for `config`.
    pub fn new(config: &DatapathConfig) -> Self {
        Self {
            registers: Registers::new(config.register_count),
            memory: Memory::new(config.memory_size),
            bus_a: 0,
            bus_b: 0,
            alu_result: 0,
            alu_flags: FlagSet::default(),
            flags: FlagSet::default(),
            current_step: 0,
            execution_trace: Vec::new(),
            status: RunState::Idle,
        }
    }

    /// Zero every field, memory included.
    pub fn reset(&mut self) {
        self.registers.reset();
        self.memory.clear();
        self.bus_a = 0;
        self.bus_b = 0;
        self.alu_result = 0;
        self.alu_flags = FlagSet::default();
        self.flags = FlagSet::default();
        self.current_step = 0;
        self.execution_trace.clear();
        self.status = RunState::Idle;
    }
}

/// What a call to [`Datapath::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A statement executed and was appended to the trace.
    Executed(TraceEntry),
    /// The program was already exhausted; the step pointer went back to 0.
    Restarted,
}

/// The simulated CPU datapath.
#[derive(Clone)]
pub struct Datapath {
    config: DatapathConfig,
    state: DatapathState,
    program: MicroProgram,
    preset_name: Option<String>,
}

impl Datapath {
    /// Create a datapath with the default configuration.
    pub fn new() -> Self {
        let config = DatapathConfig::default();
        Self {
            state: DatapathState::new(&config),
            config,
            program: MicroProgram::default(),
            preset_name: None,
        }
    }

    /// Create a datapath with a custom configuration.
    pub fn with_config(config: DatapathConfig) -> Result<Self, DatapathError> {
        config.validate()?;
        Ok(Self {
            state: DatapathState::new(&config),
            config,
            program: MicroProgram::default(),
            preset_name: None,
        })
    }

    pub fn config(&self) -> &DatapathConfig {
        &self.config
    }

    pub fn state(&self) -> &DatapathState {
        &self.state
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    /// Seed `R[n]`. Returns false if there is no such register.
    pub fn set_register(&mut self, n: usize, value: u8) -> bool {
        self.state.registers.write(n, value)
    }

    /// Mutable registers, for seeding demo values.
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.state.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    /// Mutable memory, for seeding demo values.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.state.memory
    }

    pub fn program(&self) -> &MicroProgram {
        &self.program
    }

    pub fn preset_name(&self) -> Option<&str> {
        self.preset_name.as_deref()
    }

    pub fn status(&self) -> RunState {
        self.state.status
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.state.execution_trace
    }

    /// User-visible flags.
    pub fn flags(&self) -> FlagSet {
        self.state.flags
    }

    // ==================== Loading ====================

    /// Load a decoded program. Registers and memory are kept; the step
    /// pointer and trace are cleared.
    pub fn load(&mut self, program: MicroProgram) -> Result<(), DatapathError> {
        if program.is_empty() {
            return Err(DatapathError::EmptyProgram);
        }

        for (index, statement) in program.unknown() {
            warn!(step = index, source = %statement.source, "statement does not decode to a micro-operation");
        }
        info!(statements = program.len(), "micro-program loaded");

        self.program = program;
        self.preset_name = None;
        self.rewind();
        Ok(())
    }

    /// Decode and load a list of statements.
    pub fn load_program<I, S>(&mut self, statements: I) -> Result<(), DatapathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.load(MicroProgram::from_statements(statements))
    }

    /// Assemble program text, one statement per line, and load it.
    pub fn load_source(&mut self, text: &str) -> Result<(), DatapathError> {
        let program = asm::assemble(text)?;
        self.load(program)
    }

    /// Load one of the built-in presets by name.
    pub fn load_preset(&mut self, name: &str) -> Result<(), DatapathError> {
        let preset = presets::find(name)
            .ok_or_else(|| DatapathError::UnknownPreset(name.to_string()))?;
        self.load(preset.program())?;
        self.preset_name = Some(preset.name.to_string());
        Ok(())
    }

    fn rewind(&mut self) {
        self.state.current_step = 0;
        self.state.execution_trace.clear();
        self.state.status = RunState::Idle;
    }

    // ==================== Stepping ====================

    /// Execute the statement at the step pointer.
    ///
    /// Once the program is exhausted the next call only moves the pointer
    /// back to 0; the call after that executes the first statement again.
    pub fn step(&mut self) -> StepOutcome {
        let index = self.state.current_step;

        let Some(statement) = self.program.get(index) else {
            self.state.current_step = 0;
            if self.state.status == RunState::Completed {
                self.state.status = RunState::Idle;
            }
            debug!("micro-program exhausted, restarting at step 0");
            return StepOutcome::Restarted;
        };

        let op = statement.op.clone();
        let operation = statement.source.clone();
        let result = self.execute(&op);
        debug!(step = index, %op, %result, "executed micro-op");

        let entry = TraceEntry { step: index, operation, result };
        self.state.execution_trace.push(entry.clone());
        self.state.current_step += 1;

        if self.state.current_step >= self.program.len() {
            self.state.status = RunState::Completed;
            info!(steps = self.state.execution_trace.len(), "micro-program completed");
        } else if matches!(self.state.status, RunState::Idle | RunState::Completed) {
            self.state.status = RunState::Paused;
        }

        StepOutcome::Executed(entry)
    }

    /// Start automatic stepping. A completed program restarts from step 0.
    pub fn run(&mut self) {
        if self.program.is_empty() {
            warn!("run requested with no micro-program loaded");
            return;
        }
        if self.state.status == RunState::Completed || self.state.current_step >= self.program.len() {
            self.state.current_step = 0;
        }
        self.state.status = RunState::Running;
    }

    /// Stop automatic stepping, leaving state as of the last step.
    pub fn pause(&mut self) {
        if self.state.status == RunState::Running {
            self.state.status = RunState::Paused;
        }
    }

    /// [`run`](Self::run) or [`pause`](Self::pause), whichever applies.
    pub fn toggle_running(&mut self) {
        if self.state.status == RunState::Running {
            self.pause();
        } else {
            self.run();
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.status == RunState::Running
    }

    pub fn is_completed(&self) -> bool {
        self.state.status == RunState::Completed
    }

    /// One clock tick: steps only while running.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.is_running() {
            Some(self.step())
        } else {
            None
        }
    }

    /// Run without a timer until the program completes or `max_steps`
    /// statements have executed. Returns the number executed. A zero budget
    /// leaves the datapath untouched.
    pub fn run_to_completion(&mut self, max_steps: usize) -> usize {
        if max_steps == 0 {
            return 0;
        }
        self.run();
        let mut executed = 0;
        while self.is_running() && executed < max_steps {
            if let StepOutcome::Executed(_) = self.step() {
                executed += 1;
            }
        }
        self.pause();
        executed
    }

    /// Stop and zero everything except the loaded program.
    pub fn reset(&mut self) {
        self.state.reset();
        info!("datapath reset");
    }

    // ==================== Execution ====================

    /// Apply one micro-op and describe its effect.
    fn execute(&mut self, op: &MicroOp) -> String {
        let memory_size = self.config.memory_size;
        let s = &mut self.state;

        match op {
            MicroOp::MarFromPc => {
                s.registers.mar = s.registers.pc;
                format!("MAR = {}", s.registers.mar)
            }

            MicroOp::MdrFromMemory => {
                let addr = s.registers.mar;
                s.registers.mdr = s.memory.read(addr as usize);
                format!("MDR = Mem[{}] = {}", addr, s.registers.mdr)
            }

            MicroOp::IrFromMdr => {
                s.registers.ir = s.registers.mdr;
                format!("IR = {}", s.registers.ir)
            }

            MicroOp::IncrementPc => {
                s.registers.advance_pc(memory_size);
                format!("PC = {}", s.registers.pc)
            }

            MicroOp::BusAFromRegister(n) => {
                s.bus_a = s.registers.read(*n);
                format!("A = R[{}] = {}", n, s.bus_a)
            }

            MicroOp::BusBFromRegister(n) => {
                s.bus_b = s.registers.read(*n);
                format!("B = R[{}] = {}", n, s.bus_b)
            }

            MicroOp::AluAdd => {
                let raw = s.bus_a as i32 + s.bus_b as i32;
                Self::latch_alu(s, raw);
                format!("ALU = {} + {} = {}", s.bus_a, s.bus_b, s.alu_result)
            }

            MicroOp::AluSub => {
                let raw = s.bus_a as i32 - s.bus_b as i32;
                Self::latch_alu(s, raw);
                format!("ALU = {} - {} = {}", s.bus_a, s.bus_b, s.alu_result)
            }

            MicroOp::AluAnd => {
                let raw = (s.bus_a & s.bus_b) as i32;
                Self::latch_alu(s, raw);
                format!("ALU = {} & {} = {}", s.bus_a, s.bus_b, s.alu_result)
            }

            MicroOp::RegisterFromAlu(n) => {
                if s.registers.write(*n, s.alu_result) {
                    format!("R[{}] = {}", n, s.alu_result)
                } else {
                    format!("R[{}] does not exist, write ignored", n)
                }
            }

            MicroOp::LatchFlags => {
                s.flags = s.alu_flags;
                format!("FLAGS = {}", s.flags)
            }

            MicroOp::MemoryFromMdr => {
                let addr = s.registers.mar;
                if s.memory.write(addr as usize, s.registers.mdr) {
                    format!("Mem[{}] = {}", addr, s.registers.mdr)
                } else {
                    format!("Mem[{}] out of range, write ignored", addr)
                }
            }

            MicroOp::Unknown(text) => {
                warn!(statement = %text, "unknown micro-operation skipped");
                format!("Unknown operation: {}", text)
            }
        }
    }

    /// The datapath's ALU stage: Z and N from the result, C when the raw
    /// value exceeds a byte, V never set.
    fn latch_alu(s: &mut DatapathState, raw: i32) {
        let result = (raw & 0xFF) as u8;
        s.alu_result = result;
        s.alu_flags = FlagSet {
            carry: raw > 0xFF,
            ..FlagSet::from_result(result)
        };
    }

    // ==================== Snapshots ====================

    /// Capture program, state and preset name.
    pub fn export_state(&self) -> Snapshot {
        Snapshot {
            micro_program: self.program.clone(),
            state: self.state.clone(),
            preset_name: self.preset_name.clone(),
        }
    }

    /// Serialize [`export_state`](Self::export_state) to JSON.
    pub fn export_json(&self) -> Result<String, SnapshotError> {
        self.export_state().to_json()
    }

    /// Restore a snapshot. Nothing changes if it fails validation.
    ///
    /// A snapshot taken while running comes back paused, since no clock is
    /// driving the restored machine.
    pub fn import_state(&mut self, snapshot: Snapshot) -> Result<(), SnapshotError> {
        if let Err(e) = snapshot.validate(&self.config) {
            warn!(error = %e, "snapshot rejected");
            return Err(e);
        }

        let Snapshot { micro_program, mut state, preset_name } = snapshot;
        if state.status == RunState::Running {
            state.status = RunState::Paused;
        }

        self.program = micro_program;
        self.state = state;
        self.preset_name = preset_name;
        info!(statements = self.program.len(), "snapshot imported");
        Ok(())
    }

    /// Parse and restore a JSON snapshot.
    pub fn import_json(&mut self, json: &str) -> Result<(), SnapshotError> {
        let snapshot = Snapshot::from_json(json).inspect_err(|e| {
            warn!(error = %e, "snapshot rejected");
        })?;
        self.import_state(snapshot)
    }
}

impl Default for Datapath {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Datapath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Datapath")
            .field("status", &self.state.status)
            .field("step", &self.state.current_step)
            .field("program_len", &self.program.len())
            .field("regs", &self.state.registers)
            .finish()
    }
}

/// Errors that can occur when configuring or loading the datapath.
#[derive(Debug, Clone, Error)]
pub enum DatapathError {
    #[error("cannot load an empty micro-program")]
    EmptyProgram,

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error(transparent)]
    Assembler(#[from] AssemblerError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(statements: &[&str]) -> Datapath {
        let mut dp = Datapath::new();
        dp.load_program(statements.iter().copied()).unwrap();
        dp
    }

    #[test]
    fn test_fetch_cycle() {
        let mut dp = Datapath::new();
        dp.memory_mut().write(0, 7);
        dp.load_preset("fetch-decode-execute").unwrap();

        for _ in 0..4 {
            dp.step();
        }

        let regs = dp.registers();
        assert_eq!(regs.mar, 0);
        assert_eq!(regs.mdr, 7);
        assert_eq!(regs.ir, 7);
        assert_eq!(regs.pc, 1);
        assert_eq!(dp.trace().len(), 4);
        assert_eq!(dp.status(), RunState::Completed);
        assert_eq!(dp.preset_name(), Some("fetch-decode-execute"));
    }

    #[test]
    fn test_trace_entries() {
        let mut dp = loaded(&["MAR ← PC", "PC ← PC + 1"]);
        dp.registers_mut().pc = 5;

        let outcome = dp.step();
        assert_eq!(
            outcome,
            StepOutcome::Executed(TraceEntry {
                step: 0,
                operation: "MAR ← PC".into(),
                result: "MAR = 5".into(),
            })
        );
        assert_eq!(dp.status(), RunState::Paused);

        dp.step();
        assert_eq!(dp.trace()[1].result, "PC = 6");
    }

    #[test]
    fn test_step_after_end_restarts() {
        let mut dp = loaded(&["PC ← PC + 1"]);
        dp.step();
        assert!(dp.is_completed());

        assert_eq!(dp.step(), StepOutcome::Restarted);
        assert_eq!(dp.current_step(), 0);
        assert_eq!(dp.status(), RunState::Idle);

        dp.step();
        assert_eq!(dp.registers().pc, 2);
        assert_eq!(dp.trace().len(), 2);
    }

    #[test]
    fn test_alu_add_flags() {
        let mut dp = loaded(&["A ← R[1]", "B ← R[2]", "ALU ← A + B", "R[3] ← ALU", "FLAGS ← ALU.flags"]);
        dp.registers_mut().write(1, 200);
        dp.registers_mut().write(2, 100);

        dp.run_to_completion(100);

        let state = dp.state();
        assert_eq!(state.alu_result, 44);
        assert_eq!(dp.registers().read(3), 44);
        assert!(state.alu_flags.carry);
        assert!(!state.alu_flags.overflow);
        assert_eq!(dp.flags(), state.alu_flags);
    }

    #[test]
    fn test_alu_overflow_never_set() {
        let mut dp = loaded(&["A ← R[0]", "B ← R[1]", "ALU ← A + B"]);
        dp.registers_mut().write(0, 100);
        dp.registers_mut().write(1, 50);
        dp.run_to_completion(10);

        let flags = dp.state().alu_flags;
        assert_eq!(dp.state().alu_result, 150);
        assert!(flags.negative);
        assert!(!flags.overflow);
    }

    #[test]
    fn test_alu_sub_has_no_borrow_flag() {
        let mut dp = loaded(&["A ← R[0]", "B ← R[1]", "ALU ← A - B"]);
        dp.registers_mut().write(0, 30);
        dp.registers_mut().write(1, 100);
        dp.run_to_completion(10);

        assert_eq!(dp.state().alu_result, 186);
        assert!(dp.state().alu_flags.negative);
        assert!(!dp.state().alu_flags.carry);
    }

    #[test]
    fn test_alu_and_zero() {
        let mut dp = loaded(&["A ← R[0]", "B ← R[1]", "ALU ← A & B"]);
        dp.registers_mut().write(0, 0b1010);
        dp.registers_mut().write(1, 0b0101);
        dp.run_to_completion(10);

        assert_eq!(dp.state().alu_result, 0);
        assert!(dp.state().alu_flags.zero);
    }

    #[test]
    fn test_flags_only_latched_explicitly() {
        let mut dp = loaded(&["A ← R[0]", "B ← R[0]", "ALU ← A - B"]);
        dp.run_to_completion(10);
        assert!(dp.state().alu_flags.zero);
        assert_eq!(dp.flags(), FlagSet::default());
    }

    #[test]
    fn test_memory_store() {
        let mut dp = loaded(&["MAR ← PC", "MDR ← Mem[MAR]", "PC ← PC + 1", "MAR ← PC", "Mem[MAR] ← MDR"]);
        dp.memory_mut().write(0, 42);
        dp.run_to_completion(10);
        assert_eq!(dp.memory().read(1), 42);
        assert_eq!(dp.trace()[4].result, "Mem[1] = 42");
    }

    #[test]
    fn test_pc_wraps_at_memory_size() {
        let config = DatapathConfig::builder().memory_size(4).build().unwrap();
        let mut dp = Datapath::with_config(config).unwrap();
        dp.load_program(["PC ← PC + 1"]).unwrap();
        dp.registers_mut().pc = 3;
        dp.step();
        assert_eq!(dp.registers().pc, 0);
    }

    #[test]
    fn test_out_of_range_is_lenient() {
        let config = DatapathConfig::builder().memory_size(4).register_count(2).build().unwrap();
        let mut dp = Datapath::with_config(config).unwrap();
        dp.load_program(["A ← R[9]", "MDR ← Mem[MAR]", "R[9] ← ALU", "Mem[MAR] ← MDR"]).unwrap();
        dp.registers_mut().mar = 200;
        dp.registers_mut().mdr = 5;

        dp.run_to_completion(10);

        assert_eq!(dp.state().bus_a, 0);
        assert_eq!(dp.registers().mdr, 0);
        assert_eq!(dp.trace()[2].result, "R[9] does not exist, write ignored");
        assert_eq!(dp.trace()[3].result, "Mem[200] out of range, write ignored");
        assert!(dp.is_completed());
    }

    #[test]
    fn test_unknown_operation_continues() {
        let mut dp = loaded(&["HALT", "PC ← PC + 1"]);
        dp.step();
        assert_eq!(dp.trace()[0].result, "Unknown operation: HALT");
        dp.step();
        assert_eq!(dp.registers().pc, 1);
        assert!(dp.is_completed());
    }

    #[test]
    fn test_reset() {
        let mut dp = Datapath::new();
        dp.memory_mut().write(0, 7);
        dp.load_preset("fetch-decode-execute").unwrap();
        dp.run();
        dp.tick();
        dp.tick();

        dp.reset();

        let state = dp.state();
        assert_eq!(state.registers, Registers::new(8));
        assert_eq!(state.memory.read(0), 0);
        assert!(state.execution_trace.is_empty());
        assert_eq!(state.current_step, 0);
        assert_eq!(state.status, RunState::Idle);
        assert_eq!(dp.program().len(), 4);
        assert_eq!(dp.tick(), None);
    }

    #[test]
    fn test_run_pause_tick() {
        let mut dp = loaded(&["PC ← PC + 1", "PC ← PC + 1", "PC ← PC + 1"]);

        assert_eq!(dp.tick(), None);
        dp.run();
        assert!(dp.tick().is_some());
        dp.pause();
        assert_eq!(dp.status(), RunState::Paused);
        assert_eq!(dp.tick(), None);
        assert_eq!(dp.registers().pc, 1);

        dp.toggle_running();
        dp.tick();
        dp.tick();
        assert!(dp.is_completed());
        assert_eq!(dp.tick(), None);

        // running a completed program starts over
        dp.toggle_running();
        assert_eq!(dp.current_step(), 0);
        assert!(dp.is_running());
    }

    #[test]
    fn test_run_to_completion_limit() {
        let mut dp = loaded(&["PC ← PC + 1"; 10]);
        assert_eq!(dp.run_to_completion(3), 3);
        assert_eq!(dp.status(), RunState::Paused);
        assert_eq!(dp.run_to_completion(100), 7);
        assert!(dp.is_completed());
    }

    #[test]
    fn test_run_to_completion_zero_budget() {
        let mut dp = loaded(&["PC ← PC + 1"; 3]);
        dp.run_to_completion(100);
        let before = dp.state().clone();

        assert_eq!(dp.run_to_completion(0), 0);
        assert_eq!(dp.state(), &before);
        assert!(dp.is_completed());
        assert_eq!(dp.current_step(), 3);
    }

    #[test]
    fn test_load_rejects_empty_and_unknown_preset() {
        let mut dp = Datapath::new();
        assert!(matches!(dp.load_program(Vec::<String>::new()), Err(DatapathError::EmptyProgram)));
        assert!(matches!(dp.load_preset("nope"), Err(DatapathError::UnknownPreset(_))));
    }

    #[test]
    fn test_load_clears_trace_keeps_registers() {
        let mut dp = loaded(&["PC ← PC + 1"]);
        dp.step();
        dp.load_program(["IR ← MDR"]).unwrap();
        assert!(dp.trace().is_empty());
        assert_eq!(dp.current_step(), 0);
        assert_eq!(dp.status(), RunState::Idle);
        assert_eq!(dp.registers().pc, 1);
        assert_eq!(dp.preset_name(), None);
    }

    #[test]
    fn test_load_source() {
        let mut dp = Datapath::new();
        dp.set_register(1, 9);
        dp.load_source("; copy R1 into R2\nA <- R1\nB <- R0\nALU <- A + B\nR2 <- ALU\n").unwrap();
        assert_eq!(dp.program().len(), 4);
        dp.run_to_completion(10);
        assert_eq!(dp.registers().read(2), 9);

        assert!(matches!(dp.load_source("# nothing\n\n"), Err(DatapathError::Assembler(_))));
        assert_eq!(dp.program().len(), 4);
    }

    #[test]
    fn test_with_config_validates() {
        let config = DatapathConfig { memory_size: 0, ..DatapathConfig::default() };
        assert!(matches!(Datapath::with_config(config), Err(DatapathError::Config(_))));
    }
}

//! WebAssembly bindings.
//!
//! JavaScript-friendly wrappers around the ALU, the serial adder and the
//! datapath. Structured values cross the boundary as JSON strings. The
//! datapath has no timer of its own here: the page calls `tick()` from
//! `setInterval(..., clockIntervalMs())`.

use wasm_bindgen::prelude::*;
use crate::adder::{AdderOp, Mode, SerialAdder};
use crate::asm::{disasm, presets};
use crate::binary::{Alu, AluOp};
use crate::cpu::{Datapath, DatapathConfig, StepOutcome};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// WebAssembly-friendly ALU wrapper.
#[wasm_bindgen]
pub struct WasmAlu {
    alu: Alu,
}

#[wasm_bindgen]
impl WasmAlu {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { alu: Alu::new() }
    }

    /// Run an operation by name (`add`, `shl`, ...). `b` is ignored by
    /// unary operations.
    #[wasm_bindgen]
    pub fn apply(&mut self, op: &str, a: u8, b: u8) -> Result<u8, JsError> {
        let op: AluOp = op.parse().map_err(js_err)?;
        Ok(self.alu.apply(op, a, b))
    }

    #[wasm_bindgen]
    pub fn result(&self) -> u8 {
        self.alu.result()
    }

    /// Flags of the last operation as JSON.
    #[wasm_bindgen]
    pub fn flags_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.alu.flags()).map_err(js_err)
    }

    /// Names of every operation.
    #[wasm_bindgen]
    pub fn operations() -> js_sys::Array {
        AluOp::ALL.iter().map(|op| JsValue::from_str(op.name())).collect()
    }
}

impl Default for WasmAlu {
    fn default() -> Self {
        Self::new()
    }
}

/// WebAssembly-friendly serial adder wrapper.
#[wasm_bindgen]
pub struct WasmAdder {
    adder: SerialAdder,
}

#[wasm_bindgen]
impl WasmAdder {
    /// `mode` is `unsigned` or `twos-complement`.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str) -> Result<WasmAdder, JsError> {
        let mode: Mode = mode.parse().map_err(js_err)?;
        Ok(Self { adder: SerialAdder::new(mode) })
    }

    #[wasm_bindgen]
    pub fn configure(&mut self, mode: &str) -> Result<(), JsError> {
        let mode: Mode = mode.parse().map_err(js_err)?;
        self.adder.configure(mode);
        Ok(())
    }

    /// Smallest and largest operand for the current mode.
    #[wasm_bindgen]
    pub fn range(&self) -> Vec<i32> {
        let range = self.adder.mode().range();
        vec![*range.start(), *range.end()]
    }

    /// Calculate `a op b` (`op` is `add` or `sub`) and return the report
    /// as JSON.
    #[wasm_bindgen]
    pub fn calculate(&self, a: i32, b: i32, op: &str) -> Result<String, JsError> {
        let op: AdderOp = op.parse().map_err(js_err)?;
        let report = self.adder.calculate(a, b, op);
        serde_json::to_string(&report).map_err(js_err)
    }
}

/// WebAssembly-friendly datapath wrapper.
#[wasm_bindgen]
pub struct WasmDatapath {
    datapath: Datapath,
}

#[wasm_bindgen]
impl WasmDatapath {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { datapath: Datapath::new() }
    }

    /// Create a datapath from a JSON config.
    #[wasm_bindgen]
    pub fn with_config(json: &str) -> Result<WasmDatapath, JsError> {
        let config = DatapathConfig::from_json(json).map_err(js_err)?;
        let datapath = Datapath::with_config(config).map_err(js_err)?;
        Ok(Self { datapath })
    }

    #[wasm_bindgen]
    pub fn load_preset(&mut self, name: &str) -> Result<(), JsError> {
        self.datapath.load_preset(name).map_err(js_err)
    }

    /// Load program text, one statement per line.
    #[wasm_bindgen]
    pub fn load_source(&mut self, source: &str) -> Result<usize, JsError> {
        self.datapath.load_source(source).map_err(js_err)?;
        Ok(self.datapath.program().len())
    }

    /// Step once. Returns the trace entry as JSON, or `null` when the
    /// step only rewound to the start.
    #[wasm_bindgen]
    pub fn step(&mut self) -> Result<Option<String>, JsError> {
        match self.datapath.step() {
            StepOutcome::Executed(entry) => serde_json::to_string(&entry).map(Some).map_err(js_err),
            StepOutcome::Restarted => Ok(None),
        }
    }

    #[wasm_bindgen]
    pub fn run(&mut self) {
        self.datapath.run();
    }

    #[wasm_bindgen]
    pub fn pause(&mut self) {
        self.datapath.pause();
    }

    /// Call on every timer tick. Returns false once stepping has stopped so
    /// the page can clear its interval.
    #[wasm_bindgen]
    pub fn tick(&mut self) -> bool {
        self.datapath.tick();
        self.datapath.is_running()
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.datapath.reset();
    }

    #[wasm_bindgen]
    pub fn clock_interval_ms(&self) -> u32 {
        self.datapath.config().clock_interval_ms.min(u32::MAX as u64) as u32
    }

    #[wasm_bindgen]
    pub fn status(&self) -> String {
        format!("{:?}", self.datapath.status()).to_lowercase()
    }

    #[wasm_bindgen]
    pub fn current_step(&self) -> usize {
        self.datapath.current_step()
    }

    #[wasm_bindgen]
    pub fn set_register(&mut self, n: usize, value: u8) -> bool {
        self.datapath.set_register(n, value)
    }

    #[wasm_bindgen]
    pub fn write_memory(&mut self, addr: usize, value: u8) -> Result<(), JsError> {
        self.datapath.memory_mut().store(addr, value).map_err(js_err)
    }

    /// All memory cells.
    #[wasm_bindgen]
    pub fn memory(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.datapath.memory().as_slice())
    }

    /// Full datapath state as JSON.
    #[wasm_bindgen]
    pub fn state_json(&self) -> Result<String, JsError> {
        serde_json::to_string(self.datapath.state()).map_err(js_err)
    }

    /// Program listing with the next statement marked.
    #[wasm_bindgen]
    pub fn listing(&self) -> String {
        disasm::listing(self.datapath.program(), self.datapath.current_step())
    }

    #[wasm_bindgen]
    pub fn export_state(&self) -> Result<String, JsError> {
        self.datapath.export_json().map_err(js_err)
    }

    /// Restore an exported snapshot. On error nothing changes.
    #[wasm_bindgen]
    pub fn import_state(&mut self, json: &str) -> Result<(), JsError> {
        self.datapath.import_json(json).map_err(js_err)
    }

    /// Names of the built-in programs.
    #[wasm_bindgen]
    pub fn presets() -> js_sys::Array {
        presets::list().iter().map(|p| JsValue::from_str(p.name)).collect()
    }
}

impl Default for WasmDatapath {
    fn default() -> Self {
        Self::new()
    }
}

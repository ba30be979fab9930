//! ByteLab - CLI Entry Point
//!
//! Commands:
//! - `bytelab alu <op> <a> [b]` - One ALU operation with flags
//! - `bytelab add <a> <b>` - Bit-serial addition/subtraction with its trace
//! - `bytelab run [program]` - Run a micro-program to completion
//! - `bytelab debug [program]` - Interactive terminal stepper
//! - `bytelab presets` - List the built-in micro-programs
//! - `bytelab inspect <snapshot>` - Show a saved datapath snapshot

use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use bytelab::{AdderOp, AluOp, Bits8, Datapath, DatapathConfig, Mode, SerialAdder};
use bytelab::asm::{self, disasm, presets};

#[derive(Parser)]
#[command(name = "bytelab")]
#[command(version = "0.1.0")]
#[command(about = "8-bit ALU, bit-serial adder and micro-operation datapath simulator")]
struct Cli {
    /// Log library activity to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one ALU operation
    Alu {
        /// and, or, xor, not, add, sub, inc, dec, shl, shr
        op: AluOp,
        /// First operand (decimal, 0x.. or 0b..)
        #[arg(value_parser = parse_byte)]
        a: u8,
        /// Second operand, ignored by unary operations
        #[arg(value_parser = parse_byte, default_value = "0")]
        b: u8,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add or subtract with the bit-serial adder
    Add {
        #[arg(allow_negative_numbers = true)]
        a: i32,
        #[arg(allow_negative_numbers = true)]
        b: i32,
        /// add or sub
        #[arg(short, long, default_value = "add")]
        op: AdderOp,
        /// unsigned or twos-complement
        #[arg(short, long, default_value = "unsigned")]
        mode: Mode,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a micro-program to completion
    Run {
        #[command(flatten)]
        load: LoadArgs,
        /// Stop after this many statements
        #[arg(long, default_value = "10000")]
        max_steps: usize,
        /// Print each executed statement
        #[arg(short, long)]
        trace: bool,
        /// Save the final state as a snapshot
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Interactive terminal stepper
    Debug {
        #[command(flatten)]
        load: LoadArgs,
        /// Save the state as a snapshot on quit
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List the built-in micro-programs
    Presets,
    /// Show a saved snapshot
    Inspect {
        snapshot: PathBuf,
        /// JSON config the snapshot must fit
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Where the program and initial state come from.
#[derive(Args)]
struct LoadArgs {
    /// Program text file, one statement per line
    program: Option<PathBuf>,
    /// Built-in program name
    #[arg(short, long, conflicts_with_all = ["program", "import"])]
    preset: Option<String>,
    /// Restore a snapshot instead of loading a program
    #[arg(long, conflicts_with = "program")]
    import: Option<PathBuf>,
    /// JSON datapath config
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the clock interval in milliseconds
    #[arg(long)]
    interval: Option<u64>,
    /// Seed memory, e.g. `--poke 0=7`
    #[arg(long, value_parser = parse_assignment)]
    poke: Vec<(usize, u8)>,
    /// Seed a register, e.g. `--reg 1=200`
    #[arg(long, value_parser = parse_assignment)]
    reg: Vec<(usize, u8)>,
    /// Reject statements that are not micro-operations
    #[arg(long)]
    strict: bool,
}

fn main() {
    let cli = Cli::parse();

    // The stepper owns the terminal, so it runs without a subscriber.
    if !matches!(cli.command, Some(Commands::Debug { .. })) {
        init_logging(cli.verbose);
    }

    match cli.command {
        Some(Commands::Alu { op, a, b, json }) => alu_command(op, a, b, json),
        Some(Commands::Add { a, b, op, mode, json }) => add_command(a, b, op, mode, json),
        Some(Commands::Run { load, max_steps, trace, export }) => {
            run_program(&load, max_steps, trace, export);
        }
        Some(Commands::Debug { load, export }) => debug_program(&load, export),
        Some(Commands::Presets) => list_presets(),
        Some(Commands::Inspect { snapshot, config }) => inspect_snapshot(&snapshot, config),
        None => {
            println!("ByteLab v0.1.0");
            println!("8-bit ALU, bit-serial adder and datapath simulator");
            println!();
            println!("Use --help for available commands");
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "bytelab=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print an error and exit with status 1.
fn fail(context: &str, e: impl std::fmt::Display) -> ! {
    eprintln!("❌ {}: {}", context, e);
    std::process::exit(1);
}

/// Decimal, `0x` hex or `0b` binary byte.
fn parse_byte(s: &str) -> Result<u8, String> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        u8::from_str_radix(&bin.replace('_', ""), 2)
    } else {
        s.parse()
    };
    parsed.map_err(|_| format!("'{}' is not a byte (0-255)", s))
}

/// `index=value`.
fn parse_assignment(s: &str) -> Result<(usize, u8), String> {
    let (index, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=VALUE, got '{}'", s))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not an index", index))?;
    Ok((index, parse_byte(value)?))
}

fn alu_command(op: AluOp, a: u8, b: u8, json: bool) {
    let out = bytelab::evaluate(op, a, b);

    if json {
        match serde_json::to_string_pretty(&out) {
            Ok(text) => println!("{}", text),
            Err(e) => fail("Serialization failed", e),
        }
        return;
    }

    if op.arity() == 1 {
        println!("{} {} ({})", op, a, Bits8::from(a));
    } else {
        println!("{} {} ({}), {} ({})", op, a, Bits8::from(a), b, Bits8::from(b));
    }
    println!("= {} ({}, 0x{:02X})", out.result, Bits8::from(out.result), out.result);
    println!("{}  (status byte 0x{:02X})", out.flags, out.flags.to_status_byte());
}

fn add_command(a: i32, b: i32, op: AdderOp, mode: Mode, json: bool) {
    let adder = SerialAdder::new(mode);
    let range = mode.range();
    if !range.contains(&a) || !range.contains(&b) {
        eprintln!(
            "⚠️  Operands clamped to {}..={} for {} mode",
            range.start(),
            range.end(),
            mode
        );
    }

    let report = adder.calculate(a, b, op);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => fail("Serialization failed", e),
        }
        return;
    }

    for line in &report.step_trace {
        println!("{}", line);
    }
    println!();
    println!("Result: {} ({})", report.result_decimal, report.result_bits);
    println!("Flags:  {}", report.flags);
}

/// Build a datapath from the load options.
fn prepare_datapath(load: &LoadArgs) -> Datapath {
    let mut config = match &load.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .unwrap_or_else(|e| fail("Failed to read config", e));
            DatapathConfig::from_json(&text).unwrap_or_else(|e| fail("Bad config", e))
        }
        None => DatapathConfig::default(),
    };
    if let Some(ms) = load.interval {
        config.clock_interval_ms = ms;
    }

    let mut dp = Datapath::with_config(config).unwrap_or_else(|e| fail("Bad config", e));

    if let Some(path) = &load.import {
        let snapshot = asm::load_snapshot(path).unwrap_or_else(|e| fail("Failed to load snapshot", e));
        dp.import_state(snapshot).unwrap_or_else(|e| fail("Snapshot rejected", e));
        println!("📂 Restored snapshot ({} statements)", dp.program().len());
    } else if let Some(path) = &load.program {
        let source = std::fs::read_to_string(path)
            .unwrap_or_else(|e| fail("Failed to read file", e));
        let assembled = if load.strict {
            asm::assemble_strict(&source)
        } else {
            asm::assemble(&source)
        };
        let program = assembled.unwrap_or_else(|e| fail("Assembly error", e));
        for diag in asm::validate(&source) {
            eprintln!("⚠️  {}", diag);
        }
        println!("📝 Assembled {} statements", program.len());
        dp.load(program).unwrap_or_else(|e| fail("Failed to load program", e));
    } else {
        let name = load.preset.as_deref().unwrap_or("fetch-decode-execute");
        dp.load_preset(name).unwrap_or_else(|e| fail("Failed to load program", e));
        println!("📂 Loaded preset {}", name);
    }

    for &(addr, value) in &load.poke {
        dp.memory_mut()
            .store(addr, value)
            .unwrap_or_else(|e| fail("Bad --poke", e));
    }
    for &(n, value) in &load.reg {
        if !dp.set_register(n, value) {
            fail("Bad --reg", format!("no register R[{}]", n));
        }
    }

    dp
}

fn run_program(load: &LoadArgs, max_steps: usize, trace: bool, export: Option<PathBuf>) {
    let mut dp = prepare_datapath(load);

    println!();
    println!("━━━ Execution ━━━");

    let already = dp.trace().len();
    let executed = dp.run_to_completion(max_steps);

    if trace {
        for entry in &dp.trace()[already..] {
            println!("{:02}: {:<20} {}", entry.step, entry.operation, entry.result);
        }
    }

    let state = dp.state();
    let regs = dp.registers();
    println!();
    println!("━━━ Result ━━━");
    println!("Steps:  {}", executed);
    println!("State:  {:?}", state.status);
    println!("PC={}  IR={}  MAR={}  MDR={}", regs.pc, regs.ir, regs.mar, regs.mdr);
    let general: Vec<String> = regs.general.iter().enumerate().map(|(i, v)| format!("R{}={}", i, v)).collect();
    println!("{}", general.join("  "));
    println!("A={}  B={}  ALU={}", state.bus_a, state.bus_b, state.alu_result);
    println!("FLAGS:     {}", state.flags);
    println!("ALU.flags: {}", state.alu_flags);

    if !dp.is_completed() {
        println!();
        println!("⚠️  Reached max steps limit ({}). Use --max-steps to increase.", max_steps);
    }

    if let Some(path) = export {
        export_snapshot(&dp, &path);
    }
}

#[cfg(feature = "tui")]
fn debug_program(load: &LoadArgs, export: Option<PathBuf>) {
    let dp = prepare_datapath(load);

    println!("🚀 Launching stepper...");

    let dp = bytelab::run_stepper(dp).unwrap_or_else(|e| fail("Stepper error", e));

    if let Some(path) = export {
        export_snapshot(&dp, &path);
    }
}

#[cfg(not(feature = "tui"))]
fn debug_program(_load: &LoadArgs, _export: Option<PathBuf>) {
    fail("Stepper unavailable", "built without the `tui` feature");
}

fn export_snapshot(dp: &Datapath, path: &PathBuf) {
    asm::save_snapshot(path, &dp.export_state())
        .unwrap_or_else(|e| fail("Failed to save snapshot", e));
    println!("✓ Saved snapshot to {}", path.display());
}

fn list_presets() {
    for preset in presets::list() {
        println!("{} - {}", preset.name, preset.description);
        print!("{}", disasm::listing(&preset.program(), usize::MAX));
        println!();
    }
}

fn inspect_snapshot(path: &PathBuf, config: Option<PathBuf>) {
    let snapshot = asm::load_snapshot(path).unwrap_or_else(|e| fail("Failed to load snapshot", e));

    let config = match config {
        Some(p) => {
            let text = std::fs::read_to_string(&p).unwrap_or_else(|e| fail("Failed to read config", e));
            DatapathConfig::from_json(&text).unwrap_or_else(|e| fail("Bad config", e))
        }
        None => DatapathConfig {
            memory_size: snapshot.state.memory.size(),
            register_count: snapshot.state.registers.general.len(),
            ..DatapathConfig::default()
        },
    };

    let mut dp = Datapath::with_config(config).unwrap_or_else(|e| fail("Bad config", e));
    dp.import_state(snapshot).unwrap_or_else(|e| fail("Snapshot rejected", e));

    println!("📖 {}", path.display());
    if let Some(name) = dp.preset_name() {
        println!("Preset: {}", name);
    }
    println!("Status: {:?}, next step {}", dp.status(), dp.current_step());
    println!();
    print!("{}", disasm::listing(dp.program(), dp.current_step()));
    println!();
    println!("{:?}", dp.registers());
    println!("FLAGS: {}", dp.flags());
    println!("Trace: {} entries", dp.trace().len());
    for (addr, value) in dp.memory().dump(0, dp.memory().size()).into_iter().filter(|(_, v)| *v != 0) {
        println!("Mem[{}] = {}", addr, value);
    }
}

//! Micro-program assembler.
//!
//! Syntax, one register transfer per line:
//! ```text
//! ; fetch
//! MAR <- PC        // inline comments with ;, // or #
//! MDR <- Mem[MAR]
//!
//! IR <- MDR
//! ```
//!
//! Blank lines and comments are dropped. Statements that do not decode are
//! kept (they execute as "Unknown operation") unless [`assemble_strict`] is
//! used; [`validate`] reports them with line numbers.

use std::fmt;
use thiserror::Error;
use crate::cpu::decode::MicroOp;
use crate::cpu::program::MicroProgram;

/// Assemble program text into a micro-program.
pub fn assemble(source: &str) -> Result<MicroProgram, AssemblerError> {
    let mut asm = Assembler::new(false);
    asm.assemble(source)
}

/// Like [`assemble`], but any statement that does not decode is an error.
pub fn assemble_strict(source: &str) -> Result<MicroProgram, AssemblerError> {
    let mut asm = Assembler::new(true);
    asm.assemble(source)
}

/// Report every statement that will execute as an unknown operation.
pub fn validate(source: &str) -> Vec<Diagnostic> {
    statements(source)
        .filter_map(|(line, text)| match MicroOp::parse(text) {
            MicroOp::Unknown(_) => Some(Diagnostic {
                line,
                statement: text.to_string(),
                message: "not a recognised micro-operation".into(),
            }),
            _ => None,
        })
        .collect()
}

/// Non-empty statements with their 1-based line numbers.
fn statements(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, strip_comment(line).trim()))
        .filter(|(_, text)| !text.is_empty())
}

/// Cut the line at the first `;`, `//` or `#`.
fn strip_comment(line: &str) -> &str {
    let cut = [line.find(';'), line.find("//"), line.find('#')]
        .into_iter()
        .flatten()
        .min();
    match cut {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// The assembler state.
struct Assembler {
    /// Reject statements that do not decode.
    strict: bool,
    /// Collected statement text.
    output: Vec<String>,
}

impl Assembler {
    fn new(strict: bool) -> Self {
        Self { strict, output: Vec::new() }
    }

    fn assemble(&mut self, source: &str) -> Result<MicroProgram, AssemblerError> {
        for (line_num, text) in statements(source) {
            self.process_statement(text, line_num)?;
        }

        if self.output.is_empty() {
            return Err(AssemblerError::Empty);
        }

        Ok(MicroProgram::from_statements(self.output.drain(..)))
    }

    fn process_statement(&mut self, text: &str, line_num: usize) -> Result<(), AssemblerError> {
        if self.strict && MicroOp::parse(text).is_unknown() {
            return Err(AssemblerError::UnknownStatement {
                line: line_num,
                statement: text.to_string(),
            });
        }
        self.output.push(text.to_string());
        Ok(())
    }
}

/// A non-fatal problem found by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line.
    pub line: usize,
    pub statement: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.message, self.statement)
    }
}

/// Errors that can occur during assembly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblerError {
    #[error("program contains no statements")]
    Empty,

    #[error("unknown micro-operation on line {line}: {statement}")]
    UnknownStatement { line: usize, statement: String },
}

//! Program listings.
//!
//! Renders a loaded micro-program with line numbers, the canonical form of
//! each decoded statement and a marker on the next statement to execute.

use crate::cpu::decode::MicroOp;
use crate::cpu::program::{MicroProgram, Statement};

/// One row of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLine {
    pub index: usize,
    pub text: String,
    /// This statement runs on the next step.
    pub is_next: bool,
    pub is_unknown: bool,
}

/// Canonical text of a statement; unknown ones are flagged.
pub fn format_statement(statement: &Statement) -> String {
    match &statement.op {
        MicroOp::Unknown(text) => format!("{}  ; ??", text),
        op => op.to_string(),
    }
}

/// Listing rows for every statement.
pub fn listing_lines(program: &MicroProgram, current_step: usize) -> Vec<ListingLine> {
    program
        .iter()
        .enumerate()
        .map(|(index, statement)| ListingLine {
            index,
            text: format_statement(statement),
            is_next: index == current_step,
            is_unknown: statement.op.is_unknown(),
        })
        .collect()
}

/// Numbered listing as text.
pub fn listing(program: &MicroProgram, current_step: usize) -> String {
    let mut output = String::new();
    for line in listing_lines(program, current_step) {
        let marker = if line.is_next { "▶" } else { " " };
        output.push_str(&format!("{} {:02}: {}\n", marker, line.index, line.text));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_marks_next() {
        let program = MicroProgram::from_statements(["mar <- pc", "ir<-mdr"]);
        assert_eq!(listing(&program, 1), "  00: MAR ← PC\n▶ 01: IR ← MDR\n");
    }

    #[test]
    fn test_listing_past_end_has_no_marker() {
        let program = MicroProgram::from_statements(["PC ← PC + 1"]);
        assert!(!listing(&program, 1).contains('▶'));
    }

    #[test]
    fn test_unknown_flagged() {
        let program = MicroProgram::from_statements(["NOP"]);
        let lines = listing_lines(&program, 0);
        assert!(lines[0].is_unknown);
        assert_eq!(lines[0].text, "NOP  ; ??");
    }
}

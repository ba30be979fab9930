//! Decoded micro-programs.

use serde::{Serialize, Deserialize};
use crate::cpu::decode::MicroOp;

/// One statement: its source text and what it decoded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub source: String,
    pub op: MicroOp,
}

impl Statement {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into().trim().to_string();
        let op = MicroOp::parse(&source);
        Self { source, op }
    }
}

/// A linear sequence of micro-operations, decoded once at construction.
///
/// Serializes as the list of source strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct MicroProgram {
    statements: Vec<Statement>,
}

impl MicroProgram {
    /// Decode a list of statements.
    pub fn from_statements<I, S>(statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            statements: statements.into_iter().map(Statement::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Statements that did not decode, with their indices.
    pub fn unknown(&self) -> impl Iterator<Item = (usize, &Statement)> {
        self.statements.iter().enumerate().filter(|(_, s)| s.op.is_unknown())
    }
}

impl From<Vec<String>> for MicroProgram {
    fn from(sources: Vec<String>) -> Self {
        Self::from_statements(sources)
    }
}

impl From<MicroProgram> for Vec<String> {
    fn from(program: MicroProgram) -> Self {
        program.statements.into_iter().map(|s| s.source).collect()
    }
}

impl<'a> IntoIterator for &'a MicroProgram {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

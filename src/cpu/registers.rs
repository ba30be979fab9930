//! Datapath registers.
//!
//! - `R[0..n)`: general-purpose registers
//! - PC: program counter
//! - IR: instruction register
//! - MAR: memory address register
//! - MDR: memory data register

use serde::{Serialize, Deserialize};

/// The datapath register file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    /// General-purpose registers.
    pub general: Vec<u8>,
    /// Program counter.
    pub pc: u8,
    /// Instruction register.
    pub ir: u8,
    /// Memory address register.
    pub mar: u8,
    /// Memory data register.
    pub mdr: u8,
}

impl Registers {
    /// Create a register file with `count` general registers, all zeroed.
    pub fn new(count: usize) -> Self {
        Self {
            general: vec![0; count],
            pc: 0,
            ir: 0,
            mar: 0,
            mdr: 0,
        }
    }

    /// Reset all registers to zero.
    pub fn reset(&mut self) {
        self.general.fill(0);
        self.pc = 0;
        self.ir = 0;
        self.mar = 0;
        self.mdr = 0;
    }

    /// Read `R[n]`, 0 if there is no such register.
    #[inline]
    pub fn read(&self, n: usize) -> u8 {
        self.general.get(n).copied().unwrap_or(0)
    }

    /// Write `R[n]`. Returns false, and changes nothing, if there is no such
    /// register.
    #[inline]
    pub fn write(&mut self, n: usize, value: u8) -> bool {
        match self.general.get_mut(n) {
            Some(reg) => {
                *reg = value;
                true
            }
            None => false,
        }
    }

    /// Increment the program counter modulo `memory_size`.
    /// Returns the old value.
    pub fn advance_pc(&mut self, memory_size: usize) -> u8 {
        let old = self.pc;
        let modulus = memory_size.max(1);
        self.pc = ((old as usize + 1) % modulus) as u8;
        old
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new(crate::cpu::config::DEFAULT_REGISTER_COUNT)
    }
}

impl std::fmt::Debug for Registers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PC={:02X} IR={:02X} MAR={:02X} MDR={:02X}", self.pc, self.ir, self.mar, self.mdr)?;
        for (i, value) in self.general.iter().enumerate() {
            write!(f, " R{}={:02X}", i, value)?;
        }
        Ok(())
    }
}

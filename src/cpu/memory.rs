//! Datapath memory.
//!
//! A flat array of bytes addressed by MAR. Reads outside the array yield 0
//! and writes outside it are dropped, which is what the micro-operations
//! expect. [`Memory::store`] is the checked write used when seeding
//! memory from outside.

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Byte-addressed memory.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Memory {
    cells: Vec<u8>,
}

impl Memory {
    /// Create a memory of `size` zeroed cells.
    pub fn new(size: usize) -> Self {
        Self { cells: vec![0; size] }
    }

    /// Number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Read a cell, 0 if `addr` is out of range.
    #[inline]
    pub fn read(&self, addr: usize) -> u8 {
        self.cells.get(addr).copied().unwrap_or(0)
    }

    /// Write a cell. Returns false, and changes nothing, if `addr` is out
    /// of range.
    #[inline]
    pub fn write(&mut self, addr: usize, value: u8) -> bool {
        match self.cells.get_mut(addr) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Write a cell, failing if `addr` is out of range.
    pub fn store(&mut self, addr: usize, value: u8) -> Result<(), MemoryError> {
        let size = self.size();
        let cell = self.cells.get_mut(addr).ok_or(MemoryError::AddressOutOfRange { addr, size })?;
        *cell = value;
        Ok(())
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// `(address, value)` pairs for a window of memory.
    pub fn dump(&self, start: usize, count: usize) -> Vec<(usize, u8)> {
        let end = start.saturating_add(count).min(self.size());
        (start.min(end)..end).map(|i| (i, self.cells[i])).collect()
    }

    /// All cells.
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(crate::cpu::config::DEFAULT_MEMORY_SIZE)
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only count non-zero cells
        let non_zero = self.cells.iter().filter(|cell| **cell != 0).count();

        f.debug_struct("Memory")
            .field("non_zero_cells", &non_zero)
            .field("total_cells", &self.size())
            .finish()
    }
}

/// Errors that can occur during checked memory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("memory address {addr} out of range (memory has {size} cells)")]
    AddressOutOfRange { addr: usize, size: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_read_write() {
        let mut mem = Memory::new(256);
        assert!(mem.write(10, 42));
        assert_eq!(mem.read(10), 42);
    }

    #[test]
    fn test_out_of_range_is_lenient() {
        let mut mem = Memory::new(16);
        assert_eq!(mem.read(16), 0);
        assert!(!mem.write(200, 9));
        assert_eq!(mem.as_slice().iter().filter(|c| **c != 0).count(), 0);
    }

    #[test]
    fn test_store_is_checked() {
        let mut mem = Memory::new(8);
        assert_eq!(mem.store(7, 0x5A), Ok(()));
        assert_eq!(mem.read(7), 0x5A);

        assert_eq!(
            mem.store(8, 1),
            Err(MemoryError::AddressOutOfRange { addr: 8, size: 8 })
        );
        assert_eq!(mem.dump(0, 8).iter().filter(|(_, v)| *v != 0).count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut mem = Memory::new(4);
        mem.write(3, 0xFF);
        mem.clear();
        assert_eq!(mem.read(3), 0);
    }

    #[test]
    fn test_dump_clamps_to_size() {
        let mem = Memory::new(4);
        assert_eq!(mem.dump(2, 10).len(), 2);
        assert!(mem.dump(10, 2).is_empty());
    }
}

//! Mock memory reader for testing
//!
//! Provides a configurable mock implementation of the ReadMemory trait that
//! reads from an in-memory MEM1 image instead of a hooked emulator.

use crate::error::{Error, Result};
use crate::memory::{MEM1_BASE, ReadMemory};

/// Mock memory reader for testing
///
/// Reads from an in-memory buffer laid out like the emulated MEM1, allowing
/// tests to exercise decoding and reconciliation logic without a running
/// Dolphin process.
#[derive(Debug, Clone)]
pub struct MockMemoryReader {
    data: Vec<u8>,
    base: u32,
}

impl MockMemoryReader {
    /// Create a new mock reader with the given data at the MEM1 base address
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            base: MEM1_BASE,
        }
    }

    /// Create a new mock reader with a custom base address
    pub fn with_base(data: Vec<u8>, base: u32) -> Self {
        Self { data, base }
    }

    /// Get the size of the underlying buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Overwrite a single byte at the given emulated address
    ///
    /// Convenience for tests that mutate state between ticks.
    pub fn poke(&mut self, address: u32, value: u8) {
        let offset = (address - self.base) as usize;
        self.data[offset] = value;
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u32, size: usize) -> Result<Vec<u8>> {
        if address < self.base {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!("Address below base (base=0x{:X})", self.base),
            });
        }
        let offset = (address - self.base) as usize;
        if offset + size > self.data.len() {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!(
                    "Out of bounds: offset={}, size={}, len={}",
                    offset,
                    size,
                    self.data.len()
                ),
            });
        }
        Ok(self.data[offset..offset + size].to_vec())
    }
}

/// Builder for creating test memory images
///
/// Offsets are relative to the base address; multi-byte writers use
/// big-endian byte order to match the emulated console.
#[derive(Debug, Clone)]
pub struct MockMemoryBuilder {
    data: Vec<u8>,
    base: u32,
}

impl MockMemoryBuilder {
    /// Create a new builder with the MEM1 base address
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            base: MEM1_BASE,
        }
    }

    /// Set the base address for the mock reader
    pub fn base(mut self, base: u32) -> Self {
        self.base = base;
        self
    }

    /// Pre-allocate buffer with zeros up to the specified size
    pub fn with_size(mut self, size: usize) -> Self {
        self.data.resize(size, 0);
        self
    }

    /// Write a single byte at the specified emulated address
    pub fn write_u8_at(mut self, address: u32, value: u8) -> Self {
        let offset = (address - self.base) as usize;
        self.ensure_size(offset + 1);
        self.data[offset] = value;
        self
    }

    /// Write an unsigned 16-bit big-endian integer at the specified emulated address
    pub fn write_u16_at(mut self, address: u32, value: u16) -> Self {
        let offset = (address - self.base) as usize;
        self.ensure_size(offset + 2);
        self.data[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
        self
    }

    /// Write an unsigned 32-bit big-endian integer at the specified emulated address
    pub fn write_u32_at(mut self, address: u32, value: u32) -> Self {
        let offset = (address - self.base) as usize;
        self.ensure_size(offset + 4);
        self.data[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
        self
    }

    /// Write raw bytes at the specified emulated address
    pub fn write_bytes_at(mut self, address: u32, bytes: &[u8]) -> Self {
        let offset = (address - self.base) as usize;
        self.ensure_size(offset + bytes.len());
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Write an ASCII string at the specified emulated address
    pub fn write_ascii_at(self, address: u32, text: &str) -> Self {
        self.write_bytes_at(address, text.as_bytes())
    }

    /// Build the MockMemoryReader
    pub fn build(self) -> MockMemoryReader {
        MockMemoryReader {
            data: self.data,
            base: self.base,
        }
    }

    fn ensure_size(&mut self, required: usize) {
        if self.data.len() < required {
            self.data.resize(required, 0);
        }
    }
}

impl Default for MockMemoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

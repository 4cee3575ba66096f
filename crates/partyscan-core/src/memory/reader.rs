#![cfg_attr(not(target_os = "windows"), allow(dead_code, unused_variables))]

use crate::error::{Error, Result};
use crate::memory::{DolphinHandle, MEM1_BASE, MEM1_SIZE};

#[cfg(target_os = "windows")]
use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;

/// Trait for reading emulated GameCube/Wii memory
///
/// Addresses are emulated addresses (`0x8000_0000`-based). The emulated RAM
/// is big-endian, so all multi-byte decoders here are big-endian regardless
/// of the host.
///
/// This trait enables mocking for tests and abstracts over different memory
/// sources.
pub trait ReadMemory {
    /// Read raw bytes from emulated memory at the given address
    fn read_bytes(&self, address: u32, size: usize) -> Result<Vec<u8>>;

    /// Read a single byte from emulated memory
    fn read_u8(&self, address: u32) -> Result<u8> {
        let bytes = self.read_bytes(address, 1)?;
        Ok(bytes[0])
    }

    /// Read an unsigned 16-bit big-endian integer from emulated memory
    fn read_u16(&self, address: u32) -> Result<u16> {
        let bytes = self.read_bytes(address, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Read an unsigned 32-bit big-endian integer from emulated memory
    fn read_u32(&self, address: u32) -> Result<u32> {
        let bytes = self.read_bytes(address, 4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a fixed-length ASCII string from emulated memory
    ///
    /// Non-ASCII bytes fail with a read error; the game id and other tokens
    /// this crate reads are plain ASCII.
    fn read_ascii(&self, address: u32, len: usize) -> Result<String> {
        let bytes = self.read_bytes(address, len)?;
        if !bytes.iter().all(|b| b.is_ascii() && *b != 0) {
            return Err(Error::MemoryReadFailed {
                address,
                message: "Non-ASCII bytes in string read".to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Reads emulated memory out of a hooked Dolphin process
///
/// Translates emulated addresses into host addresses against the MEM1
/// mapping located at hook time.
pub struct EmulatedMemoryReader<'a> {
    process: &'a DolphinHandle,
}

impl<'a> EmulatedMemoryReader<'a> {
    pub fn new(process: &'a DolphinHandle) -> Self {
        Self { process }
    }

    fn host_address(&self, address: u32, size: usize) -> Result<u64> {
        let end = address
            .checked_add(size as u32)
            .ok_or_else(|| Error::MemoryReadFailed {
                address,
                message: "Address range overflow".to_string(),
            })?;
        if address < MEM1_BASE || end > MEM1_BASE + MEM1_SIZE {
            return Err(Error::MemoryReadFailed {
                address,
                message: "Address outside emulated MEM1".to_string(),
            });
        }
        Ok(self.process.mem1_host_base() + u64::from(address - MEM1_BASE))
    }

    #[cfg(target_os = "windows")]
    fn read_bytes_impl(&self, address: u32, size: usize) -> Result<Vec<u8>> {
        let host_address = self.host_address(address, size)?;
        let mut buffer = vec![0u8; size];
        let mut bytes_read = 0;

        // SAFETY: ReadProcessMemory is called with:
        // - A valid process handle from DolphinHandle (opened with PROCESS_VM_READ)
        // - A host address inside the MEM1 mapping located at hook time
        // - A properly allocated buffer of the requested size
        // - A pointer to receive the actual bytes read
        // The call may fail if the mapping went away, which is handled via Result.
        unsafe {
            ReadProcessMemory(
                self.process.handle(),
                host_address as *const _,
                buffer.as_mut_ptr() as *mut _,
                size,
                Some(&mut bytes_read),
            )
            .map_err(|e| Error::MemoryReadFailed {
                address,
                message: e.to_string(),
            })?;
        }

        // All-or-nothing reads. A partial read of a turn counter or a coin
        // word would decode to garbage, so it is treated as a miss.
        if bytes_read != size {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!("Expected {} bytes, read {}", size, bytes_read),
            });
        }

        Ok(buffer)
    }

    #[cfg(not(target_os = "windows"))]
    fn read_bytes_impl(&self, address: u32, _size: usize) -> Result<Vec<u8>> {
        Err(Error::MemoryReadFailed {
            address,
            message: "Windows only: memory reading not supported on this platform".to_string(),
        })
    }
}

impl ReadMemory for EmulatedMemoryReader<'_> {
    fn read_bytes(&self, address: u32, size: usize) -> Result<Vec<u8>> {
        self.read_bytes_impl(address, size)
    }
}

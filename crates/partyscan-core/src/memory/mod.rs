mod hook;
mod reader;

// Mock memory reader for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use hook::{DolphinHandle, WINDOW_TITLE_HINTS, emulator_window_present};
pub use reader::{EmulatedMemoryReader, ReadMemory};

// Re-export mock for convenient access in tests
#[doc(hidden)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};

/// Start of the emulated GameCube/Wii main RAM in virtual address space.
pub const MEM1_BASE: u32 = 0x8000_0000;

/// Size of the emulated MEM1 region (24 MiB).
pub const MEM1_SIZE: u32 = 0x0180_0000;

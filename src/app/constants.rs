use mochi::memory_bus::ADDRESS_SPACE_SIZE;

// --- Memory ---
pub const DEFAULT_MEMORY_SIZE: usize = ADDRESS_SPACE_SIZE; // Full 64 KiB address space
pub const PROGRAM_START: u16 = 0x0000; // Raw programs are placed at the bottom of memory

// --- Execution ---
pub const DEFAULT_MAX_STEPS: usize = 1_000; // Step cap for `run` when none is given

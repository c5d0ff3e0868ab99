//! Instruction-execution core for an 8-bit SM83-style CPU.
//!
//! The crate decodes one opcode at a time out of a [`memory_bus::Bus`],
//! mutates the register file and memory, and reports the cycles consumed.
//! Driving the fetch-execute loop is left to the host.

pub mod cpu;
pub mod error;
pub mod instruction;
pub mod memory_bus;
pub mod word;

pub use cpu::{Cpu, CpuResult};
pub use error::CpuError;
pub use instruction::{Opcode, OpcodeTable, PcUpdate, Step};
pub use memory_bus::{Bus, MemoryBus};
pub use word::Word;

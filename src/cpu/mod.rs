//! The SM83-style CPU core.

use crate::error::CpuError;
use crate::instruction::{Opcode, OpcodeTable, PcUpdate, Step};
use crate::memory_bus::{Bus, MemoryBus};
use crate::word::Word;
use registers::{Flag, RegisterFile};

// Declare submodules
pub mod alu;
mod constants;
pub mod operand;
mod ops_alu;
mod ops_control;
mod ops_load;
mod ops_rot_shift;
pub mod registers;

// Re-export public constants if needed by external modules
pub use constants::*;

// Type alias for CPU operation results
pub type CpuResult<T> = Result<T, CpuError>;

/// CPU state: registers, memory and the opcode table built for them.
#[derive(Debug, Clone)]
pub struct Cpu<B: Bus = MemoryBus> {
    registers: RegisterFile,
    memory: B,
    opcodes: OpcodeTable,

    // --- Internal Timing/Execution State ---
    total_cycles: u64,   // Total T-cycles executed through step()
    fetched_opcode: u8,  // Last opcode fetched by step()
    instruction_pc: Word, // PC at the start of the last stepped instruction
}

impl<B: Bus> Cpu<B> {
    /// Creates a CPU around `memory`.
    ///
    /// With `skip_boot_rom` the registers start with the values the DMG boot
    /// ROM leaves behind (PC=0x0100); otherwise every register is zero.
    pub fn new(memory: B, skip_boot_rom: bool) -> Self {
        let mut register_file = RegisterFile::new();
        if skip_boot_rom {
            register_file.set16(registers::AF, Word::new(POST_BOOT_AF));
            register_file.set16(registers::BC, Word::new(POST_BOOT_BC));
            register_file.set16(registers::DE, Word::new(POST_BOOT_DE));
            register_file.set16(registers::HL, Word::new(POST_BOOT_HL));
            register_file.set16(registers::SP, Word::new(POST_BOOT_SP));
            register_file.set16(registers::PC, Word::new(POST_BOOT_PC));
        }

        // The table is built only once the registers it refers to exist.
        let opcodes = OpcodeTable::build();

        Cpu {
            registers: register_file,
            memory,
            opcodes,
            total_cycles: 0,
            fetched_opcode: 0,
            instruction_pc: Word::default(),
        }
    }

    /// Fetches the opcode at PC, runs it, and moves PC past it unless the
    /// opcode already did.
    /// Returns the number of T-cycles consumed by the instruction.
    pub fn step(&mut self) -> CpuResult<u16> {
        // --- Fetch Phase ---
        self.instruction_pc = self.pc();
        self.fetched_opcode = self.memory.read_byte(self.instruction_pc).map_err(|error| {
            log::error!("CPU Error fetching opcode at PC={}: {}", self.instruction_pc, error);
            error
        })?;

        // --- Decode Phase ---
        let opcode = self.lookup(self.fetched_opcode).map_err(|error| {
            log::error!("CPU Error: {}", error);
            error
        })?;
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{}: {}", self.instruction_pc, opcode.debug_string());
        }

        // --- Execute Phase ---
        let step = opcode.run(self).map_err(|error| {
            log::error!(
                "CPU Error at PC={} (Opcode {:#04X}): {}",
                self.instruction_pc,
                self.fetched_opcode,
                error
            );
            error
        })?;

        // --- Advance PC Phase ---
        if step.pc == PcUpdate::Advance {
            let next = self.instruction_pc.wrapping_add(opcode.length() as u16);
            self.registers.set16(registers::PC, next);
        }
        self.total_cycles = self.total_cycles.wrapping_add(step.cycles as u64);
        Ok(step.cycles)
    }

    /// Runs the table entry for `code` without fetching it or moving PC.
    pub fn execute(&mut self, code: u8) -> CpuResult<Step> {
        let opcode = self.lookup(code)?;
        opcode.run(self)
    }

    fn lookup(&self, code: u8) -> CpuResult<Opcode> {
        self.opcodes
            .get(code)
            .copied()
            .ok_or(CpuError::UnknownOpcode { code, pc: self.pc() })
    }

    // --- Immediate Operand Helpers ---
    /// The byte following the opcode at PC.
    #[inline(always)]
    pub fn read_d8(&self) -> CpuResult<u8> {
        self.memory.read_byte(self.pc().wrapping_add(1))
    }

    /// The little-endian word following the opcode at PC.
    #[inline(always)]
    pub fn read_d16(&self) -> CpuResult<Word> {
        self.memory.read_word(self.pc().wrapping_add(1))
    }

    // --- Flag Helpers ---
    #[inline(always)]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.registers.flag(flag)
    }

    #[inline(always)]
    pub fn set_flag(&mut self, flag: Flag, set: bool) {
        self.registers.set_flag(flag, set);
    }

    // --- Public accessors ---
    #[inline(always)]
    pub fn pc(&self) -> Word {
        self.registers.get16(registers::PC)
    }

    #[inline(always)]
    pub fn set_pc(&mut self, value: Word) {
        self.registers.set16(registers::PC, value);
    }

    #[inline(always)]
    pub fn sp(&self) -> Word {
        self.registers.get16(registers::SP)
    }

    #[inline(always)]
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    #[inline(always)]
    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    #[inline(always)]
    pub fn memory(&self) -> &B {
        &self.memory
    }

    #[inline(always)]
    pub fn memory_mut(&mut self) -> &mut B {
        &mut self.memory
    }

    #[inline(always)]
    pub fn opcodes(&self) -> &OpcodeTable {
        &self.opcodes
    }

    #[inline(always)]
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    #[inline(always)]
    pub fn instruction_pc(&self) -> Word {
        self.instruction_pc
    }

    // --- Debugging Helpers ---
    /// Renders the instruction at `address` with its immediates filled in.
    /// Returns the text and the number of bytes it spans.
    pub fn disassemble(&self, address: Word) -> CpuResult<(String, u8)> {
        let code = self.memory.read_byte(address)?;
        let Some(opcode) = self.opcodes.get(code) else {
            return Ok((format!("DB ${:02X}", code), 1));
        };
        let name = opcode.name();
        let text = match opcode.length() {
            2 => {
                let d8 = self.memory.read_byte(address.wrapping_add(1))?;
                name.replace("d8", &format!("${:02X}", d8))
            }
            3 => {
                let d16 = self.memory.read_word(address.wrapping_add(1))?;
                name.replace("d16", &format!("${:04X}", d16.value()))
            }
            _ => name,
        };
        Ok((text, opcode.length()))
    }
}

impl Default for Cpu<MemoryBus> {
    fn default() -> Self {
        Cpu::new(MemoryBus::default(), false)
    }
}

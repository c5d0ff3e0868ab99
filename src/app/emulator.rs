use crate::constants;
use mochi::cpu::Cpu; // Use Cpu from lib
use mochi::memory_bus::MemoryBus;
use mochi::word::Word;
use std::fs;
use std::path::Path;

/// A CPU wired to a flat memory holding one raw program.
pub struct Emulator {
    pub cpu: Cpu<MemoryBus>,
    pub program_size: usize,
}

impl Emulator {
    /// Reads `program_path` and places it at `PROGRAM_START` in a fresh memory.
    pub fn new(program_path: &Path) -> Result<Self, String> {
        let program = fs::read(program_path)
            .map_err(|e| format!("Failed to read program '{}': {}", program_path.display(), e))?;

        let mut memory_bus = MemoryBus::new(constants::DEFAULT_MEMORY_SIZE);
        memory_bus
            .load(Word::new(constants::PROGRAM_START), &program)
            .map_err(|e| format!("Failed to load program '{}': {}", program_path.display(), e))?;

        // Registers start zeroed so PC points at the first program byte.
        let cpu = Cpu::new(memory_bus, false);

        Ok(Emulator {
            cpu,
            program_size: program.len(),
        })
    }

    /// Executes exactly one instruction and prints it as a trace line.
    pub fn step_instruction(&mut self) -> Result<u16, String> {
        let pc = self.cpu.pc();
        let (text, _) = self.cpu.disassemble(pc).map_err(|e| e.to_string())?;
        let cycles = self.cpu.step().map_err(|e| e.to_string())?;
        println!("{}  {:<14} ; {} cycles", pc, text, cycles);
        Ok(cycles)
    }

    /// Steps until an error or `max_steps` instructions have run.
    /// Returns the number of instructions executed.
    pub fn run(&mut self, max_steps: usize) -> Result<usize, String> {
        for executed in 0..max_steps {
            if let Err(error_message) = self.step_instruction() {
                eprintln!("Stopped after {} instructions: {}", executed, error_message);
                return Ok(executed);
            }
        }
        Ok(max_steps)
    }

    /// Disassembly of the loaded program, one `(address, text)` per instruction.
    pub fn disassemble_program(&self) -> Result<Vec<(Word, String)>, String> {
        let mut lines = Vec::new();
        let mut offset = 0usize;
        while offset < self.program_size {
            let address = Word::new(constants::PROGRAM_START.wrapping_add(offset as u16));
            let (text, length) = self.cpu.disassemble(address).map_err(|e| e.to_string())?;
            lines.push((address, text));
            offset += length as usize;
        }
        Ok(lines)
    }
}

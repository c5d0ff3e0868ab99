//! 8-bit operands that can be read, written and stepped in place.
//!
//! A [`ByteSource`] is either a register or the memory cell a 16-bit
//! register points at. Opcodes only talk to this type, so "INC B" and
//! "INC (HL)" share one implementation and the operand reports its own
//! extra cycle cost.

use std::fmt;

use super::constants::{INDIRECT_ACCESS_CYCLES, INDIRECT_RMW_CYCLES};
use super::registers::{Reg8, Reg16};
use super::{Cpu, CpuResult, alu};
use crate::memory_bus::Bus;

/// What happens to the pointer register after an indirect access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerStep {
    Hold,
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteSource {
    Register(Reg8),
    Indirect { pointer: Reg16, step: PointerStep },
}

/// A value obtained from an operand and the extra cycles it cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access<T> {
    pub value: T,
    pub cycles: u16,
}

impl<T> Access<T> {
    fn free(value: T) -> Self {
        Access { value, cycles: 0 }
    }
}

impl ByteSource {
    pub const fn register(register: Reg8) -> Self {
        ByteSource::Register(register)
    }

    pub const fn indirect(pointer: Reg16) -> Self {
        ByteSource::Indirect {
            pointer,
            step: PointerStep::Hold,
        }
    }

    pub const fn post_increment(pointer: Reg16) -> Self {
        ByteSource::Indirect {
            pointer,
            step: PointerStep::Increment,
        }
    }

    pub const fn post_decrement(pointer: Reg16) -> Self {
        ByteSource::Indirect {
            pointer,
            step: PointerStep::Decrement,
        }
    }

    pub const fn is_indirect(&self) -> bool {
        matches!(self, ByteSource::Indirect { .. })
    }

    pub fn get<B: Bus>(&self, cpu: &mut Cpu<B>) -> CpuResult<Access<u8>> {
        match *self {
            ByteSource::Register(register) => Ok(Access::free(cpu.registers().get8(register))),
            ByteSource::Indirect { pointer, step } => {
                let address = cpu.registers().get16(pointer);
                let value = cpu.memory().read_byte(address)?;
                Self::step_pointer(cpu, pointer, step);
                Ok(Access {
                    value,
                    cycles: INDIRECT_ACCESS_CYCLES,
                })
            }
        }
    }

    pub fn set<B: Bus>(&self, cpu: &mut Cpu<B>, value: u8) -> CpuResult<Access<()>> {
        match *self {
            ByteSource::Register(register) => {
                cpu.registers_mut().set8(register, value);
                Ok(Access::free(()))
            }
            ByteSource::Indirect { pointer, step } => {
                let address = cpu.registers().get16(pointer);
                cpu.memory_mut().write_byte(address, value)?;
                Self::step_pointer(cpu, pointer, step);
                Ok(Access {
                    value: (),
                    cycles: INDIRECT_ACCESS_CYCLES,
                })
            }
        }
    }

    /// Adds one to the operand in place. Yields `(zero, half_carry)`.
    ///
    /// For an indirect operand this is a read-modify-write of the pointed-to
    /// byte; the pointer itself is left alone.
    pub fn increment<B: Bus>(&self, cpu: &mut Cpu<B>) -> CpuResult<Access<(bool, bool)>> {
        match *self {
            ByteSource::Register(register) => {
                Ok(Access::free(cpu.registers_mut().increment8(register)))
            }
            ByteSource::Indirect { pointer, .. } => {
                let address = cpu.registers().get16(pointer);
                let value = cpu.memory().read_byte(address)?;
                let sum = alu::add8(value, 1, false);
                cpu.memory_mut().write_byte(address, sum.result)?;
                Ok(Access {
                    value: (sum.zero, sum.half_carry),
                    cycles: INDIRECT_RMW_CYCLES,
                })
            }
        }
    }

    /// Subtracts one from the operand in place. Yields `(zero, half_carry)`.
    pub fn decrement<B: Bus>(&self, cpu: &mut Cpu<B>) -> CpuResult<Access<(bool, bool)>> {
        match *self {
            ByteSource::Register(register) => {
                Ok(Access::free(cpu.registers_mut().decrement8(register)))
            }
            ByteSource::Indirect { pointer, .. } => {
                let address = cpu.registers().get16(pointer);
                let value = cpu.memory().read_byte(address)?;
                let difference = alu::sub8(value, 1, false);
                cpu.memory_mut().write_byte(address, difference.result)?;
                Ok(Access {
                    value: (difference.zero, difference.half_carry),
                    cycles: INDIRECT_RMW_CYCLES,
                })
            }
        }
    }

    fn step_pointer<B: Bus>(cpu: &mut Cpu<B>, pointer: Reg16, step: PointerStep) {
        match step {
            PointerStep::Hold => {}
            PointerStep::Increment => cpu.registers_mut().increment16(pointer),
            PointerStep::Decrement => cpu.registers_mut().decrement16(pointer),
        }
    }
}

impl fmt::Display for ByteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteSource::Register(register) => write!(f, "{}", register.name()),
            ByteSource::Indirect { pointer, step } => {
                let modifier = match step {
                    PointerStep::Hold => "",
                    PointerStep::Increment => "+",
                    PointerStep::Decrement => "-",
                };
                write!(f, "({}{})", pointer.name(), modifier)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::registers::{A, BC, DE, HL};
    use crate::error::CpuError;
    use crate::memory_bus::MemoryBus;
    use crate::word::Word;

    fn setup_cpu() -> Cpu {
        Cpu::new(MemoryBus::new(1024), false)
    }

    #[test]
    fn register_operand_is_free() {
        let mut cpu = setup_cpu();
        let operand = ByteSource::register(A);
        assert_eq!(operand.set(&mut cpu, 0x42).unwrap().cycles, 0);
        let access = operand.get(&mut cpu).unwrap();
        assert_eq!((access.value, access.cycles), (0x42, 0));
    }

    #[test]
    fn indirect_operand_costs_a_bus_cycle() {
        let mut cpu = setup_cpu();
        cpu.registers_mut().set16(BC, Word::new(0x0033));
        let operand = ByteSource::indirect(BC);
        assert_eq!(operand.set(&mut cpu, 0x12).unwrap().cycles, 4);
        assert_eq!(cpu.memory().read_byte(Word::new(0x0033)), Ok(0x12));
        let access = operand.get(&mut cpu).unwrap();
        assert_eq!((access.value, access.cycles), (0x12, 4));
        assert_eq!(cpu.registers().get16(BC), Word::new(0x0033));
    }

    #[test]
    fn post_step_moves_the_pointer() {
        let mut cpu = setup_cpu();
        cpu.registers_mut().set16(HL, Word::new(0x0010));
        ByteSource::post_increment(HL).set(&mut cpu, 0xAA).unwrap();
        assert_eq!(cpu.registers().get16(HL), Word::new(0x0011));
        ByteSource::post_decrement(HL).get(&mut cpu).unwrap();
        assert_eq!(cpu.registers().get16(HL), Word::new(0x0010));
    }

    #[test]
    fn indirect_increment_changes_the_byte_not_the_pointer() {
        let mut cpu = setup_cpu();
        cpu.registers_mut().set16(DE, Word::new(0x0020));
        cpu.memory_mut().write_byte(Word::new(0x0020), 0x0F).unwrap();
        let access = ByteSource::indirect(DE).increment(&mut cpu).unwrap();
        assert_eq!(access.value, (false, true));
        assert_eq!(access.cycles, 8);
        assert_eq!(cpu.memory().read_byte(Word::new(0x0020)), Ok(0x10));
        assert_eq!(cpu.registers().get16(DE), Word::new(0x0020));
    }

    #[test]
    fn failed_read_leaves_pointer_alone() {
        let mut cpu = setup_cpu();
        cpu.registers_mut().set16(HL, Word::new(0x0400));
        let result = ByteSource::post_increment(HL).get(&mut cpu);
        assert_eq!(
            result,
            Err(CpuError::AddressOutOfRange { address: Word::new(0x0400), size: 1024 })
        );
        assert_eq!(cpu.registers().get16(HL), Word::new(0x0400));
    }

    #[test]
    fn names() {
        assert_eq!(ByteSource::register(A).to_string(), "A");
        assert_eq!(ByteSource::indirect(HL).to_string(), "(HL)");
        assert_eq!(ByteSource::post_increment(HL).to_string(), "(HL+)");
        assert_eq!(ByteSource::post_decrement(HL).to_string(), "(HL-)");
    }
}

use super::alu::{self, ArithOp, LogicOp};
use super::operand::ByteSource;
use super::registers::{Flag, Reg8, Reg16};
use super::{Cpu, CpuResult, constants::*};
use crate::memory_bus::Bus;

// --- ALU Implementations ---
impl<B: Bus> Cpu<B> {
    // INC r / INC (HL): C is untouched
    pub(crate) fn op_inc(&mut self, target: ByteSource) -> CpuResult<u16> {
        let access = target.increment(self)?;
        let (zero, half_carry) = access.value;
        self.set_flag(Flag::Zero, zero);
        self.set_flag(Flag::Subtract, false);
        self.set_flag(Flag::HalfCarry, half_carry);
        Ok(INC_DEC_R_CYCLES + access.cycles)
    }

    // DEC r / DEC (HL): C is untouched
    pub(crate) fn op_dec(&mut self, target: ByteSource) -> CpuResult<u16> {
        let access = target.decrement(self)?;
        let (zero, half_carry) = access.value;
        self.set_flag(Flag::Zero, zero);
        self.set_flag(Flag::Subtract, true);
        self.set_flag(Flag::HalfCarry, half_carry);
        Ok(INC_DEC_R_CYCLES + access.cycles)
    }

    // ADD/ADC/SUB/SBC A,src
    pub(crate) fn op_arithmetic(
        &mut self,
        op: ArithOp,
        dst: Reg8,
        src: ByteSource,
    ) -> CpuResult<u16> {
        let read = src.get(self)?;
        let a = self.registers.get8(dst);
        let out = op.apply(a, read.value, self.get_flag(Flag::Carry));
        self.registers.set8(dst, out.result);
        self.set_flag(Flag::Zero, out.zero);
        self.set_flag(Flag::Subtract, op.is_subtraction());
        self.set_flag(Flag::HalfCarry, out.half_carry);
        self.set_flag(Flag::Carry, out.carry);
        Ok(ALU_CYCLES + read.cycles)
    }

    // AND/XOR/OR/CP src
    pub(crate) fn op_logic(&mut self, op: LogicOp, dst: Reg8, src: ByteSource) -> CpuResult<u16> {
        let read = src.get(self)?;
        let a = self.registers.get8(dst);
        let out = alu::logic8(op, a, read.value);
        if op != LogicOp::Cp {
            self.registers.set8(dst, out.result);
        }
        self.set_flag(Flag::Zero, out.zero);
        self.set_flag(Flag::Subtract, op == LogicOp::Cp);
        self.set_flag(Flag::HalfCarry, out.half_carry);
        self.set_flag(Flag::Carry, out.carry);
        Ok(ALU_CYCLES + read.cycles)
    }

    // ADD HL,rr: Z is untouched
    pub(crate) fn op_add_hl(&mut self, dst: Reg16, src: Reg16) -> u16 {
        let out = alu::add16(self.registers.get16(dst), self.registers.get16(src));
        self.registers.set16(dst, out.result);
        self.set_flag(Flag::Subtract, false);
        self.set_flag(Flag::HalfCarry, out.half_carry);
        self.set_flag(Flag::Carry, out.carry);
        ADD_HL_CYCLES
    }
}

use super::operand::ByteSource;
use super::registers::Reg16;
use super::{Cpu, CpuResult, constants::*};
use crate::memory_bus::Bus;

// --- Load Implementations ---
impl<B: Bus> Cpu<B> {
    // LD r,r' / LD r,(rr) / LD (rr),r
    pub(crate) fn op_ld(&mut self, dst: ByteSource, src: ByteSource) -> CpuResult<u16> {
        let read = src.get(self)?;
        let write = dst.set(self, read.value)?;
        Ok(LD_R_R_CYCLES + read.cycles + write.cycles)
    }

    // LD r,d8 / LD (HL),d8
    pub(crate) fn op_ld_d8(&mut self, dst: ByteSource) -> CpuResult<u16> {
        let value = self.read_d8()?;
        let write = dst.set(self, value)?;
        Ok(LD_R_D8_CYCLES + write.cycles)
    }

    // LD rr,d16
    pub(crate) fn op_ld_d16(&mut self, dst: Reg16) -> CpuResult<u16> {
        let value = self.read_d16()?;
        self.registers.set16(dst, value);
        Ok(LD_RR_D16_CYCLES)
    }

    // INC rr (no flags)
    pub(crate) fn op_inc16(&mut self, target: Reg16) -> u16 {
        self.registers.increment16(target);
        INC_DEC_RR_CYCLES
    }

    // DEC rr (no flags)
    pub(crate) fn op_dec16(&mut self, target: Reg16) -> u16 {
        self.registers.decrement16(target);
        INC_DEC_RR_CYCLES
    }
}

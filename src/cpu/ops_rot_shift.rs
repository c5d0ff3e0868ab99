use super::alu::{self, Rotation};
use super::registers::{A, Flag};
use super::{Cpu, constants::*};
use crate::memory_bus::Bus;

// --- Rotate Implementations (Non-CB prefixed) ---
impl<B: Bus> Cpu<B> {
    // RLCA / RRCA / RLA / RRA
    pub(crate) fn op_rotate_a(&mut self, rotation: Rotation) -> u16 {
        let out = alu::rotate(rotation, self.registers.get8(A), self.get_flag(Flag::Carry));
        self.registers.set8(A, out.result);
        self.set_flag(Flag::Zero, false); // Special case: Z flag is cleared
        self.set_flag(Flag::Subtract, false);
        self.set_flag(Flag::HalfCarry, false);
        self.set_flag(Flag::Carry, out.carry);
        ROTATE_A_CYCLES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_bus::MemoryBus;

    #[test]
    fn rotating_to_zero_still_clears_z() {
        let mut cpu = Cpu::new(MemoryBus::new(0x100), false);
        cpu.registers_mut().set8(A, 0x80);
        cpu.set_flag(Flag::Zero, true);
        cpu.set_flag(Flag::HalfCarry, true);
        assert_eq!(cpu.op_rotate_a(Rotation::Rl), 4);
        assert_eq!(cpu.registers().get8(A), 0x00);
        assert!(!cpu.get_flag(Flag::Zero));
        assert!(!cpu.get_flag(Flag::HalfCarry));
        assert!(cpu.get_flag(Flag::Carry));
    }

    #[test]
    fn rra_shifts_carry_into_bit_7() {
        let mut cpu = Cpu::new(MemoryBus::new(0x100), false);
        cpu.registers_mut().set8(A, 0x02);
        cpu.set_flag(Flag::Carry, true);
        cpu.op_rotate_a(Rotation::Rr);
        assert_eq!(cpu.registers().get8(A), 0x81);
        assert!(!cpu.get_flag(Flag::Carry));
    }
}

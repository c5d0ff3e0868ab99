//! Register file with aliased 8/16-bit views.
//!
//! All register storage lives in one arena of byte cells. An 8-bit register
//! is a handle naming one cell; a 16-bit register names a (high, low) pair of
//! cells. AF, BC, DE and HL are built from the handles of their 8-bit halves,
//! so a write through either view is seen by the other. SP and PC own cells
//! that no 8-bit handle exposes.
//!
//! Pairs use the conventional order: the first-named register is the high
//! byte (`A` is the high byte of `AF`, `C` the low byte of `BC`).

use std::fmt;

use super::alu;
use super::constants::{FLAG_C_POS, FLAG_H_POS, FLAG_MASK, FLAG_N_POS, FLAG_Z_POS};
use crate::word::Word;

const CELL_COUNT: usize = 12;

// Cell indices in the arena
const CELL_A: usize = 0;
const CELL_F: usize = 1;
const CELL_B: usize = 2;
const CELL_C: usize = 3;
const CELL_D: usize = 4;
const CELL_E: usize = 5;
const CELL_H: usize = 6;
const CELL_L: usize = 7;
const CELL_SP_LO: usize = 8;
const CELL_SP_HI: usize = 9;
const CELL_PC_LO: usize = 10;
const CELL_PC_HI: usize = 11;

/// Handle to one named byte cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reg8 {
    name: &'static str,
    cell: usize,
}

impl Reg8 {
    const fn new(name: &'static str, cell: usize) -> Self {
        Reg8 { name, cell }
    }

    pub const fn name(self) -> &'static str {
        self.name
    }
}

/// Handle to a 16-bit register: a pair of cells, high byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reg16 {
    name: &'static str,
    hi: usize,
    lo: usize,
}

impl Reg16 {
    /// Aliases two existing 8-bit registers into one 16-bit view.
    const fn pair(name: &'static str, hi: Reg8, lo: Reg8) -> Self {
        Reg16 {
            name,
            hi: hi.cell,
            lo: lo.cell,
        }
    }

    const fn standalone(name: &'static str, hi: usize, lo: usize) -> Self {
        Reg16 { name, hi, lo }
    }

    pub const fn name(self) -> &'static str {
        self.name
    }

    /// The 8-bit halves, `(high, low)`, for the aliased pairs.
    pub fn halves(self) -> Option<(Reg8, Reg8)> {
        let find = |cell| REGISTERS_8.iter().copied().find(|r| r.cell == cell);
        Some((find(self.hi)?, find(self.lo)?))
    }
}

pub const A: Reg8 = Reg8::new("A", CELL_A);
pub const F: Reg8 = Reg8::new("F", CELL_F);
pub const B: Reg8 = Reg8::new("B", CELL_B);
pub const C: Reg8 = Reg8::new("C", CELL_C);
pub const D: Reg8 = Reg8::new("D", CELL_D);
pub const E: Reg8 = Reg8::new("E", CELL_E);
pub const H: Reg8 = Reg8::new("H", CELL_H);
pub const L: Reg8 = Reg8::new("L", CELL_L);

pub const AF: Reg16 = Reg16::pair("AF", A, F);
pub const BC: Reg16 = Reg16::pair("BC", B, C);
pub const DE: Reg16 = Reg16::pair("DE", D, E);
pub const HL: Reg16 = Reg16::pair("HL", H, L);
pub const SP: Reg16 = Reg16::standalone("SP", CELL_SP_HI, CELL_SP_LO);
pub const PC: Reg16 = Reg16::standalone("PC", CELL_PC_HI, CELL_PC_LO);

pub const REGISTERS_8: [Reg8; 8] = [A, F, B, C, D, E, H, L];

/// One of the four flags held in the upper nibble of F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Zero,
    Subtract,
    HalfCarry,
    Carry,
}

impl Flag {
    pub const ALL: [Flag; 4] = [Flag::Zero, Flag::Subtract, Flag::HalfCarry, Flag::Carry];

    /// Bit index of the flag within F.
    pub const fn bit(self) -> u8 {
        match self {
            Flag::Zero => FLAG_Z_POS,
            Flag::Subtract => FLAG_N_POS,
            Flag::HalfCarry => FLAG_H_POS,
            Flag::Carry => FLAG_C_POS,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Flag::Zero => 'Z',
            Flag::Subtract => 'N',
            Flag::HalfCarry => 'H',
            Flag::Carry => 'C',
        }
    }
}

/// Storage for every CPU register.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    cells: [u8; CELL_COUNT],
}

impl RegisterFile {
    /// All registers zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    fn store(&mut self, cell: usize, value: u8) {
        // F keeps its low nibble clear no matter which view writes it.
        self.cells[cell] = if cell == CELL_F { value & FLAG_MASK } else { value };
    }

    #[inline(always)]
    pub fn get8(&self, register: Reg8) -> u8 {
        self.cells[register.cell]
    }

    #[inline(always)]
    pub fn set8(&mut self, register: Reg8, value: u8) {
        self.store(register.cell, value);
    }

    #[inline(always)]
    pub fn get16(&self, register: Reg16) -> Word {
        Word::from_bytes(self.cells[register.lo], self.cells[register.hi])
    }

    #[inline(always)]
    pub fn set16(&mut self, register: Reg16, value: Word) {
        let (lsb, msb) = value.to_bytes();
        self.store(register.lo, lsb);
        self.store(register.hi, msb);
    }

    /// Adds one, wrapping at 256. Returns `(zero, half_carry)`.
    pub fn increment8(&mut self, register: Reg8) -> (bool, bool) {
        let sum = alu::add8(self.get8(register), 1, false);
        self.set8(register, sum.result);
        (sum.zero, sum.half_carry)
    }

    /// Subtracts one, wrapping at 256. Returns `(zero, half_carry)`, where
    /// half carry is the half borrow.
    pub fn decrement8(&mut self, register: Reg8) -> (bool, bool) {
        let difference = alu::sub8(self.get8(register), 1, false);
        self.set8(register, difference.result);
        (difference.zero, difference.half_carry)
    }

    /// Adds one, wrapping at 2^16. No flags.
    pub fn increment16(&mut self, register: Reg16) {
        let value = self.get16(register);
        self.set16(register, value.wrapping_add(1));
    }

    /// Subtracts one, wrapping at 2^16. No flags.
    pub fn decrement16(&mut self, register: Reg16) {
        let value = self.get16(register);
        self.set16(register, value.wrapping_sub(1));
    }

    /// Panics if `index` is not in 0..=7.
    pub fn get_bit(&self, register: Reg8, index: u8) -> bool {
        assert!(index < 8, "bit index {} out of range for {}", index, register.name);
        self.get8(register) & (1 << index) != 0
    }

    /// Panics if `index` is not in 0..=7.
    pub fn set_bit(&mut self, register: Reg8, index: u8, value: bool) {
        assert!(index < 8, "bit index {} out of range for {}", index, register.name);
        let current = self.get8(register);
        let updated = if value {
            current | (1 << index)
        } else {
            current & !(1 << index)
        };
        self.set8(register, updated);
    }

    #[inline(always)]
    pub fn flag(&self, flag: Flag) -> bool {
        self.get_bit(F, flag.bit())
    }

    #[inline(always)]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.set_bit(F, flag.bit(), value);
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AF:{:04X} BC:{:04X} DE:{:04X} HL:{:04X} SP:{:04X} PC:{:04X} Flags[",
            self.get16(AF).value(),
            self.get16(BC).value(),
            self.get16(DE).value(),
            self.get16(HL).value(),
            self.get16(SP).value(),
            self.get16(PC).value(),
        )?;
        for (index, flag) in Flag::ALL.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{}", flag.symbol(), self.flag(*flag) as u8)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_write_is_seen_by_halves() {
        let mut regs = RegisterFile::new();
        regs.set16(BC, Word::new(0x1234));
        assert_eq!(regs.get8(B), 0x12);
        assert_eq!(regs.get8(C), 0x34);

        regs.set16(DE, Word::new(0xBEEF));
        assert_eq!((regs.get8(D), regs.get8(E)), (0xBE, 0xEF));

        regs.set16(HL, Word::new(0x00FF));
        assert_eq!((regs.get8(H), regs.get8(L)), (0x00, 0xFF));
    }

    #[test]
    fn half_writes_are_seen_by_pair() {
        let mut regs = RegisterFile::new();
        regs.set8(H, 0xC0);
        regs.set8(L, 0x01);
        assert_eq!(regs.get16(HL), Word::new(0xC001));

        regs.set8(L, 0x02);
        assert_eq!(regs.get16(HL), Word::new(0xC002));
    }

    #[test]
    fn af_puts_a_in_the_high_byte() {
        let mut regs = RegisterFile::new();
        regs.set16(AF, Word::new(0x12F0));
        assert_eq!(regs.get8(A), 0x12);
        assert_eq!(regs.get8(F), 0xF0);
    }

    #[test]
    fn f_low_nibble_reads_zero() {
        let mut regs = RegisterFile::new();
        regs.set8(F, 0xFF);
        assert_eq!(regs.get8(F), 0xF0);

        regs.set16(AF, Word::new(0x01BF));
        assert_eq!(regs.get16(AF), Word::new(0x01B0));
    }

    #[test]
    fn sp_and_pc_do_not_alias_anything() {
        let mut regs = RegisterFile::new();
        regs.set16(SP, Word::new(0xFFFE));
        regs.set16(PC, Word::new(0x0100));
        for register in REGISTERS_8 {
            assert_eq!(regs.get8(register), 0, "{} was touched", register.name());
        }
        assert_eq!(SP.halves(), None);
        assert_eq!(HL.halves(), Some((H, L)));
    }

    #[test]
    fn increment8_wraps_and_reports_flags() {
        let mut regs = RegisterFile::new();
        regs.set8(B, 0x0F);
        assert_eq!(regs.increment8(B), (false, true));
        assert_eq!(regs.get8(B), 0x10);

        regs.set8(B, 0xFF);
        assert_eq!(regs.increment8(B), (true, true));
        assert_eq!(regs.get8(B), 0x00);
    }

    #[test]
    fn decrement8_matches_alu_half_borrow() {
        for value in 0..=u8::MAX {
            let mut regs = RegisterFile::new();
            regs.set8(E, value);
            let expected = alu::sub8(value, 1, false);
            assert_eq!(regs.decrement8(E), (expected.zero, expected.half_carry));
            assert_eq!(regs.get8(E), expected.result);
        }
    }

    #[test]
    fn sixteen_bit_increment_wraps_through_halves() {
        let mut regs = RegisterFile::new();
        regs.set16(DE, Word::new(0x00FF));
        regs.increment16(DE);
        assert_eq!((regs.get8(D), regs.get8(E)), (0x01, 0x00));

        regs.set16(SP, Word::new(0xFFFF));
        regs.increment16(SP);
        assert_eq!(regs.get16(SP), Word::new(0x0000));
        regs.decrement16(SP);
        assert_eq!(regs.get16(SP), Word::new(0xFFFF));
    }

    #[test]
    fn flags_occupy_upper_nibble() {
        let mut regs = RegisterFile::new();
        regs.set_flag(Flag::Zero, true);
        assert_eq!(regs.get8(F), 0x80);
        regs.set_flag(Flag::Carry, true);
        assert_eq!(regs.get8(F), 0x90);
        regs.set_flag(Flag::Zero, false);
        assert!(!regs.flag(Flag::Zero));
        assert!(regs.flag(Flag::Carry));
    }

    #[test]
    fn bit_access() {
        let mut regs = RegisterFile::new();
        regs.set_bit(C, 7, true);
        regs.set_bit(C, 0, true);
        assert_eq!(regs.get8(C), 0x81);
        assert!(regs.get_bit(C, 7));
        assert!(!regs.get_bit(C, 3));
    }

    #[test]
    #[should_panic(expected = "bit index 8 out of range")]
    fn bit_index_past_seven_panics() {
        let mut regs = RegisterFile::new();
        regs.set_bit(A, 8, true);
    }

    #[test]
    fn dump_lists_pairs_and_flags() {
        let mut regs = RegisterFile::new();
        regs.set16(AF, Word::new(0x01B0));
        regs.set16(PC, Word::new(0x0100));
        assert_eq!(
            regs.to_string(),
            "AF:01B0 BC:0000 DE:0000 HL:0000 SP:0000 PC:0100 Flags[Z:1 N:0 H:1 C:1]"
        );
    }
}

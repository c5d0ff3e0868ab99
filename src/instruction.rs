use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

use crate::cpu::alu::{ArithOp, LogicOp, Rotation};
use crate::cpu::operand::ByteSource;
use crate::cpu::registers::{self, Reg8, Reg16};
use crate::cpu::{Cpu, CpuResult};
use crate::memory_bus::Bus;

/// How the driver should move PC once an opcode has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PcUpdate {
    /// Advance PC by the opcode's length.
    Advance,
    /// The opcode already wrote PC (jumps, calls); leave it alone.
    Modified,
}

/// Outcome of running one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub cycles: u16, // T-cycles, including operand access
    pub pc: PcUpdate,
}

impl Step {
    pub const fn advance(cycles: u16) -> Self {
        Step {
            cycles,
            pc: PcUpdate::Advance,
        }
    }
}

/// The instruction families the core implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instr {
    Nop,
    /// `LD dst,src` between registers and/or a pointed-to byte.
    Load { dst: ByteSource, src: ByteSource },
    /// `LD dst,d8`
    LoadImmediate { dst: ByteSource },
    /// `LD rr,d16`
    LoadImmediate16 { dst: Reg16 },
    Increment(ByteSource),
    Decrement(ByteSource),
    Increment16(Reg16),
    Decrement16(Reg16),
    /// `ADD/ADC/SUB/SBC A,src`
    Arithmetic { op: ArithOp, dst: Reg8, src: ByteSource },
    /// `AND/XOR/OR/CP src`
    Logic { op: LogicOp, dst: Reg8, src: ByteSource },
    /// `ADD HL,rr`
    AddHl { dst: Reg16, src: Reg16 },
    /// `RLCA/RRCA/RLA/RRA`
    RotateA(Rotation),
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Nop => write!(f, "NOP"),
            Instr::Load { dst, src } => write!(f, "LD {},{}", dst, src),
            Instr::LoadImmediate { dst } => write!(f, "LD {},d8", dst),
            Instr::LoadImmediate16 { dst } => write!(f, "LD {},d16", dst.name()),
            Instr::Increment(target) => write!(f, "INC {}", target),
            Instr::Decrement(target) => write!(f, "DEC {}", target),
            Instr::Increment16(target) => write!(f, "INC {}", target.name()),
            Instr::Decrement16(target) => write!(f, "DEC {}", target.name()),
            Instr::Arithmetic { op: ArithOp::Sub, src, .. } => write!(f, "SUB {}", src),
            Instr::Arithmetic { op, dst, src } => {
                write!(f, "{} {},{}", op.mnemonic(), dst.name(), src)
            }
            Instr::Logic { op, src, .. } => write!(f, "{} {}", op.mnemonic(), src),
            Instr::AddHl { dst, src } => write!(f, "ADD {},{}", dst.name(), src.name()),
            Instr::RotateA(rotation) => write!(f, "{}A", rotation.mnemonic()),
        }
    }
}

/// One decoded instruction: its byte code, encoded length and behaviour.
///
/// Opcodes are built once with the table and never change. They name the
/// registers they operate on but own none of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode {
    code: u8,
    length: u8,
    instr: Instr,
}

impl Opcode {
    pub const fn new(code: u8, length: u8, instr: Instr) -> Self {
        Opcode {
            code,
            length,
            instr,
        }
    }

    #[inline(always)]
    pub const fn code(&self) -> u8 {
        self.code
    }

    /// Encoded length in bytes, opcode byte included.
    #[inline(always)]
    pub const fn length(&self) -> u8 {
        self.length
    }

    #[inline(always)]
    pub const fn instr(&self) -> Instr {
        self.instr
    }

    pub fn name(&self) -> String {
        self.instr.to_string()
    }

    pub fn debug_string(&self) -> String {
        format!("{:02X} - {}", self.code, self.instr)
    }

    /// Executes the opcode against `cpu`.
    ///
    /// Immediate operands are read relative to the CPU's current PC, which
    /// must still point at this opcode's first byte. If a memory access
    /// fails, no register or flag has been changed yet.
    pub fn run<B: Bus>(&self, cpu: &mut Cpu<B>) -> CpuResult<Step> {
        let cycles = match self.instr {
            Instr::Nop => cpu.op_nop(),
            Instr::Load { dst, src } => cpu.op_ld(dst, src)?,
            Instr::LoadImmediate { dst } => cpu.op_ld_d8(dst)?,
            Instr::LoadImmediate16 { dst } => cpu.op_ld_d16(dst)?,
            Instr::Increment(target) => cpu.op_inc(target)?,
            Instr::Decrement(target) => cpu.op_dec(target)?,
            Instr::Increment16(target) => cpu.op_inc16(target),
            Instr::Decrement16(target) => cpu.op_dec16(target),
            Instr::Arithmetic { op, dst, src } => cpu.op_arithmetic(op, dst, src)?,
            Instr::Logic { op, dst, src } => cpu.op_logic(op, dst, src)?,
            Instr::AddHl { dst, src } => cpu.op_add_hl(dst, src),
            Instr::RotateA(rotation) => cpu.op_rotate_a(rotation),
        };
        Ok(Step::advance(cycles))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.instr.fmt(f)
    }
}

// Operand lists in encoding order. The position of an operand in its list is
// the index the hardware encodes into the opcode byte.
const OPERANDS_8: [ByteSource; 8] = [
    ByteSource::register(registers::B),
    ByteSource::register(registers::C),
    ByteSource::register(registers::D),
    ByteSource::register(registers::E),
    ByteSource::register(registers::H),
    ByteSource::register(registers::L),
    ByteSource::indirect(registers::HL),
    ByteSource::register(registers::A),
];
const OPERANDS_16: [Reg16; 4] = [registers::BC, registers::DE, registers::HL, registers::SP];
const ACCUMULATOR_POINTERS: [ByteSource; 4] = [
    ByteSource::indirect(registers::BC),
    ByteSource::indirect(registers::DE),
    ByteSource::post_increment(registers::HL),
    ByteSource::post_decrement(registers::HL),
];
const ARITH_OPS: [ArithOp; 4] = [ArithOp::Add, ArithOp::Adc, ArithOp::Sub, ArithOp::Sbc];
const LOGIC_OPS: [LogicOp; 4] = [LogicOp::And, LogicOp::Xor, LogicOp::Or, LogicOp::Cp];
const ROTATIONS: [Rotation; 4] = [Rotation::Rlc, Rotation::Rrc, Rotation::Rl, Rotation::Rr];

// Opcode bands
const LD_R_R_BAND: u8 = 0x40;
const ARITH_BAND: u8 = 0x80;
const LOGIC_BAND: u8 = 0xA0;

/// `base` plus operand `index` in the 3-bit field at bits 3-5.
const fn column(base: u8, index: usize) -> u8 {
    base + ((index as u8) << 3)
}

/// `base` plus operand `index` in the 2-bit field at bits 4-5.
const fn row(base: u8, index: usize) -> u8 {
    base + ((index as u8) << 4)
}

/// Byte code to opcode mapping. Undefined codes have no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeTable {
    slots: [Option<Opcode>; 256],
}

impl OpcodeTable {
    /// Generates every supported opcode from the operand lists above.
    pub fn build() -> Self {
        let mut table = OpcodeTable { slots: [None; 256] };

        table.insert(0x00, 1, Instr::Nop);
        table.add_8bit_loads();
        table.add_accumulator_loads();
        table.add_16bit_ops();
        table.add_8bit_inc_dec();
        table.add_alu();
        table.add_rotates();

        log::debug!("Built opcode table with {} entries", table.len());
        table
    }

    fn insert(&mut self, code: u8, length: u8, instr: Instr) {
        let slot = &mut self.slots[code as usize];
        debug_assert!(
            slot.is_none(),
            "opcode {:#04X} assigned twice ({} and {})",
            code,
            slot.map(|existing| existing.name()).unwrap_or_default(),
            instr
        );
        *slot = Some(Opcode::new(code, length, instr));
    }

    // LD r,r' (0x40-0x7F) and LD r,d8 (0x06, 0x0E, ... 0x3E)
    fn add_8bit_loads(&mut self) {
        for (dst_index, dst) in OPERANDS_8.iter().enumerate() {
            for (src_index, src) in OPERANDS_8.iter().enumerate() {
                // LD (HL),(HL) does not exist; its code (0x76) is HALT.
                if dst.is_indirect() && src.is_indirect() {
                    continue;
                }
                let code = column(LD_R_R_BAND, dst_index) + src_index as u8;
                self.insert(code, 1, Instr::Load { dst: *dst, src: *src });
            }
            self.insert(column(0x06, dst_index), 2, Instr::LoadImmediate { dst: *dst });
        }
    }

    // LD (BC),A / LD (DE),A / LD (HL+),A / LD (HL-),A and the reverse loads
    fn add_accumulator_loads(&mut self) {
        let accumulator = ByteSource::register(registers::A);
        for (index, pointer) in ACCUMULATOR_POINTERS.iter().enumerate() {
            let store = Instr::Load { dst: *pointer, src: accumulator };
            let load = Instr::Load { dst: accumulator, src: *pointer };
            self.insert(row(0x02, index), 1, store);
            self.insert(row(0x0A, index), 1, load);
        }
    }

    // LD rr,d16 / INC rr / DEC rr / ADD HL,rr
    fn add_16bit_ops(&mut self) {
        for (index, register) in OPERANDS_16.iter().enumerate() {
            self.insert(row(0x01, index), 3, Instr::LoadImmediate16 { dst: *register });
            self.insert(row(0x03, index), 1, Instr::Increment16(*register));
            self.insert(row(0x0B, index), 1, Instr::Decrement16(*register));
            let add = Instr::AddHl { dst: registers::HL, src: *register };
            self.insert(row(0x09, index), 1, add);
        }
    }

    // INC r (0x04, 0x0C, ... 0x3C) / DEC r (0x05, 0x0D, ... 0x3D)
    fn add_8bit_inc_dec(&mut self) {
        for (index, target) in OPERANDS_8.iter().enumerate() {
            self.insert(column(0x04, index), 1, Instr::Increment(*target));
            self.insert(column(0x05, index), 1, Instr::Decrement(*target));
        }
    }

    // ADD/ADC/SUB/SBC (0x80-0x9F) and AND/XOR/OR/CP (0xA0-0xBF)
    fn add_alu(&mut self) {
        let dst = registers::A;
        for (op_index, op) in ARITH_OPS.iter().enumerate() {
            for (src_index, src) in OPERANDS_8.iter().enumerate() {
                let code = column(ARITH_BAND, op_index) + src_index as u8;
                self.insert(code, 1, Instr::Arithmetic { op: *op, dst, src: *src });
            }
        }
        for (op_index, op) in LOGIC_OPS.iter().enumerate() {
            for (src_index, src) in OPERANDS_8.iter().enumerate() {
                let code = column(LOGIC_BAND, op_index) + src_index as u8;
                self.insert(code, 1, Instr::Logic { op: *op, dst, src: *src });
            }
        }
    }

    // RLCA 0x07 / RRCA 0x0F / RLA 0x17 / RRA 0x1F
    fn add_rotates(&mut self) {
        for (index, rotation) in ROTATIONS.iter().enumerate() {
            self.insert(column(0x07, index), 1, Instr::RotateA(*rotation));
        }
    }

    #[inline(always)]
    pub fn get(&self, code: u8) -> Option<&Opcode> {
        self.slots[code as usize].as_ref()
    }

    pub fn contains(&self, code: u8) -> bool {
        self.slots[code as usize].is_some()
    }

    /// Number of defined opcodes.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Defined opcodes in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = &Opcode> {
        self.slots.iter().flatten()
    }

    pub fn by_name(&self, mnemonic: &str) -> Option<&Opcode> {
        code_for(mnemonic).and_then(|code| self.get(code))
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        OpcodeTable::build()
    }
}

lazy_static! {
    // Mnemonic -> code, derived from a scratch table. Lookup only; every Cpu
    // builds its own table.
    static ref CODES_BY_NAME: HashMap<String, u8> = OpcodeTable::build()
        .iter()
        .map(|opcode| (opcode.name(), opcode.code()))
        .collect();
}

/// Looks up the byte code for a mnemonic such as `"LD A,(HL+)"`.
pub fn code_for(mnemonic: &str) -> Option<u8> {
    CODES_BY_NAME.get(mnemonic).copied()
}

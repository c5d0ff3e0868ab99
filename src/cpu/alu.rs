//! Pure arithmetic helpers.
//!
//! Nothing here touches CPU state. Each helper returns the result together
//! with the flags it produces; the calling opcode decides which of them to
//! commit to F.

use crate::word::Word;

/// Result of an ALU operation plus the flags it computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluOutput<T> {
    pub result: T,
    pub zero: bool,
    pub half_carry: bool,
    pub carry: bool,
}

/// `a + b + carry_in`, wrapping at 256.
pub fn add8(a: u8, b: u8, carry_in: bool) -> AluOutput<u8> {
    let carry_in = carry_in as u16;
    let sum = a as u16 + b as u16 + carry_in;
    let result = sum as u8;
    AluOutput {
        result,
        zero: result == 0,
        half_carry: (a as u16 & 0x0F) + (b as u16 & 0x0F) + carry_in > 0x0F,
        carry: sum > 0xFF,
    }
}

/// `a - b - carry_in`, wrapping at 256. `half_carry` and `carry` report
/// borrows out of bit 4 and bit 8.
pub fn sub8(a: u8, b: u8, carry_in: bool) -> AluOutput<u8> {
    let carry_in = carry_in as u16;
    let subtrahend = b as u16 + carry_in;
    let result = (a as u16).wrapping_sub(subtrahend) as u8;
    AluOutput {
        result,
        zero: result == 0,
        half_carry: (a as u16 & 0x0F) < (b as u16 & 0x0F) + carry_in,
        carry: subtrahend > a as u16,
    }
}

/// 16-bit add. Half carry is the carry out of bit 11, carry the carry out of
/// bit 15.
pub fn add16(a: Word, b: Word) -> AluOutput<Word> {
    let (a, b) = (a.value(), b.value());
    let (result, carry) = a.overflowing_add(b);
    AluOutput {
        result: Word::new(result),
        zero: result == 0,
        half_carry: (a & 0x0FFF) + (b & 0x0FFF) > 0x0FFF,
        carry,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Adc,
    Sub,
    Sbc,
}

impl ArithOp {
    pub const fn uses_carry(self) -> bool {
        matches!(self, ArithOp::Adc | ArithOp::Sbc)
    }

    pub const fn is_subtraction(self) -> bool {
        matches!(self, ArithOp::Sub | ArithOp::Sbc)
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            ArithOp::Add => "ADD",
            ArithOp::Adc => "ADC",
            ArithOp::Sub => "SUB",
            ArithOp::Sbc => "SBC",
        }
    }

    pub fn apply(self, a: u8, b: u8, carry_flag: bool) -> AluOutput<u8> {
        let carry_in = self.uses_carry() && carry_flag;
        if self.is_subtraction() {
            sub8(a, b, carry_in)
        } else {
            add8(a, b, carry_in)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicOp {
    And,
    Xor,
    Or,
    /// Compare: a subtraction whose result is thrown away.
    Cp,
}

impl LogicOp {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            LogicOp::And => "AND",
            LogicOp::Xor => "XOR",
            LogicOp::Or => "OR",
            LogicOp::Cp => "CP",
        }
    }
}

/// Applies a logical op. For `Cp` the returned `result` is `a` unchanged and
/// the flags come from `a - b`.
pub fn logic8(op: LogicOp, a: u8, b: u8) -> AluOutput<u8> {
    let bitwise = |result: u8, half_carry: bool| AluOutput {
        result,
        zero: result == 0,
        half_carry,
        carry: false,
    };
    match op {
        LogicOp::And => bitwise(a & b, true),
        LogicOp::Xor => bitwise(a ^ b, false),
        LogicOp::Or => bitwise(a | b, false),
        LogicOp::Cp => AluOutput {
            result: a,
            ..sub8(a, b, false)
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Rotate left, bit 7 to carry and bit 0.
    Rlc,
    /// Rotate right, bit 0 to carry and bit 7.
    Rrc,
    /// Rotate left through carry.
    Rl,
    /// Rotate right through carry.
    Rr,
}

impl Rotation {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Rotation::Rlc => "RLC",
            Rotation::Rrc => "RRC",
            Rotation::Rl => "RL",
            Rotation::Rr => "RR",
        }
    }
}

/// Rotates `value`. The carry flag receives the bit shifted out; `zero`
/// reflects the result and `half_carry` is always clear.
pub fn rotate(rotation: Rotation, value: u8, carry_in: bool) -> AluOutput<u8> {
    let (result, carry) = match rotation {
        Rotation::Rlc => (value.rotate_left(1), value & 0x80 != 0),
        Rotation::Rrc => (value.rotate_right(1), value & 0x01 != 0),
        Rotation::Rl => ((value << 1) | carry_in as u8, value & 0x80 != 0),
        Rotation::Rr => ((value >> 1) | ((carry_in as u8) << 7), value & 0x01 != 0),
    };
    AluOutput {
        result,
        zero: result == 0,
        half_carry: false,
        carry,
    }
}

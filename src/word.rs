use std::fmt;
use std::ops::{Add, Sub};

/// A 16-bit address or register value.
///
/// Byte decomposition is little-endian: the least significant byte comes
/// first, matching how the CPU lays 16-bit immediates out in memory.
/// Arithmetic wraps modulo 2^16.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(u16);

impl Word {
    pub const fn new(value: u16) -> Self {
        Word(value)
    }

    pub const fn from_bytes(lsb: u8, msb: u8) -> Self {
        Word(u16::from_le_bytes([lsb, msb]))
    }

    /// Returns `(lsb, msb)`.
    pub const fn to_bytes(self) -> (u8, u8) {
        let [lsb, msb] = self.0.to_le_bytes();
        (lsb, msb)
    }

    #[inline(always)]
    pub const fn value(self) -> u16 {
        self.0
    }

    #[inline(always)]
    pub const fn wrapping_add(self, rhs: u16) -> Self {
        Word(self.0.wrapping_add(rhs))
    }

    #[inline(always)]
    pub const fn wrapping_sub(self, rhs: u16) -> Self {
        Word(self.0.wrapping_sub(rhs))
    }
}

impl From<u16> for Word {
    fn from(value: u16) -> Self {
        Word(value)
    }
}

impl From<Word> for u16 {
    fn from(word: Word) -> Self {
        word.0
    }
}

impl From<Word> for usize {
    fn from(word: Word) -> Self {
        word.0 as usize
    }
}

impl Add<u16> for Word {
    type Output = Word;

    fn add(self, rhs: u16) -> Word {
        self.wrapping_add(rhs)
    }
}

impl Sub<u16> for Word {
    type Output = Word;

    fn sub(self, rhs: u16) -> Word {
        self.wrapping_sub(rhs)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_round_trip_for_every_value() {
        for value in 0..=u16::MAX {
            let word = Word::new(value);
            let (lsb, msb) = word.to_bytes();
            assert_eq!(Word::from_bytes(lsb, msb), word);
        }
    }

    #[test]
    fn bytes_are_little_endian() {
        assert_eq!(Word::new(0xBEEF).to_bytes(), (0xEF, 0xBE));
        assert_eq!(Word::from_bytes(0xEF, 0xBE).value(), 0xBEEF);
    }

    #[test]
    fn arithmetic_wraps() {
        assert_eq!(Word::new(0xFFFF) + 1, Word::new(0x0000));
        assert_eq!(Word::new(0x0000) - 1, Word::new(0xFFFF));
        assert_eq!(Word::new(0x0018) + 1, Word::new(0x0019));
    }

    #[test]
    fn displays_padded_hex() {
        assert_eq!(Word::new(0x33).to_string(), "0x0033");
        assert_eq!(Word::new(0xBEEF).to_string(), "0xBEEF");
    }
}

use std::error::Error;
use std::fmt;

use crate::word::Word;

/// Recoverable failures surfaced by the core to its driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// The byte at `pc` has no entry in the opcode table.
    UnknownOpcode { code: u8, pc: Word },
    /// A read or write fell outside the configured memory size.
    AddressOutOfRange { address: Word, size: usize },
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::UnknownOpcode { code, pc } => {
                write!(f, "unknown opcode {:#04X} at PC={}", code, pc)
            }
            CpuError::AddressOutOfRange { address, size } => {
                write!(
                    f,
                    "address {} is outside memory of {:#06X} bytes",
                    address, size
                )
            }
        }
    }
}

impl Error for CpuError {}

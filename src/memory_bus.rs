use std::fmt;

use crate::cpu::CpuResult;
use crate::error::CpuError;
use crate::word::Word;

/// Size of the full 16-bit address space.
pub const ADDRESS_SPACE_SIZE: usize = 0x1_0000;

/// The two-method memory capability the CPU core depends on.
///
/// A host with a real memory map (banking, video RAM, I/O registers) plugs
/// in here; the core only ever reads and writes single bytes.
pub trait Bus {
    fn read_byte(&self, address: Word) -> CpuResult<u8>;
    fn write_byte(&mut self, address: Word, value: u8) -> CpuResult<()>;

    /// Reads a little-endian word: `address` holds the low byte.
    fn read_word(&self, address: Word) -> CpuResult<Word> {
        let lsb = self.read_byte(address)?;
        let msb = self.read_byte(address.wrapping_add(1))?;
        Ok(Word::from_bytes(lsb, msb))
    }
}

/// Flat byte store with a configurable capacity and no bank switching.
///
/// ## Simplifications:
/// - Every address below `size()` is plain RAM; writes have no side effects.
/// - Accesses at or beyond `size()` fail with `CpuError::AddressOutOfRange`
///   instead of wrapping or reading open bus.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryBus {
    data: Vec<u8>,
}

impl MemoryBus {
    /// Creates a zero-filled memory of `size` bytes.
    ///
    /// Sizes above the 16-bit address space are clamped to it, since no
    /// `Word` could address the excess.
    pub fn new(size: usize) -> Self {
        MemoryBus {
            data: vec![0; size.min(ADDRESS_SPACE_SIZE)],
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Copies `bytes` into memory starting at `start`.
    ///
    /// Fails without writing anything if the block does not fit.
    pub fn load(&mut self, start: Word, bytes: &[u8]) -> CpuResult<()> {
        let offset = usize::from(start);
        let end = offset + bytes.len();
        if end > self.data.len() {
            let last = Word::new((end - 1).min(u16::MAX as usize) as u16);
            return Err(self.out_of_range(last));
        }
        self.data[offset..end].copy_from_slice(bytes);
        log::debug!("Loaded {} bytes at {}", bytes.len(), start);
        Ok(())
    }

    /// Read-only view of the whole store.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    fn out_of_range(&self, address: Word) -> CpuError {
        log::warn!(
            "Rejected access to {} (memory size {:#06X})",
            address,
            self.data.len()
        );
        CpuError::AddressOutOfRange {
            address,
            size: self.data.len(),
        }
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        MemoryBus::new(ADDRESS_SPACE_SIZE)
    }
}

impl Bus for MemoryBus {
    fn read_byte(&self, address: Word) -> CpuResult<u8> {
        self.data
            .get(usize::from(address))
            .copied()
            .ok_or_else(|| self.out_of_range(address))
    }

    fn write_byte(&mut self, address: Word, value: u8) -> CpuResult<()> {
        let index = usize::from(address);
        if index >= self.data.len() {
            return Err(self.out_of_range(address));
        }
        self.data[index] = value;
        Ok(())
    }
}

// Dumping 64 KiB is useless in debug output; report the size instead.
impl fmt::Debug for MemoryBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBus")
            .field("size", &self.data.len())
            .finish()
    }
}

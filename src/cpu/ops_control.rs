use super::{Cpu, constants::*};
use crate::memory_bus::Bus;

// --- Control Implementations ---
impl<B: Bus> Cpu<B> {
    // NOP
    pub(crate) fn op_nop(&self) -> u16 {
        NOP_CYCLES
    }
}

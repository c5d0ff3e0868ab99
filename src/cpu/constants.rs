// Flag Positions (Bit index in F register)
pub const FLAG_Z_POS: u8 = 7; // Zero Flag
pub const FLAG_N_POS: u8 = 6; // Subtract Flag
pub const FLAG_H_POS: u8 = 5; // Half Carry Flag
pub const FLAG_C_POS: u8 = 4; // Carry Flag

// Flag Masks (Bit masks for F register)
pub const FLAG_Z: u8 = 1 << FLAG_Z_POS;
pub const FLAG_N: u8 = 1 << FLAG_N_POS;
pub const FLAG_H: u8 = 1 << FLAG_H_POS;
pub const FLAG_C: u8 = 1 << FLAG_C_POS;

// Bits 0-3 of F are unused and always read as zero
pub const FLAG_MASK: u8 = FLAG_Z | FLAG_N | FLAG_H | FLAG_C;

// Base T-cycles per instruction family (register-direct operands)
pub const NOP_CYCLES: u16 = 4;
pub const LD_R_R_CYCLES: u16 = 4;
pub const LD_R_D8_CYCLES: u16 = 8;
pub const LD_RR_D16_CYCLES: u16 = 12;
pub const INC_DEC_R_CYCLES: u16 = 4;
pub const INC_DEC_RR_CYCLES: u16 = 8;
pub const ALU_CYCLES: u16 = 4;
pub const ADD_HL_CYCLES: u16 = 8;
pub const ROTATE_A_CYCLES: u16 = 4;

// Extra T-cycles for a memory-indirect operand
pub const INDIRECT_ACCESS_CYCLES: u16 = 4; // One bus cycle for a read or a write
pub const INDIRECT_RMW_CYCLES: u16 = 8; // Read + write for INC/DEC (HL)

// Post-boot register values (DMG)
pub const POST_BOOT_AF: u16 = 0x01B0;
pub const POST_BOOT_BC: u16 = 0x0013;
pub const POST_BOOT_DE: u16 = 0x00D8;
pub const POST_BOOT_HL: u16 = 0x014D;
pub const POST_BOOT_SP: u16 = 0xFFFE;
pub const POST_BOOT_PC: u16 = 0x0100;

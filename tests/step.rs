use mochi::cpu::registers::{A, B, BC, C, HL};
use mochi::{Bus, Cpu, CpuError, MemoryBus, Word};

fn cpu_with_program(program: &[u8]) -> Cpu {
    let mut memory = MemoryBus::default();
    memory.load(Word::new(0x0000), program).unwrap();
    Cpu::new(memory, false)
}

#[test]
fn step_advances_pc_by_length() {
    // LD BC,$1234 / LD A,$07 / INC A / NOP
    let mut cpu = cpu_with_program(&[0x01, 0x34, 0x12, 0x3E, 0x07, 0x3C, 0x00]);
    assert_eq!(cpu.step(), Ok(12));
    assert_eq!(cpu.pc(), Word::new(0x0003));
    assert_eq!(cpu.registers().get16(BC), Word::new(0x1234));

    assert_eq!(cpu.step(), Ok(8));
    assert_eq!(cpu.pc(), Word::new(0x0005));

    assert_eq!(cpu.step(), Ok(4));
    assert_eq!(cpu.registers().get8(A), 0x08);
    assert_eq!(cpu.instruction_pc(), Word::new(0x0005));

    assert_eq!(cpu.step(), Ok(4));
    assert_eq!(cpu.pc(), Word::new(0x0007));
    assert_eq!(cpu.total_cycles(), 28);
}

#[test]
fn unknown_opcode_stops_without_moving_pc() {
    // LD B,C then JP a16, which is not implemented
    let mut cpu = cpu_with_program(&[0x41, 0xC3, 0x00, 0x00]);
    cpu.registers_mut().set8(C, 0x99);
    assert_eq!(cpu.step(), Ok(4));
    assert_eq!(cpu.registers().get8(B), 0x99);

    let result = cpu.step();
    assert_eq!(result, Err(CpuError::UnknownOpcode { code: 0xC3, pc: Word::new(0x0001) }));
    assert_eq!(cpu.pc(), Word::new(0x0001));
    assert_eq!(cpu.total_cycles(), 4);
    assert_eq!(
        result.unwrap_err().to_string(),
        "unknown opcode 0xC3 at PC=0x0001"
    );
}

#[test]
fn fetch_past_the_end_of_memory_fails() {
    let mut cpu = Cpu::new(MemoryBus::new(0x10), false);
    cpu.set_pc(Word::new(0x0010));
    assert_eq!(
        cpu.step(),
        Err(CpuError::AddressOutOfRange { address: Word::new(0x0010), size: 0x10 })
    );
}

#[test]
fn failed_operand_access_keeps_pc() {
    // LD A,(HL) with HL past the end of a small memory
    let mut memory = MemoryBus::new(0x20);
    memory.load(Word::new(0x0000), &[0x7E]).unwrap();
    let mut cpu = Cpu::new(memory, false);
    cpu.registers_mut().set16(HL, Word::new(0x0100));
    assert!(cpu.step().is_err());
    assert_eq!(cpu.pc(), Word::new(0x0000));
    assert_eq!(cpu.total_cycles(), 0);
}

#[test]
fn execute_does_not_move_pc() {
    let mut cpu: Cpu = Cpu::default();
    cpu.registers_mut().set8(B, 0x01);
    let step = cpu.execute(0x04).unwrap();
    assert_eq!(step.cycles, 4);
    assert_eq!(cpu.registers().get8(B), 0x02);
    assert_eq!(cpu.pc(), Word::new(0x0000));
    assert_eq!(cpu.total_cycles(), 0);
    assert_eq!(
        cpu.execute(0xCB),
        Err(CpuError::UnknownOpcode { code: 0xCB, pc: Word::new(0x0000) })
    );
}

#[test]
fn pc_wraps_after_the_last_byte() {
    let mut cpu: Cpu = Cpu::default();
    cpu.memory_mut().write_byte(Word::new(0xFFFF), 0x00).unwrap();
    cpu.set_pc(Word::new(0xFFFF));
    assert_eq!(cpu.step(), Ok(4));
    assert_eq!(cpu.pc(), Word::new(0x0000));
}

#[test]
fn post_boot_registers() {
    let cpu = Cpu::new(MemoryBus::default(), true);
    let registers = cpu.registers();
    assert_eq!(cpu.pc(), Word::new(0x0100));
    assert_eq!(cpu.sp(), Word::new(0xFFFE));
    assert_eq!(registers.get16(BC), Word::new(0x0013));
    assert_eq!(registers.get16(HL), Word::new(0x014D));
    assert_eq!(
        registers.to_string(),
        "AF:01B0 BC:0013 DE:00D8 HL:014D SP:FFFE PC:0100 Flags[Z:1 N:0 H:1 C:1]"
    );

    let cold: Cpu = Cpu::default();
    assert_eq!(
        cold.registers().to_string(),
        "AF:0000 BC:0000 DE:0000 HL:0000 SP:0000 PC:0000 Flags[Z:0 N:0 H:0 C:0]"
    );
}

#[test]
fn disassembly() {
    // LD BC,$BEEF / LD (HL),$42 / ADD A,(HL) / undefined
    let cpu = cpu_with_program(&[0x01, 0xEF, 0xBE, 0x36, 0x42, 0x86, 0xD3]);
    let mut address = Word::new(0x0000);
    let mut lines = Vec::new();
    for _ in 0..4 {
        let (text, length) = cpu.disassemble(address).unwrap();
        lines.push(text);
        address = address.wrapping_add(length as u16);
    }
    assert_eq!(lines, ["LD BC,$BEEF", "LD (HL),$42", "ADD A,(HL)", "DB $D3"]);
    assert_eq!(address, Word::new(0x0007));
}

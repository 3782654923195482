//! Property-based tests for the addressing-mode resolver: wrapping rules
//! and page-cross cycle penalties across the whole input space.

use mos6502::{Cpu, FlatMemory, MemoryBus};
use proptest::prelude::*;

fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::new(memory)
}

proptest! {
    /// Zero page indexing always wraps within 0x00-0xFF.
    #[test]
    fn prop_zero_page_x_wraps(base: u8, x: u8, marker: u8) {
        let mut cpu = setup_cpu();
        cpu.write_memory(0x8000, 0xB5); // LDA base,X
        cpu.write_memory(0x8001, base);
        cpu.set_x(x);

        let effective = u16::from(base.wrapping_add(x));
        cpu.write_memory(effective, marker);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), marker);
        prop_assert_eq!(cpu.cycles(), 4);
    }

    /// Absolute,X costs four cycles, five when the index carries into the
    /// high address byte.
    #[test]
    fn prop_absolute_x_page_cross_penalty(base: u16, x: u8) {
        let mut cpu = setup_cpu();
        cpu.write_memory(0x8000, 0xBD); // LDA base,X
        cpu.write_memory(0x8001, base as u8);
        cpu.write_memory(0x8002, (base >> 8) as u8);
        cpu.set_x(x);

        let effective = base.wrapping_add(u16::from(x));
        let crossed = (base ^ effective) & 0xFF00 != 0;

        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), cpu.read_memory(effective));
        prop_assert_eq!(cpu.cycles(), if crossed { 5 } else { 4 });
    }

    /// Indirect,Y resolves through the zero-page pointer (with wrap) and
    /// pays the penalty exactly on a carry.
    #[test]
    fn prop_indirect_y_resolution(ptr: u8, lo: u8, hi: u8, y: u8) {
        let mut cpu = setup_cpu();
        cpu.write_memory(0x8000, 0xB1); // LDA (ptr),Y
        cpu.write_memory(0x8001, ptr);
        cpu.write_memory(u16::from(ptr), lo);
        cpu.write_memory(u16::from(ptr.wrapping_add(1)), hi);
        cpu.set_y(y);

        let base = u16::from_le_bytes([
            cpu.read_memory(u16::from(ptr)),
            cpu.read_memory(u16::from(ptr.wrapping_add(1))),
        ]);
        let effective = base.wrapping_add(u16::from(y));
        let crossed = (base ^ effective) & 0xFF00 != 0;

        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), cpu.read_memory(effective));
        prop_assert_eq!(cpu.cycles(), if crossed { 6 } else { 5 });
    }

    /// Relative displacement arithmetic wraps modulo 2^16.
    #[test]
    fn prop_branch_target_wraps(pc_page in 0u16..=0xFE, displacement: u8) {
        let start = pc_page << 8;
        let mut cpu = setup_cpu();
        cpu.set_pc(start);
        cpu.write_memory(start, 0xD0); // BNE, Z clear after reset
        cpu.write_memory(start.wrapping_add(1), displacement);

        cpu.step().unwrap();

        let expected = start
            .wrapping_add(2)
            .wrapping_add_signed(i16::from(displacement as i8));
        prop_assert_eq!(cpu.pc(), expected);
    }
}

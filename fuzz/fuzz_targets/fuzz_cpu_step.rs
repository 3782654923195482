//! Fuzz target for CPU stepping.
//!
//! Builds an arbitrary register/flag state over arbitrary instruction,
//! zero-page and stack-page contents, then executes a handful of steps.
//! Undocumented opcodes are expected to error; nothing may panic, and the
//! cycle counter must stay strictly monotonic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mos6502::{Cpu, FlatMemory, MemoryBus};

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    flag_c: bool,
    flag_z: bool,
    flag_i: bool,
    flag_d: bool,
    flag_v: bool,
    flag_n: bool,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Instruction stream at the entry point.
    instructions: [u8; 16],
    /// Zero page contents (pointers for the indirect modes).
    zero_page: [u8; 256],
    /// Stack page contents (frames for RTS/RTI/pulls).
    stack_page: [u8; 256],
    irq: bool,
    nmi: bool,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0xFFFE, 0x00);
    memory.write(0xFFFF, 0x90);
    memory.write(0xFFFA, 0x00);
    memory.write(0xFFFB, 0xA0);

    for (i, &byte) in input.instructions.iter().enumerate() {
        memory.write(0x8000 + i as u16, byte);
    }
    for (i, &byte) in input.zero_page.iter().enumerate() {
        memory.write(i as u16, byte);
    }
    for (i, &byte) in input.stack_page.iter().enumerate() {
        memory.write(0x0100 + i as u16, byte);
    }

    let mut cpu = Cpu::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_flag_c(input.cpu_state.flag_c);
    cpu.set_flag_z(input.cpu_state.flag_z);
    cpu.set_flag_i(input.cpu_state.flag_i);
    cpu.set_flag_d(input.cpu_state.flag_d);
    cpu.set_flag_v(input.cpu_state.flag_v);
    cpu.set_flag_n(input.cpu_state.flag_n);

    if input.irq {
        cpu.raise_irq();
    }
    if input.nmi {
        cpu.raise_nmi();
    }

    for _ in 0..4 {
        let before = cpu.cycles();
        // Undocumented opcodes error out; that is fine. Panics are not.
        if cpu.step().is_err() {
            break;
        }
        assert!(cpu.cycles() > before);
    }
});

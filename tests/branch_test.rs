//! Tests for the eight conditional branches: taken/not-taken PC movement
//! and the one/two cycle penalties.

use mos6502::{Cpu, FlatMemory, MemoryBus};

fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::new(memory)
}

/// Runs one branch opcode with the given displacement and returns the CPU.
fn run_branch(opcode: u8, displacement: u8, prepare: impl Fn(&mut Cpu<FlatMemory>)) -> Cpu<FlatMemory> {
    let mut cpu = setup_cpu();
    cpu.write_memory(0x8000, opcode);
    cpu.write_memory(0x8001, displacement);
    prepare(&mut cpu);
    cpu.step().unwrap();
    cpu
}

#[test]
fn test_branch_not_taken_advances_two_bytes() {
    // BCC with carry set: not taken, 2 cycles.
    let cpu = run_branch(0x90, 0x10, |cpu| cpu.set_flag_c(true));
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_branch_taken_forward() {
    // BCC with carry clear: taken, 3 cycles, PC = 0x8002 + 0x10.
    let cpu = run_branch(0x90, 0x10, |cpu| cpu.set_flag_c(false));
    assert_eq!(cpu.pc(), 0x8012);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_branch_taken_backward() {
    // BNE backward: displacement 0xFC = -4, PC = 0x8002 - 4.
    let cpu = run_branch(0xD0, 0xFC, |cpu| cpu.set_flag_z(false));
    assert_eq!(cpu.pc(), 0x7FFE);
    assert_eq!(cpu.cycles(), 4); // crossed from page 0x80 to 0x7F
}

#[test]
fn test_branch_taken_page_cross_forward() {
    let mut cpu = setup_cpu();
    // Place the branch so the target crosses into the next page:
    // BEQ at 0x80F0, operand 0x7F -> target 0x80F2 + 0x7F = 0x8171.
    cpu.set_pc(0x80F0);
    cpu.write_memory(0x80F0, 0xF0);
    cpu.write_memory(0x80F1, 0x7F);
    cpu.set_flag_z(true);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8171);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_branch_taken_same_page_is_three_cycles() {
    let cpu = run_branch(0xF0, 0x02, |cpu| cpu.set_flag_z(true));
    assert_eq!(cpu.pc(), 0x8004);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_all_branch_predicates() {
    // (opcode, flag setter, taken)
    let cases: Vec<(u8, fn(&mut Cpu<FlatMemory>), bool)> = vec![
        (0x90, |c| c.set_flag_c(false), true),  // BCC
        (0x90, |c| c.set_flag_c(true), false),
        (0xB0, |c| c.set_flag_c(true), true),   // BCS
        (0xB0, |c| c.set_flag_c(false), false),
        (0xF0, |c| c.set_flag_z(true), true),   // BEQ
        (0xF0, |c| c.set_flag_z(false), false),
        (0xD0, |c| c.set_flag_z(false), true),  // BNE
        (0xD0, |c| c.set_flag_z(true), false),
        (0x30, |c| c.set_flag_n(true), true),   // BMI
        (0x30, |c| c.set_flag_n(false), false),
        (0x10, |c| c.set_flag_n(false), true),  // BPL
        (0x10, |c| c.set_flag_n(true), false),
        (0x70, |c| c.set_flag_v(true), true),   // BVS
        (0x70, |c| c.set_flag_v(false), false),
        (0x50, |c| c.set_flag_v(false), true),  // BVC
        (0x50, |c| c.set_flag_v(true), false),
    ];

    for (opcode, prepare, taken) in cases {
        let cpu = run_branch(opcode, 0x08, prepare);
        let expected = if taken { 0x800A } else { 0x8002 };
        assert_eq!(
            cpu.pc(),
            expected,
            "opcode 0x{opcode:02X} taken={taken} went to 0x{:04X}",
            cpu.pc()
        );
    }
}

#[test]
fn test_branch_does_not_change_flags() {
    let cpu = run_branch(0x90, 0x10, |cpu| {
        cpu.set_flag_c(false);
        cpu.set_flag_n(true);
        cpu.set_flag_v(true);
    });
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
}

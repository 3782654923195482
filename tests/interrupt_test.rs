//! Tests for IRQ and NMI sequencing: masking, priority, the level/edge
//! distinction, the pushed frame, and re-entry after RTI.

use mos6502::{Cpu, FlatMemory, MemoryBus};

/// CPU with a NOP-filled program at 0x8000, IRQ handler vector at 0x9000
/// and NMI handler vector at 0xA000.
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0xFFFE, 0x00);
    memory.write(0xFFFF, 0x90);
    memory.write(0xFFFA, 0x00);
    memory.write(0xFFFB, 0xA0);
    for addr in 0x8000..0x8010 {
        memory.write(addr, 0xEA);
    }
    Cpu::new(memory)
}

#[test]
fn test_irq_masked_while_i_set() {
    let mut cpu = setup_cpu();
    assert!(cpu.flag_i()); // post-reset
    cpu.raise_irq();

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8002); // plain NOPs, no service
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_irq_serviced_after_current_instruction() {
    let mut cpu = setup_cpu();
    cpu.set_flag_i(false);
    cpu.raise_irq();

    cpu.step().unwrap();

    // The NOP ran to completion, then the service sequence took over.
    assert_eq!(cpu.pc(), 0x9000);
    assert!(cpu.flag_i());
    assert_eq!(cpu.cycles(), 8); // 2 for NOP + 6 for the service sequence
}

#[test]
fn test_irq_pushes_interrupted_pc_and_b_clear_status() {
    let mut cpu = setup_cpu();
    cpu.set_flag_i(false);
    cpu.set_flag_c(true);
    cpu.raise_irq();
    let sp = cpu.sp();

    cpu.step().unwrap();

    let pch = cpu.read_memory(0x0100 | u16::from(sp));
    let pcl = cpu.read_memory(0x0100 | u16::from(sp.wrapping_sub(1)));
    let status = cpu.read_memory(0x0100 | u16::from(sp.wrapping_sub(2)));

    // The pushed PC is the instruction the interrupt displaced.
    assert_eq!(u16::from_le_bytes([pcl, pch]), 0x8001);
    assert_eq!(status & 0b0001_0000, 0); // B clear for hardware interrupts
    assert_eq!(status & 0b0010_0000, 0b0010_0000); // bit 5 always set
    assert_eq!(status & 0b0000_0001, 0b0000_0001); // C carried through
    assert_eq!(cpu.sp(), sp.wrapping_sub(3));
}

#[test]
fn test_irq_is_level_sensitive() {
    // Handler is a bare RTI; with the line still asserted the CPU
    // re-enters the handler straight after returning.
    let mut cpu = setup_cpu();
    cpu.write_memory(0x9000, 0x40); // RTI
    cpu.set_flag_i(false);
    cpu.raise_irq();

    cpu.step().unwrap(); // NOP + service
    assert_eq!(cpu.pc(), 0x9000);

    cpu.step().unwrap(); // RTI restores I=0, line still high -> re-service
    assert_eq!(cpu.pc(), 0x9000);

    cpu.clear_irq();
    cpu.step().unwrap(); // RTI again, line now low
    cpu.step().unwrap(); // back to normal execution
    assert_ne!(cpu.pc(), 0x9000);
}

#[test]
fn test_nmi_ignores_i_flag() {
    let mut cpu = setup_cpu();
    assert!(cpu.flag_i());
    cpu.raise_nmi();

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0xA000);
    assert_eq!(cpu.cycles(), 8);
}

#[test]
fn test_nmi_is_one_shot() {
    let mut cpu = setup_cpu();
    cpu.write_memory(0xA000, 0xEA);
    cpu.raise_nmi();

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0xA000);

    // Serviced and cleared: the handler just runs.
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0xA001);
}

#[test]
fn test_nmi_wins_over_irq() {
    let mut cpu = setup_cpu();
    cpu.set_flag_i(false);
    cpu.raise_irq();
    cpu.raise_nmi();

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0xA000);
}

#[test]
fn test_irq_after_cli_waits_one_instruction() {
    // CLI's flag write lands after its final cycle's interrupt poll, so
    // the instruction after CLI still runs before the service sequence.
    let mut cpu = setup_cpu();
    cpu.write_memory(0x8000, 0x58); // CLI
    cpu.raise_irq();

    cpu.step().unwrap(); // CLI itself: no service yet
    assert_eq!(cpu.pc(), 0x8001);
    assert!(!cpu.flag_i());

    cpu.step().unwrap(); // one NOP runs, then the IRQ is taken
    assert_eq!(cpu.pc(), 0x9000);
}

#[test]
fn test_irq_raised_before_sei_still_fires() {
    // An IRQ pending before SEI's last cycle is honored despite the mask
    // being set by the time the instruction ends.
    let mut cpu = setup_cpu();
    cpu.write_memory(0x8000, 0x78); // SEI
    cpu.set_flag_i(false);
    cpu.raise_irq();

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x9000);
}

#[test]
fn test_irq_vector_round_trip_with_rti() {
    let mut cpu = setup_cpu();
    cpu.write_memory(0x9000, 0x40); // RTI
    cpu.set_flag_i(false);
    cpu.raise_irq();

    cpu.step().unwrap(); // NOP at 0x8000 + service
    cpu.clear_irq();
    cpu.step().unwrap(); // RTI

    // Execution resumes at the interrupted instruction with flags back.
    assert_eq!(cpu.pc(), 0x8001);
    assert!(!cpu.flag_i());
}

#[test]
fn test_nmi_during_masked_irq() {
    // Both lines pending, I set: only the NMI is taken, the IRQ stays
    // pending until the mask drops.
    let mut cpu = setup_cpu();
    cpu.write_memory(0xA000, 0x40); // RTI
    cpu.raise_irq();
    cpu.raise_nmi();

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0xA000);

    cpu.step().unwrap(); // RTI; pulled status has I set, IRQ still masked
    assert_eq!(cpu.pc(), 0x8001);

    cpu.set_flag_i(false);
    cpu.step().unwrap(); // next instruction, then the IRQ fires
    assert_eq!(cpu.pc(), 0x9000);
}

//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL, ROR in both accumulator and memory forms. The memory
//! forms are read-modify-write with the characteristic dummy write of the
//! unmodified value. LSR always clears N; the rotates go through the
//! carry.

use crate::cpu::Access;
use crate::{AddressingMode, Cpu, CpuError, MemoryBus};

fn shift_left<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) -> u8 {
    cpu.flag_c = value & 0x80 != 0;
    let result = value << 1;
    cpu.set_nz(result);
    result
}

fn shift_right<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) -> u8 {
    cpu.flag_c = value & 0x01 != 0;
    let result = value >> 1;
    cpu.set_nz(result);
    result
}

fn rotate_left<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) -> u8 {
    let carry_in = u8::from(cpu.flag_c);
    cpu.flag_c = value & 0x80 != 0;
    let result = (value << 1) | carry_in;
    cpu.set_nz(result);
    result
}

fn rotate_right<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) -> u8 {
    let carry_in = if cpu.flag_c { 0x80 } else { 0 };
    cpu.flag_c = value & 0x01 != 0;
    let result = (value >> 1) | carry_in;
    cpu.set_nz(result);
    result
}

/// Applies `op` to the accumulator (one dead read) or to memory as a
/// read-modify-write sequence.
fn shift<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    mode: AddressingMode,
    op: fn(&mut Cpu<M>, u8) -> u8,
) -> Result<(), CpuError> {
    if mode == AddressingMode::Accumulator {
        let _ = cpu.read_bus(cpu.pc);
        let a = cpu.a;
        cpu.a = op(cpu, a);
        return Ok(());
    }

    let addr = cpu.operand_address(mode, Access::Modify)?;
    let value = cpu.read_bus(addr);
    cpu.write_bus(addr, value); // RMW writes the old value first
    let result = op(cpu, value);
    cpu.write_bus(addr, result);
    Ok(())
}

pub(crate) fn asl<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    shift(cpu, mode, shift_left)
}

pub(crate) fn lsr<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    shift(cpu, mode, shift_right)
}

pub(crate) fn rol<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    shift(cpu, mode, rotate_left)
}

pub(crate) fn ror<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    shift(cpu, mode, rotate_right)
}

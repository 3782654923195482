//! # Increment and Decrement Instructions
//!
//! The memory forms are read-modify-write: read, write the unmodified
//! value back, then write the result. The register forms spend their
//! second cycle on the usual dead read.

use crate::cpu::Access;
use crate::{AddressingMode, Cpu, CpuError, MemoryBus};

pub(crate) fn inc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let addr = cpu.operand_address(mode, Access::Modify)?;
    let value = cpu.read_bus(addr);
    cpu.write_bus(addr, value); // RMW writes the old value first
    let result = value.wrapping_add(1);
    cpu.write_bus(addr, result);
    cpu.set_nz(result);
    Ok(())
}

pub(crate) fn dec<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let addr = cpu.operand_address(mode, Access::Modify)?;
    let value = cpu.read_bus(addr);
    cpu.write_bus(addr, value);
    let result = value.wrapping_sub(1);
    cpu.write_bus(addr, result);
    cpu.set_nz(result);
    Ok(())
}

pub(crate) fn inx<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let _ = cpu.read_bus(cpu.pc);
    cpu.x = cpu.x.wrapping_add(1);
    let x = cpu.x;
    cpu.set_nz(x);
}

pub(crate) fn iny<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let _ = cpu.read_bus(cpu.pc);
    cpu.y = cpu.y.wrapping_add(1);
    let y = cpu.y;
    cpu.set_nz(y);
}

pub(crate) fn dex<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let _ = cpu.read_bus(cpu.pc);
    cpu.x = cpu.x.wrapping_sub(1);
    let x = cpu.x;
    cpu.set_nz(x);
}

pub(crate) fn dey<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let _ = cpu.read_bus(cpu.pc);
    cpu.y = cpu.y.wrapping_sub(1);
    let y = cpu.y;
    cpu.set_nz(y);
}

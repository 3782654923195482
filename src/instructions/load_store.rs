//! # Load and Store Instructions
//!
//! LDA/LDX/LDY update N and Z from the loaded value; the stores update
//! nothing. Indexed store forms always pay the indexing dummy read, which
//! is why STA abs,X is five cycles whether or not the page crosses.

use crate::cpu::Access;
use crate::{AddressingMode, Cpu, CpuError, MemoryBus};

pub(crate) fn lda<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let addr = cpu.operand_address(mode, Access::Read)?;
    let value = cpu.read_bus(addr);
    cpu.a = value;
    cpu.set_nz(value);
    Ok(())
}

pub(crate) fn ldx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let addr = cpu.operand_address(mode, Access::Read)?;
    let value = cpu.read_bus(addr);
    cpu.x = value;
    cpu.set_nz(value);
    Ok(())
}

pub(crate) fn ldy<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let addr = cpu.operand_address(mode, Access::Read)?;
    let value = cpu.read_bus(addr);
    cpu.y = value;
    cpu.set_nz(value);
    Ok(())
}

pub(crate) fn sta<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let addr = cpu.operand_address(mode, Access::Write)?;
    cpu.write_bus(addr, cpu.a);
    Ok(())
}

pub(crate) fn stx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let addr = cpu.operand_address(mode, Access::Write)?;
    cpu.write_bus(addr, cpu.x);
    Ok(())
}

pub(crate) fn sty<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let addr = cpu.operand_address(mode, Access::Write)?;
    cpu.write_bus(addr, cpu.y);
    Ok(())
}

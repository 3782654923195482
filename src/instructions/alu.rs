//! # Arithmetic and Logic Instructions
//!
//! ADC, SBC, the bitwise operations, BIT and the three compares.
//!
//! ADC and SBC honor the decimal flag. Decimal mode works on the nibbles
//! directly with a decimal adjust per digit; Z, N and V still come from
//! the binary intermediate, and C from the decimal result, matching NMOS
//! silicon. SBC in binary mode is ADC of the one's complement.

use crate::cpu::Access;
use crate::{AddressingMode, Cpu, CpuError, MemoryBus};

/// Reads the operand value for a read-type instruction, paying the
/// page-cross penalty where the mode calls for it.
fn operand_value<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<u8, CpuError> {
    let addr = cpu.operand_address(mode, Access::Read)?;
    Ok(cpu.read_bus(addr))
}

pub(crate) fn adc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let value = operand_value(cpu, mode)?;
    if cpu.flag_d {
        adc_decimal(cpu, value);
    } else {
        adc_binary(cpu, value);
    }
    Ok(())
}

pub(crate) fn sbc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let value = operand_value(cpu, mode)?;
    if cpu.flag_d {
        sbc_decimal(cpu, value);
    } else {
        // Borrow-subtract is add of the one's complement.
        adc_binary(cpu, !value);
    }
    Ok(())
}

fn adc_binary<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) {
    let a = cpu.a;
    let carry = u16::from(cpu.flag_c);
    let sum = u16::from(a) + u16::from(value) + carry;
    let result = sum as u8;

    cpu.flag_c = sum > 0xFF;
    cpu.flag_v = (a ^ result) & (value ^ result) & 0x80 != 0;
    cpu.a = result;
    cpu.set_nz(result);
}

fn adc_decimal<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) {
    let a = u16::from(cpu.a);
    let value = u16::from(value);
    let carry = u16::from(cpu.flag_c);

    let mut lo = (a & 0x0F) + (value & 0x0F) + carry;
    if lo > 9 {
        lo += 6;
    }
    let mut hi = (a >> 4) + (value >> 4) + u16::from(lo > 0x0F);

    // Z, N and V are taken from the binary intermediate on the NMOS part.
    let binary = (a + value + carry) as u8;
    cpu.flag_z = binary == 0;
    cpu.flag_n = hi & 0x08 != 0;
    cpu.flag_v = (a as u8 ^ binary) & (value as u8 ^ binary) & 0x80 != 0;

    if hi > 9 {
        hi += 6;
    }
    cpu.flag_c = hi > 0x0F;
    cpu.a = (((hi & 0x0F) as u8) << 4) | ((lo & 0x0F) as u8);
}

fn sbc_decimal<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) {
    let a = i16::from(cpu.a);
    let value = i16::from(value);
    let borrow = i16::from(!cpu.flag_c);

    // Flags come from the binary difference.
    let binary = a - value - borrow;
    cpu.flag_c = binary >= 0;
    cpu.flag_z = binary as u8 == 0;
    cpu.flag_n = binary & 0x80 != 0;
    cpu.flag_v = (a ^ binary) & (a ^ value) & 0x80 != 0;

    let mut lo = (a & 0x0F) - (value & 0x0F) - borrow;
    let mut hi = (a >> 4) - (value >> 4);
    if lo < 0 {
        lo -= 6;
        hi -= 1;
    }
    if hi < 0 {
        hi -= 6;
    }
    cpu.a = (((hi & 0x0F) as u8) << 4) | ((lo & 0x0F) as u8);
}

pub(crate) fn and<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let value = operand_value(cpu, mode)?;
    cpu.a &= value;
    let a = cpu.a;
    cpu.set_nz(a);
    Ok(())
}

pub(crate) fn ora<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let value = operand_value(cpu, mode)?;
    cpu.a |= value;
    let a = cpu.a;
    cpu.set_nz(a);
    Ok(())
}

pub(crate) fn eor<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let value = operand_value(cpu, mode)?;
    cpu.a ^= value;
    let a = cpu.a;
    cpu.set_nz(a);
    Ok(())
}

/// BIT leaves A untouched: Z from A & M, N from bit 7 of M, V from bit 6.
pub(crate) fn bit<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let value = operand_value(cpu, mode)?;
    cpu.flag_z = cpu.a & value == 0;
    cpu.flag_n = value & 0x80 != 0;
    cpu.flag_v = value & 0x40 != 0;
    Ok(())
}

fn compare<M: MemoryBus>(cpu: &mut Cpu<M>, register: u8, value: u8) {
    cpu.flag_c = register >= value;
    cpu.set_nz(register.wrapping_sub(value));
}

pub(crate) fn cmp<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let value = operand_value(cpu, mode)?;
    let a = cpu.a;
    compare(cpu, a, value);
    Ok(())
}

pub(crate) fn cpx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let value = operand_value(cpu, mode)?;
    let x = cpu.x;
    compare(cpu, x, value);
    Ok(())
}

pub(crate) fn cpy<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Result<(), CpuError> {
    let value = operand_value(cpu, mode)?;
    let y = cpu.y;
    compare(cpu, y, value);
    Ok(())
}

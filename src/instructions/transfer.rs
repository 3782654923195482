//! # Register Transfer Instructions
//!
//! Two cycles each. Every transfer updates N and Z from the moved value
//! except TXS, which touches no flags.

use crate::{Cpu, MemoryBus};

pub(crate) fn tax<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let _ = cpu.read_bus(cpu.pc);
    cpu.x = cpu.a;
    let x = cpu.x;
    cpu.set_nz(x);
}

pub(crate) fn tay<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let _ = cpu.read_bus(cpu.pc);
    cpu.y = cpu.a;
    let y = cpu.y;
    cpu.set_nz(y);
}

pub(crate) fn txa<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let _ = cpu.read_bus(cpu.pc);
    cpu.a = cpu.x;
    let a = cpu.a;
    cpu.set_nz(a);
}

pub(crate) fn tya<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let _ = cpu.read_bus(cpu.pc);
    cpu.a = cpu.y;
    let a = cpu.a;
    cpu.set_nz(a);
}

pub(crate) fn tsx<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let _ = cpu.read_bus(cpu.pc);
    cpu.x = cpu.sp;
    let x = cpu.x;
    cpu.set_nz(x);
}

pub(crate) fn txs<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let _ = cpu.read_bus(cpu.pc);
    cpu.sp = cpu.x;
}

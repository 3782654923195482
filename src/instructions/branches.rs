//! # Branch Instructions
//!
//! All eight branches share one shape: read the signed displacement, and
//! if the predicate holds, spend one dead cycle re-reading the next opcode
//! address, plus one more fixing up the high byte when the target lands on
//! a different page.

use crate::{Cpu, MemoryBus};

/// Common branch tail. `taken` is the already-evaluated flag predicate.
fn branch<M: MemoryBus>(cpu: &mut Cpu<M>, taken: bool) {
    let offset = cpu.fetch() as i8;
    if !taken {
        return;
    }

    let _ = cpu.read_bus(cpu.pc);
    let target = cpu.pc.wrapping_add_signed(i16::from(offset));
    if (target ^ cpu.pc) & 0xFF00 != 0 {
        // Page crossed: the first target the CPU puts on the bus still has
        // the old high byte.
        let _ = cpu.read_bus((cpu.pc & 0xFF00) | (target & 0x00FF));
    }
    cpu.pc = target;
}

pub(crate) fn bcc<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let taken = !cpu.flag_c;
    branch(cpu, taken);
}

pub(crate) fn bcs<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let taken = cpu.flag_c;
    branch(cpu, taken);
}

pub(crate) fn beq<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let taken = cpu.flag_z;
    branch(cpu, taken);
}

pub(crate) fn bne<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let taken = !cpu.flag_z;
    branch(cpu, taken);
}

pub(crate) fn bmi<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let taken = cpu.flag_n;
    branch(cpu, taken);
}

pub(crate) fn bpl<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let taken = !cpu.flag_n;
    branch(cpu, taken);
}

pub(crate) fn bvs<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let taken = cpu.flag_v;
    branch(cpu, taken);
}

pub(crate) fn bvc<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let taken = !cpu.flag_v;
    branch(cpu, taken);
}

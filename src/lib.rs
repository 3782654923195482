//! # mos6502
//!
//! A cycle-accurate NMOS 6502 CPU emulator core.
//!
//! The crate interprets the 151 documented opcodes across all 13 addressing
//! modes, models every bus transaction the real silicon performs (including
//! the dummy reads and writes that make timing observable), and sequences
//! reset, IRQ, NMI and BRK the way the hardware does, including the
//! one-cycle interrupt polling delay.
//!
//! ## Quick Start
//!
//! ```rust
//! use mos6502::{Cpu, FlatMemory};
//!
//! // LDA #$05 / ADC #$03 at 0x0200
//! let mut memory = FlatMemory::new();
//! memory.load_program(0x0200, &[0xA9, 0x05, 0x69, 0x03], 0x0200).unwrap();
//!
//! let mut cpu = Cpu::new(memory);
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//!
//! assert_eq!(cpu.a(), 0x08);
//! assert_eq!(cpu.cycles(), 4);
//! ```
//!
//! ## Architecture
//!
//! - `cpu`: register file, flags, the fetch/decode/execute loop, the
//!   addressing-mode resolver and the interrupt sequencer
//! - `memory`: the `MemoryBus` capability and a flat 64 KiB implementation
//! - `opcodes`: the 256-entry decode table mapping opcode bytes to
//!   `(Mnemonic, AddressingMode)`
//! - `addressing`: the addressing-mode enumeration
//!
//! The CPU owns its memory collaborator through the [`MemoryBus`] trait.
//! One call to `MemoryBus::read` or `MemoryBus::write` is exactly one CPU
//! cycle; the cycle counter visible through [`Cpu::cycles`] counts nothing
//! else.

pub mod addressing;
pub mod cpu;
pub mod memory;
pub mod opcodes;

mod instructions;

pub use addressing::AddressingMode;
pub use cpu::Cpu;
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Mnemonic, OpcodeMetadata, OPCODE_TABLE};

/// Fatal errors surfaced by the CPU core and the program loader.
///
/// There are no transient errors in this core: each variant aborts the
/// operation that produced it and leaves the CPU state observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CpuError {
    /// The fetched opcode byte is not one of the 151 documented
    /// instructions. PC has already advanced past the offending byte.
    UnsupportedOpcode(u8),

    /// A program load would run past the end of the 64 KiB address space.
    AddressOutOfRange {
        /// First address the load targeted.
        offset: u16,
        /// Length of the rejected program image.
        len: usize,
    },

    /// An internal contract was violated, e.g. the addressing-mode
    /// resolver was asked for an effective address in a mode that has
    /// none. Indicates a bug in the emulator, not in the emulated program.
    InternalInvariant(&'static str),
}

impl std::fmt::Display for CpuError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CpuError::UnsupportedOpcode(opcode) => {
                write!(f, "unsupported opcode 0x{opcode:02X}")
            }
            CpuError::AddressOutOfRange { offset, len } => {
                write!(
                    f,
                    "program of {len} bytes at 0x{offset:04X} exceeds the 64 KiB address space"
                )
            }
            CpuError::InternalInvariant(what) => {
                write!(f, "internal invariant violated: {what}")
            }
        }
    }
}

impl std::error::Error for CpuError {}

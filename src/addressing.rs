//! # Addressing Modes
//!
//! The 13 addressing modes of the NMOS 6502. The mode determines how many
//! operand bytes follow an opcode and how the CPU turns them into an
//! effective address, including the extra bus activity (dummy reads,
//! page-cross penalties) the real silicon performs while resolving them.

/// 6502 addressing mode enumeration.
///
/// # Operand sizes
///
/// - **0 bytes**: Implied, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative,
///   IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand; the operation is implied by the instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implied,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: ASL A, LSR A, ROL A, ROR A
    Accumulator,

    /// 8-bit constant embedded in the instruction stream.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address into the zero page (0x0000-0x00FF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X; wraps within the zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y; wraps within the zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit displacement used by the branch instructions.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X. Read-type instructions pay one extra
    /// cycle when the indexing carries into the high byte; store and
    /// read-modify-write forms always pay it.
    AbsoluteX,

    /// 16-bit address indexed by Y. Same page-cross rule as AbsoluteX.
    AbsoluteY,

    /// Indirect jump through a 16-bit pointer; JMP only. Reproduces the
    /// NMOS page-boundary bug: a pointer ending in 0xFF fetches its high
    /// byte from the start of the same page.
    Indirect,

    /// Indexed indirect: (zero page + X) names a zero-page pointer which
    /// holds the effective address. The pointer fetch wraps within the
    /// zero page.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: a zero-page pointer holds a base address to which
    /// Y is added. Read-type instructions pay the page-cross penalty;
    /// STA always pays it.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode for this mode.
    pub const fn operand_len(self) -> u16 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

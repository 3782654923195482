//! # Opcode Decode Table
//!
//! The 256-entry table mapping every opcode byte to its
//! `(Mnemonic, AddressingMode)` pair. This is the single source of truth
//! for instruction decoding: the CPU's execute loop branches on the
//! mnemonic, the addressing-mode resolver on the mode.
//!
//! 151 entries are documented NMOS 6502 instructions; the remaining 105
//! undocumented opcodes decode to [`Mnemonic::Illegal`] and make
//! `Cpu::step` fail with an unsupported-opcode error.

use crate::addressing::AddressingMode;

/// The 56 documented 6502 instruction mnemonics, plus a marker for
/// undocumented opcode bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    /// Any of the 105 undocumented opcode bytes.
    Illegal,
}

impl Mnemonic {
    /// The conventional assembler spelling of this mnemonic, or `"???"`
    /// for undocumented opcodes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC", Mnemonic::And => "AND", Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC", Mnemonic::Bcs => "BCS", Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT", Mnemonic::Bmi => "BMI", Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL", Mnemonic::Brk => "BRK", Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS", Mnemonic::Clc => "CLC", Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI", Mnemonic::Clv => "CLV", Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX", Mnemonic::Cpy => "CPY", Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX", Mnemonic::Dey => "DEY", Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC", Mnemonic::Inx => "INX", Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP", Mnemonic::Jsr => "JSR", Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX", Mnemonic::Ldy => "LDY", Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP", Mnemonic::Ora => "ORA", Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP", Mnemonic::Pla => "PLA", Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL", Mnemonic::Ror => "ROR", Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS", Mnemonic::Sbc => "SBC", Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED", Mnemonic::Sei => "SEI", Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX", Mnemonic::Sty => "STY", Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY", Mnemonic::Tsx => "TSX", Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS", Mnemonic::Tya => "TYA",
            Mnemonic::Illegal => "???",
        }
    }
}

/// Decode metadata for a single opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic, or [`Mnemonic::Illegal`].
    pub mnemonic: Mnemonic,
    /// How the operand bytes (if any) resolve to an effective address.
    pub mode: AddressingMode,
}

impl OpcodeMetadata {
    /// Total instruction length in bytes, opcode included.
    pub const fn size(self) -> u16 {
        1 + self.mode.operand_len()
    }

    /// True for the 151 documented opcodes.
    pub const fn is_documented(self) -> bool {
        !matches!(self.mnemonic, Mnemonic::Illegal)
    }
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode) -> OpcodeMetadata {
    OpcodeMetadata { mnemonic, mode }
}

const ILL: OpcodeMetadata = op(Mnemonic::Illegal, AddressingMode::Implied);

use AddressingMode::{
    Absolute as Abs, AbsoluteX as AbsX, AbsoluteY as AbsY, Accumulator as Acc,
    Immediate as Imm, Implied as Imp, Indirect as Ind, IndirectX as IzX,
    IndirectY as IzY, Relative as Rel, ZeroPage as Zp, ZeroPageX as ZpX,
    ZeroPageY as ZpY,
};
use Mnemonic::*;

/// Complete decode table, indexed by opcode byte.
#[rustfmt::skip]
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = [
    // 0x00-0x0F
    op(Brk, Imp), op(Ora, IzX), ILL, ILL,
    ILL, op(Ora, Zp), op(Asl, Zp), ILL,
    op(Php, Imp), op(Ora, Imm), op(Asl, Acc), ILL,
    ILL, op(Ora, Abs), op(Asl, Abs), ILL,
    // 0x10-0x1F
    op(Bpl, Rel), op(Ora, IzY), ILL, ILL,
    ILL, op(Ora, ZpX), op(Asl, ZpX), ILL,
    op(Clc, Imp), op(Ora, AbsY), ILL, ILL,
    ILL, op(Ora, AbsX), op(Asl, AbsX), ILL,
    // 0x20-0x2F
    op(Jsr, Abs), op(And, IzX), ILL, ILL,
    op(Bit, Zp), op(And, Zp), op(Rol, Zp), ILL,
    op(Plp, Imp), op(And, Imm), op(Rol, Acc), ILL,
    op(Bit, Abs), op(And, Abs), op(Rol, Abs), ILL,
    // 0x30-0x3F
    op(Bmi, Rel), op(And, IzY), ILL, ILL,
    ILL, op(And, ZpX), op(Rol, ZpX), ILL,
    op(Sec, Imp), op(And, AbsY), ILL, ILL,
    ILL, op(And, AbsX), op(Rol, AbsX), ILL,
    // 0x40-0x4F
    op(Rti, Imp), op(Eor, IzX), ILL, ILL,
    ILL, op(Eor, Zp), op(Lsr, Zp), ILL,
    op(Pha, Imp), op(Eor, Imm), op(Lsr, Acc), ILL,
    op(Jmp, Abs), op(Eor, Abs), op(Lsr, Abs), ILL,
    // 0x50-0x5F
    op(Bvc, Rel), op(Eor, IzY), ILL, ILL,
    ILL, op(Eor, ZpX), op(Lsr, ZpX), ILL,
    op(Cli, Imp), op(Eor, AbsY), ILL, ILL,
    ILL, op(Eor, AbsX), op(Lsr, AbsX), ILL,
    // 0x60-0x6F
    op(Rts, Imp), op(Adc, IzX), ILL, ILL,
    ILL, op(Adc, Zp), op(Ror, Zp), ILL,
    op(Pla, Imp), op(Adc, Imm), op(Ror, Acc), ILL,
    op(Jmp, Ind), op(Adc, Abs), op(Ror, Abs), ILL,
    // 0x70-0x7F
    op(Bvs, Rel), op(Adc, IzY), ILL, ILL,
    ILL, op(Adc, ZpX), op(Ror, ZpX), ILL,
    op(Sei, Imp), op(Adc, AbsY), ILL, ILL,
    ILL, op(Adc, AbsX), op(Ror, AbsX), ILL,
    // 0x80-0x8F
    ILL, op(Sta, IzX), ILL, ILL,
    op(Sty, Zp), op(Sta, Zp), op(Stx, Zp), ILL,
    op(Dey, Imp), ILL, op(Txa, Imp), ILL,
    op(Sty, Abs), op(Sta, Abs), op(Stx, Abs), ILL,
    // 0x90-0x9F
    op(Bcc, Rel), op(Sta, IzY), ILL, ILL,
    op(Sty, ZpX), op(Sta, ZpX), op(Stx, ZpY), ILL,
    op(Tya, Imp), op(Sta, AbsY), op(Txs, Imp), ILL,
    ILL, op(Sta, AbsX), ILL, ILL,
    // 0xA0-0xAF
    op(Ldy, Imm), op(Lda, IzX), op(Ldx, Imm), ILL,
    op(Ldy, Zp), op(Lda, Zp), op(Ldx, Zp), ILL,
    op(Tay, Imp), op(Lda, Imm), op(Tax, Imp), ILL,
    op(Ldy, Abs), op(Lda, Abs), op(Ldx, Abs), ILL,
    // 0xB0-0xBF
    op(Bcs, Rel), op(Lda, IzY), ILL, ILL,
    op(Ldy, ZpX), op(Lda, ZpX), op(Ldx, ZpY), ILL,
    op(Clv, Imp), op(Lda, AbsY), op(Tsx, Imp), ILL,
    op(Ldy, AbsX), op(Lda, AbsX), op(Ldx, AbsY), ILL,
    // 0xC0-0xCF
    op(Cpy, Imm), op(Cmp, IzX), ILL, ILL,
    op(Cpy, Zp), op(Cmp, Zp), op(Dec, Zp), ILL,
    op(Iny, Imp), op(Cmp, Imm), op(Dex, Imp), ILL,
    op(Cpy, Abs), op(Cmp, Abs), op(Dec, Abs), ILL,
    // 0xD0-0xDF
    op(Bne, Rel), op(Cmp, IzY), ILL, ILL,
    ILL, op(Cmp, ZpX), op(Dec, ZpX), ILL,
    op(Cld, Imp), op(Cmp, AbsY), ILL, ILL,
    ILL, op(Cmp, AbsX), op(Dec, AbsX), ILL,
    // 0xE0-0xEF
    op(Cpx, Imm), op(Sbc, IzX), ILL, ILL,
    op(Cpx, Zp), op(Sbc, Zp), op(Inc, Zp), ILL,
    op(Inx, Imp), op(Sbc, Imm), op(Nop, Imp), ILL,
    op(Cpx, Abs), op(Sbc, Abs), op(Inc, Abs), ILL,
    // 0xF0-0xFF
    op(Beq, Rel), op(Sbc, IzY), ILL, ILL,
    ILL, op(Sbc, ZpX), op(Inc, ZpX), ILL,
    op(Sed, Imp), op(Sbc, AbsY), ILL, ILL,
    ILL, op(Sbc, AbsX), op(Inc, AbsX), ILL,
];

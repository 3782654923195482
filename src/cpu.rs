//! # CPU State and Execution
//!
//! The [`Cpu`] struct holds the 6502 register file, status flags, cycle
//! counter and interrupt latches, and drives the fetch-decode-execute loop
//! against an owned [`MemoryBus`] collaborator.
//!
//! ## Cycle model
//!
//! Every memory access goes through the CPU's `read_bus`/`write_bus`
//! helpers, which perform exactly one `MemoryBus` call, advance the cycle counter by
//! one, and run the end-of-cycle interrupt latch update. The "internal"
//! cycles of JSR, RTS, RTI, BRK and of taken branches are realized as the
//! dummy bus reads the hardware performs on those cycles, so the counter
//! observed through [`Cpu::cycles`] equals the number of bus transactions
//! exactly.
//!
//! ## Interrupt polling
//!
//! At the end of every cycle the CPU latches
//! `prev <- curr; curr <- nmi_pending || (irq_pending && !I)`. An interrupt
//! is serviced after the current instruction completes only if `prev` was
//! set when the instruction's last cycle ended, reproducing the one-cycle
//! polling delay of the real part (and with it the classic CLI/SEI edge
//! behavior).

use crate::instructions;
use crate::opcodes::{Mnemonic, OPCODE_TABLE};
use crate::{AddressingMode, CpuError, MemoryBus};

/// Address of the NMI vector (low byte; high byte follows).
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Address of the reset vector (low byte; high byte follows).
pub const RESET_VECTOR: u16 = 0xFFFC;
/// Address of the shared IRQ/BRK vector (low byte; high byte follows).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Base address of the stack page.
const STACK_BASE: u16 = 0x0100;

/// How an instruction uses the address it resolves. Selects between the
/// conditional page-cross penalty of read-type indexed addressing and the
/// unconditional dummy read of store and read-modify-write forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    /// Load-type access: page-cross penalty only when the index carries.
    Read,
    /// Store access: the indexed dummy read always happens.
    Write,
    /// Read-modify-write access: same unconditional dummy read.
    Modify,
}

/// The 6502 CPU.
///
/// Generic over the memory implementation via the [`MemoryBus`] trait. The
/// CPU exclusively owns its register and flag state; the collaborator
/// exclusively owns the memory image.
///
/// # Examples
///
/// ```
/// use mos6502::{Cpu, FlatMemory};
///
/// let mut memory = FlatMemory::new();
/// memory.load_program(0x8000, &[0xEA], 0x8000).unwrap(); // NOP
///
/// let mut cpu = Cpu::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i());
///
/// cpu.step().unwrap();
/// assert_eq!(cpu.cycles(), 2);
/// ```
pub struct Cpu<M: MemoryBus> {
    /// Accumulator.
    pub(crate) a: u8,
    /// X index register.
    pub(crate) x: u8,
    /// Y index register.
    pub(crate) y: u8,
    /// Program counter.
    pub(crate) pc: u16,
    /// Stack pointer; the effective stack address is `0x0100 | sp`.
    pub(crate) sp: u8,
    /// Most recently fetched opcode byte.
    pub(crate) opcode: u8,

    /// Carry flag.
    pub(crate) flag_c: bool,
    /// Zero flag.
    pub(crate) flag_z: bool,
    /// Interrupt disable flag.
    pub(crate) flag_i: bool,
    /// Decimal mode flag.
    pub(crate) flag_d: bool,
    /// Overflow flag.
    pub(crate) flag_v: bool,
    /// Negative flag.
    pub(crate) flag_n: bool,

    /// Total bus cycles executed since the last reset.
    pub(crate) cycles: u64,

    /// Level-sensitive IRQ input; held by the caller until cleared.
    irq_pending: bool,
    /// Edge-triggered NMI input; one-shot, cleared by servicing.
    nmi_pending: bool,
    /// Interrupt condition computed at the end of the current cycle.
    interrupt_curr: bool,
    /// The same condition one cycle earlier; this is what step() polls.
    interrupt_prev: bool,

    /// Memory collaborator.
    pub(crate) memory: M,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a CPU in the post-reset state.
    ///
    /// Equivalent to constructing the register file and immediately running
    /// [`Cpu::reset`]: PC is loaded from the reset vector at 0xFFFC/0xFFFD,
    /// SP is 0xFD, the I flag is set, and the cycle counter reads zero.
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0,
            opcode: 0,
            flag_c: false,
            flag_z: false,
            flag_i: false,
            flag_d: false,
            flag_v: false,
            flag_n: false,
            cycles: 0,
            irq_pending: false,
            nmi_pending: false,
            interrupt_curr: false,
            interrupt_prev: false,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Resets the CPU.
    ///
    /// SP becomes 0xFD (the value left behind by the hardware's reset
    /// pushes), the I flag is set, pending interrupts are dropped, the
    /// cycle counter restarts at zero and PC is loaded from the reset
    /// vector. Nothing is pushed; the reset sequence's bus activity is not
    /// counted.
    pub fn reset(&mut self) {
        self.sp = 0xFD;
        self.flag_i = true;
        self.irq_pending = false;
        self.nmi_pending = false;
        self.interrupt_curr = false;
        self.interrupt_prev = false;
        self.cycles = 0;

        let lo = u16::from(self.memory.read(RESET_VECTOR));
        let hi = u16::from(self.memory.read(RESET_VECTOR.wrapping_add(1)));
        self.pc = (hi << 8) | lo;

        log::trace!("reset: pc=0x{:04X}", self.pc);
    }

    /// Executes one instruction, then services at most one pending
    /// interrupt.
    ///
    /// Returns once the instruction and any interrupt sequence have
    /// completed. An undocumented opcode byte aborts the step with
    /// [`CpuError::UnsupportedOpcode`], leaving PC just past the byte.
    pub fn step(&mut self) -> Result<(), CpuError> {
        let opcode = self.fetch();
        self.opcode = opcode;

        let metadata = OPCODE_TABLE[opcode as usize];
        let mode = metadata.mode;

        match metadata.mnemonic {
            Mnemonic::Adc => instructions::alu::adc(self, mode)?,
            Mnemonic::And => instructions::alu::and(self, mode)?,
            Mnemonic::Asl => instructions::shifts::asl(self, mode)?,
            Mnemonic::Bcc => instructions::branches::bcc(self),
            Mnemonic::Bcs => instructions::branches::bcs(self),
            Mnemonic::Beq => instructions::branches::beq(self),
            Mnemonic::Bit => instructions::alu::bit(self, mode)?,
            Mnemonic::Bmi => instructions::branches::bmi(self),
            Mnemonic::Bne => instructions::branches::bne(self),
            Mnemonic::Bpl => instructions::branches::bpl(self),
            Mnemonic::Brk => instructions::control::brk(self),
            Mnemonic::Bvc => instructions::branches::bvc(self),
            Mnemonic::Bvs => instructions::branches::bvs(self),
            Mnemonic::Clc => instructions::flags::clc(self),
            Mnemonic::Cld => instructions::flags::cld(self),
            Mnemonic::Cli => instructions::flags::cli(self),
            Mnemonic::Clv => instructions::flags::clv(self),
            Mnemonic::Cmp => instructions::alu::cmp(self, mode)?,
            Mnemonic::Cpx => instructions::alu::cpx(self, mode)?,
            Mnemonic::Cpy => instructions::alu::cpy(self, mode)?,
            Mnemonic::Dec => instructions::inc_dec::dec(self, mode)?,
            Mnemonic::Dex => instructions::inc_dec::dex(self),
            Mnemonic::Dey => instructions::inc_dec::dey(self),
            Mnemonic::Eor => instructions::alu::eor(self, mode)?,
            Mnemonic::Inc => instructions::inc_dec::inc(self, mode)?,
            Mnemonic::Inx => instructions::inc_dec::inx(self),
            Mnemonic::Iny => instructions::inc_dec::iny(self),
            Mnemonic::Jmp => instructions::control::jmp(self, mode)?,
            Mnemonic::Jsr => instructions::control::jsr(self),
            Mnemonic::Lda => instructions::load_store::lda(self, mode)?,
            Mnemonic::Ldx => instructions::load_store::ldx(self, mode)?,
            Mnemonic::Ldy => instructions::load_store::ldy(self, mode)?,
            Mnemonic::Lsr => instructions::shifts::lsr(self, mode)?,
            Mnemonic::Nop => instructions::control::nop(self),
            Mnemonic::Ora => instructions::alu::ora(self, mode)?,
            Mnemonic::Pha => instructions::stack::pha(self),
            Mnemonic::Php => instructions::stack::php(self),
            Mnemonic::Pla => instructions::stack::pla(self),
            Mnemonic::Plp => instructions::stack::plp(self),
            Mnemonic::Rol => instructions::shifts::rol(self, mode)?,
            Mnemonic::Ror => instructions::shifts::ror(self, mode)?,
            Mnemonic::Rti => instructions::control::rti(self),
            Mnemonic::Rts => instructions::control::rts(self),
            Mnemonic::Sbc => instructions::alu::sbc(self, mode)?,
            Mnemonic::Sec => instructions::flags::sec(self),
            Mnemonic::Sed => instructions::flags::sed(self),
            Mnemonic::Sei => instructions::flags::sei(self),
            Mnemonic::Sta => instructions::load_store::sta(self, mode)?,
            Mnemonic::Stx => instructions::load_store::stx(self, mode)?,
            Mnemonic::Sty => instructions::load_store::sty(self, mode)?,
            Mnemonic::Tax => instructions::transfer::tax(self),
            Mnemonic::Tay => instructions::transfer::tay(self),
            Mnemonic::Tsx => instructions::transfer::tsx(self),
            Mnemonic::Txa => instructions::transfer::txa(self),
            Mnemonic::Txs => instructions::transfer::txs(self),
            Mnemonic::Tya => instructions::transfer::tya(self),
            Mnemonic::Illegal => {
                log::warn!("unsupported opcode 0x{:02X} at 0x{:04X}", opcode, self.pc.wrapping_sub(1));
                return Err(CpuError::UnsupportedOpcode(opcode));
            }
        }

        if self.interrupt_prev {
            self.service_interrupt();
        }

        Ok(())
    }

    /// Runs the CPU until at least `cycle_budget` cycles have elapsed.
    ///
    /// Useful for frame-locked hosts that tick the CPU a fixed number of
    /// cycles per frame. Returns the cycles actually consumed, which may
    /// overshoot the budget by the tail of the last instruction.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, CpuError> {
        let start = self.cycles;
        while self.cycles.wrapping_sub(start) < cycle_budget {
            self.step()?;
        }
        Ok(self.cycles.wrapping_sub(start))
    }

    // ========== Interrupt inputs ==========

    /// Asserts the level-sensitive IRQ input. The interrupt fires between
    /// instructions while the I flag is clear, and keeps firing until
    /// [`Cpu::clear_irq`] is called.
    pub fn raise_irq(&mut self) {
        self.irq_pending = true;
    }

    /// Deasserts the IRQ input.
    pub fn clear_irq(&mut self) {
        self.irq_pending = false;
    }

    /// Triggers the edge-sensitive NMI input. One-shot: servicing clears
    /// it. NMI is not gated by the I flag and wins over a simultaneous
    /// IRQ.
    pub fn raise_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Services a pending interrupt after an instruction has completed.
    ///
    /// The sequence is the BRK tail with B clear in the pushed status:
    /// undo the operand-position increment so the interrupted instruction's
    /// address is what gets pushed, then push PC and P and take the vector.
    fn service_interrupt(&mut self) {
        let nmi = self.nmi_pending;
        let vector = if nmi { NMI_VECTOR } else { IRQ_VECTOR };
        log::trace!(
            "servicing {} at pc=0x{:04X}",
            if nmi { "NMI" } else { "IRQ" },
            self.pc
        );

        self.pc = self.pc.wrapping_sub(1);
        self.interrupt_sequence(vector, false);

        self.interrupt_prev = false;
        if nmi {
            self.nmi_pending = false;
        }
    }

    /// The shared tail of BRK and hardware interrupt servicing, entered
    /// with PC one byte past the opcode position. Pushes PC+1 (high, low),
    /// pushes P (B set only for BRK), sets I and loads the vector.
    /// Six bus cycles.
    pub(crate) fn interrupt_sequence(&mut self, vector: u16, software: bool) {
        let _ = self.fetch(); // padding byte; read and skipped

        self.push((self.pc >> 8) as u8);
        self.push(self.pc as u8);
        self.push(self.status_for_push(software));
        self.flag_i = true;

        let lo = u16::from(self.read_bus(vector));
        let hi = u16::from(self.read_bus(vector.wrapping_add(1)));
        self.pc = (hi << 8) | lo;
    }

    // ========== Bus cycle primitives ==========

    /// One read bus cycle: read the byte, advance the cycle counter, run
    /// the end-of-cycle interrupt latch update.
    pub(crate) fn read_bus(&mut self, addr: u16) -> u8 {
        let value = self.memory.read(addr);
        self.end_cycle();
        value
    }

    /// One write bus cycle.
    pub(crate) fn write_bus(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
        self.end_cycle();
    }

    /// End-of-cycle bookkeeping: count the transaction, then shift the
    /// interrupt latch (`prev <- curr; curr <- recompute`).
    fn end_cycle(&mut self) {
        self.cycles += 1;
        self.interrupt_prev = self.interrupt_curr;
        self.interrupt_curr = self.nmi_pending || (self.irq_pending && !self.flag_i);
    }

    /// Reads the byte at PC and advances PC. One bus cycle.
    pub(crate) fn fetch(&mut self) -> u8 {
        let value = self.read_bus(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Current top-of-stack address (`0x0100 | SP`).
    pub(crate) fn stack_addr(&self) -> u16 {
        STACK_BASE | u16::from(self.sp)
    }

    /// Pushes a byte at the stack pointer, then decrements it.
    pub(crate) fn push(&mut self, value: u8) {
        self.write_bus(self.stack_addr(), value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Increments the stack pointer, then reads the byte it points at.
    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.read_bus(self.stack_addr())
    }

    // ========== Addressing-mode resolver ==========

    /// Resolves `mode` to an effective address, performing the exact bus
    /// cycles the hardware spends on resolution and advancing PC past the
    /// operand bytes.
    ///
    /// `access` selects the indexed-mode dummy-read policy: read-type
    /// instructions pay the extra cycle only on a page cross, store and
    /// read-modify-write forms always pay it.
    ///
    /// `Implied`, `Accumulator` and `Relative` have no effective address;
    /// asking for one is an internal error.
    pub(crate) fn operand_address(
        &mut self,
        mode: AddressingMode,
        access: Access,
    ) -> Result<u16, CpuError> {
        match mode {
            AddressingMode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                Ok(addr)
            }
            AddressingMode::ZeroPage => Ok(u16::from(self.fetch())),
            AddressingMode::ZeroPageX => {
                let base = self.fetch();
                let _ = self.read_bus(u16::from(base)); // dummy while indexing
                Ok(u16::from(base.wrapping_add(self.x)))
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch();
                let _ = self.read_bus(u16::from(base));
                Ok(u16::from(base.wrapping_add(self.y)))
            }
            AddressingMode::Absolute => {
                let lo = self.fetch();
                let hi = self.fetch();
                Ok(u16::from_le_bytes([lo, hi]))
            }
            AddressingMode::AbsoluteX => {
                let lo = self.fetch();
                let hi = self.fetch();
                let base = u16::from_le_bytes([lo, hi]);
                Ok(self.index_absolute(base, self.x, access))
            }
            AddressingMode::AbsoluteY => {
                let lo = self.fetch();
                let hi = self.fetch();
                let base = u16::from_le_bytes([lo, hi]);
                Ok(self.index_absolute(base, self.y, access))
            }
            AddressingMode::Indirect => {
                let lo = self.fetch();
                let hi = self.fetch();
                let ptr = u16::from_le_bytes([lo, hi]);
                let target_lo = self.read_bus(ptr);
                // NMOS bug: the high byte never crosses the pointer's page.
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let target_hi = self.read_bus(hi_addr);
                Ok(u16::from_le_bytes([target_lo, target_hi]))
            }
            AddressingMode::IndirectX => {
                let ptr = self.fetch();
                let _ = self.read_bus(u16::from(ptr)); // dummy while indexing
                let ptr = ptr.wrapping_add(self.x);
                let lo = self.read_bus(u16::from(ptr));
                let hi = self.read_bus(u16::from(ptr.wrapping_add(1)));
                Ok(u16::from_le_bytes([lo, hi]))
            }
            AddressingMode::IndirectY => {
                let ptr = self.fetch();
                let lo = self.read_bus(u16::from(ptr));
                let hi = self.read_bus(u16::from(ptr.wrapping_add(1)));
                let base = u16::from_le_bytes([lo, hi]);
                Ok(self.index_absolute(base, self.y, access))
            }
            AddressingMode::Implied | AddressingMode::Accumulator | AddressingMode::Relative => {
                Err(CpuError::InternalInvariant(
                    "addressing mode has no effective address",
                ))
            }
        }
    }

    /// Adds an index register to a 16-bit base. The dummy read at the
    /// un-carried address happens on a page cross for read access, and
    /// unconditionally for write and read-modify-write access.
    fn index_absolute(&mut self, base: u16, index: u8, access: Access) -> u16 {
        let addr = base.wrapping_add(u16::from(index));
        let crossed = (base ^ addr) & 0xFF00 != 0;
        if crossed || access != Access::Read {
            let uncarried = (base & 0xFF00) | (addr & 0x00FF);
            let _ = self.read_bus(uncarried);
        }
        addr
    }

    // ========== Flag helpers ==========

    /// Updates N and Z from a result byte.
    pub(crate) fn set_nz(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }

    /// Packs the flags into the physical P layout for a stack push.
    /// Bit 5 is always one; B is set for PHP and BRK, clear for IRQ/NMI.
    pub(crate) fn status_for_push(&self, b_flag: bool) -> u8 {
        self.status() | if b_flag { 0b0011_0000 } else { 0b0010_0000 }
    }

    /// Unpacks a pulled status byte into the six architectural flags.
    /// B and bit 5 are discarded.
    pub(crate) fn set_status_from_pull(&mut self, value: u8) {
        self.flag_c = value & 0b0000_0001 != 0;
        self.flag_z = value & 0b0000_0010 != 0;
        self.flag_i = value & 0b0000_0100 != 0;
        self.flag_d = value & 0b0000_1000 != 0;
        self.flag_v = value & 0b0100_0000 != 0;
        self.flag_n = value & 0b1000_0000 != 0;
    }

    // ========== Observable state ==========

    /// Accumulator value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Stack pointer value. The full stack address is `0x0100 | SP`; the
    /// stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// The most recently fetched opcode byte.
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Total bus cycles since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// The flags packed into the physical P layout (NV-BDIZC). Bit 5 reads
    /// as one and B as zero; B only ever exists in pushed copies.
    pub fn status(&self) -> u8 {
        let mut status = 0b0010_0000;
        if self.flag_n {
            status |= 0b1000_0000;
        }
        if self.flag_v {
            status |= 0b0100_0000;
        }
        if self.flag_d {
            status |= 0b0000_1000;
        }
        if self.flag_i {
            status |= 0b0000_0100;
        }
        if self.flag_z {
            status |= 0b0000_0010;
        }
        if self.flag_c {
            status |= 0b0000_0001;
        }
        status
    }

    /// Carry flag.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    /// Zero flag.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Interrupt disable flag.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Decimal mode flag.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Overflow flag.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Negative flag.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    // ========== Test and host conveniences ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Sets the carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Sets the zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets the interrupt disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets the decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets the overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets the negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Reads memory without consuming a cycle. For program loading and
    /// state inspection; the emulated program never sees this access.
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    /// Writes memory without consuming a cycle.
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    /// Shared access to the memory collaborator.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Exclusive access to the memory collaborator.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and returns the memory collaborator.
    pub fn into_memory(self) -> M {
        self.memory
    }
}

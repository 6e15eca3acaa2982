//! Ricoh 2A03 CPU core (6502 without decimal mode).
//!
//! The CPU is clocked once per CPU cycle. When the remaining-cycle counter reaches zero the next
//! opcode is fetched, decoded through [`OPCODES`], and executed in full; the counter is then loaded
//! with the instruction's cost and counts down before the next fetch. See
//! [CPU](https://www.nesdev.org/wiki/CPU) and [CPU interrupts](https://www.nesdev.org/wiki/CPU_interrupts).

use crate::{
    bus::Bus,
    cpu::{
        addressing::AddrMode,
        flags::{FLAG_BREAK, FLAG_INTERRUPT_DISABLE, FLAG_UNUSED},
        table::OPCODES,
    },
};

/// Stack lives at page 1.
const STACK_BASE: u16 = 0x0100;

const NMI_VECTOR: u16 = 0xFFFA;
const RESET_VECTOR: u16 = 0xFFFC;
const IRQ_VECTOR: u16 = 0xFFFE;

pub struct CPU {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    /// Cycles left before the next opcode fetch.
    pub cycles: u8,
    /// CPU cycles elapsed since reset.
    pub clock_count: u64,
    pub(super) opcode: u8,
    pub(super) mode: AddrMode,
    /// Operand for the current instruction (A for implied mode).
    pub(super) fetched: u8,
    /// Effective address computed by the addressing mode.
    pub(super) addr_abs: u16,
}

impl Default for CPU {
    fn default() -> Self {
        Self::new()
    }
}

impl CPU {
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: FLAG_UNUSED | FLAG_INTERRUPT_DISABLE,
            cycles: 0,
            clock_count: 0,
            opcode: 0,
            mode: AddrMode::Imp,
            fetched: 0,
            addr_abs: 0,
        }
    }

    /// Equivalent to pressing reset: registers cleared, PC loaded from $FFFC/$FFFD. Takes 8 cycles.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.pc = self.read_word(bus, RESET_VECTOR);

        self.sp = 0xFD; // reset performs three dummy pushes from 0x00
        self.status = FLAG_INTERRUPT_DISABLE | FLAG_UNUSED;

        self.a = 0;
        self.x = 0;
        self.y = 0;

        self.fetched = 0;
        self.addr_abs = 0;
        self.clock_count = 0;
        self.cycles = 8;
    }

    /// Advance one CPU cycle.
    pub fn clock<B: Bus>(&mut self, bus: &mut B) {
        if self.cycles == 0 {
            self.opcode = bus.read(self.pc);
            self.pc = self.pc.wrapping_add(1);

            let op = OPCODES[self.opcode as usize];
            self.cycles = op.cycles;
            self.mode = op.mode;

            let page_crossed = self.address(op.mode, bus);
            let wants_extra = self.execute(op.instruction, bus);

            // Only reads that care about the page cross pay for it.
            self.cycles += page_crossed & wants_extra;
            self.status |= FLAG_UNUSED;
        }

        self.clock_count += 1;
        self.cycles -= 1;
    }

    /// True when the current instruction has used all of its cycles.
    pub fn complete(&self) -> bool {
        self.cycles == 0
    }

    /// Non-maskable interrupt: vector $FFFA/$FFFB, 8 cycles.
    pub fn nmi<B: Bus>(&mut self, bus: &mut B) {
        self.interrupt(bus, NMI_VECTOR);
        self.cycles += 8;
    }

    /// Maskable interrupt: ignored while I is set; vector $FFFE/$FFFF, 7 cycles.
    pub fn irq<B: Bus>(&mut self, bus: &mut B) {
        if self.flag(FLAG_INTERRUPT_DISABLE) {
            return;
        }
        self.interrupt(bus, IRQ_VECTOR);
        self.cycles += 7;
    }

    fn interrupt<B: Bus>(&mut self, bus: &mut B, vector: u16) {
        self.push_word(bus, self.pc);

        // Hardware interrupts push B clear.
        let status = (self.status & !FLAG_BREAK) | FLAG_UNUSED;
        self.push(bus, status);

        self.status |= FLAG_INTERRUPT_DISABLE;
        self.pc = self.read_word(bus, vector);
    }

    pub fn flag(&self, flag: u8) -> bool {
        self.status & flag != 0
    }

    pub(super) fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
        self.status |= FLAG_UNUSED;
    }

    pub(super) fn read_word<B: Bus>(&self, bus: &mut B, addr: u16) -> u16 {
        let lo = bus.read(addr) as u16;
        let hi = bus.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    pub(super) fn push<B: Bus>(&mut self, bus: &mut B, value: u8) {
        bus.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(super) fn pop<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE | self.sp as u16)
    }

    pub(super) fn push_word<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, value as u8);
    }

    pub(super) fn pop_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.pop(bus) as u16;
        let hi = self.pop(bus) as u16;
        (hi << 8) | lo
    }

    /// One nestest-style register line for the instruction about to execute.
    pub fn trace_line<B: Bus>(&self, bus: &mut B) -> String {
        let opcode = bus.read(self.pc);
        let op = OPCODES[opcode as usize];
        format!(
            "{:04X}  {:02X}  {} {}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc,
            opcode,
            op.name(),
            op.mode.name(),
            self.a,
            self.x,
            self.y,
            self.status,
            self.sp,
            self.clock_count
        )
    }
}

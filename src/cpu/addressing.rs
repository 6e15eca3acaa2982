//! 6502 addressing modes.
//!
//! Each mode leaves the effective address in `addr_abs` (or the accumulator in `fetched` for
//! implied mode) and returns 1 if indexing crossed a page boundary. See
//! [CPU addressing modes](https://www.nesdev.org/wiki/CPU_addressing_modes).

use crate::{bus::Bus, cpu::cpu::CPU};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    /// Implied / accumulator.
    Imp,
    /// Immediate: operand is the next byte.
    Imm,
    /// Zero page.
    Zp0,
    /// Zero page + X (wraps within page 0).
    Zpx,
    /// Zero page + Y (wraps within page 0).
    Zpy,
    /// Signed 8-bit branch offset.
    Rel,
    /// Absolute.
    Abs,
    /// Absolute + X.
    Abx,
    /// Absolute + Y.
    Aby,
    /// Indirect (JMP only), with the page-wrap bug.
    Ind,
    /// (zp,X): X-indexed zero-page pointer.
    Izx,
    /// (zp),Y: zero-page pointer, Y added after dereference.
    Izy,
}

impl AddrMode {
    pub fn name(self) -> &'static str {
        match self {
            AddrMode::Imp => "IMP",
            AddrMode::Imm => "IMM",
            AddrMode::Zp0 => "ZP0",
            AddrMode::Zpx => "ZPX",
            AddrMode::Zpy => "ZPY",
            AddrMode::Rel => "REL",
            AddrMode::Abs => "ABS",
            AddrMode::Abx => "ABX",
            AddrMode::Aby => "ABY",
            AddrMode::Ind => "IND",
            AddrMode::Izx => "IZX",
            AddrMode::Izy => "IZY",
        }
    }
}

impl CPU {
    fn fetch_byte<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let byte = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    fn fetch_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch_byte(bus) as u16;
        let hi = self.fetch_byte(bus) as u16;
        (hi << 8) | lo
    }

    /// Resolve `mode` for the current instruction. Returns 1 on a page cross.
    pub(super) fn address<B: Bus>(&mut self, mode: AddrMode, bus: &mut B) -> u8 {
        match mode {
            AddrMode::Imp => {
                self.fetched = self.a;
                0
            }
            AddrMode::Imm => {
                self.addr_abs = self.pc;
                self.pc = self.pc.wrapping_add(1);
                0
            }
            AddrMode::Zp0 => {
                self.addr_abs = self.fetch_byte(bus) as u16;
                0
            }
            AddrMode::Zpx => {
                self.addr_abs = self.fetch_byte(bus).wrapping_add(self.x) as u16;
                0
            }
            AddrMode::Zpy => {
                self.addr_abs = self.fetch_byte(bus).wrapping_add(self.y) as u16;
                0
            }
            AddrMode::Rel => {
                let offset = self.fetch_byte(bus) as i8;
                self.addr_abs = self.pc.wrapping_add(offset as u16);
                0
            }
            AddrMode::Abs => {
                self.addr_abs = self.fetch_word(bus);
                0
            }
            AddrMode::Abx => {
                let base = self.fetch_word(bus);
                self.addr_abs = base.wrapping_add(self.x as u16);
                page_crossed(base, self.addr_abs)
            }
            AddrMode::Aby => {
                let base = self.fetch_word(bus);
                self.addr_abs = base.wrapping_add(self.y as u16);
                page_crossed(base, self.addr_abs)
            }
            AddrMode::Ind => {
                let ptr = self.fetch_word(bus);
                // High byte comes from the same page when the pointer sits on $xxFF.
                let hi_addr = if ptr & 0x00FF == 0x00FF {
                    ptr & 0xFF00
                } else {
                    ptr.wrapping_add(1)
                };
                let lo = bus.read(ptr) as u16;
                let hi = bus.read(hi_addr) as u16;
                self.addr_abs = (hi << 8) | lo;
                0
            }
            AddrMode::Izx => {
                let ptr = self.fetch_byte(bus).wrapping_add(self.x);
                let lo = bus.read(ptr as u16) as u16;
                let hi = bus.read(ptr.wrapping_add(1) as u16) as u16;
                self.addr_abs = (hi << 8) | lo;
                0
            }
            AddrMode::Izy => {
                let ptr = self.fetch_byte(bus);
                let lo = bus.read(ptr as u16) as u16;
                let hi = bus.read(ptr.wrapping_add(1) as u16) as u16;
                let base = (hi << 8) | lo;
                self.addr_abs = base.wrapping_add(self.y as u16);
                page_crossed(base, self.addr_abs)
            }
        }
    }

    /// Operand for the current instruction; implied mode already holds A.
    pub(super) fn fetch<B: Bus>(&mut self, bus: &mut B) -> u8 {
        if self.mode != AddrMode::Imp {
            self.fetched = bus.read(self.addr_abs);
        }
        self.fetched
    }
}

fn page_crossed(base: u16, addr: u16) -> u8 {
    ((base & 0xFF00) != (addr & 0xFF00)) as u8
}

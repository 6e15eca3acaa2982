//! PPU address space: pattern tables (cartridge CHR), nametables, and palette RAM.
//!
//! See [PPU memory map](https://www.nesdev.org/wiki/PPU_memory_map) and
//! [Mirroring](https://www.nesdev.org/wiki/Mirroring).

use crate::{
    cartridge::{cartridge::Cartridge, mapper::Mirroring},
    ppu::{ppu::PPU, registers::MASK_GRAYSCALE},
};

impl PPU {
    /// Read from PPU address space ($0000–$3FFF, mirrored above).
    pub fn ppu_read(&self, addr: u16, cart: &Cartridge) -> u8 {
        let addr = addr & 0x3FFF;

        if addr >= 0x3F00 {
            let mask = if self.mask & MASK_GRAYSCALE != 0 {
                0x30
            } else {
                0x3F
            };
            return self.palette[Self::palette_index(addr)] & mask;
        }

        if let Some(value) = cart.ppu_read(addr) {
            return value;
        }

        match addr {
            0x2000..=0x3EFF => self.nametable[Self::map_nametable_addr(addr, cart.mirroring())],
            _ => 0,
        }
    }

    /// Write to PPU address space. CHR ROM writes are dropped by the cartridge.
    pub fn ppu_write(&mut self, addr: u16, data: u8, cart: &mut Cartridge) {
        let addr = addr & 0x3FFF;

        if addr >= 0x3F00 {
            self.palette[Self::palette_index(addr)] = data;
            return;
        }

        if cart.ppu_write(addr, data) {
            return;
        }

        if let 0x2000..=0x3EFF = addr {
            let index = Self::map_nametable_addr(addr, cart.mirroring());
            self.nametable[index] = data;
        }
    }

    /// Resolve palette address $3F00–$3FFF to a 32-byte index.
    /// $3F10/$3F14/$3F18/$3F1C alias the background entries $3F00/$3F04/$3F08/$3F0C.
    pub fn palette_index(addr: u16) -> usize {
        let i = (addr & 0x1F) as usize;
        match i {
            0x10 | 0x14 | 0x18 | 0x1C => i - 0x10,
            _ => i,
        }
    }

    /// Map nametable address ($2000–$3EFF) to an index into the 2 KiB of internal VRAM.
    pub fn map_nametable_addr(addr: u16, mirroring: Mirroring) -> usize {
        let addr = (addr & 0x0FFF) as usize;
        let table = addr / 0x400;
        let offset = addr & 0x3FF;

        let physical = match mirroring {
            Mirroring::Vertical => table & 1,
            Mirroring::Horizontal | Mirroring::HardwareDetermined => table >> 1,
            Mirroring::OneScreenLow => 0,
            Mirroring::OneScreenHigh => 1,
        };
        physical * 0x400 + offset
    }
}

//! CPU-facing PPU registers $2000–$2007 (mirrored every 8 bytes up to $3FFF).
//!
//! See [PPU registers](https://www.nesdev.org/wiki/PPU_registers).

use crate::{cartridge::cartridge::Cartridge, ppu::ppu::PPU};

// PPUCTRL ($2000)
pub const CTRL_NAMETABLE_X: u8 = 1 << 0;
pub const CTRL_NAMETABLE_Y: u8 = 1 << 1;
pub const CTRL_INCREMENT_32: u8 = 1 << 2;
pub const CTRL_SPRITE_PATTERN: u8 = 1 << 3;
pub const CTRL_BACKGROUND_PATTERN: u8 = 1 << 4;
pub const CTRL_SPRITE_SIZE_16: u8 = 1 << 5;
pub const CTRL_ENABLE_NMI: u8 = 1 << 7;

// PPUMASK ($2001)
pub const MASK_GRAYSCALE: u8 = 1 << 0;
pub const MASK_BACKGROUND_LEFT: u8 = 1 << 1;
pub const MASK_SPRITES_LEFT: u8 = 1 << 2;
pub const MASK_BACKGROUND: u8 = 1 << 3;
pub const MASK_SPRITES: u8 = 1 << 4;

// PPUSTATUS ($2002)
pub const STATUS_SPRITE_OVERFLOW: u8 = 1 << 5;
pub const STATUS_SPRITE_ZERO_HIT: u8 = 1 << 6;
pub const STATUS_VBLANK: u8 = 1 << 7;

impl PPU {
    /// CPU read of register `reg` (0–7).
    pub fn cpu_read(&mut self, reg: u16, cart: &Cartridge) -> u8 {
        match reg & 7 {
            2 => {
                // Low five bits are stale bus contents.
                let value = (self.status & 0xE0) | (self.data_buffer & 0x1F);

                // Reading one dot before VBlank is set suppresses it (and its NMI) for this frame.
                if self.scanline == 241 && self.cycle == 0 {
                    self.suppress_vblank = true;
                }

                self.status &= !STATUS_VBLANK;
                self.address_latch = false;
                value
            }
            4 => {
                // Secondary OAM clear drives $FF onto the bus.
                if self.rendering() && self.scanline < 240 && (1..=64).contains(&self.cycle) {
                    0xFF
                } else {
                    self.oam[self.oam_addr as usize]
                }
            }
            7 => {
                let addr = self.vram.get();
                let mut value = self.data_buffer;
                self.data_buffer = self.ppu_read(addr, cart);

                // Palette reads are not delayed; the buffer gets the nametable byte underneath.
                if addr & 0x3FFF >= 0x3F00 {
                    value = self.data_buffer;
                    self.data_buffer = self.ppu_read(addr.wrapping_sub(0x1000), cart);
                }

                self.vram.advance(self.vram_increment());
                value
            }
            // Write-only registers read back the last value written to the PPU.
            _ => self.latch,
        }
    }

    /// CPU write of `data` to register `reg` (0–7).
    pub fn cpu_write(&mut self, reg: u16, data: u8, cart: &mut Cartridge) {
        self.latch = data;

        match reg & 7 {
            0 => {
                let old = self.ctrl;
                self.ctrl = data;

                // NMI is edge triggered: enabling it inside VBlank fires at once.
                if old & CTRL_ENABLE_NMI == 0
                    && data & CTRL_ENABLE_NMI != 0
                    && self.status & STATUS_VBLANK != 0
                {
                    self.nmi = true;
                }

                self.tram.set_nametable_x((data & CTRL_NAMETABLE_X) as u16);
                self.tram.set_nametable_y(((data & CTRL_NAMETABLE_Y) >> 1) as u16);
            }
            1 => self.mask = data,
            3 => self.oam_addr = data,
            4 => {
                self.oam[self.oam_addr as usize] = data;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            5 => {
                if !self.address_latch {
                    self.fine_x = data & 0x07;
                    self.tram.set_coarse_x((data >> 3) as u16);
                    self.address_latch = true;
                } else {
                    self.tram.set_fine_y((data & 0x07) as u16);
                    self.tram.set_coarse_y((data >> 3) as u16);
                    self.address_latch = false;
                }
            }
            6 => {
                if !self.address_latch {
                    let low = self.tram.get() & 0x00FF;
                    self.tram.set((((data & 0x3F) as u16) << 8) | low);
                    self.address_latch = true;
                } else {
                    let high = self.tram.get() & 0xFF00;
                    self.tram.set(high | data as u16);
                    self.vram = self.tram;
                    self.address_latch = false;
                }
            }
            7 => {
                self.ppu_write(self.vram.get(), data, cart);
                self.vram.advance(self.vram_increment());
            }
            _ => {}
        }
    }

    fn vram_increment(&self) -> u16 {
        if self.ctrl & CTRL_INCREMENT_32 != 0 {
            32
        } else {
            1
        }
    }
}

//! Mapper 1 (MMC1): bank switching via 5-bit shift register.
//!
//! [MMC1](https://www.nesdev.org/wiki/MMC1): writes to $8000–$9FFF (control), $A000–$BFFF (CHR0),
//! $C000–$DFFF (CHR1), $E000–$FFFF (PRG bank). Any write with bit 7 set resets the shift register and
//! forces PRG mode 3. Otherwise, bit 0 is shifted in (LSB first); after 5 writes, the value is latched to
//! the register selected by address bits 13–14. Control bits 0–1 = mirroring; bits 2–3 = PRG mode;
//! bit 4 = CHR mode. $6000–$7FFF holds 8 KiB of PRG RAM.

use log::debug;

use crate::cartridge::mapper::{CpuRead, CpuWrite, Mirroring, mapper::Mapper};

/// MMC1 state: 5-bit shift register, control byte (mirroring + PRG/CHR mode), CHR and PRG bank selects.
pub struct Mapper1 {
    prg_banks: usize,
    chr_banks: usize,
    shift_reg: u8,
    shift_count: u8,
    control: u8,
    chr_bank0: u8,
    chr_bank1: u8,
    prg_bank: u8,
    prg_ram: [u8; 0x2000],
}

impl Mapper1 {
    /// Create MMC1 for the given bank counts, in its power-on state.
    pub fn new(prg_banks: usize, chr_banks: usize) -> Self {
        let mut mapper = Self {
            prg_banks,
            chr_banks,
            shift_reg: 0,
            shift_count: 0,
            control: 0,
            chr_bank0: 0,
            chr_bank1: 0,
            prg_bank: 0,
            prg_ram: [0; 0x2000],
        };
        mapper.reset();
        mapper
    }

    /// PRG bank mode from control bits 2–3: 0/1 = 32 KiB mode; 2 = $8000 fixed first, $C000 switchable;
    /// 3 = $8000 switchable, $C000 fixed last.
    fn prg_bank_mode(&self) -> u8 {
        (self.control >> 2) & 0b11
    }

    fn chr_4k_mode(&self) -> bool {
        self.control & 0x10 != 0
    }

    fn prg_offset(&self, addr: u16) -> usize {
        let last = self.prg_banks.saturating_sub(1);
        let bank_16k = |bank: usize| bank * 0x4000 + (addr & 0x3FFF) as usize;

        match self.prg_bank_mode() {
            0 | 1 => {
                let bank = ((self.prg_bank & 0x0E) >> 1) as usize;
                bank * 0x8000 + (addr & 0x7FFF) as usize
            }
            2 => {
                if addr < 0xC000 {
                    bank_16k(0)
                } else {
                    bank_16k((self.prg_bank & 0x0F) as usize)
                }
            }
            _ => {
                if addr < 0xC000 {
                    bank_16k((self.prg_bank & 0x0F) as usize)
                } else {
                    bank_16k(last)
                }
            }
        }
    }

    /// Latch the completed 5-bit value into the register picked by address bits 13–14.
    fn commit(&mut self, addr: u16, value: u8) {
        match (addr >> 13) & 0x03 {
            0 => self.control = value,
            1 => self.chr_bank0 = value,
            2 => self.chr_bank1 = value,
            _ => self.prg_bank = value,
        }
        debug!(
            "MMC1 ${:04X} <- {:05b} (control {:05b})",
            addr, value, self.control
        );
    }
}

impl Mapper for Mapper1 {
    fn map_cpu_read(&self, addr: u16) -> Option<CpuRead> {
        match addr {
            0x6000..=0x7FFF => Some(CpuRead::Value(self.prg_ram[(addr & 0x1FFF) as usize])),
            0x8000..=0xFFFF => Some(CpuRead::Rom(self.prg_offset(addr))),
            _ => None,
        }
    }

    fn map_cpu_write(&mut self, addr: u16, data: u8) -> Option<CpuWrite> {
        match addr {
            0x6000..=0x7FFF => {
                self.prg_ram[(addr & 0x1FFF) as usize] = data;
                Some(CpuWrite::Absorbed)
            }
            0x8000..=0xFFFF => {
                // Bit 7 resets the shift register and forces PRG mode 3.
                if data & 0x80 != 0 {
                    self.shift_reg = 0;
                    self.shift_count = 0;
                    self.control |= 0x0C;
                    return Some(CpuWrite::Absorbed);
                }

                // Shift in bit 0; after 5 writes, latch to the register selected by address.
                self.shift_reg >>= 1;
                self.shift_reg |= (data & 1) << 4;
                self.shift_count += 1;

                if self.shift_count == 5 {
                    let value = self.shift_reg & 0x1F;
                    self.commit(addr, value);
                    self.shift_reg = 0;
                    self.shift_count = 0;
                }
                Some(CpuWrite::Absorbed)
            }
            _ => None,
        }
    }

    fn map_ppu_read(&self, addr: u16) -> Option<usize> {
        if addr > 0x1FFF {
            return None;
        }
        if self.chr_banks == 0 {
            return Some(addr as usize);
        }
        let offset = if self.chr_4k_mode() {
            let bank = if addr < 0x1000 {
                self.chr_bank0
            } else {
                self.chr_bank1
            };
            bank as usize * 0x1000 + (addr & 0x0FFF) as usize
        } else {
            // 8K mode ignores the low bit of CHR0.
            (self.chr_bank0 & 0x1E) as usize * 0x1000 + (addr & 0x1FFF) as usize
        };
        Some(offset)
    }

    fn map_ppu_write(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF if self.chr_banks == 0 => Some(addr as usize),
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.control = 0x1C;
        self.shift_reg = 0;
        self.shift_count = 0;
        self.chr_bank0 = 0;
        self.chr_bank1 = 0;
        self.prg_bank = 0;
    }

    /// Mirroring from control bits 0–1: 0 = one-screen lower, 1 = one-screen upper, 2 = vertical, 3 = horizontal.
    fn mirroring(&self) -> Mirroring {
        match self.control & 0b11 {
            0 => Mirroring::OneScreenLow,
            1 => Mirroring::OneScreenHigh,
            2 => Mirroring::Vertical,
            _ => Mirroring::Horizontal,
        }
    }
}

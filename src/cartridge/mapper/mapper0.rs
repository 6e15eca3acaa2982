//! Mapper 0 (NROM): no bank switching, 16/32KB PRG, 8KB CHR.

use crate::cartridge::mapper::{CpuRead, CpuWrite, Mirroring, mapper::Mapper};

/// NROM mapper: fixed PRG and CHR. A 16KB PRG image is mirrored into $C000–$FFFF.
pub struct Mapper0 {
    prg_banks: usize,
    chr_banks: usize,
}

impl Mapper0 {
    /// Create Mapper0 for a board with the given bank counts (`chr_banks == 0` means CHR RAM).
    pub fn new(prg_banks: usize, chr_banks: usize) -> Self {
        Self {
            prg_banks,
            chr_banks,
        }
    }

    fn prg_offset(&self, addr: u16) -> usize {
        let mask = if self.prg_banks > 1 { 0x7FFF } else { 0x3FFF };
        (addr & mask) as usize
    }
}

impl Mapper for Mapper0 {
    fn map_cpu_read(&self, addr: u16) -> Option<CpuRead> {
        match addr {
            0x8000..=0xFFFF => Some(CpuRead::Rom(self.prg_offset(addr))),
            _ => None,
        }
    }

    fn map_cpu_write(&mut self, addr: u16, _data: u8) -> Option<CpuWrite> {
        match addr {
            0x8000..=0xFFFF => Some(CpuWrite::Rom(self.prg_offset(addr))),
            _ => None,
        }
    }

    fn map_ppu_read(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF => Some(addr as usize),
            _ => None,
        }
    }

    fn map_ppu_write(&self, addr: u16) -> Option<usize> {
        match addr {
            // CHR RAM only if the board has no CHR ROM
            0x0000..=0x1FFF if self.chr_banks == 0 => Some(addr as usize),
            _ => None,
        }
    }

    fn reset(&mut self) {}

    fn mirroring(&self) -> Mirroring {
        Mirroring::HardwareDetermined
    }
}

//! Cartridge: PRG/CHR storage plus the mapper that addresses it.
//!
//! The [Mapper](https://www.nesdev.org/wiki/Mapper) implements CPU PRG ($6000–$FFFF) and PPU CHR
//! ($0000–$1FFF) address decoding and bank switching; the cartridge owns the bytes and resolves the
//! offsets the mapper hands back.

use std::path::Path;

use log::{info, trace};

use crate::cartridge::mapper::mapper::Mapper;
use crate::cartridge::mapper::mapper0::Mapper0;
use crate::cartridge::mapper::mapper1::Mapper1;
use crate::cartridge::mapper::{CpuRead, CpuWrite, Mirroring};
use crate::cartridge::rom::{CHR_BANK_SIZE, LoadError, RomImage};

/// Cartridge: holds PRG/CHR and the mapper that implements read/write and nametable mirroring.
/// CPU reads PRG via bus at $8000–$FFFF; PPU reads CHR at $0000–$1FFF (pattern tables).
pub struct Cartridge {
    prg_rom: Vec<u8>,
    /// CHR ROM, or 8 KiB of CHR RAM when the header declares no CHR banks.
    chr: Vec<u8>,
    hardware_mirroring: Mirroring,
    mapper_id: u16,
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    /// Build a cartridge from a decoded image. Mapper ids other than 0 and 1 are rejected.
    pub fn new(rom: RomImage) -> Result<Self, LoadError> {
        let prg_banks = rom.prg_banks();
        let chr_banks = rom.chr_banks();

        let mapper: Box<dyn Mapper> = match rom.mapper_id {
            0 => Box::new(Mapper0::new(prg_banks, chr_banks)),
            1 => Box::new(Mapper1::new(prg_banks, chr_banks)),
            id => return Err(LoadError::UnsupportedMapper(id)),
        };

        let chr = if chr_banks == 0 {
            vec![0; CHR_BANK_SIZE]
        } else {
            rom.chr_rom
        };

        info!(
            "cartridge: mapper {}, {} x 16K PRG, {} x 8K CHR{}, {:?} mirroring",
            rom.mapper_id,
            prg_banks,
            chr_banks,
            if chr_banks == 0 { " (RAM)" } else { "" },
            rom.mirroring
        );

        Ok(Self {
            prg_rom: rom.prg_rom,
            chr,
            hardware_mirroring: rom.mirroring,
            mapper_id: rom.mapper_id,
            mapper,
        })
    }

    /// Load cartridge from an iNES file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::new(RomImage::load(path)?)
    }

    pub fn mapper_id(&self) -> u16 {
        self.mapper_id
    }

    /// CPU read; `None` if the cartridge does not claim `addr`.
    pub fn cpu_read(&self, addr: u16) -> Option<u8> {
        match self.mapper.map_cpu_read(addr)? {
            CpuRead::Rom(offset) => Some(wrapped(&self.prg_rom, offset)),
            CpuRead::Value(value) => Some(value),
        }
    }

    /// CPU write; returns true if the cartridge claimed it.
    pub fn cpu_write(&mut self, addr: u16, data: u8) -> bool {
        match self.mapper.map_cpu_write(addr, data) {
            Some(CpuWrite::Rom(offset)) => {
                trace!("dropped write ${:02X} to PRG ROM offset {:#06X}", data, offset);
                true
            }
            Some(CpuWrite::Absorbed) => true,
            None => false,
        }
    }

    /// PPU read from the pattern tables; `None` if unclaimed.
    pub fn ppu_read(&self, addr: u16) -> Option<u8> {
        let offset = self.mapper.map_ppu_read(addr)?;
        Some(wrapped(&self.chr, offset))
    }

    /// PPU write to CHR RAM; returns true if the cartridge claimed it.
    pub fn ppu_write(&mut self, addr: u16, data: u8) -> bool {
        match self.mapper.map_ppu_write(addr) {
            Some(offset) => {
                if !self.chr.is_empty() {
                    let len = self.chr.len();
                    self.chr[offset % len] = data;
                }
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.mapper.reset();
    }

    /// Effective mirroring: the mapper's choice, or the header's solder-pad setting.
    pub fn mirroring(&self) -> Mirroring {
        match self.mapper.mirroring() {
            Mirroring::HardwareDetermined => self.hardware_mirroring,
            mode => mode,
        }
    }

    pub fn irq_state(&self) -> bool {
        self.mapper.irq_state()
    }

    pub fn irq_clear(&mut self) {
        self.mapper.irq_clear();
    }

    /// Scanline notification from the PPU.
    pub fn scanline(&mut self) {
        self.mapper.scanline();
    }
}

/// Index `buf` modulo its length, so a bank register pointing past the image reads a mirror.
fn wrapped(buf: &[u8], offset: usize) -> u8 {
    if buf.is_empty() {
        0
    } else {
        buf[offset % buf.len()]
    }
}

//! iNES / NES 2.0 image decoding.
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) container: 16-byte header (magic "NES\x1A",
//! PRG size in 16 KiB units, CHR size in 8 KiB units, flags 6–7 for mapper and mirroring), an optional
//! 512-byte trainer, then PRG ROM, then CHR ROM. [NES 2.0](https://www.nesdev.org/wiki/NES_2.0) headers
//! (flags 7 bits 2–3 == 0b10) extend the bank counts with the high nibbles stored in byte 9.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::cartridge::mapper::Mirroring;

/// Size of one PRG ROM bank as counted by the header.
pub const PRG_BANK_SIZE: usize = 16 * 1024;
/// Size of one CHR ROM bank as counted by the header.
pub const CHR_BANK_SIZE: usize = 8 * 1024;

const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const MAGIC: [u8; 4] = *b"NES\x1A";

/// Everything that can go wrong turning a file into a [`RomImage`] or a cartridge.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read ROM file: {0}")]
    Io(#[from] std::io::Error),
    #[error("not an iNES image (bad magic)")]
    BadMagic,
    #[error("image truncated: header declares {expected} bytes, file has {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("unsupported mapper {0}")]
    UnsupportedMapper(u16),
}

/// Decoded cartridge contents. `chr_rom` is empty when the board carries CHR RAM instead.
#[derive(Debug, Clone)]
pub struct RomImage {
    pub prg_rom: Vec<u8>,
    pub chr_rom: Vec<u8>,
    pub mapper_id: u16,
    /// Solder-pad mirroring from header byte 6 bit 0.
    pub mirroring: Mirroring,
}

impl RomImage {
    /// Read and decode an image from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Decode an in-memory image.
    pub fn parse(data: &[u8]) -> Result<Self, LoadError> {
        if data.len() < HEADER_LEN {
            return Err(LoadError::Truncated {
                expected: HEADER_LEN,
                actual: data.len(),
            });
        }
        if data[0..4] != MAGIC {
            return Err(LoadError::BadMagic);
        }

        let flags6 = data[6];
        let flags7 = data[7];
        let nes2 = flags7 & 0x0C == 0x08;

        let (prg_banks, chr_banks) = if nes2 {
            (
                (((data[9] & 0x0F) as usize) << 8) | data[4] as usize,
                (((data[9] & 0xF0) as usize) << 4) | data[5] as usize,
            )
        } else {
            (data[4] as usize, data[5] as usize)
        };

        // Mapper number: low nibble from flags 6, high nibble from flags 7.
        let mapper_id = ((flags7 & 0xF0) | (flags6 >> 4)) as u16;
        let mirroring = if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let mut offset = HEADER_LEN;
        if flags6 & 0x04 != 0 {
            offset += TRAINER_LEN;
        }

        let prg_len = prg_banks * PRG_BANK_SIZE;
        let chr_len = chr_banks * CHR_BANK_SIZE;
        let expected = offset + prg_len + chr_len;
        if data.len() < expected {
            return Err(LoadError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let prg_rom = data[offset..offset + prg_len].to_vec();
        offset += prg_len;
        let chr_rom = data[offset..offset + chr_len].to_vec();

        Ok(Self {
            prg_rom,
            chr_rom,
            mapper_id,
            mirroring,
        })
    }

    /// Number of 16 KiB PRG banks.
    pub fn prg_banks(&self) -> usize {
        self.prg_rom.len() / PRG_BANK_SIZE
    }

    /// Number of 8 KiB CHR banks; 0 means the cartridge uses CHR RAM.
    pub fn chr_banks(&self) -> usize {
        self.chr_rom.len() / CHR_BANK_SIZE
    }
}

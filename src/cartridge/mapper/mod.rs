//! NES mappers for PRG/CHR memory mapping.
//!
//! Mapper0 (NROM), Mapper1 (MMC1), and the types shared between a mapper and its cartridge.

/// Nametable mirroring mode for PPU.
///
/// See [Mirroring](https://www.nesdev.org/wiki/Mirroring). `HardwareDetermined` means the board is
/// wired by solder pads; the cartridge substitutes the header's hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    OneScreenLow,
    OneScreenHigh,
    HardwareDetermined,
}

/// Result of a claimed CPU read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuRead {
    /// Byte offset into the cartridge's PRG ROM.
    Rom(usize),
    /// Value produced by the mapper itself (e.g. on-board PRG RAM).
    Value(u8),
}

/// Result of a claimed CPU write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuWrite {
    /// Write lands on PRG ROM at this offset; ROM is immutable so the cartridge drops it.
    Rom(usize),
    /// Write was consumed by a mapper register or PRG RAM.
    Absorbed,
}

pub mod mapper;

pub mod mapper0;
pub mod mapper1;

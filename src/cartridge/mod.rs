//! NES cartridge loading and mapper support.
//!
//! - **rom**: Decodes iNES / NES 2.0 (.nes) images into PRG/CHR buffers, mapper id, and mirroring.
//! - **cartridge**: Owns PRG/CHR and the mapper; resolves mapper offsets into bytes.
//! - **mapper**: NROM (0), MMC1 (1); PRG/CHR bank switching and nametable mirroring.

pub mod cartridge;
pub mod mapper;
pub mod rom;

//! In-memory iNES images for driving a whole console.

#![allow(dead_code)]

use nesbox::{cartridge::cartridge::Cartridge, nes::Nes};

pub const PRG_BANK: usize = 16 * 1024;
pub const CHR_BANK: usize = 8 * 1024;

/// Where the NMI/IRQ handler lives in the NROM image. It counts interrupts in zero page.
pub const HANDLER: u16 = 0x9000;
/// Zero-page byte the handler increments.
pub const INTERRUPT_COUNT: usize = 0x10;

/// Wrap PRG/CHR in a 16-byte iNES header.
pub fn ines(prg: &[u8], chr: &[u8], mapper: u8, vertical: bool) -> Vec<u8> {
    let flags6 = (mapper << 4) | vertical as u8;
    let flags7 = mapper & 0xF0;
    let mut data = vec![
        b'N',
        b'E',
        b'S',
        0x1A,
        (prg.len() / PRG_BANK) as u8,
        (chr.len() / CHR_BANK) as u8,
        flags6,
        flags7,
    ];
    data.resize(16, 0);
    data.extend_from_slice(prg);
    data.extend_from_slice(chr);
    data
}

/// One 16K PRG bank of NOPs with `program` at $8000 and 8K of CHR ROM. Reset enters at $8000,
/// NMI and IRQ at [`HANDLER`].
pub fn nrom(program: &[u8], vertical: bool) -> Vec<u8> {
    let mut prg = vec![0xEA; PRG_BANK];
    prg[..program.len()].copy_from_slice(program);
    let handler = (HANDLER & 0x3FFF) as usize;
    prg[handler..handler + 3].copy_from_slice(&[0xE6, INTERRUPT_COUNT as u8, 0x40]); // INC zp; RTI
    set_vectors(&mut prg, 0x8000, HANDLER);
    ines(&prg, &vec![0; CHR_BANK], 0, vertical)
}

/// Write NMI, reset and IRQ vectors into the last 6 bytes of a PRG image.
pub fn set_vectors(prg: &mut [u8], reset: u16, handler: u16) {
    let end = prg.len();
    prg[end - 6..].copy_from_slice(&[
        handler as u8,
        (handler >> 8) as u8,
        reset as u8,
        (reset >> 8) as u8,
        handler as u8,
        (handler >> 8) as u8,
    ]);
}

pub fn boot(image: &[u8]) -> Nes {
    let rom = nesbox::cartridge::rom::RomImage::parse(image).unwrap();
    Nes::new(Cartridge::new(rom).unwrap())
}

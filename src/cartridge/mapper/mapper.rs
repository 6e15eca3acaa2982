//! Mapper trait: address translation, bank-select state, and mirroring.

use crate::cartridge::mapper::{CpuRead, CpuWrite, Mirroring};

/// Trait for NES cartridge mappers.
///
/// A mapper never touches ROM bytes. It translates CPU/PPU addresses into offsets that the
/// [`Cartridge`](crate::cartridge::cartridge::Cartridge) resolves against the buffers it owns.
/// Returning `None` means the address is not claimed by the cartridge.
pub trait Mapper {
    /// CPU read in $0000–$FFFF (normally $6000–$FFFF).
    fn map_cpu_read(&self, addr: u16) -> Option<CpuRead>;
    /// CPU write; bank-select registers latch here.
    fn map_cpu_write(&mut self, addr: u16, data: u8) -> Option<CpuWrite>;
    /// PPU pattern-table read ($0000–$1FFF) to a CHR offset.
    fn map_ppu_read(&self, addr: u16) -> Option<usize>;
    /// PPU pattern-table write; only CHR RAM boards claim these.
    fn map_ppu_write(&self, addr: u16) -> Option<usize>;
    /// Power-on / reset-button state.
    fn reset(&mut self);
    /// Current nametable mirroring.
    fn mirroring(&self) -> Mirroring;

    /// True while the mapper asserts /IRQ.
    fn irq_state(&self) -> bool {
        false
    }

    /// Acknowledge a pending IRQ.
    fn irq_clear(&mut self) {}

    /// Called by the PPU once per rendered scanline (dot 260).
    fn scanline(&mut self) {}
}

//! System bus: CPU address decoding, the master clock, and OAM DMA.
//!
//! - **nes_bus**: [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map) over RAM, PPU,
//!   APU, controllers and cartridge; drives every component from one system tick.
//! - **dma**: [OAM DMA](https://www.nesdev.org/wiki/PPU_registers#OAMDMA) transfer state ($4014).

pub mod dma;
pub mod nes_bus;

#[cfg(test)]
mod tests;

/// CPU-visible memory. The CPU is handed one of these on every call instead of owning it.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}

//! nesbox: a cycle-stepped NES (Nintendo Entertainment System) emulator core.
//!
//! Implements the NES chipset as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide): Ricoh 2A03 (CPU+APU),
//! 2C02 PPU, cartridge mappers, and controller I/O.
//!
//! ## Modules (NESdev references)
//!
//! - **apu** – [APU](https://www.nesdev.org/wiki/APU): pulse×2, noise, frame counter,
//!   [APU Mixer](https://www.nesdev.org/wiki/APU_Mixer)
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map): RAM, PPU, APU,
//!   controllers, cartridge; system clock (3 PPU dots per CPU cycle) and OAM DMA
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading; [Mapper](https://www.nesdev.org/wiki/Mapper) NROM (0), MMC1 (1)
//! - **controller** – [Controller reading](https://www.nesdev.org/wiki/Controller_reading): $4016 latch, shift-out
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU) / 2A03: official opcodes (undocumented ones decode as NOPs), [NMI](https://www.nesdev.org/wiki/NMI)
//! - **nes** – the console: CPU plus bus, stepped by tick, instruction or frame
//! - **ppu** – [PPU](https://www.nesdev.org/wiki/PPU), [PPU registers](https://www.nesdev.org/wiki/PPU_registers), OAM, nametables, 256×240

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod nes;
pub mod ppu;

//! 6502 CPU emulation for the NES.
//!
//! Table-driven decode: every opcode maps to an instruction, an addressing mode, and a base cycle
//! count. The CPU never owns memory; each call receives the [`Bus`](crate::bus::Bus) it runs against.

pub mod addressing;
pub mod cpu;
pub mod flags;
pub mod instructions;
pub mod table;

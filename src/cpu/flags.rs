//! 6502 processor status register (P) flag bits.

pub const FLAG_CARRY: u8 = 1 << 0;
pub const FLAG_ZERO: u8 = 1 << 1;
pub const FLAG_INTERRUPT_DISABLE: u8 = 1 << 2;
pub const FLAG_DECIMAL: u8 = 1 << 3;  // 2A03 has no decimal mode; flag is storage only
pub const FLAG_BREAK: u8 = 1 << 4;    // Only exists in the pushed copy of P
pub const FLAG_UNUSED: u8 = 1 << 5;   // Always 1 when read on 6502
pub const FLAG_OVERFLOW: u8 = 1 << 6;
pub const FLAG_NEGATIVE: u8 = 1 << 7;

/// Mnemonic letters for P, bit 7 first, as printed in trace output.
pub fn describe(status: u8) -> String {
    "NVUBDIZC"
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if status & (0x80 >> i) != 0 {
                c
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

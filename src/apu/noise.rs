//! Noise channel ($400C–$400F): envelope, 15-bit LFSR, period from $400E, length counter.
//!
//! See [APU Noise](https://www.nesdev.org/wiki/APU_Noise).

use crate::apu::units::{Envelope, LengthCounter};

/// NTSC period table: 4-bit index from $400E → period in CPU cycles.
const NOISE_PERIOD_TABLE: [u16; 16] = [
    4, 8, 16, 32, 64, 96, 128, 160, 202, 254, 380, 508, 762, 1016, 2034, 4068,
];

pub struct Noise {
    /// Short mode: feedback from bit 6 instead of bit 1 (metallic tone).
    mode: bool,
    period: u16,
    timer: u16,
    shift: u16,
    pub(super) envelope: Envelope,
    pub(super) length: LengthCounter,
}

impl Default for Noise {
    fn default() -> Self {
        Self::new()
    }
}

impl Noise {
    pub fn new() -> Self {
        Self {
            mode: false,
            period: NOISE_PERIOD_TABLE[0],
            timer: 0,
            shift: 1,
            envelope: Envelope::default(),
            length: LengthCounter::default(),
        }
    }

    /// Register write; `reg` is the offset 0–3 within the channel ($400C–$400F).
    pub fn write(&mut self, reg: u16, data: u8) {
        match reg & 3 {
            0 => {
                self.length.halt = data & 0x20 != 0;
                self.envelope.write(data);
            }
            2 => {
                self.mode = data & 0x80 != 0;
                self.period = NOISE_PERIOD_TABLE[(data & 0x0F) as usize];
            }
            3 => {
                self.length.load(data >> 3);
                self.envelope.start = true;
            }
            _ => {}
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.length.set_enabled(enabled);
    }

    /// Advance the timer by one CPU cycle; steps the LFSR on expiry.
    pub fn clock_timer(&mut self) {
        if self.timer > 0 {
            self.timer -= 1;
            return;
        }
        self.timer = self.period;

        let tap = if self.mode { 6 } else { 1 };
        let feedback = (self.shift & 1) ^ ((self.shift >> tap) & 1);
        self.shift = (self.shift >> 1) | (feedback << 14);
    }

    pub fn clock_envelope(&mut self) {
        self.envelope.clock();
    }

    pub fn clock_length(&mut self) {
        self.length.clock();
    }

    /// Current output level 0–15; bit 0 of the shift register set means silence.
    pub fn output(&self) -> u8 {
        if !self.length.active() || self.shift & 1 != 0 {
            return 0;
        }
        self.envelope.output()
    }
}

//! Pulse channel ($4000–$4003 = pulse 1, $4004–$4007 = pulse 2).
//!
//! Duty sequencer, envelope, sweep and length counter over an 11-bit timer clocked every APU
//! cycle (two CPU cycles). See [APU Pulse](https://www.nesdev.org/wiki/APU_Pulse) and
//! [APU Sweep](https://www.nesdev.org/wiki/APU_Sweep).

use crate::apu::units::{Envelope, LengthCounter};

/// Duty cycles (8 steps). Duty 0=12.5%, 1=25%, 2=50%, 3=25% negated. The sequencer steps
/// 0→7→6→…→1; output is the envelope volume when the step is 1, else 0.
const PULSE_DUTY: [[u8; 8]; 4] = [
    [0, 0, 0, 0, 0, 0, 0, 1], // 12.5%
    [0, 0, 0, 0, 0, 0, 1, 1], // 25%
    [0, 0, 0, 0, 1, 1, 1, 1], // 50%
    [1, 1, 1, 1, 1, 1, 0, 0], // 25% negated
];

/// Which pulse unit; they differ only in how sweep negation rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseUnit {
    /// Ones' complement negate: subtracts one extra.
    One,
    /// Two's complement negate.
    Two,
}

#[derive(Debug, Default)]
struct Sweep {
    enabled: bool,
    period: u8,
    negate: bool,
    shift: u8,
    divider: u8,
    reload: bool,
}

pub struct Pulse {
    unit: PulseUnit,
    duty: u8,
    step: u8,
    timer: u16,
    pub(super) timer_period: u16,
    pub(super) envelope: Envelope,
    pub(super) length: LengthCounter,
    sweep: Sweep,
}

impl Pulse {
    pub fn new(unit: PulseUnit) -> Self {
        Self {
            unit,
            duty: 0,
            step: 0,
            timer: 0,
            timer_period: 0,
            envelope: Envelope::default(),
            length: LengthCounter::default(),
            sweep: Sweep::default(),
        }
    }

    /// Register write; `reg` is the offset 0–3 within the channel.
    pub fn write(&mut self, reg: u16, data: u8) {
        match reg & 3 {
            0 => {
                self.duty = (data >> 6) & 3;
                self.length.halt = data & 0x20 != 0;
                self.envelope.write(data);
            }
            1 => {
                self.sweep.enabled = data & 0x80 != 0;
                self.sweep.period = (data >> 4) & 7;
                self.sweep.negate = data & 0x08 != 0;
                self.sweep.shift = data & 7;
                self.sweep.reload = true;
            }
            2 => self.timer_period = (self.timer_period & 0x0700) | data as u16,
            _ => {
                self.timer_period = (self.timer_period & 0x00FF) | ((data & 7) as u16) << 8;
                self.length.load(data >> 3);
                self.envelope.start = true;
                self.step = 0;
            }
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.length.set_enabled(enabled);
    }

    /// Advance the timer by one APU cycle.
    pub fn clock_timer(&mut self) {
        if self.timer > 0 {
            self.timer -= 1;
        } else {
            self.timer = self.timer_period;
            self.step = self.step.wrapping_sub(1) & 7;
        }
    }

    pub fn clock_envelope(&mut self) {
        self.envelope.clock();
    }

    pub fn clock_length(&mut self) {
        self.length.clock();
    }

    /// Half-frame sweep clock: maybe retune, then step the divider.
    pub fn clock_sweep(&mut self) {
        if self.sweep.divider == 0 && self.sweep.enabled && self.sweep.shift > 0 && !self.muted() {
            self.timer_period = self.target_period();
        }

        if self.sweep.divider == 0 || self.sweep.reload {
            self.sweep.divider = self.sweep.period;
            self.sweep.reload = false;
        } else {
            self.sweep.divider -= 1;
        }
    }

    /// Period the sweep unit is aiming for; computed continuously.
    pub fn target_period(&self) -> u16 {
        let change = self.timer_period >> self.sweep.shift;
        if self.sweep.negate {
            match self.unit {
                PulseUnit::One => self.timer_period.saturating_sub(change + 1),
                PulseUnit::Two => self.timer_period.saturating_sub(change),
            }
        } else {
            self.timer_period + change
        }
    }

    /// Periods below 8 or a sweep target past $7FF silence the channel even with sweep disabled.
    pub fn muted(&self) -> bool {
        self.timer_period < 8 || self.target_period() > 0x7FF
    }

    /// Current output level 0–15.
    pub fn output(&self) -> u8 {
        if !self.length.active()
            || self.muted()
            || PULSE_DUTY[self.duty as usize][self.step as usize] == 0
        {
            return 0;
        }
        self.envelope.output()
    }
}

//! Building blocks shared by the pulse and noise channels.
//!
//! See [APU Envelope](https://www.nesdev.org/wiki/APU_Envelope) and
//! [APU Length Counter](https://www.nesdev.org/wiki/APU_Length_Counter).

/// Length counter lookup table: 5-bit index from register → count.
pub const LENGTH_TABLE: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, 12, 16, 24, 18, 48, 20, 96, 22,
    192, 24, 72, 26, 16, 28, 32, 30,
];

/// Volume envelope: either a constant volume or a 15→0 decay, optionally looping.
#[derive(Debug, Default)]
pub struct Envelope {
    /// Set by a length-load write; the next quarter frame restarts the decay.
    pub start: bool,
    /// Loop the decay (shares the bit with length-counter halt).
    pub looping: bool,
    pub constant: bool,
    /// Constant volume, or the divider period in decay mode.
    pub volume: u8,
    divider: u8,
    decay: u8,
}

impl Envelope {
    /// Register bits 0–5 of $4000/$4004/$400C.
    pub fn write(&mut self, data: u8) {
        self.looping = data & 0x20 != 0;
        self.constant = data & 0x10 != 0;
        self.volume = data & 0x0F;
    }

    /// Quarter-frame clock.
    pub fn clock(&mut self) {
        if self.start {
            self.start = false;
            self.decay = 15;
            self.divider = self.volume;
        } else if self.divider > 0 {
            self.divider -= 1;
        } else {
            self.divider = self.volume;
            if self.decay > 0 {
                self.decay -= 1;
            } else if self.looping {
                self.decay = 15;
            }
        }
    }

    pub fn output(&self) -> u8 {
        if self.constant {
            self.volume
        } else {
            self.decay
        }
    }
}

/// Length counter: silences the channel when it runs out.
#[derive(Debug, Default)]
pub struct LengthCounter {
    pub counter: u8,
    pub halt: bool,
    enabled: bool,
}

impl LengthCounter {
    /// Load from the 5-bit table index; ignored while the channel is disabled.
    pub fn load(&mut self, index: u8) {
        if self.enabled {
            self.counter = LENGTH_TABLE[(index & 0x1F) as usize];
        }
    }

    /// $4015 enable bit. Disabling clears the counter.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.counter = 0;
        }
    }

    /// Half-frame clock.
    pub fn clock(&mut self) {
        if !self.halt && self.counter > 0 {
            self.counter -= 1;
        }
    }

    pub fn active(&self) -> bool {
        self.counter > 0
    }
}

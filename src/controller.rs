//! Standard NES controller.
//!
//! Writing $4016 latches the live button state into a shift register; each read of $4016 (port 1)
//! or $4017 (port 2) then returns one button, most significant bit first: A, B, Select, Start,
//! Up, Down, Left, Right. See [Standard controller](https://www.nesdev.org/wiki/Standard_controller).

pub const BUTTON_A: u8 = 0x80;
pub const BUTTON_B: u8 = 0x40;
pub const BUTTON_SELECT: u8 = 0x20;
pub const BUTTON_START: u8 = 0x10;
pub const BUTTON_UP: u8 = 0x08;
pub const BUTTON_DOWN: u8 = 0x04;
pub const BUTTON_LEFT: u8 = 0x02;
pub const BUTTON_RIGHT: u8 = 0x01;

#[derive(Debug, Default, Clone, Copy)]
pub struct Controller {
    /// Live button snapshot set by the frontend, one bit per `BUTTON_*`.
    pub state: u8,
    /// Shift register loaded from `state` on latch.
    pub shift: u8,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the live state into the shift register.
    pub fn latch(&mut self) {
        self.shift = self.state;
    }

    /// Next button: 1 if pressed, else 0. Reads past the eighth return 0.
    pub fn read(&mut self) -> u8 {
        let bit = (self.shift & 0x80 != 0) as u8;
        self.shift <<= 1;
        bit
    }
}

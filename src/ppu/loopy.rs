//! Packed VRAM address / scroll register ("loopy" register).
//!
//! Layout, low bit first: coarse X (5), coarse Y (5), nametable X (1), nametable Y (1), fine Y (3).
//! See [PPU scrolling](https://www.nesdev.org/wiki/PPU_scrolling).

const COARSE_X: u16 = 0x001F;
const COARSE_Y: u16 = 0x03E0;
const NAMETABLE_X: u16 = 0x0400;
const NAMETABLE_Y: u16 = 0x0800;
const FINE_Y: u16 = 0x7000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Loopy(u16);

impl Loopy {
    pub fn new(value: u16) -> Self {
        Self(value & 0x7FFF)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn set(&mut self, value: u16) {
        self.0 = value & 0x7FFF;
    }

    pub fn coarse_x(self) -> u16 {
        self.0 & COARSE_X
    }

    pub fn coarse_y(self) -> u16 {
        (self.0 & COARSE_Y) >> 5
    }

    pub fn nametable_x(self) -> u16 {
        (self.0 & NAMETABLE_X) >> 10
    }

    pub fn nametable_y(self) -> u16 {
        (self.0 & NAMETABLE_Y) >> 11
    }

    pub fn fine_y(self) -> u16 {
        (self.0 & FINE_Y) >> 12
    }

    pub fn set_coarse_x(&mut self, value: u16) {
        self.0 = (self.0 & !COARSE_X) | (value & 0x1F);
    }

    pub fn set_coarse_y(&mut self, value: u16) {
        self.0 = (self.0 & !COARSE_Y) | ((value & 0x1F) << 5);
    }

    pub fn set_nametable_x(&mut self, value: u16) {
        self.0 = (self.0 & !NAMETABLE_X) | ((value & 1) << 10);
    }

    pub fn set_nametable_y(&mut self, value: u16) {
        self.0 = (self.0 & !NAMETABLE_Y) | ((value & 1) << 11);
    }

    pub fn set_fine_y(&mut self, value: u16) {
        self.0 = (self.0 & !FINE_Y) | ((value & 0x07) << 12);
    }

    /// Add to the whole register (PPUDATA access), wrapping at 15 bits.
    pub fn advance(&mut self, by: u16) {
        self.set(self.0.wrapping_add(by));
    }

    /// Step one tile right, toggling the horizontal nametable at the edge.
    pub fn increment_x(&mut self) {
        if self.coarse_x() == 31 {
            self.set_coarse_x(0);
            self.set_nametable_x(self.nametable_x() ^ 1);
        } else {
            self.set_coarse_x(self.coarse_x() + 1);
        }
    }

    /// Step one pixel row down. Row 29 wraps into the next nametable; rows 30 and 31 (attribute
    /// memory) wrap to 0 without switching.
    pub fn increment_y(&mut self) {
        if self.fine_y() < 7 {
            self.set_fine_y(self.fine_y() + 1);
            return;
        }
        self.set_fine_y(0);
        match self.coarse_y() {
            29 => {
                self.set_coarse_y(0);
                self.set_nametable_y(self.nametable_y() ^ 1);
            }
            31 => self.set_coarse_y(0),
            y => self.set_coarse_y(y + 1),
        }
    }

    /// Copy coarse X and nametable X from `from`.
    pub fn transfer_x(&mut self, from: Loopy) {
        let mask = COARSE_X | NAMETABLE_X;
        self.0 = (self.0 & !mask) | (from.0 & mask);
    }

    /// Copy fine Y, coarse Y and nametable Y from `from`.
    pub fn transfer_y(&mut self, from: Loopy) {
        let mask = FINE_Y | COARSE_Y | NAMETABLE_Y;
        self.0 = (self.0 & !mask) | (from.0 & mask);
    }
}

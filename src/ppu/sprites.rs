//! Sprite evaluation, pattern fetch, and per-dot sprite pixel selection.
//!
//! Evaluation runs at dot 257 for the following scanline and keeps at most eight sprites;
//! patterns are fetched at dot 340. See [PPU sprite evaluation](https://www.nesdev.org/wiki/PPU_sprite_evaluation).

use crate::{
    cartridge::cartridge::Cartridge,
    ppu::{
        ppu::PPU,
        registers::{
            CTRL_SPRITE_PATTERN, CTRL_SPRITE_SIZE_16, MASK_SPRITES, MASK_SPRITES_LEFT,
            STATUS_SPRITE_OVERFLOW,
        },
    },
};

/// Sprites the PPU can draw on one scanline.
pub const MAX_SPRITES_PER_LINE: usize = 8;

const ATTR_PALETTE: u8 = 0x03;
const ATTR_BEHIND_BACKGROUND: u8 = 0x20;
const ATTR_FLIP_H: u8 = 0x40;
const ATTR_FLIP_V: u8 = 0x80;

/// One OAM entry copied into secondary OAM.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteEntry {
    pub y: u8,
    pub tile: u8,
    pub attr: u8,
    /// Counts down to 0 across the line; the sprite starts shifting out when it hits 0.
    pub x: u8,
}

/// Sprite pixel for the current dot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpritePixel {
    pub pixel: u8,
    pub palette: u8,
    pub behind_background: bool,
}

impl PPU {
    pub(super) fn sprite_height(&self) -> i16 {
        if self.ctrl & CTRL_SPRITE_SIZE_16 != 0 {
            16
        } else {
            8
        }
    }

    /// Dot 257: clear the line buffer and, on visible lines, gather sprites overlapping `scanline`.
    pub(super) fn evaluate_sprites(&mut self) {
        self.sprite_count = 0;
        self.sprite_pattern_lo = [0; MAX_SPRITES_PER_LINE];
        self.sprite_pattern_hi = [0; MAX_SPRITES_PER_LINE];
        self.sprite_zero_possible = false;

        if self.scanline < 0 || !self.rendering() {
            return;
        }

        let height = self.sprite_height();
        for (i, entry) in self.oam.chunks_exact(4).enumerate() {
            let diff = self.scanline - entry[0] as i16;
            if !(0..height).contains(&diff) {
                continue;
            }

            if self.sprite_count == MAX_SPRITES_PER_LINE {
                self.status |= STATUS_SPRITE_OVERFLOW;
                break;
            }
            if i == 0 {
                self.sprite_zero_possible = true;
            }
            self.sprite_line[self.sprite_count] = SpriteEntry {
                y: entry[0],
                tile: entry[1],
                attr: entry[2],
                x: entry[3],
            };
            self.sprite_count += 1;
        }
    }

    /// Dot 340: load the pattern shifters for every sprite found by evaluation.
    pub(super) fn fetch_sprite_patterns(&mut self, cart: &Cartridge) {
        for i in 0..self.sprite_count {
            let sprite = self.sprite_line[i];
            let row = (self.scanline - sprite.y as i16) as u16;
            let flip_v = sprite.attr & ATTR_FLIP_V != 0;

            let addr = if self.sprite_height() == 8 {
                let table = if self.ctrl & CTRL_SPRITE_PATTERN != 0 {
                    0x1000
                } else {
                    0x0000
                };
                let row = if flip_v { 7 - row } else { row };
                table | ((sprite.tile as u16) << 4) | row
            } else {
                // 8x16: bit 0 of the tile picks the table, the pair of tiles is stacked.
                let table = ((sprite.tile & 1) as u16) << 12;
                let row = if flip_v { 15 - row } else { row };
                let tile = (sprite.tile & 0xFE) as u16 + (row >> 3);
                table | (tile << 4) | (row & 7)
            };

            let mut lo = self.ppu_read(addr, cart);
            let mut hi = self.ppu_read(addr + 8, cart);
            if sprite.attr & ATTR_FLIP_H != 0 {
                lo = lo.reverse_bits();
                hi = hi.reverse_bits();
            }
            self.sprite_pattern_lo[i] = lo;
            self.sprite_pattern_hi[i] = hi;
        }
    }

    /// Count sprite X positions down and shift active sprites.
    pub(super) fn update_sprite_shifters(&mut self) {
        for i in 0..self.sprite_count {
            let sprite = &mut self.sprite_line[i];
            if sprite.x > 0 {
                sprite.x -= 1;
            } else {
                self.sprite_pattern_lo[i] <<= 1;
                self.sprite_pattern_hi[i] <<= 1;
            }
        }
    }

    /// First opaque sprite pixel at this dot; lower OAM index wins.
    pub(super) fn sprite_pixel(&mut self) -> SpritePixel {
        self.sprite_zero_rendering = false;

        if self.mask & MASK_SPRITES == 0 || (self.mask & MASK_SPRITES_LEFT == 0 && self.cycle < 9)
        {
            return SpritePixel::default();
        }

        for i in 0..self.sprite_count {
            let sprite = self.sprite_line[i];
            if sprite.x != 0 {
                continue;
            }

            let lo = (self.sprite_pattern_lo[i] & 0x80 != 0) as u8;
            let hi = (self.sprite_pattern_hi[i] & 0x80 != 0) as u8;
            let pixel = (hi << 1) | lo;
            if pixel == 0 {
                continue;
            }

            if i == 0 {
                self.sprite_zero_rendering = true;
            }
            return SpritePixel {
                pixel,
                // Sprite palettes are 4–7.
                palette: (sprite.attr & ATTR_PALETTE) + 4,
                behind_background: sprite.attr & ATTR_BEHIND_BACKGROUND != 0,
            };
        }

        SpritePixel::default()
    }
}

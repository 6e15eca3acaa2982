//! NES PPU (2C02) core: dot clock, background pipeline, and pixel output.
//!
//! One call to [`PPU::clock`] is one dot. A frame is 262 scanlines (−1 pre-render, 0–239 visible,
//! 240 idle, 241–260 vblank) of 341 dots.
//! See [PPU rendering](https://www.nesdev.org/wiki/PPU_rendering).

use crate::{
    cartridge::cartridge::Cartridge,
    ppu::{
        loopy::Loopy,
        registers::{
            CTRL_BACKGROUND_PATTERN, CTRL_ENABLE_NMI, MASK_BACKGROUND, MASK_BACKGROUND_LEFT,
            MASK_SPRITES, MASK_SPRITES_LEFT, STATUS_SPRITE_OVERFLOW, STATUS_SPRITE_ZERO_HIT,
            STATUS_VBLANK,
        },
        sprites::{MAX_SPRITES_PER_LINE, SpriteEntry, SpritePixel},
    },
};

/// NES 2C02-style 64-color palette (0xRRGGBB). Index 0 = backdrop.
pub const NES_PALETTE_RGB: [u32; 64] = [
    0x545454, 0x001E74, 0x081090, 0x300088, 0x440064, 0x5C0030, 0x540400, 0x3C1800, 0x202A00,
    0x083A00, 0x004000, 0x003C00, 0x00302C, 0x000000, 0x000000, 0x000000, 0x989698, 0x084CC4,
    0x3032EC, 0x5C1EE4, 0x8814B0, 0xA01464, 0x982220, 0x783C00, 0x545A00, 0x287200, 0x087C00,
    0x007628, 0x006678, 0x000000, 0x000000, 0x000000, 0xECEEEC, 0x3C7EEC, 0x5C5CEC, 0x8844EC,
    0xB02CEC, 0xE028B0, 0xD83C50, 0xC45400, 0xAC7000, 0x808800, 0x409C30, 0x20A458, 0x209A88,
    0x404040, 0x000000, 0x000000, 0xECEEEC, 0xA8BCEC, 0xBCACEC, 0xD4A0EC, 0xEC94EC, 0xEC90D4,
    0xEC9CB4, 0xE4B090, 0xDCC878, 0xD4DC78, 0xB8EC98, 0xA8ECBC, 0xA0E4E4, 0xA0A0A0, 0x000000,
    0x000000,
];

pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 240;

/// OAM (Object Attribute Memory): 64 sprites × 4 bytes. Each entry: Y, tile, attr, X.
pub const OAM_LEN: usize = 256;

/// PPU state: timing, scroll registers, VRAM, palettes, OAM, and framebuffer.
pub struct PPU {
    pub cycle: i16,
    pub scanline: i16,
    /// Raised at vblank start (or on a late NMI enable); the bus consumes it.
    pub nmi: bool,
    /// Raised when the pre-render line begins; the presenter clears it after taking the frame.
    pub frame_complete: bool,
    pub(super) ctrl: u8,
    pub(super) mask: u8,
    pub(super) status: u8,
    pub(super) vram: Loopy,
    pub(super) tram: Loopy,
    pub(super) fine_x: u8,
    /// Shared first/second write toggle for $2005 and $2006.
    pub(super) address_latch: bool,
    /// Delayed $2007 read buffer.
    pub(super) data_buffer: u8,
    /// Last value written to any PPU register.
    pub(super) latch: u8,
    odd_frame: bool,
    /// $2002 was read one dot before VBlank; skip setting it (and the NMI) this frame.
    pub(super) suppress_vblank: bool,
    pub(super) nametable: [u8; 0x800],
    /// Palette RAM $3F00-$3F1F (32 bytes, with NES mirroring).
    pub(super) palette: [u8; 32],
    /// OAM: 64 sprites × 4 bytes (Y, tile, attr, X). Written via $2003/$2004 or $4014 DMA.
    pub(super) oam: [u8; OAM_LEN],
    pub(super) oam_addr: u8,

    bg_next_tile_id: u8,
    bg_next_tile_attrib: u8,
    bg_next_tile_lsb: u8,
    bg_next_tile_msb: u8,
    bg_shifter_pattern_lo: u16,
    bg_shifter_pattern_hi: u16,
    bg_shifter_attrib_lo: u16,
    bg_shifter_attrib_hi: u16,

    pub(super) sprite_line: [SpriteEntry; MAX_SPRITES_PER_LINE],
    pub(super) sprite_count: usize,
    pub(super) sprite_pattern_lo: [u8; MAX_SPRITES_PER_LINE],
    pub(super) sprite_pattern_hi: [u8; MAX_SPRITES_PER_LINE],
    /// Sprite 0 is on the line being drawn.
    pub(super) sprite_zero_possible: bool,
    /// Sprite 0 supplied the sprite pixel at this dot.
    pub(super) sprite_zero_rendering: bool,

    /// 256×240 framebuffer (0xRRGGBB per pixel). Row-major, left-to-right, top-to-bottom.
    pub framebuffer: [u32; SCREEN_WIDTH * SCREEN_HEIGHT],
}

impl Default for PPU {
    fn default() -> Self {
        Self::new()
    }
}

impl PPU {
    pub fn new() -> Self {
        Self {
            cycle: 0,
            scanline: 0,
            nmi: false,
            frame_complete: false,
            ctrl: 0,
            mask: 0,
            status: 0,
            vram: Loopy::default(),
            tram: Loopy::default(),
            fine_x: 0,
            address_latch: false,
            data_buffer: 0,
            latch: 0,
            odd_frame: false,
            suppress_vblank: false,
            nametable: [0; 0x800],
            palette: [0; 32],
            oam: [0; OAM_LEN],
            oam_addr: 0,
            bg_next_tile_id: 0,
            bg_next_tile_attrib: 0,
            bg_next_tile_lsb: 0,
            bg_next_tile_msb: 0,
            bg_shifter_pattern_lo: 0,
            bg_shifter_pattern_hi: 0,
            bg_shifter_attrib_lo: 0,
            bg_shifter_attrib_hi: 0,
            sprite_line: [SpriteEntry::default(); MAX_SPRITES_PER_LINE],
            sprite_count: 0,
            sprite_pattern_lo: [0; MAX_SPRITES_PER_LINE],
            sprite_pattern_hi: [0; MAX_SPRITES_PER_LINE],
            sprite_zero_possible: false,
            sprite_zero_rendering: false,
            framebuffer: [0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    /// Return to power-up timing and register state. VRAM, palette and OAM contents are kept.
    pub fn reset(&mut self) {
        self.cycle = 0;
        self.scanline = 0;
        self.nmi = false;
        self.frame_complete = false;
        self.ctrl = 0;
        self.mask = 0;
        self.status = 0;
        self.vram = Loopy::default();
        self.tram = Loopy::default();
        self.fine_x = 0;
        self.address_latch = false;
        self.data_buffer = 0;
        self.latch = 0;
        self.odd_frame = false;
        self.suppress_vblank = false;
        self.oam_addr = 0;
        self.bg_next_tile_id = 0;
        self.bg_next_tile_attrib = 0;
        self.bg_next_tile_lsb = 0;
        self.bg_next_tile_msb = 0;
        self.bg_shifter_pattern_lo = 0;
        self.bg_shifter_pattern_hi = 0;
        self.bg_shifter_attrib_lo = 0;
        self.bg_shifter_attrib_hi = 0;
        self.sprite_count = 0;
        self.sprite_zero_possible = false;
        self.sprite_zero_rendering = false;
    }

    /// Current VRAM address ("v").
    pub fn vram_addr(&self) -> u16 {
        self.vram.get()
    }

    pub fn oam(&self) -> &[u8; OAM_LEN] {
        &self.oam
    }

    /// Pixel at (x, y) as (r, g, b).
    pub fn pixel(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let rgb = self.framebuffer[y * SCREEN_WIDTH + x];
        ((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Background or sprite rendering is enabled.
    pub fn rendering(&self) -> bool {
        self.mask & (MASK_BACKGROUND | MASK_SPRITES) != 0
    }

    /// Advance one dot.
    pub fn clock(&mut self, cart: &mut Cartridge) {
        if self.scanline >= -1 && self.scanline < 240 {
            self.render_dot(cart);
        }

        if self.scanline == 241 && self.cycle == 1 {
            if self.suppress_vblank {
                self.suppress_vblank = false;
            } else {
                self.status |= STATUS_VBLANK;
                if self.ctrl & CTRL_ENABLE_NMI != 0 {
                    self.nmi = true;
                }
            }
        }

        if (1..=256).contains(&self.cycle) && (0..240).contains(&self.scanline) {
            let (bg_pixel, bg_palette) = self.background_pixel();
            let sprite = self.sprite_pixel();
            let (pixel, palette) = self.compose(bg_pixel, bg_palette, sprite);

            let color = self.ppu_read(0x3F00 + ((palette as u16) << 2) + pixel as u16, cart);
            let x = (self.cycle - 1) as usize;
            let y = self.scanline as usize;
            self.framebuffer[y * SCREEN_WIDTH + x] = NES_PALETTE_RGB[(color & 0x3F) as usize];
        }

        self.cycle += 1;

        if self.rendering() && self.cycle == 260 && self.scanline < 240 {
            cart.scanline();
        }

        if self.cycle >= 341 {
            self.cycle = 0;
            self.scanline += 1;

            if self.scanline >= 261 {
                self.scanline = -1;
                self.frame_complete = true;
                self.odd_frame = !self.odd_frame;
            }
        }
    }

    /// Fetch and scroll work for pre-render and visible scanlines.
    fn render_dot(&mut self, cart: &mut Cartridge) {
        // Odd frames drop the idle dot at the start of line 0 while rendering.
        if self.scanline == 0 && self.cycle == 0 && self.odd_frame && self.rendering() {
            self.cycle = 1;
        }

        if self.scanline == -1 && self.cycle == 1 {
            self.status &= !(STATUS_VBLANK | STATUS_SPRITE_OVERFLOW | STATUS_SPRITE_ZERO_HIT);
            self.sprite_pattern_lo = [0; MAX_SPRITES_PER_LINE];
            self.sprite_pattern_hi = [0; MAX_SPRITES_PER_LINE];
        }

        if (2..258).contains(&self.cycle) || (321..338).contains(&self.cycle) {
            self.update_shifters();

            match (self.cycle - 1) % 8 {
                0 => {
                    self.load_background_shifters();
                    self.bg_next_tile_id = self.ppu_read(0x2000 | (self.vram.get() & 0x0FFF), cart);
                }
                2 => {
                    let v = self.vram;
                    let addr = 0x23C0
                        | (v.nametable_y() << 11)
                        | (v.nametable_x() << 10)
                        | ((v.coarse_y() >> 2) << 3)
                        | (v.coarse_x() >> 2);
                    let mut attrib = self.ppu_read(addr, cart);
                    if v.coarse_y() & 0x02 != 0 {
                        attrib >>= 4;
                    }
                    if v.coarse_x() & 0x02 != 0 {
                        attrib >>= 2;
                    }
                    self.bg_next_tile_attrib = attrib & 0x03;
                }
                4 => self.bg_next_tile_lsb = self.ppu_read(self.background_tile_row(), cart),
                6 => self.bg_next_tile_msb = self.ppu_read(self.background_tile_row() + 8, cart),
                7 => {
                    if self.rendering() {
                        self.vram.increment_x();
                    }
                }
                _ => {}
            }
        }

        if self.cycle == 256 && self.rendering() {
            self.vram.increment_y();
        }

        if self.cycle == 257 {
            self.load_background_shifters();
            if self.rendering() {
                self.vram.transfer_x(self.tram);
            }
            self.evaluate_sprites();
        }

        if self.cycle == 338 || self.cycle == 340 {
            self.bg_next_tile_id = self.ppu_read(0x2000 | (self.vram.get() & 0x0FFF), cart);
        }

        if self.cycle == 340 {
            self.fetch_sprite_patterns(cart);
        }

        if self.scanline == -1 && (280..305).contains(&self.cycle) && self.rendering() {
            self.vram.transfer_y(self.tram);
        }
    }

    /// Pattern-table address of the next background tile's low plane at the current fine Y.
    fn background_tile_row(&self) -> u16 {
        let table = if self.ctrl & CTRL_BACKGROUND_PATTERN != 0 {
            0x1000
        } else {
            0x0000
        };
        table + ((self.bg_next_tile_id as u16) << 4) + self.vram.fine_y()
    }

    fn load_background_shifters(&mut self) {
        self.bg_shifter_pattern_lo =
            (self.bg_shifter_pattern_lo & 0xFF00) | self.bg_next_tile_lsb as u16;
        self.bg_shifter_pattern_hi =
            (self.bg_shifter_pattern_hi & 0xFF00) | self.bg_next_tile_msb as u16;

        // Attribute bits are widened to a full byte so they shift in step with the pattern.
        let attrib_lo = if self.bg_next_tile_attrib & 0x01 != 0 { 0xFF } else { 0x00 };
        let attrib_hi = if self.bg_next_tile_attrib & 0x02 != 0 { 0xFF } else { 0x00 };
        self.bg_shifter_attrib_lo = (self.bg_shifter_attrib_lo & 0xFF00) | attrib_lo;
        self.bg_shifter_attrib_hi = (self.bg_shifter_attrib_hi & 0xFF00) | attrib_hi;
    }

    fn update_shifters(&mut self) {
        if self.mask & MASK_BACKGROUND != 0 {
            self.bg_shifter_pattern_lo <<= 1;
            self.bg_shifter_pattern_hi <<= 1;
            self.bg_shifter_attrib_lo <<= 1;
            self.bg_shifter_attrib_hi <<= 1;
        }

        if self.mask & MASK_SPRITES != 0 && (1..258).contains(&self.cycle) {
            self.update_sprite_shifters();
        }
    }

    /// Background (pixel, palette) selected by fine X.
    fn background_pixel(&self) -> (u8, u8) {
        if self.mask & MASK_BACKGROUND == 0
            || (self.mask & MASK_BACKGROUND_LEFT == 0 && self.cycle < 9)
        {
            return (0, 0);
        }

        let mux: u16 = 0x8000 >> self.fine_x;
        let p0 = (self.bg_shifter_pattern_lo & mux != 0) as u8;
        let p1 = (self.bg_shifter_pattern_hi & mux != 0) as u8;
        let a0 = (self.bg_shifter_attrib_lo & mux != 0) as u8;
        let a1 = (self.bg_shifter_attrib_hi & mux != 0) as u8;
        ((p1 << 1) | p0, (a1 << 1) | a0)
    }

    /// Priority between background and sprite; also detects sprite 0 hit.
    fn compose(&mut self, bg_pixel: u8, bg_palette: u8, sprite: SpritePixel) -> (u8, u8) {
        match (bg_pixel, sprite.pixel) {
            (0, 0) => (0, 0),
            (0, _) => (sprite.pixel, sprite.palette),
            (_, 0) => (bg_pixel, bg_palette),
            _ => {
                if self.sprite_zero_possible
                    && self.sprite_zero_rendering
                    && self.mask & MASK_BACKGROUND != 0
                    && self.mask & MASK_SPRITES != 0
                {
                    let both_left = MASK_BACKGROUND_LEFT | MASK_SPRITES_LEFT;
                    let first = if self.mask & both_left == both_left { 1 } else { 9 };
                    if (first..258).contains(&self.cycle) {
                        self.status |= STATUS_SPRITE_ZERO_HIT;
                    }
                }

                if sprite.behind_background {
                    (bg_pixel, bg_palette)
                } else {
                    (sprite.pixel, sprite.palette)
                }
            }
        }
    }
}

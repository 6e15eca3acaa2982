//! OAM DMA ($4014): copies one 256-byte CPU page into PPU OAM while the CPU is stalled.
//!
//! The transfer waits for an odd CPU cycle to synchronise, then alternates read (even) and write
//! (odd) cycles, so it steals 513 or 514 CPU cycles depending on when it was triggered.

#[derive(Debug, Clone, Copy)]
pub struct Dma {
    /// Source page: bytes are read from `page << 8 | addr`.
    pub page: u8,
    pub addr: u8,
    /// Byte in flight between the read and write cycle.
    pub data: u8,
    /// A transfer is in progress; the CPU does not clock.
    pub enabled: bool,
    /// Still waiting for the alignment cycle.
    pub waiting: bool,
}

impl Default for Dma {
    fn default() -> Self {
        Self {
            page: 0,
            addr: 0,
            data: 0,
            enabled: false,
            waiting: true,
        }
    }
}

impl Dma {
    pub fn start(&mut self, page: u8) {
        self.page = page;
        self.addr = 0;
        self.enabled = true;
    }

    pub fn source(&self) -> u16 {
        ((self.page as u16) << 8) | self.addr as u16
    }

    /// Advance the read address. Returns true when the whole page has been copied.
    pub fn advance(&mut self) -> bool {
        self.addr = self.addr.wrapping_add(1);
        if self.addr == 0 {
            self.enabled = false;
            self.waiting = true;
            true
        } else {
            false
        }
    }
}

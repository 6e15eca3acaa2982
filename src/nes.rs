//! The whole console: a CPU plus the bus that owns everything else.
//!
//! [`Nes::clock`] is one system tick. Frontends usually drive it a frame at a time with
//! [`Nes::run_frame`]; tests and tracers step one instruction at a time.

use log::info;

use crate::{
    bus::nes_bus::NesBus,
    cartridge::cartridge::Cartridge,
    cpu::cpu::CPU,
    ppu::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH},
};

pub struct Nes {
    pub cpu: CPU,
    pub bus: NesBus,
}

impl Nes {
    /// Insert `cart` and press reset.
    pub fn new(cart: Cartridge) -> Self {
        let mut nes = Self {
            cpu: CPU::new(),
            bus: NesBus::new(cart),
        };
        nes.reset();
        nes
    }

    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
        info!(
            "reset: mapper {}, PC=${:04X}",
            self.bus.cart.mapper_id(),
            self.cpu.pc
        );
    }

    /// One system tick (one PPU dot).
    pub fn clock(&mut self) {
        self.bus.clock(&mut self.cpu);
    }

    /// Finish the instruction in flight, then run exactly one more to completion.
    pub fn step_instruction(&mut self) {
        while !self.cpu.complete() {
            self.clock();
        }

        let start = self.cpu.clock_count;
        while self.cpu.clock_count == start || !self.cpu.complete() {
            self.clock();
        }
    }

    /// Run until the PPU finishes a frame.
    pub fn run_frame(&mut self) {
        while !self.bus.ppu.frame_complete {
            self.clock();
        }
        self.bus.ppu.frame_complete = false;
    }

    /// Set the live button state of port 0 or 1 (`controller::BUTTON_*` bits). Other ports are
    /// ignored.
    pub fn set_controller(&mut self, port: usize, snapshot: u8) {
        if let Some(pad) = self.bus.controllers.get_mut(port) {
            pad.state = snapshot;
        }
    }

    /// Last rendered picture, 0x00RRGGBB, row-major.
    pub fn framebuffer(&self) -> &[u32; SCREEN_WIDTH * SCREEN_HEIGHT] {
        &self.bus.ppu.framebuffer
    }

    pub fn set_sample_rate(&mut self, hz: u32) {
        self.bus.apu.set_sample_rate(hz);
    }

    pub fn drain_samples(&mut self, out: &mut [f32]) -> usize {
        self.bus.apu.drain_samples(out)
    }

    /// Trace line for the instruction about to execute.
    pub fn trace_line(&mut self) -> String {
        self.cpu.trace_line(&mut self.bus)
    }
}

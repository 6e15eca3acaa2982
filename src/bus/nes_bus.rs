//! The NES main bus.
//!
//! Owns everything except the CPU: 2 KiB work RAM, the cartridge, PPU, APU and both controller
//! ports. [`NesBus::clock`] is one system tick (one PPU dot); the CPU runs on every third tick
//! unless an OAM DMA transfer has stalled it.
//!
//! Address decoding gives the cartridge first refusal on every access, so mappers can claim any
//! range they like; unclaimed addresses fall through to the fixed memory map.

use log::{debug, info};

use crate::{
    apu::apu::APU,
    bus::{Bus, dma::Dma},
    cartridge::cartridge::Cartridge,
    controller::Controller,
    cpu::cpu::CPU,
    ppu::ppu::PPU,
};

const RAM_SIZE: usize = 2048;

pub struct NesBus {
    /// Work RAM, mirrored four times over $0000–$1FFF.
    pub ram: [u8; RAM_SIZE],
    pub cart: Cartridge,
    pub ppu: PPU,
    pub apu: APU,
    /// Ports 1 and 2 ($4016 / $4017).
    pub controllers: [Controller; 2],
    /// Last value driven onto the data bus; returned for unmapped reads.
    open_bus: u8,
    dma: Dma,
    system_clock: u64,
}

impl NesBus {
    pub fn new(cart: Cartridge) -> Self {
        Self {
            ram: [0; RAM_SIZE],
            cart,
            ppu: PPU::new(),
            apu: APU::new(),
            controllers: [Controller::default(); 2],
            open_bus: 0,
            dma: Dma::default(),
            system_clock: 0,
        }
    }

    /// Reset everything on the bus, RAM included.
    pub fn reset(&mut self) {
        self.ram = [0; RAM_SIZE];
        self.cart.reset();
        self.ppu.reset();
        self.apu.reset();
        self.controllers = [Controller::default(); 2];
        self.open_bus = 0;
        self.dma = Dma::default();
        self.system_clock = 0;
        info!("bus reset");
    }

    /// Ticks since reset.
    pub fn system_clock(&self) -> u64 {
        self.system_clock
    }

    /// An OAM DMA transfer is holding the CPU.
    pub fn dma_active(&self) -> bool {
        self.dma.enabled
    }

    /// One system tick: PPU dot, APU tick, then a CPU (or DMA) cycle on every third tick, then
    /// interrupt delivery.
    pub fn clock(&mut self, cpu: &mut CPU) {
        self.ppu.clock(&mut self.cart);
        self.apu.clock();

        if self.system_clock % 3 == 0 {
            if self.dma.enabled {
                self.dma_cycle();
            } else {
                cpu.clock(self);
            }
        }

        if self.ppu.nmi {
            self.ppu.nmi = false;
            cpu.nmi(self);
        }

        if self.cart.irq_state() {
            self.cart.irq_clear();
            cpu.irq(self);
        }

        self.system_clock += 1;
    }

    fn dma_cycle(&mut self) {
        let odd = self.system_clock % 2 == 1;

        if self.dma.waiting {
            if odd {
                self.dma.waiting = false;
            }
            return;
        }

        if odd {
            let data = self.dma.data;
            self.write(0x2004, data);
            if self.dma.advance() {
                debug!("OAM DMA from page ${:02X} done", self.dma.page);
            }
        } else {
            self.dma.data = self.read(self.dma.source());
        }
    }
}

impl Bus for NesBus {
    fn read(&mut self, addr: u16) -> u8 {
        if let Some(data) = self.cart.cpu_read(addr) {
            return data;
        }

        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu.cpu_read(addr & 7, &self.cart),
            0x4015 => self.apu.read_status(),
            0x4016 | 0x4017 => self.controllers[(addr & 1) as usize].read(),
            _ => self.open_bus,
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.open_bus = data;

        if self.cart.cpu_write(addr, data) {
            return;
        }

        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = data,
            0x2000..=0x3FFF => self.ppu.cpu_write(addr & 7, data, &mut self.cart),
            0x4000..=0x4013 | 0x4015 | 0x4017 => self.apu.write(addr, data),
            0x4014 => {
                debug!("OAM DMA from page ${:02X}", data);
                self.dma.start(data);
            }
            0x4016 => {
                for pad in &mut self.controllers {
                    pad.latch();
                }
            }
            _ => {}
        }
    }
}

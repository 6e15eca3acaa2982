use crate::{
    bus::{Bus, nes_bus::NesBus},
    cartridge::{
        cartridge::Cartridge,
        mapper::Mirroring,
        rom::{PRG_BANK_SIZE, RomImage},
    },
    controller::{BUTTON_A, BUTTON_SELECT, BUTTON_UP},
    cpu::cpu::CPU,
};

const NMI_HANDLER: u16 = 0x9000;

/// NROM board full of NOPs; reset and IRQ enter at $8000, NMI at $9000.
fn nop_cart() -> Cartridge {
    let mut prg = vec![0xEA; PRG_BANK_SIZE];
    prg[0x3FFA..].copy_from_slice(&[
        NMI_HANDLER as u8,
        (NMI_HANDLER >> 8) as u8,
        0x00,
        0x80,
        0x00,
        0x80,
    ]);
    Cartridge::new(RomImage {
        prg_rom: prg,
        chr_rom: Vec::new(),
        mapper_id: 0,
        mirroring: Mirroring::Vertical,
    })
    .unwrap()
}

fn system() -> (CPU, NesBus) {
    let mut bus = NesBus::new(nop_cart());
    let mut cpu = CPU::new();
    cpu.reset(&mut bus);
    (cpu, bus)
}

/// Count CPU slots (every third tick) spent on a DMA transfer started now.
fn stolen_cycles(cpu: &mut CPU, bus: &mut NesBus) -> usize {
    let mut stolen = 0;
    while bus.dma_active() {
        if bus.system_clock() % 3 == 0 {
            stolen += 1;
        }
        bus.clock(cpu);
    }
    stolen
}

#[test]
fn ram_is_mirrored_every_2k() {
    let (_, mut bus) = system();
    bus.write(0x0001, 0x5A);
    assert_eq!(bus.read(0x0801), 0x5A);
    assert_eq!(bus.read(0x1001), 0x5A);
    bus.write(0x1FFF, 0x33);
    assert_eq!(bus.read(0x07FF), 0x33);
}

#[test]
fn cartridge_claims_prg_space() {
    let (_, mut bus) = system();
    assert_eq!(bus.read(0x8000), 0xEA);
    assert_eq!(bus.read(0xFFFC), 0x00);
    assert_eq!(bus.read(0xFFFD), 0x80);

    bus.write(0x8000, 0x00);
    assert_eq!(bus.read(0x8000), 0xEA);
}

#[test]
fn unmapped_reads_return_last_written_byte() {
    let (_, mut bus) = system();
    bus.write(0x5000, 0x5A);
    assert_eq!(bus.read(0x5000), 0x5A);

    bus.write(0x0000, 0x12);
    assert_eq!(bus.read(0x4018), 0x12);
    assert_eq!(bus.read(0x6000), 0x12);
}

#[test]
fn ppu_registers_mirror_through_3fff() {
    let (_, mut bus) = system();
    bus.write(0x3FFE, 0x21); // $2006
    bus.write(0x2006, 0x08);
    bus.write(0x200F, 0x42); // $2007

    bus.write(0x2006, 0x21);
    bus.write(0x2006, 0x08);
    bus.read(0x2007);
    assert_eq!(bus.read(0x3FF7), 0x42);
}

#[test]
fn controllers_latch_together_and_shift_separately() {
    let (_, mut bus) = system();
    bus.controllers[0].state = BUTTON_A | BUTTON_UP;
    bus.controllers[1].state = BUTTON_SELECT;
    bus.write(0x4016, 1);
    bus.write(0x4016, 0);

    let port1: Vec<u8> = (0..8).map(|_| bus.read(0x4016)).collect();
    let port2: Vec<u8> = (0..8).map(|_| bus.read(0x4017)).collect();
    assert_eq!(port1, vec![1, 0, 0, 0, 1, 0, 0, 0]);
    assert_eq!(port2, vec![0, 0, 1, 0, 0, 0, 0, 0]);
}

#[test]
fn apu_registers_are_routed() {
    let (_, mut bus) = system();
    bus.write(0x4015, 0x01);
    bus.write(0x4003, 0x08);
    assert_eq!(bus.read(0x4015) & 0x01, 0x01);

    bus.write(0x4015, 0x00);
    assert_eq!(bus.read(0x4015) & 0x01, 0x00);
}

#[test]
fn cpu_runs_every_third_tick() {
    let (mut cpu, mut bus) = system();
    for _ in 0..30 {
        bus.clock(&mut cpu);
    }
    assert_eq!(cpu.clock_count, 10);
    assert_eq!(bus.system_clock(), 30);
}

#[test]
fn dma_started_before_an_odd_slot_steals_513() {
    let (mut cpu, mut bus) = system();
    for i in 0..256 {
        bus.ram[0x200 + i] = i as u8;
    }
    // Next CPU slot is tick 3.
    bus.clock(&mut cpu);

    let before = cpu.clock_count;
    bus.write(0x4014, 0x02);
    assert!(bus.dma_active());
    assert_eq!(stolen_cycles(&mut cpu, &mut bus), 513);
    assert_eq!(cpu.clock_count, before);

    for (i, &byte) in bus.ppu.oam().iter().enumerate() {
        assert_eq!(byte, i as u8);
    }
}

#[test]
fn dma_started_before_an_even_slot_steals_514() {
    let (mut cpu, mut bus) = system();
    // Next CPU slot is tick 6, so the wait runs until tick 9.
    for _ in 0..4 {
        bus.clock(&mut cpu);
    }
    bus.write(0x4014, 0x00);
    assert_eq!(stolen_cycles(&mut cpu, &mut bus), 514);
}

#[test]
fn vblank_nmi_reaches_the_cpu() {
    let (mut cpu, mut bus) = system();
    bus.write(0x2000, 0x80);

    // VBlank starts on dot 1 of scanline 241.
    for _ in 0..(241 * 341 + 2) {
        bus.clock(&mut cpu);
    }
    assert_eq!(cpu.pc, NMI_HANDLER);
    assert_eq!(cpu.sp, 0xFA);
    assert!(!bus.ppu.nmi);
}

#[test]
fn reset_restarts_the_clock_and_clears_ram() {
    let (mut cpu, mut bus) = system();
    bus.write(0x0010, 0x77);
    for _ in 0..100 {
        bus.clock(&mut cpu);
    }
    bus.reset();
    assert_eq!(bus.system_clock(), 0);
    assert!(!bus.dma_active());
    assert_eq!(bus.read(0x0010), 0x00);
}

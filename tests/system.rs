//! Whole-console scenarios: a cartridge image in, CPU/PPU/bus state out.

mod common;

use std::io::Write;

use nesbox::{
    bus::Bus,
    cartridge::{cartridge::Cartridge, rom::LoadError},
    controller::{BUTTON_A, BUTTON_START},
    cpu::flags::{FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_UNUSED, FLAG_ZERO},
};

use common::{CHR_BANK, INTERRUPT_COUNT, PRG_BANK, boot, ines, nrom, set_vectors};

#[test]
fn nrom_reset_then_instructions_take_their_declared_cycles() {
    #[rustfmt::skip]
    let program = [
        0xA9, 0x42,       // LDA #$42
        0xA2, 0x10,       // LDX #$10
        0x9D, 0x00, 0x02, // STA $0200,X
        0xA9, 0x00,       // LDA #$00
        0xAD, 0x10, 0x02, // LDA $0210
        0xE8,             // INX
        0xCA, 0xCA,       // DEX DEX
    ];
    let mut nes = boot(&nrom(&program, true));
    assert_eq!(nes.cpu.pc, 0x8000);
    assert_eq!(nes.cpu.sp, 0xFD);

    nes.step_instruction();
    assert_eq!(nes.cpu.clock_count, 8 + 2);
    assert_eq!(nes.cpu.a, 0x42);
    assert_eq!(nes.cpu.pc, 0x8002);
    assert_eq!(nes.cpu.status, FLAG_UNUSED | FLAG_INTERRUPT_DISABLE);

    nes.step_instruction();
    nes.step_instruction();
    assert_eq!(nes.cpu.clock_count, 10 + 2 + 5);
    assert_eq!(nes.bus.ram[0x0210], 0x42);

    nes.step_instruction();
    assert!(nes.cpu.flag(FLAG_ZERO));

    nes.step_instruction();
    assert_eq!(nes.cpu.clock_count, 17 + 2 + 4);
    assert_eq!(nes.cpu.a, 0x42);
    assert!(!nes.cpu.flag(FLAG_ZERO));

    nes.step_instruction();
    nes.step_instruction();
    nes.step_instruction();
    assert_eq!(nes.cpu.x, 0x0F);
    assert!(!nes.cpu.flag(FLAG_NEGATIVE));
    assert_eq!(nes.cpu.pc, 0x800F);
}

#[test]
fn dma_copies_a_page_into_oam() {
    #[rustfmt::skip]
    let program = [
        0xA9, 0x07,       // LDA #$07
        0x8D, 0x14, 0x40, // STA $4014
    ];
    let mut nes = boot(&nrom(&program, true));
    for i in 0..256 {
        nes.bus.ram[0x700 + i] = (255 - i) as u8;
    }

    nes.step_instruction();
    let before = nes.bus.system_clock();
    nes.step_instruction();
    assert!(!nes.bus.dma_active());

    // STA is issued on CPU cycle 10: four own cycles plus 513 for the copy.
    let cpu_slots = (nes.bus.system_clock() - before) / 3;
    assert_eq!(cpu_slots, 4 + 513);
    for (i, &byte) in nes.bus.ppu.oam().iter().enumerate() {
        assert_eq!(byte, (255 - i) as u8);
    }
}

#[test]
fn dma_issued_on_an_odd_cpu_cycle_waits_one_more() {
    #[rustfmt::skip]
    let program = [
        0xA5, 0x00,       // LDA $00
        0xA9, 0x07,       // LDA #$07
        0x8D, 0x14, 0x40, // STA $4014
    ];
    let mut nes = boot(&nrom(&program, true));

    nes.step_instruction();
    nes.step_instruction();
    let before = nes.bus.system_clock();
    nes.step_instruction();
    assert!(!nes.bus.dma_active());

    // STA is issued on CPU cycle 13.
    let cpu_slots = (nes.bus.system_clock() - before) / 3;
    assert_eq!(cpu_slots, 4 + 514);
}

fn write_vram(nes: &mut nesbox::nes::Nes, addr: u16, data: u8) {
    nes.bus.write(0x2006, (addr >> 8) as u8);
    nes.bus.write(0x2006, addr as u8);
    nes.bus.write(0x2007, data);
}

fn read_vram(nes: &mut nesbox::nes::Nes, addr: u16) -> u8 {
    nes.bus.write(0x2006, (addr >> 8) as u8);
    nes.bus.write(0x2006, addr as u8);
    nes.bus.read(0x2007);
    nes.bus.read(0x2007)
}

#[test]
fn vertical_mirroring_aliases_2000_and_2800() {
    let mut nes = boot(&nrom(&[], true));
    write_vram(&mut nes, 0x2005, 0xAB);
    assert_eq!(read_vram(&mut nes, 0x2805), 0xAB);
    assert_eq!(read_vram(&mut nes, 0x2405), 0x00);
}

#[test]
fn horizontal_mirroring_aliases_2000_and_2400() {
    let mut nes = boot(&nrom(&[], false));
    write_vram(&mut nes, 0x2005, 0xCD);
    assert_eq!(read_vram(&mut nes, 0x2405), 0xCD);
    assert_eq!(read_vram(&mut nes, 0x2805), 0x00);
}

#[test]
fn ppudata_writes_advance_vram_address() {
    let mut nes = boot(&nrom(&[], true));

    nes.bus.write(0x2006, 0x21);
    nes.bus.write(0x2006, 0x00);
    for _ in 0..10 {
        nes.bus.write(0x2007, 0);
    }
    assert_eq!(nes.bus.ppu.vram_addr(), 0x2100 + 10);

    nes.bus.write(0x2000, 0x04);
    nes.bus.write(0x2006, 0x21);
    nes.bus.write(0x2006, 0x00);
    for _ in 0..10 {
        nes.bus.write(0x2007, 0);
    }
    assert_eq!(nes.bus.ppu.vram_addr(), 0x2100 + 10 * 32);
}

#[test]
fn mmc1_selects_16k_bank_at_8000() {
    // Every PRG byte holds its bank number; the program sits at the start of the fixed last bank.
    let mut prg: Vec<u8> = (0..4u8)
        .flat_map(|bank| std::iter::repeat_n(bank, PRG_BANK))
        .collect();
    #[rustfmt::skip]
    let program = [
        0xA9, 0x00, 0x8D, 0x00, 0xE0, // bit 0 = 0
        0xA9, 0x01, 0x8D, 0x00, 0xE0, // bit 1 = 1
        0xA9, 0x00, 0x8D, 0x00, 0xE0, // bits 2-4 = 0
        0x8D, 0x00, 0xE0,
        0x8D, 0x00, 0xE0,
        0x4C, 0x15, 0xC0,             // JMP *
    ];
    let last = 3 * PRG_BANK;
    prg[last..last + program.len()].copy_from_slice(&program);
    set_vectors(&mut prg, 0xC000, 0xC015);

    let mut nes = boot(&ines(&prg, &vec![0; CHR_BANK], 1, false));
    assert_eq!(nes.cpu.pc, 0xC000);
    assert_eq!(nes.bus.read(0x8000), 0);

    for _ in 0..8 {
        nes.step_instruction();
    }
    assert_eq!(nes.bus.read(0x8000), 2);
    assert_eq!(nes.bus.read(0xBFFF), 2);
    assert_eq!(nes.bus.read(0xF000), 3);
    assert_eq!(nes.bus.read(0xC000), 0xA9);
}

#[test]
fn controller_reads_through_the_bus() {
    let mut nes = boot(&nrom(&[], true));
    nes.set_controller(0, BUTTON_A | BUTTON_START);
    nes.set_controller(5, 0xFF);

    nes.bus.write(0x4016, 1);
    nes.bus.write(0x4016, 0);
    let bits: Vec<u8> = (0..8).map(|_| nes.bus.read(0x4016)).collect();
    assert_eq!(bits, vec![1, 0, 0, 1, 0, 0, 0, 0]);
    assert_eq!(nes.bus.read(0x4017), 0);
}

#[test]
fn unmapped_reads_see_the_last_write() {
    let mut nes = boot(&nrom(&[], true));
    nes.bus.write(0x0300, 0x99);
    assert_eq!(nes.bus.read(0x4020), 0x99);
    assert_eq!(nes.bus.read(0x5FFF), 0x99);
}

#[test]
fn frames_are_89342_ticks_with_rendering_off() {
    let mut nes = boot(&nrom(&[0x4C, 0x00, 0x80], true)); // JMP $8000
    nes.run_frame();
    let start = nes.bus.system_clock();
    nes.run_frame();
    assert_eq!(nes.bus.system_clock() - start, 341 * 262);
}

#[test]
fn vblank_nmi_runs_the_handler_once_per_frame() {
    #[rustfmt::skip]
    let program = [
        0xA9, 0x80,       // LDA #$80
        0x8D, 0x00, 0x20, // STA $2000
        0x4C, 0x05, 0x80, // JMP *
    ];
    let mut nes = boot(&nrom(&program, true));
    nes.run_frame();
    assert_eq!(nes.bus.ram[INTERRUPT_COUNT], 1);
    nes.run_frame();
    assert_eq!(nes.bus.ram[INTERRUPT_COUNT], 2);

    assert_eq!(nes.cpu.sp, 0xFD);
    assert!((0x8005..0x8008).contains(&nes.cpu.pc));
}

#[test]
fn reset_reloads_pc_and_clears_ram() {
    let mut nes = boot(&nrom(&[0xA9, 0x01, 0x85, 0x10], true));
    for _ in 0..2 {
        nes.step_instruction();
    }
    assert_eq!(nes.bus.ram[0x10], 0x01);

    nes.reset();
    assert_eq!(nes.cpu.pc, 0x8000);
    assert_eq!(nes.bus.ram[0x10], 0x00);
    assert_eq!(nes.bus.system_clock(), 0);
}

#[test]
fn cartridge_loads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&nrom(&[0xA9, 0x01], false)).unwrap();

    let cart = Cartridge::load(file.path()).unwrap();
    assert_eq!(cart.mapper_id(), 0);
    assert_eq!(cart.cpu_read(0x8000), Some(0xA9));
    assert_eq!(cart.cpu_read(0xC000), Some(0xA9));
}

#[test]
fn unsupported_mapper_is_a_load_error() {
    let image = ines(&vec![0; PRG_BANK], &vec![0; CHR_BANK], 4, false);
    let rom = nesbox::cartridge::rom::RomImage::parse(&image).unwrap();
    assert!(matches!(
        Cartridge::new(rom),
        Err(LoadError::UnsupportedMapper(4))
    ));
}

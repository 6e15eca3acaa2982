//! Opcode dispatch table: instruction, addressing mode, and base cycle count for all 256 opcodes.
//!
//! Undocumented opcodes decode to [`Instruction::Xxx`] (or a NOP with the matching operand width)
//! so that execution never faults. See [CPU unofficial opcodes](https://www.nesdev.org/wiki/CPU_unofficial_opcodes).

use crate::cpu::{addressing::AddrMode, instructions::Instruction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub instruction: Instruction,
    pub mode: AddrMode,
    pub cycles: u8,
}

impl Opcode {
    pub fn name(&self) -> &'static str {
        self.instruction.mnemonic()
    }
}

macro_rules! op {
    ($ins:ident, $mode:ident, $cycles:expr) => {
        Opcode {
            instruction: Instruction::$ins,
            mode: AddrMode::$mode,
            cycles: $cycles,
        }
    };
}

#[rustfmt::skip]
pub static OPCODES: [Opcode; 256] = [
    // 0x00
    op!(Brk, Imm, 7), op!(Ora, Izx, 6), op!(Xxx, Imp, 2), op!(Xxx, Imp, 8), op!(Nop, Zp0, 3), op!(Ora, Zp0, 3), op!(Asl, Zp0, 5), op!(Xxx, Imp, 5),
    op!(Php, Imp, 3), op!(Ora, Imm, 2), op!(Asl, Imp, 2), op!(Xxx, Imp, 2), op!(Nop, Abs, 4), op!(Ora, Abs, 4), op!(Asl, Abs, 6), op!(Xxx, Imp, 6),
    // 0x10
    op!(Bpl, Rel, 2), op!(Ora, Izy, 5), op!(Xxx, Imp, 2), op!(Xxx, Imp, 8), op!(Nop, Zpx, 4), op!(Ora, Zpx, 4), op!(Asl, Zpx, 6), op!(Xxx, Imp, 6),
    op!(Clc, Imp, 2), op!(Ora, Aby, 4), op!(Nop, Imp, 2), op!(Xxx, Imp, 7), op!(Nop, Abx, 4), op!(Ora, Abx, 4), op!(Asl, Abx, 7), op!(Xxx, Imp, 7),
    // 0x20
    op!(Jsr, Abs, 6), op!(And, Izx, 6), op!(Xxx, Imp, 2), op!(Xxx, Imp, 8), op!(Bit, Zp0, 3), op!(And, Zp0, 3), op!(Rol, Zp0, 5), op!(Xxx, Imp, 5),
    op!(Plp, Imp, 4), op!(And, Imm, 2), op!(Rol, Imp, 2), op!(Xxx, Imp, 2), op!(Bit, Abs, 4), op!(And, Abs, 4), op!(Rol, Abs, 6), op!(Xxx, Imp, 6),
    // 0x30
    op!(Bmi, Rel, 2), op!(And, Izy, 5), op!(Xxx, Imp, 2), op!(Xxx, Imp, 8), op!(Nop, Zpx, 4), op!(And, Zpx, 4), op!(Rol, Zpx, 6), op!(Xxx, Imp, 6),
    op!(Sec, Imp, 2), op!(And, Aby, 4), op!(Nop, Imp, 2), op!(Xxx, Imp, 7), op!(Nop, Abx, 4), op!(And, Abx, 4), op!(Rol, Abx, 7), op!(Xxx, Imp, 7),
    // 0x40
    op!(Rti, Imp, 6), op!(Eor, Izx, 6), op!(Xxx, Imp, 2), op!(Xxx, Imp, 8), op!(Nop, Zp0, 3), op!(Eor, Zp0, 3), op!(Lsr, Zp0, 5), op!(Xxx, Imp, 5),
    op!(Pha, Imp, 3), op!(Eor, Imm, 2), op!(Lsr, Imp, 2), op!(Xxx, Imp, 2), op!(Jmp, Abs, 3), op!(Eor, Abs, 4), op!(Lsr, Abs, 6), op!(Xxx, Imp, 6),
    // 0x50
    op!(Bvc, Rel, 2), op!(Eor, Izy, 5), op!(Xxx, Imp, 2), op!(Xxx, Imp, 8), op!(Nop, Zpx, 4), op!(Eor, Zpx, 4), op!(Lsr, Zpx, 6), op!(Xxx, Imp, 6),
    op!(Cli, Imp, 2), op!(Eor, Aby, 4), op!(Nop, Imp, 2), op!(Xxx, Imp, 7), op!(Nop, Abx, 4), op!(Eor, Abx, 4), op!(Lsr, Abx, 7), op!(Xxx, Imp, 7),
    // 0x60
    op!(Rts, Imp, 6), op!(Adc, Izx, 6), op!(Xxx, Imp, 2), op!(Xxx, Imp, 8), op!(Nop, Zp0, 3), op!(Adc, Zp0, 3), op!(Ror, Zp0, 5), op!(Xxx, Imp, 5),
    op!(Pla, Imp, 4), op!(Adc, Imm, 2), op!(Ror, Imp, 2), op!(Xxx, Imp, 2), op!(Jmp, Ind, 5), op!(Adc, Abs, 4), op!(Ror, Abs, 6), op!(Xxx, Imp, 6),
    // 0x70
    op!(Bvs, Rel, 2), op!(Adc, Izy, 5), op!(Xxx, Imp, 2), op!(Xxx, Imp, 8), op!(Nop, Zpx, 4), op!(Adc, Zpx, 4), op!(Ror, Zpx, 6), op!(Xxx, Imp, 6),
    op!(Sei, Imp, 2), op!(Adc, Aby, 4), op!(Nop, Imp, 2), op!(Xxx, Imp, 7), op!(Nop, Abx, 4), op!(Adc, Abx, 4), op!(Ror, Abx, 7), op!(Xxx, Imp, 7),
    // 0x80
    op!(Nop, Imm, 2), op!(Sta, Izx, 6), op!(Nop, Imm, 2), op!(Xxx, Imp, 6), op!(Sty, Zp0, 3), op!(Sta, Zp0, 3), op!(Stx, Zp0, 3), op!(Xxx, Imp, 3),
    op!(Dey, Imp, 2), op!(Nop, Imm, 2), op!(Txa, Imp, 2), op!(Xxx, Imp, 2), op!(Sty, Abs, 4), op!(Sta, Abs, 4), op!(Stx, Abs, 4), op!(Xxx, Imp, 4),
    // 0x90
    op!(Bcc, Rel, 2), op!(Sta, Izy, 6), op!(Xxx, Imp, 2), op!(Xxx, Imp, 6), op!(Sty, Zpx, 4), op!(Sta, Zpx, 4), op!(Stx, Zpy, 4), op!(Xxx, Imp, 4),
    op!(Tya, Imp, 2), op!(Sta, Aby, 5), op!(Txs, Imp, 2), op!(Xxx, Imp, 5), op!(Xxx, Imp, 5), op!(Sta, Abx, 5), op!(Xxx, Imp, 5), op!(Xxx, Imp, 5),
    // 0xA0
    op!(Ldy, Imm, 2), op!(Lda, Izx, 6), op!(Ldx, Imm, 2), op!(Xxx, Imp, 6), op!(Ldy, Zp0, 3), op!(Lda, Zp0, 3), op!(Ldx, Zp0, 3), op!(Xxx, Imp, 3),
    op!(Tay, Imp, 2), op!(Lda, Imm, 2), op!(Tax, Imp, 2), op!(Xxx, Imp, 2), op!(Ldy, Abs, 4), op!(Lda, Abs, 4), op!(Ldx, Abs, 4), op!(Xxx, Imp, 4),
    // 0xB0
    op!(Bcs, Rel, 2), op!(Lda, Izy, 5), op!(Xxx, Imp, 2), op!(Xxx, Imp, 5), op!(Ldy, Zpx, 4), op!(Lda, Zpx, 4), op!(Ldx, Zpy, 4), op!(Xxx, Imp, 4),
    op!(Clv, Imp, 2), op!(Lda, Aby, 4), op!(Tsx, Imp, 2), op!(Xxx, Imp, 4), op!(Ldy, Abx, 4), op!(Lda, Abx, 4), op!(Ldx, Aby, 4), op!(Xxx, Imp, 4),
    // 0xC0
    op!(Cpy, Imm, 2), op!(Cmp, Izx, 6), op!(Nop, Imm, 2), op!(Xxx, Imp, 8), op!(Cpy, Zp0, 3), op!(Cmp, Zp0, 3), op!(Dec, Zp0, 5), op!(Xxx, Imp, 5),
    op!(Iny, Imp, 2), op!(Cmp, Imm, 2), op!(Dex, Imp, 2), op!(Xxx, Imp, 2), op!(Cpy, Abs, 4), op!(Cmp, Abs, 4), op!(Dec, Abs, 6), op!(Xxx, Imp, 6),
    // 0xD0
    op!(Bne, Rel, 2), op!(Cmp, Izy, 5), op!(Xxx, Imp, 2), op!(Xxx, Imp, 8), op!(Nop, Zpx, 4), op!(Cmp, Zpx, 4), op!(Dec, Zpx, 6), op!(Xxx, Imp, 6),
    op!(Cld, Imp, 2), op!(Cmp, Aby, 4), op!(Nop, Imp, 2), op!(Xxx, Imp, 7), op!(Nop, Abx, 4), op!(Cmp, Abx, 4), op!(Dec, Abx, 7), op!(Xxx, Imp, 7),
    // 0xE0
    op!(Cpx, Imm, 2), op!(Sbc, Izx, 6), op!(Nop, Imm, 2), op!(Xxx, Imp, 8), op!(Cpx, Zp0, 3), op!(Sbc, Zp0, 3), op!(Inc, Zp0, 5), op!(Xxx, Imp, 5),
    op!(Inx, Imp, 2), op!(Sbc, Imm, 2), op!(Nop, Imp, 2), op!(Sbc, Imm, 2), op!(Cpx, Abs, 4), op!(Sbc, Abs, 4), op!(Inc, Abs, 6), op!(Xxx, Imp, 6),
    // 0xF0
    op!(Beq, Rel, 2), op!(Sbc, Izy, 5), op!(Xxx, Imp, 2), op!(Xxx, Imp, 8), op!(Nop, Zpx, 4), op!(Sbc, Zpx, 4), op!(Inc, Zpx, 6), op!(Xxx, Imp, 6),
    op!(Sed, Imp, 2), op!(Sbc, Aby, 4), op!(Nop, Imp, 2), op!(Xxx, Imp, 7), op!(Nop, Abx, 4), op!(Sbc, Abx, 4), op!(Inc, Abx, 7), op!(Xxx, Imp, 7),
];

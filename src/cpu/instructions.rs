//! Official 6502 instruction semantics.
//!
//! `execute` returns 1 when the instruction may pay the addressing mode's page-cross cycle
//! (indexed reads); stores and read-modify-write ops return 0. See
//! [6502 instructions](https://www.nesdev.org/obelisk-6502-guide/reference.html).

use crate::{
    bus::Bus,
    cpu::{
        addressing::AddrMode,
        cpu::CPU,
        flags::{
            FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE,
            FLAG_OVERFLOW, FLAG_UNUSED, FLAG_ZERO,
        },
    },
};

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    /// Placeholder for undocumented opcodes: burns its cycles, touches nothing.
    Xxx,
}

impl Instruction {
    #[rustfmt::skip]
    pub fn mnemonic(self) -> &'static str {
        use Instruction::*;
        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS",
            Beq => "BEQ", Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL",
            Brk => "BRK", Bvc => "BVC", Bvs => "BVS", Clc => "CLC", Cld => "CLD",
            Cli => "CLI", Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR", Inc => "INC",
            Inx => "INX", Iny => "INY", Jmp => "JMP", Jsr => "JSR", Lda => "LDA",
            Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Nop => "NOP", Ora => "ORA",
            Pha => "PHA", Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC", Sec => "SEC",
            Sed => "SED", Sei => "SEI", Sta => "STA", Stx => "STX", Sty => "STY",
            Tax => "TAX", Tay => "TAY", Tsx => "TSX", Txa => "TXA", Txs => "TXS",
            Tya => "TYA", Xxx => "???",
        }
    }
}

impl CPU {
    pub(super) fn execute<B: Bus>(&mut self, instruction: Instruction, bus: &mut B) -> u8 {
        use Instruction::*;
        match instruction {
            Adc => {
                let value = self.fetch(bus);
                self.add_with_carry(value);
                1
            }
            Sbc => {
                // Subtraction is addition of the ones' complement.
                let value = self.fetch(bus) ^ 0xFF;
                self.add_with_carry(value);
                1
            }
            And => {
                let value = self.fetch(bus);
                self.a &= value;
                self.update_zero_and_negative_flags(self.a);
                1
            }
            Eor => {
                let value = self.fetch(bus);
                self.a ^= value;
                self.update_zero_and_negative_flags(self.a);
                1
            }
            Ora => {
                let value = self.fetch(bus);
                self.a |= value;
                self.update_zero_and_negative_flags(self.a);
                1
            }
            Asl => {
                let value = self.fetch(bus);
                self.set_flag(FLAG_CARRY, value & 0x80 != 0);
                self.write_back(bus, value << 1);
                0
            }
            Lsr => {
                let value = self.fetch(bus);
                self.set_flag(FLAG_CARRY, value & 0x01 != 0);
                self.write_back(bus, value >> 1);
                0
            }
            Rol => {
                let value = self.fetch(bus);
                let carry_in = self.flag(FLAG_CARRY) as u8;
                self.set_flag(FLAG_CARRY, value & 0x80 != 0);
                self.write_back(bus, (value << 1) | carry_in);
                0
            }
            Ror => {
                let value = self.fetch(bus);
                let carry_in = self.flag(FLAG_CARRY) as u8;
                self.set_flag(FLAG_CARRY, value & 0x01 != 0);
                self.write_back(bus, (value >> 1) | (carry_in << 7));
                0
            }
            Bcc => self.branch(!self.flag(FLAG_CARRY)),
            Bcs => self.branch(self.flag(FLAG_CARRY)),
            Beq => self.branch(self.flag(FLAG_ZERO)),
            Bne => self.branch(!self.flag(FLAG_ZERO)),
            Bmi => self.branch(self.flag(FLAG_NEGATIVE)),
            Bpl => self.branch(!self.flag(FLAG_NEGATIVE)),
            Bvc => self.branch(!self.flag(FLAG_OVERFLOW)),
            Bvs => self.branch(self.flag(FLAG_OVERFLOW)),
            Bit => {
                let value = self.fetch(bus);
                self.set_flag(FLAG_ZERO, self.a & value == 0);
                self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
                self.set_flag(FLAG_OVERFLOW, value & 0x40 != 0);
                0
            }
            Brk => {
                // Immediate mode already stepped PC over the padding byte.
                self.push_word(bus, self.pc);
                self.push(bus, self.status | FLAG_BREAK | FLAG_UNUSED);
                self.set_flag(FLAG_INTERRUPT_DISABLE, true);
                self.pc = self.read_word(bus, 0xFFFE);
                0
            }
            Clc => self.flag_op(FLAG_CARRY, false),
            Cld => self.flag_op(FLAG_DECIMAL, false),
            Cli => self.flag_op(FLAG_INTERRUPT_DISABLE, false),
            Clv => self.flag_op(FLAG_OVERFLOW, false),
            Sec => self.flag_op(FLAG_CARRY, true),
            Sed => self.flag_op(FLAG_DECIMAL, true),
            Sei => self.flag_op(FLAG_INTERRUPT_DISABLE, true),
            Cmp => {
                let value = self.fetch(bus);
                self.compare(self.a, value);
                1
            }
            Cpx => {
                let value = self.fetch(bus);
                self.compare(self.x, value);
                0
            }
            Cpy => {
                let value = self.fetch(bus);
                self.compare(self.y, value);
                0
            }
            Dec => {
                let value = self.fetch(bus).wrapping_sub(1);
                bus.write(self.addr_abs, value);
                self.update_zero_and_negative_flags(value);
                0
            }
            Inc => {
                let value = self.fetch(bus).wrapping_add(1);
                bus.write(self.addr_abs, value);
                self.update_zero_and_negative_flags(value);
                0
            }
            Dex => {
                self.x = self.x.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.x);
                0
            }
            Dey => {
                self.y = self.y.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.y);
                0
            }
            Inx => {
                self.x = self.x.wrapping_add(1);
                self.update_zero_and_negative_flags(self.x);
                0
            }
            Iny => {
                self.y = self.y.wrapping_add(1);
                self.update_zero_and_negative_flags(self.y);
                0
            }
            Jmp => {
                self.pc = self.addr_abs;
                0
            }
            Jsr => {
                // Pushes the address of the last operand byte.
                self.push_word(bus, self.pc.wrapping_sub(1));
                self.pc = self.addr_abs;
                0
            }
            Rts => {
                self.pc = self.pop_word(bus).wrapping_add(1);
                0
            }
            Rti => {
                let status = self.pop(bus);
                self.status = (status & !FLAG_BREAK) | FLAG_UNUSED;
                self.pc = self.pop_word(bus);
                0
            }
            Lda => {
                self.a = self.fetch(bus);
                self.update_zero_and_negative_flags(self.a);
                1
            }
            Ldx => {
                self.x = self.fetch(bus);
                self.update_zero_and_negative_flags(self.x);
                1
            }
            Ldy => {
                self.y = self.fetch(bus);
                self.update_zero_and_negative_flags(self.y);
                1
            }
            Nop => match self.opcode {
                0x1C | 0x3C | 0x5C | 0x7C | 0xDC | 0xFC => 1,
                _ => 0,
            },
            Pha => {
                self.push(bus, self.a);
                0
            }
            Php => {
                self.push(bus, self.status | FLAG_BREAK | FLAG_UNUSED);
                0
            }
            Pla => {
                self.a = self.pop(bus);
                self.update_zero_and_negative_flags(self.a);
                0
            }
            Plp => {
                let status = self.pop(bus);
                self.status = (status & !FLAG_BREAK) | FLAG_UNUSED;
                0
            }
            Sta => {
                bus.write(self.addr_abs, self.a);
                0
            }
            Stx => {
                bus.write(self.addr_abs, self.x);
                0
            }
            Sty => {
                bus.write(self.addr_abs, self.y);
                0
            }
            Tax => {
                self.x = self.a;
                self.update_zero_and_negative_flags(self.x);
                0
            }
            Tay => {
                self.y = self.a;
                self.update_zero_and_negative_flags(self.y);
                0
            }
            Tsx => {
                self.x = self.sp;
                self.update_zero_and_negative_flags(self.x);
                0
            }
            Txa => {
                self.a = self.x;
                self.update_zero_and_negative_flags(self.a);
                0
            }
            Txs => {
                self.sp = self.x;
                0
            }
            Tya => {
                self.a = self.y;
                self.update_zero_and_negative_flags(self.a);
                0
            }
            Xxx => 0,
        }
    }

    /// A + value + C, shared by ADC and SBC.
    fn add_with_carry(&mut self, value: u8) {
        let sum = self.a as u16 + value as u16 + self.flag(FLAG_CARRY) as u16;
        let result = sum as u8;

        self.set_flag(FLAG_CARRY, sum > 0xFF);
        self.set_flag(
            FLAG_OVERFLOW,
            (!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0,
        );

        self.a = result;
        self.update_zero_and_negative_flags(self.a);
    }

    fn compare(&mut self, register: u8, value: u8) {
        let diff = register.wrapping_sub(value);
        self.set_flag(FLAG_CARRY, register >= value);
        self.set_flag(FLAG_ZERO, diff == 0);
        self.set_flag(FLAG_NEGATIVE, diff & 0x80 != 0);
    }

    /// Shift/rotate result goes to A in implied mode, else back to memory.
    fn write_back<B: Bus>(&mut self, bus: &mut B, value: u8) {
        if self.mode == AddrMode::Imp {
            self.a = value;
        } else {
            bus.write(self.addr_abs, value);
        }
        self.update_zero_and_negative_flags(value);
    }

    fn branch(&mut self, condition: bool) -> u8 {
        if condition {
            self.cycles += 1;
            if (self.addr_abs & 0xFF00) != (self.pc & 0xFF00) {
                self.cycles += 1;
            }
            self.pc = self.addr_abs;
        }
        0
    }

    fn flag_op(&mut self, flag: u8, on: bool) -> u8 {
        self.set_flag(flag, on);
        0
    }

    fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_flag(FLAG_ZERO, value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }
}

//! Every opcode decodes to the canonical 6502 mnemonic, addressing mode and base cycle count.
//! Undocumented opcodes show as `???`, except the ones that behave as NOPs.

use nesbox::cpu::table::OPCODES;

#[rustfmt::skip]
const MNEMONICS: [&str; 256] = [
    "BRK", "ORA", "???", "???", "NOP", "ORA", "ASL", "???", "PHP", "ORA", "ASL", "???", "NOP", "ORA", "ASL", "???", // 0x
    "BPL", "ORA", "???", "???", "NOP", "ORA", "ASL", "???", "CLC", "ORA", "NOP", "???", "NOP", "ORA", "ASL", "???", // 1x
    "JSR", "AND", "???", "???", "BIT", "AND", "ROL", "???", "PLP", "AND", "ROL", "???", "BIT", "AND", "ROL", "???", // 2x
    "BMI", "AND", "???", "???", "NOP", "AND", "ROL", "???", "SEC", "AND", "NOP", "???", "NOP", "AND", "ROL", "???", // 3x
    "RTI", "EOR", "???", "???", "NOP", "EOR", "LSR", "???", "PHA", "EOR", "LSR", "???", "JMP", "EOR", "LSR", "???", // 4x
    "BVC", "EOR", "???", "???", "NOP", "EOR", "LSR", "???", "CLI", "EOR", "NOP", "???", "NOP", "EOR", "LSR", "???", // 5x
    "RTS", "ADC", "???", "???", "NOP", "ADC", "ROR", "???", "PLA", "ADC", "ROR", "???", "JMP", "ADC", "ROR", "???", // 6x
    "BVS", "ADC", "???", "???", "NOP", "ADC", "ROR", "???", "SEI", "ADC", "NOP", "???", "NOP", "ADC", "ROR", "???", // 7x
    "NOP", "STA", "NOP", "???", "STY", "STA", "STX", "???", "DEY", "NOP", "TXA", "???", "STY", "STA", "STX", "???", // 8x
    "BCC", "STA", "???", "???", "STY", "STA", "STX", "???", "TYA", "STA", "TXS", "???", "???", "STA", "???", "???", // 9x
    "LDY", "LDA", "LDX", "???", "LDY", "LDA", "LDX", "???", "TAY", "LDA", "TAX", "???", "LDY", "LDA", "LDX", "???", // Ax
    "BCS", "LDA", "???", "???", "LDY", "LDA", "LDX", "???", "CLV", "LDA", "TSX", "???", "LDY", "LDA", "LDX", "???", // Bx
    "CPY", "CMP", "NOP", "???", "CPY", "CMP", "DEC", "???", "INY", "CMP", "DEX", "???", "CPY", "CMP", "DEC", "???", // Cx
    "BNE", "CMP", "???", "???", "NOP", "CMP", "DEC", "???", "CLD", "CMP", "NOP", "???", "NOP", "CMP", "DEC", "???", // Dx
    "CPX", "SBC", "NOP", "???", "CPX", "SBC", "INC", "???", "INX", "SBC", "NOP", "SBC", "CPX", "SBC", "INC", "???", // Ex
    "BEQ", "SBC", "???", "???", "NOP", "SBC", "INC", "???", "SED", "SBC", "NOP", "???", "NOP", "SBC", "INC", "???", // Fx
];

#[rustfmt::skip]
const MODES: [&str; 256] = [
    "IMM", "IZX", "IMP", "IMP", "ZP0", "ZP0", "ZP0", "IMP", "IMP", "IMM", "IMP", "IMP", "ABS", "ABS", "ABS", "IMP", // 0x
    "REL", "IZY", "IMP", "IMP", "ZPX", "ZPX", "ZPX", "IMP", "IMP", "ABY", "IMP", "IMP", "ABX", "ABX", "ABX", "IMP", // 1x
    "ABS", "IZX", "IMP", "IMP", "ZP0", "ZP0", "ZP0", "IMP", "IMP", "IMM", "IMP", "IMP", "ABS", "ABS", "ABS", "IMP", // 2x
    "REL", "IZY", "IMP", "IMP", "ZPX", "ZPX", "ZPX", "IMP", "IMP", "ABY", "IMP", "IMP", "ABX", "ABX", "ABX", "IMP", // 3x
    "IMP", "IZX", "IMP", "IMP", "ZP0", "ZP0", "ZP0", "IMP", "IMP", "IMM", "IMP", "IMP", "ABS", "ABS", "ABS", "IMP", // 4x
    "REL", "IZY", "IMP", "IMP", "ZPX", "ZPX", "ZPX", "IMP", "IMP", "ABY", "IMP", "IMP", "ABX", "ABX", "ABX", "IMP", // 5x
    "IMP", "IZX", "IMP", "IMP", "ZP0", "ZP0", "ZP0", "IMP", "IMP", "IMM", "IMP", "IMP", "IND", "ABS", "ABS", "IMP", // 6x
    "REL", "IZY", "IMP", "IMP", "ZPX", "ZPX", "ZPX", "IMP", "IMP", "ABY", "IMP", "IMP", "ABX", "ABX", "ABX", "IMP", // 7x
    "IMM", "IZX", "IMM", "IMP", "ZP0", "ZP0", "ZP0", "IMP", "IMP", "IMM", "IMP", "IMP", "ABS", "ABS", "ABS", "IMP", // 8x
    "REL", "IZY", "IMP", "IMP", "ZPX", "ZPX", "ZPY", "IMP", "IMP", "ABY", "IMP", "IMP", "IMP", "ABX", "IMP", "IMP", // 9x
    "IMM", "IZX", "IMM", "IMP", "ZP0", "ZP0", "ZP0", "IMP", "IMP", "IMM", "IMP", "IMP", "ABS", "ABS", "ABS", "IMP", // Ax
    "REL", "IZY", "IMP", "IMP", "ZPX", "ZPX", "ZPY", "IMP", "IMP", "ABY", "IMP", "IMP", "ABX", "ABX", "ABY", "IMP", // Bx
    "IMM", "IZX", "IMM", "IMP", "ZP0", "ZP0", "ZP0", "IMP", "IMP", "IMM", "IMP", "IMP", "ABS", "ABS", "ABS", "IMP", // Cx
    "REL", "IZY", "IMP", "IMP", "ZPX", "ZPX", "ZPX", "IMP", "IMP", "ABY", "IMP", "IMP", "ABX", "ABX", "ABX", "IMP", // Dx
    "IMM", "IZX", "IMM", "IMP", "ZP0", "ZP0", "ZP0", "IMP", "IMP", "IMM", "IMP", "IMM", "ABS", "ABS", "ABS", "IMP", // Ex
    "REL", "IZY", "IMP", "IMP", "ZPX", "ZPX", "ZPX", "IMP", "IMP", "ABY", "IMP", "IMP", "ABX", "ABX", "ABX", "IMP", // Fx
];

#[rustfmt::skip]
const CYCLES: [u8; 256] = [
    7, 6, 2, 8, 3, 3, 5, 5, 3, 2, 2, 2, 4, 4, 6, 6, // 0x
    2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 1x
    6, 6, 2, 8, 3, 3, 5, 5, 4, 2, 2, 2, 4, 4, 6, 6, // 2x
    2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 3x
    6, 6, 2, 8, 3, 3, 5, 5, 3, 2, 2, 2, 3, 4, 6, 6, // 4x
    2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 5x
    6, 6, 2, 8, 3, 3, 5, 5, 4, 2, 2, 2, 5, 4, 6, 6, // 6x
    2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 7x
    2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4, // 8x
    2, 6, 2, 6, 4, 4, 4, 4, 2, 5, 2, 5, 5, 5, 5, 5, // 9x
    2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4, // Ax
    2, 5, 2, 5, 4, 4, 4, 4, 2, 4, 2, 4, 4, 4, 4, 4, // Bx
    2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6, // Cx
    2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // Dx
    2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6, // Ex
    2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // Fx
];

#[test]
fn opcode_table_matches_reference() {
    for (opcode, op) in OPCODES.iter().enumerate() {
        assert_eq!(
            (op.name(), op.mode.name(), op.cycles),
            (MNEMONICS[opcode], MODES[opcode], CYCLES[opcode]),
            "opcode ${:02X}",
            opcode
        );
    }
}

#[test]
fn official_opcode_count() {
    let official = OPCODES
        .iter()
        .enumerate()
        .filter(|(opcode, op)| op.name() != "???" && !is_unofficial(*opcode as u8, op.name()))
        .count();
    assert_eq!(official, 151);
}

/// Named undocumented opcodes: the NOP variants and the $EB alias of SBC #imm.
fn is_unofficial(opcode: u8, name: &str) -> bool {
    opcode == 0xEB || (name == "NOP" && opcode != 0xEA)
}

use std::fmt;

use ls8_core::{Instruction, InstructionDef, OperandDef};

use crate::isa::Opcode;

const A: OperandDef = OperandDef::Register {
    pattern: "a",
    format: "Ra",
};
const B: OperandDef = OperandDef::Register {
    pattern: "b",
    format: "Rb",
};
const IMM: OperandDef = OperandDef::ImmediateConstant { pattern: "i" };

pub static HLT: InstructionDef<'static> = InstructionDef::new("HLT", 0b0000_0001, &[]);
pub static LDI: InstructionDef<'static> = InstructionDef::new("LDI", 0b1000_0010, &[A, IMM]);
pub static PRN: InstructionDef<'static> = InstructionDef::new("PRN", 0b0100_0111, &[A]);
pub static ADD: InstructionDef<'static> = InstructionDef::new("ADD", 0b1010_0000, &[A, B]);
pub static MUL: InstructionDef<'static> = InstructionDef::new("MUL", 0b1010_0010, &[A, B]);
pub static PUSH: InstructionDef<'static> = InstructionDef::new("PUSH", 0b0100_0101, &[A]);
pub static POP: InstructionDef<'static> = InstructionDef::new("POP", 0b0100_0110, &[A]);
pub static CALL: InstructionDef<'static> = InstructionDef::new("CALL", 0b0101_0000, &[A]);
pub static RET: InstructionDef<'static> = InstructionDef::new("RET", 0b0001_0001, &[]);
pub static JMP: InstructionDef<'static> = InstructionDef::new("JMP", 0b0101_0100, &[A]);
pub static CMP: InstructionDef<'static> = InstructionDef::new("CMP", 0b1010_0111, &[A, B]);
pub static JEQ: InstructionDef<'static> = InstructionDef::new("JEQ", 0b0101_0101, &[A]);
pub static JNE: InstructionDef<'static> = InstructionDef::new("JNE", 0b0101_0110, &[A]);
pub static ST: InstructionDef<'static> = InstructionDef::new("ST", 0b1000_0100, &[A, B]);

/// Decodes the instruction starting at `bytes[0]`. Returns `None` for an
/// empty slice or a byte that is not an opcode.
pub fn decode_one(address: usize, bytes: &[u8]) -> Option<Instruction<'static>> {
    let (&byte, operands) = bytes.split_first()?;
    let opcode = Opcode::try_from(byte).ok()?;
    Some(opcode.def().decode(address, operands))
}

pub enum ListingLine {
    Instruction(Instruction<'static>),
    Data { address: usize, value: u8 },
}

impl ListingLine {
    fn address(&self) -> usize {
        match self {
            ListingLine::Instruction(ins) => ins.address(),
            ListingLine::Data { address, .. } => *address,
        }
    }
}

impl fmt::Display for ListingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingLine::Instruction(ins) => {
                let mut raw = format!("{:02X}", ins.def().opcode());
                for operand in ins.operands() {
                    raw.push_str(&format!(" {:02X}", operand));
                }
                write!(f, "{:02X}: {:<9} {}", self.address(), raw, ins)
            }
            ListingLine::Data { address, value } => {
                write!(f, "{:02X}: {:<9} .byte 0x{:02X}", address, format!("{:02X}", value), value)
            }
        }
    }
}

/// Produces a linear listing of `program`. Bytes that do not start a known
/// instruction are listed as data and decoding resumes at the next byte.
pub fn disassemble(program: &[u8]) -> Vec<ListingLine> {
    let mut listing = Vec::new();
    let mut address = 0;
    while address < program.len() {
        match decode_one(address, &program[address..]) {
            Some(ins) => {
                address += ins.len_bytes();
                listing.push(ListingLine::Instruction(ins));
            }
            None => {
                listing.push(ListingLine::Data {
                    address,
                    value: program[address],
                });
                address += 1;
            }
        }
    }
    listing
}

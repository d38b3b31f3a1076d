use ls8_core::InstructionDef;

use crate::isa::instruction;

const OPERAND_COUNT_SHIFT: u8 = 6;
const ALU_BIT: u8 = 0b0010_0000;
const SETS_PC_BIT: u8 = 0b0001_0000;

/// LS-8 opcodes. Each byte is laid out as `AABCDDDD`:
///  - `AA`:   number of operand bytes following the opcode
///  - `B`:    instruction is handled by the ALU
///  - `C`:    instruction sets the PC itself
///  - `DDDD`: instruction identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Hlt = 0b0000_0001,
    Ldi = 0b1000_0010,
    Prn = 0b0100_0111,
    Add = 0b1010_0000,
    Mul = 0b1010_0010,
    Push = 0b0100_0101,
    Pop = 0b0100_0110,
    Call = 0b0101_0000,
    Ret = 0b0001_0001,
    Jmp = 0b0101_0100,
    Cmp = 0b1010_0111,
    Jeq = 0b0101_0101,
    Jne = 0b0101_0110,
    St = 0b1000_0100,
}

impl Opcode {
    pub const ALL: [Opcode; 14] = [
        Opcode::Hlt,
        Opcode::Ldi,
        Opcode::Prn,
        Opcode::Add,
        Opcode::Mul,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Call,
        Opcode::Ret,
        Opcode::Jmp,
        Opcode::Cmp,
        Opcode::Jeq,
        Opcode::Jne,
        Opcode::St,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn operand_count(self) -> u8 {
        self.value() >> OPERAND_COUNT_SHIFT
    }

    pub fn is_alu(self) -> bool {
        self.value() & ALU_BIT != 0
    }

    pub fn sets_pc(self) -> bool {
        self.value() & SETS_PC_BIT != 0
    }

    pub fn def(self) -> &'static InstructionDef<'static> {
        match self {
            Opcode::Hlt => &instruction::HLT,
            Opcode::Ldi => &instruction::LDI,
            Opcode::Prn => &instruction::PRN,
            Opcode::Add => &instruction::ADD,
            Opcode::Mul => &instruction::MUL,
            Opcode::Push => &instruction::PUSH,
            Opcode::Pop => &instruction::POP,
            Opcode::Call => &instruction::CALL,
            Opcode::Ret => &instruction::RET,
            Opcode::Jmp => &instruction::JMP,
            Opcode::Cmp => &instruction::CMP,
            Opcode::Jeq => &instruction::JEQ,
            Opcode::Jne => &instruction::JNE,
            Opcode::St => &instruction::ST,
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Opcode::ALL
            .into_iter()
            .find(|opcode| opcode.value() == value)
            .ok_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte_decodes_to_at_most_one_opcode() {
        for byte in 0..=u8::MAX {
            match Opcode::try_from(byte) {
                Ok(opcode) => assert_eq!(opcode.value(), byte),
                Err(value) => {
                    assert_eq!(value, byte);
                    assert!(!Opcode::ALL.iter().any(|op| op.value() == byte));
                }
            }
        }
    }

    #[test]
    fn definitions_agree_with_encoding() {
        for opcode in Opcode::ALL {
            let def = opcode.def();
            assert_eq!(def.opcode(), opcode.value());
            assert_eq!(def.operand_count(), opcode.operand_count() as usize);
        }
    }

    #[test]
    fn alu_and_pc_bits() {
        let alu: Vec<Opcode> = Opcode::ALL.into_iter().filter(|op| op.is_alu()).collect();
        assert_eq!(alu, vec![Opcode::Add, Opcode::Mul, Opcode::Cmp]);

        let sets_pc: Vec<Opcode> = Opcode::ALL.into_iter().filter(|op| op.sets_pc()).collect();
        assert_eq!(
            sets_pc,
            vec![
                Opcode::Call,
                Opcode::Ret,
                Opcode::Jmp,
                Opcode::Jeq,
                Opcode::Jne
            ]
        );
    }

    #[test]
    fn zero_is_not_an_opcode() {
        assert_eq!(Opcode::try_from(0x00), Err(0x00));
    }
}

use crate::error::{CpuError, Result};
use crate::flags::Flags;
use crate::isa::Opcode;

/// Where an ALU result goes: back into the first operand register, or into FL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOutput {
    Value(u8),
    Flags(Flags),
}

/// Applies `op` to two register values. Arithmetic wraps at 8 bits.
pub fn apply(op: Opcode, a: u8, b: u8) -> Result<AluOutput> {
    match op {
        Opcode::Add => Ok(AluOutput::Value(a.wrapping_add(b))),
        Opcode::Mul => Ok(AluOutput::Value(a.wrapping_mul(b))),
        Opcode::Cmp => Ok(AluOutput::Flags(Flags::from_ordering(a.cmp(&b)))),
        _ => Err(CpuError::UnsupportedAluOperation(op)),
    }
}

use std::io;

use ls8_core::StorageError;
use thiserror::Error;

use crate::isa::Opcode;

#[derive(Debug, Error)]
pub enum CpuError {
    #[error("unknown opcode 0x{opcode:02X} at 0x{address:02X}")]
    UnknownOpcode { address: u8, opcode: u8 },
    #[error("unsupported ALU operation {0:?}")]
    UnsupportedAluOperation(Opcode),
    #[error("invalid register R{index} referenced at 0x{address:02X}")]
    InvalidRegister { address: u8, index: u8 },
    #[error("stack overflow: push at SP 0x{sp:02X} would overwrite the program")]
    StackOverflow { sp: u8 },
    #[error("stack underflow: pop at SP 0x{sp:02X} with an empty stack")]
    StackUnderflow { sp: u8 },
    #[error("program of {len} bytes exceeds the {max} bytes below the stack")]
    ProgramTooLarge { len: usize, max: usize },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to write output")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CpuError>;

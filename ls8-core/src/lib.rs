pub mod isa;
pub mod storage;

pub use crate::isa::instruction::{Instruction, InstructionDef, OperandDef};
pub use crate::storage::{Ram, RamStats, StorageError};

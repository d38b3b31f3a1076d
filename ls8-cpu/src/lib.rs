pub mod alu;
pub mod cpu;
pub mod isa;
pub mod loader;

mod error;
mod flags;
mod registers;
mod stack;

pub use crate::cpu::{CpuState, CycleBatch, Ls8Cpu, Ls8Ram, MEMORY_SIZE};
pub use crate::error::{CpuError, Result};
pub use crate::flags::Flags;
pub use crate::loader::{load_file, parse_program, LoadError};
pub use crate::registers::{Ls8Registers, NUM_REGISTERS, SP, STACK_TOP};
pub use crate::stack::Ls8Stack;

pub mod instruction;
mod opcode;

pub use instruction::{decode_one, disassemble, ListingLine};
pub use opcode::Opcode;

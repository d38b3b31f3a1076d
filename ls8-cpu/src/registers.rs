use std::fmt;

pub const NUM_REGISTERS: usize = 8;

/// Register reserved as the stack pointer.
pub const SP: u8 = 6;

/// Initial stack pointer; the stack grows down from here.
pub const STACK_TOP: u8 = 0xF4;

#[derive(Clone, PartialEq, Eq)]
pub struct Ls8Registers {
    regs: [u8; NUM_REGISTERS],
}

impl Default for Ls8Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Ls8Registers {
    pub fn new() -> Self {
        let mut regs = [0; NUM_REGISTERS];
        regs[SP as usize] = STACK_TOP;
        Ls8Registers { regs }
    }

    /// Returns `None` if `index` does not name a register.
    pub fn get(&self, index: u8) -> Option<u8> {
        self.regs.get(index as usize).copied()
    }

    pub fn get_mut(&mut self, index: u8) -> Option<&mut u8> {
        self.regs.get_mut(index as usize)
    }

    pub fn sp(&self) -> u8 {
        self.regs[SP as usize]
    }

    pub fn set_sp(&mut self, value: u8) {
        self.regs[SP as usize] = value;
    }
}

impl fmt::Debug for Ls8Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, value) in self.regs.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "R{}: 0x{:02X}", idx, value)?;
        }
        Ok(())
    }
}

use std::fmt;

use crate::error::{CpuError, Result};
use crate::registers::{Ls8Registers, STACK_TOP};

/// Downward-growing stack living in RAM above the loaded program (`floor`).
/// SP is R6 and points at the most recently pushed value.
///
/// SP is moved in separate steps so the CPU can order them against register
/// reads: [`grow`](Self::grow) before a push writes, [`top`](Self::top) and
/// then [`shrink`](Self::shrink) around a pop. Underflow is judged by the
/// number of values pushed, so a program may relocate SP with `LDI R6`.
pub struct Ls8Stack {
    floor: u8,
    depth: usize,
}

impl fmt::Debug for Ls8Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LS-8 Stack")
            .field("floor", &format_args!("0x{:02X}", self.floor))
            .field("depth", &self.depth)
            .finish()
    }
}

impl Default for Ls8Stack {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Ls8Stack {
    pub fn new(floor: u8) -> Self {
        Ls8Stack { floor, depth: 0 }
    }

    /// Number of values that fit between [`STACK_TOP`] and the program.
    pub fn capacity(&self) -> usize {
        STACK_TOP.saturating_sub(self.floor) as usize
    }

    /// Values pushed and not yet popped.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Decrements SP and returns the slot the pushed value belongs in.
    pub fn grow(&mut self, regs: &mut Ls8Registers) -> Result<u8> {
        let sp = regs.sp();
        if sp <= self.floor {
            return Err(CpuError::StackOverflow { sp });
        }
        let sp = sp - 1;
        regs.set_sp(sp);
        self.depth += 1;
        Ok(sp)
    }

    /// Slot holding the most recently pushed value.
    pub fn top(&self, regs: &Ls8Registers) -> Result<u8> {
        let sp = regs.sp();
        if self.depth == 0 {
            return Err(CpuError::StackUnderflow { sp });
        }
        Ok(sp)
    }

    /// Increments SP after the top value has been consumed.
    pub fn shrink(&mut self, regs: &mut Ls8Registers) {
        regs.set_sp(regs.sp().wrapping_add(1));
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::Ls8Ram;

    fn push(
        stack: &mut Ls8Stack,
        ram: &mut Ls8Ram,
        regs: &mut Ls8Registers,
        value: u8,
    ) -> Result<()> {
        let sp = stack.grow(regs)?;
        ram.write(sp as usize, value);
        Ok(())
    }

    fn pop(stack: &mut Ls8Stack, ram: &mut Ls8Ram, regs: &mut Ls8Registers) -> Result<u8> {
        let value = ram.read(stack.top(regs)? as usize);
        stack.shrink(regs);
        Ok(value)
    }

    #[test]
    fn lifo_order() {
        let mut stack = Ls8Stack::new(0);
        let mut ram = Ls8Ram::new();
        let mut regs = Ls8Registers::new();
        for value in 1..=3 {
            push(&mut stack, &mut ram, &mut regs, value).unwrap();
        }
        assert_eq!(regs.sp(), STACK_TOP - 3);
        assert_eq!(stack.depth(), 3);
        assert_eq!(ram.peek((STACK_TOP - 1) as usize), 1);
        for value in (1..=3).rev() {
            assert_eq!(pop(&mut stack, &mut ram, &mut regs).unwrap(), value);
        }
        assert_eq!(regs.sp(), STACK_TOP);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn overflow_stops_at_floor() {
        let mut stack = Ls8Stack::new(0xF0);
        let mut ram = Ls8Ram::new();
        let mut regs = Ls8Registers::new();
        assert_eq!(stack.capacity(), 4);
        for _ in 0..stack.capacity() {
            push(&mut stack, &mut ram, &mut regs, 0xAA).unwrap();
        }
        assert!(matches!(
            push(&mut stack, &mut ram, &mut regs, 0xAA),
            Err(CpuError::StackOverflow { sp: 0xF0 })
        ));
        assert_eq!(regs.sp(), 0xF0);
        assert_eq!(ram.peek(0xEF), 0);
    }

    #[test]
    fn pop_empty_underflows() {
        let mut stack = Ls8Stack::default();
        let mut ram = Ls8Ram::new();
        let mut regs = Ls8Registers::new();
        assert!(matches!(
            pop(&mut stack, &mut ram, &mut regs),
            Err(CpuError::StackUnderflow { sp: STACK_TOP })
        ));
        assert_eq!(regs.sp(), STACK_TOP);
    }

    #[test]
    fn relocated_sp_above_top() {
        let mut stack = Ls8Stack::new(0x10);
        let mut ram = Ls8Ram::new();
        let mut regs = Ls8Registers::new();
        regs.set_sp(0xFA);
        push(&mut stack, &mut ram, &mut regs, 7).unwrap();
        assert_eq!(regs.sp(), 0xF9);
        assert_eq!(pop(&mut stack, &mut ram, &mut regs).unwrap(), 7);
        assert_eq!(regs.sp(), 0xFA);
        assert!(matches!(
            pop(&mut stack, &mut ram, &mut regs),
            Err(CpuError::StackUnderflow { sp: 0xFA })
        ));
    }

    #[test]
    fn shrink_wraps_at_end_of_memory() {
        let mut stack = Ls8Stack::new(0);
        let mut ram = Ls8Ram::new();
        let mut regs = Ls8Registers::new();
        push(&mut stack, &mut ram, &mut regs, 9).unwrap();
        regs.set_sp(0xFF);
        assert_eq!(pop(&mut stack, &mut ram, &mut regs).unwrap(), 0);
        assert_eq!(regs.sp(), 0x00);
        assert_eq!(stack.depth(), 0);
    }
}

use std::io::Write;

use ls8_core::Ram;

use crate::alu::{self, AluOutput};
use crate::error::{CpuError, Result};
use crate::flags::Flags;
use crate::isa::Opcode;
use crate::registers::{Ls8Registers, NUM_REGISTERS, STACK_TOP};
use crate::stack::Ls8Stack;

pub const MEMORY_SIZE: usize = 256;

pub type Ls8Ram = Ram<MEMORY_SIZE>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuState {
    Running,
    Halted,
}

/// Outcome of [`Ls8Cpu::execute_cycles`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleBatch {
    pub cycles_spent: usize,
    pub state: CpuState,
}

#[derive(Debug)]
pub struct Ls8Cpu {
    ram: Ls8Ram,
    regs: Ls8Registers,
    flags: Flags,
    stack: Ls8Stack,
    pc: u8,
    state: CpuState,
    cycles: usize,
}

impl Default for Ls8Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ls8Cpu {
    pub fn new() -> Self {
        Ls8Cpu {
            ram: Ls8Ram::new(),
            regs: Ls8Registers::new(),
            flags: Flags::default(),
            stack: Ls8Stack::default(),
            pc: 0,
            state: CpuState::Running,
            cycles: 0,
        }
    }

    /// Creates a CPU with `program` loaded at address 0. The program must fit
    /// below the stack, and the stack may not grow into it.
    pub fn with_program(program: &[u8]) -> Result<Self> {
        let too_large = CpuError::ProgramTooLarge {
            len: program.len(),
            max: STACK_TOP as usize,
        };
        let floor = match u8::try_from(program.len()) {
            Ok(len) if len <= STACK_TOP => len,
            _ => return Err(too_large),
        };

        let mut cpu = Self::new();
        cpu.ram.load(0, program)?;
        cpu.stack = Ls8Stack::new(floor);
        tracing::info!(
            "loaded {} byte program, stack capacity {}",
            program.len(),
            cpu.stack.capacity()
        );
        Ok(cpu)
    }

    pub fn pc(&self) -> u8 {
        self.pc
    }

    pub fn state(&self) -> CpuState {
        self.state
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn registers(&self) -> &Ls8Registers {
        &self.regs
    }

    pub fn ram(&self) -> &Ls8Ram {
        &self.ram
    }

    /// Runs until HLT, returning the total number of cycles executed.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<usize> {
        while self.state == CpuState::Running {
            self.step(out)?;
        }
        Ok(self.cycles)
    }

    /// Runs at most `budget` cycles, stopping early on HLT.
    pub fn execute_cycles<W: Write>(&mut self, budget: usize, out: &mut W) -> Result<CycleBatch> {
        let start_cycle = self.cycles;
        tracing::debug!(
            "executing cycles {} - {}",
            start_cycle,
            start_cycle.saturating_add(budget)
        );

        let mut cycles_spent = 0;
        while cycles_spent < budget && self.state == CpuState::Running {
            self.step(out)?;
            cycles_spent += 1;
        }
        Ok(CycleBatch {
            cycles_spent,
            state: self.state,
        })
    }

    /// Fetches, decodes and executes a single instruction. A halted CPU stays
    /// halted and executes nothing.
    pub fn step<W: Write>(&mut self, out: &mut W) -> Result<CpuState> {
        if self.state == CpuState::Halted {
            return Ok(CpuState::Halted);
        }

        let pc = self.pc;
        let byte = self.ram.read(pc as usize);
        let operand_a = self.ram.read(pc.wrapping_add(1) as usize);
        let operand_b = self.ram.read(pc.wrapping_add(2) as usize);
        let opcode = Opcode::try_from(byte).map_err(|opcode| CpuError::UnknownOpcode {
            address: pc,
            opcode,
        })?;

        tracing::trace!(
            "cycle {} | 0x{:02X}: {} | {:?} | FL: 0b{:03b}",
            self.cycles,
            pc,
            opcode.def().decode(pc as usize, &[operand_a, operand_b]),
            self.regs,
            self.flags.bits()
        );

        let next_pc = self.execute(opcode, operand_a, operand_b, out)?;
        debug_assert!(next_pc.is_none() || opcode.sets_pc());
        self.pc = match next_pc {
            Some(target) => target,
            None if self.state == CpuState::Halted => pc,
            None => pc.wrapping_add(1 + opcode.operand_count()),
        };
        self.cycles += 1;
        Ok(self.state)
    }

    /// Returns the new PC for instructions that transfer control, `None` to
    /// fall through to the next instruction. SP is always updated before the
    /// operand register is read, so R6 operands observe the moved SP.
    fn execute<W: Write>(
        &mut self,
        opcode: Opcode,
        operand_a: u8,
        operand_b: u8,
        out: &mut W,
    ) -> Result<Option<u8>> {
        match opcode {
            Opcode::Hlt => {
                self.state = CpuState::Halted;
                let stats = self.ram.stats();
                tracing::info!(
                    "halted at 0x{:02X} after {} cycles ({} reads, {} writes)",
                    self.pc,
                    self.cycles + 1,
                    stats.num_reads,
                    stats.num_writes
                );
                return Ok(None);
            }
            Opcode::Ldi => *self.reg_mut(operand_a)? = operand_b,
            Opcode::Prn => writeln!(out, "{}", self.reg(operand_a)?)?,
            Opcode::Add | Opcode::Mul | Opcode::Cmp => self.alu(opcode, operand_a, operand_b)?,
            Opcode::Push => {
                let index = self.register_index(operand_a)?;
                let sp = self.stack.grow(&mut self.regs)?;
                let value = self.reg(index)?;
                self.ram.write(sp as usize, value);
            }
            Opcode::Pop => {
                let index = self.register_index(operand_a)?;
                let sp = self.stack.top(&self.regs)?;
                *self.reg_mut(index)? = self.ram.read(sp as usize);
                self.stack.shrink(&mut self.regs);
            }
            Opcode::Call => {
                let index = self.register_index(operand_a)?;
                let sp = self.stack.grow(&mut self.regs)?;
                self.ram.write(sp as usize, self.pc.wrapping_add(2));
                let target = self.reg(index)?;
                tracing::debug!(
                    "CALL 0x{:02X} from 0x{:02X}, SP 0x{:02X}",
                    target,
                    self.pc,
                    self.regs.sp()
                );
                return Ok(Some(target));
            }
            Opcode::Ret => {
                let sp = self.stack.top(&self.regs)?;
                let return_address = self.ram.read(sp as usize);
                self.stack.shrink(&mut self.regs);
                tracing::debug!(
                    "RET to 0x{:02X}, SP 0x{:02X}",
                    return_address,
                    self.regs.sp()
                );
                return Ok(Some(return_address));
            }
            Opcode::Jmp => return Ok(Some(self.reg(operand_a)?)),
            Opcode::Jeq => {
                let target = self.reg(operand_a)?;
                return Ok(self.flags.is_equal().then_some(target));
            }
            Opcode::Jne => {
                let target = self.reg(operand_a)?;
                return Ok((!self.flags.is_equal()).then_some(target));
            }
            Opcode::St => {
                let address = self.reg(operand_a)?;
                let value = self.reg(operand_b)?;
                self.ram.write(address as usize, value);
            }
        }
        Ok(None)
    }

    fn alu(&mut self, op: Opcode, reg_a: u8, reg_b: u8) -> Result<()> {
        let a = self.reg(reg_a)?;
        let b = self.reg(reg_b)?;
        match alu::apply(op, a, b)? {
            AluOutput::Value(value) => *self.reg_mut(reg_a)? = value,
            AluOutput::Flags(flags) => self.flags = flags,
        }
        Ok(())
    }

    /// Validates a register operand without reading it.
    fn register_index(&self, index: u8) -> Result<u8> {
        if usize::from(index) < NUM_REGISTERS {
            Ok(index)
        } else {
            Err(CpuError::InvalidRegister {
                address: self.pc,
                index,
            })
        }
    }

    fn reg(&self, index: u8) -> Result<u8> {
        self.regs.get(index).ok_or(CpuError::InvalidRegister {
            address: self.pc,
            index,
        })
    }

    fn reg_mut(&mut self, index: u8) -> Result<&mut u8> {
        let address = self.pc;
        self.regs
            .get_mut(index)
            .ok_or(CpuError::InvalidRegister { address, index })
    }
}

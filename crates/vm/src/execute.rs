//! Main execution loop and opcode dispatch.

use tracing::{debug, trace, warn};

use crate::error::RuntimeError;
use crate::machine::{Halted, Step, BEQZ_REGISTER, VM};
use regvm_common::Instruction;

impl<'m> VM<'m> {
    /// Execute from the current pc until HALT, a fault, or the step limit.
    pub fn execute(&mut self) -> Result<Halted, RuntimeError> {
        loop {
            if let Some(limit) = self.config.step_limit {
                if self.steps >= limit {
                    warn!(pc = self.pc, limit, "step limit exceeded");
                    return Err(RuntimeError::StepLimitExceeded { at: self.pc, limit });
                }
            }

            let at = self.pc;
            if self.step()? == Step::Halt {
                debug!(pc = at, steps = self.steps, "halted");
                return Ok(Halted {
                    pc: at,
                    steps: self.steps,
                });
            }
        }
    }

    /// Fetch, decode and execute one instruction. The step limit is not
    /// consulted here.
    pub fn step(&mut self) -> Result<Step, RuntimeError> {
        let instr = self.fetch()?;
        trace!(pc = self.pc, %instr, "step");

        let next = self.pc + instr.width();
        match instr {
            Instruction::Load { reg, addr } => {
                let value = self.load_word(addr)?;
                self.set_reg(reg, value)?;
                self.pc = next;
            }
            Instruction::Store { reg, addr } => {
                let value = self.reg(reg)?;
                self.store_word(addr, value)?;
                self.pc = next;
            }
            Instruction::Add { dst, src } => {
                self.exec_binary(dst, src, i16::wrapping_add)?;
                self.pc = next;
            }
            Instruction::Sub { dst, src } => {
                self.exec_binary(dst, src, i16::wrapping_sub)?;
                self.pc = next;
            }
            Instruction::Addi { reg } => {
                let value = self.reg(reg)?;
                self.set_reg(reg, value.wrapping_add(1))?;
                self.pc = next;
            }
            Instruction::Subi { reg } => {
                let value = self.reg(reg)?;
                self.set_reg(reg, value.wrapping_sub(1))?;
                self.pc = next;
            }
            Instruction::Jump { addr } => self.pc = usize::from(addr),
            Instruction::Beq { lhs, rhs, addr } => {
                let taken = self.reg(lhs)? == self.reg(rhs)?;
                self.pc = if taken { usize::from(addr) } else { next };
            }
            Instruction::Beqz { addr } => {
                let taken = self.reg(BEQZ_REGISTER)? == 0;
                self.pc = if taken { usize::from(addr) } else { next };
            }
            Instruction::Halt => {
                self.steps += 1;
                return Ok(Step::Halt);
            }
        }

        self.steps += 1;
        Ok(Step::Continue)
    }

    /// `dst = op(dst, src)`. Both operands are checked before any write.
    fn exec_binary(
        &mut self,
        dst: u8,
        src: u8,
        op: fn(i16, i16) -> i16,
    ) -> Result<(), RuntimeError> {
        let a = self.reg(dst)?;
        let b = self.reg(src)?;
        self.set_reg(dst, op(a, b))
    }
}

//! Instruction Execution.
//!
//! This module implements the fetch-decode-execute step of the machine. It performs:
//! 1. **Fetch/Decode:** Reads the word at the program counter and decodes it afresh.
//! 2. **Operand Resolution:** Positional, immediate and relative reads; positional and relative write targets.
//! 3. **Dispatch:** A `match` over the closed `Opcode` enum; unknown opcodes fault.
//! 4. **Sequencing:** Advances the program counter past the operands unless a jump redirected it.

use tracing::trace;

use crate::common::{Addr, VmError};
use crate::core::io::{Input, Output};
use crate::core::machine::{Machine, Step};
use crate::isa::disasm::format_instruction;
use crate::isa::{Instruction, Mode, Opcode, decode};

impl<I: Input, O: Output> Machine<I, O> {
    /// Decodes and executes the instruction at the program counter.
    pub(crate) fn execute_next(&mut self) -> Result<Step, VmError> {
        let pc = self.pc;
        let word = self.memory.read(Addr::new(pc));
        let inst = decode(word).map_err(|bad| VmError::IllegalMode {
            mode: bad.digit,
            pc,
        })?;
        let Some(op) = inst.opcode else {
            return Err(VmError::IllegalOpcode {
                opcode: inst.code,
                pc,
            });
        };

        if self.trace {
            let operands: Vec<i64> = (0..inst.arity).map(|n| self.operand_word(n)).collect();
            trace!(
                pc,
                relative_base = self.relative_base,
                "{}",
                format_instruction(&inst, &operands)
            );
        }

        let next = pc + inst.width() as u64;
        match op {
            Opcode::Add => {
                let value = self.load(&inst, 0)?.wrapping_add(self.load(&inst, 1)?);
                self.store(&inst, 2, value)?;
                self.pc = next;
            }
            Opcode::Mul => {
                let value = self.load(&inst, 0)?.wrapping_mul(self.load(&inst, 1)?);
                self.store(&inst, 2, value)?;
                self.pc = next;
            }
            Opcode::Input => {
                let target = self.target(&inst, 0)?;
                let value = self.input.read().map_err(|_| VmError::InputClosed { pc })?;
                self.memory.write(target, value);
                self.stats.values_read += 1;
                self.pc = next;
            }
            Opcode::Output => {
                let value = self.load(&inst, 0)?;
                self.output
                    .write(value)
                    .map_err(|_| VmError::OutputClosed { pc })?;
                self.stats.values_written += 1;
                self.pc = next;
            }
            Opcode::JumpIfTrue => {
                let cond = self.load(&inst, 0)? != 0;
                self.pc = self.branch(&inst, cond, next)?;
            }
            Opcode::JumpIfFalse => {
                let cond = self.load(&inst, 0)? == 0;
                self.pc = self.branch(&inst, cond, next)?;
            }
            Opcode::LessThan => {
                let value = i64::from(self.load(&inst, 0)? < self.load(&inst, 1)?);
                self.store(&inst, 2, value)?;
                self.pc = next;
            }
            Opcode::Equals => {
                let value = i64::from(self.load(&inst, 0)? == self.load(&inst, 1)?);
                self.store(&inst, 2, value)?;
                self.pc = next;
            }
            Opcode::AdjustBase => {
                let delta = self.load(&inst, 0)?;
                self.relative_base = self.relative_base.wrapping_add(delta);
                self.pc = next;
            }
            Opcode::Halt => {
                self.stats.retire(op);
                return Ok(Step::Halted);
            }
        }

        self.stats.retire(op);
        Ok(Step::Continue)
    }

    /// Raw word of operand `n` of the current instruction.
    #[inline]
    fn operand_word(&self, n: usize) -> i64 {
        self.memory.read(Addr::new(self.pc + 1 + n as u64))
    }

    /// Address `raw + relative_base`.
    #[inline]
    fn relative(&self, raw: i64) -> Result<Addr, VmError> {
        let addr = raw
            .checked_add(self.relative_base)
            .ok_or(VmError::InvalidAddress { addr: raw })?;
        Addr::from_word(addr)
    }

    /// Effective value of operand `n`.
    fn load(&self, inst: &Instruction, n: usize) -> Result<i64, VmError> {
        let raw = self.operand_word(n);
        match inst.mode(n) {
            Mode::Position => self.memory.get(raw),
            Mode::Immediate => Ok(raw),
            Mode::Relative => Ok(self.memory.read(self.relative(raw)?)),
        }
    }

    /// Address that operand `n` names as a write target.
    fn target(&self, inst: &Instruction, n: usize) -> Result<Addr, VmError> {
        let raw = self.operand_word(n);
        match inst.mode(n) {
            Mode::Position => Addr::from_word(raw),
            Mode::Relative => self.relative(raw),
            Mode::Immediate => Err(VmError::IllegalMode {
                mode: Mode::Immediate.digit(),
                pc: self.pc,
            }),
        }
    }

    /// Writes `value` to the target named by operand `n`.
    fn store(&mut self, inst: &Instruction, n: usize, value: i64) -> Result<(), VmError> {
        let target = self.target(inst, n)?;
        self.memory.write(target, value);
        Ok(())
    }

    /// Next program counter of a conditional jump whose destination is operand 1.
    fn branch(&mut self, inst: &Instruction, taken: bool, next: u64) -> Result<u64, VmError> {
        if taken {
            self.stats.jumps_taken += 1;
            Ok(Addr::from_word(self.load(inst, 1)?)?.val())
        } else {
            self.stats.jumps_not_taken += 1;
            Ok(next)
        }
    }
}

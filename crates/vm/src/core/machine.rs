//! Intcode machine state and run loop.
//!
//! A `Machine` owns its memory, program counter, relative base, and the
//! machine ends of its two ports. It moves through a small lifecycle:
//! 1. **Running:** Initial state; `step` decodes and executes one instruction.
//! 2. **Halted:** Terminal; reached through the `halt` instruction.
//! 3. **Faulted:** Terminal; reached through any `VmError`.
//!
//! Both terminal transitions close the outbound port so consumers blocked on
//! it are released.

use tracing::{debug, warn};

use crate::common::VmError;
use crate::config::MachineConfig;
use crate::core::io::{Input, InputPort, Output, OutputPort};
use crate::mem::Memory;
use crate::sim::loader::Program;
use crate::stats::ExecStats;

/// Machine lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    /// Executing instructions.
    Running,
    /// Stopped by `halt`.
    Halted,
    /// Stopped by a fault.
    Faulted,
}

/// Result of executing one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The machine is ready for the next instruction.
    Continue,
    /// The instruction was `halt`.
    Halted,
}

/// Summary of a machine that halted normally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExitStatus {
    /// Address of the `halt` instruction.
    pub pc: u64,
    /// Instructions executed, including `halt`.
    pub steps: u64,
}

/// An intcode machine.
#[derive(Debug)]
pub struct Machine<I = InputPort, O = OutputPort> {
    pub(crate) pc: u64,
    pub(crate) relative_base: i64,
    pub(crate) memory: Memory,
    pub(crate) input: I,
    pub(crate) output: O,
    pub(crate) state: State,
    pub(crate) stats: ExecStats,
    pub(crate) trace: bool,
    max_steps: Option<u64>,
}

impl<I: Input, O: Output> Machine<I, O> {
    /// Creates a machine with `program` loaded at address 0.
    ///
    /// # Arguments
    ///
    /// * `program` - Initial memory image.
    /// * `input` - Port the `input` instruction reads from.
    /// * `output` - Port the `output` instruction writes to.
    pub fn new(program: &Program, input: I, output: O) -> Self {
        Self::with_config(program, input, output, &MachineConfig::default())
    }

    /// Creates a machine with tracing and step limit taken from `config`.
    pub fn with_config(program: &Program, input: I, output: O, config: &MachineConfig) -> Self {
        Self {
            pc: 0,
            relative_base: 0,
            memory: Memory::from_words(program.words()),
            input,
            output,
            state: State::Running,
            stats: ExecStats::default(),
            trace: config.trace_instructions,
            max_steps: config.max_steps,
        }
    }

    /// Runs until `halt` or a fault.
    ///
    /// The outbound port is closed on return either way; a fault is
    /// returned as the error so callers can tell the two apart.
    pub fn run(&mut self) -> Result<ExitStatus, VmError> {
        loop {
            if self.step()? == Step::Halted {
                return Ok(ExitStatus {
                    pc: self.pc,
                    steps: self.stats.instructions_retired,
                });
            }
        }
    }

    /// Executes exactly one instruction.
    ///
    /// Fails with `VmError::NotRunning` once the machine has halted or faulted.
    pub fn step(&mut self) -> Result<Step, VmError> {
        if self.state != State::Running {
            return Err(VmError::NotRunning { state: self.state });
        }
        if let Some(limit) = self.max_steps {
            if self.stats.instructions_retired >= limit {
                return Err(self.fault(VmError::StepLimitExceeded { limit }));
            }
        }

        match self.execute_next() {
            Ok(Step::Halted) => {
                self.state = State::Halted;
                self.output.close();
                debug!(
                    pc = self.pc,
                    steps = self.stats.instructions_retired,
                    "machine halted"
                );
                Ok(Step::Halted)
            }
            Ok(Step::Continue) => Ok(Step::Continue),
            Err(err) => Err(self.fault(err)),
        }
    }

    /// Moves to `Faulted`, closes the outbound port and hands the error back.
    fn fault(&mut self, err: VmError) -> VmError {
        self.state = State::Faulted;
        self.output.close();
        warn!(pc = self.pc, error = %err, "machine faulted");
        err
    }

    /// Program counter.
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Relative base register.
    pub const fn relative_base(&self) -> i64 {
        self.relative_base
    }

    /// Lifecycle state.
    pub const fn state(&self) -> State {
        self.state
    }

    /// Memory image.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable memory, for patching before the first step.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Execution statistics so far.
    pub const fn stats(&self) -> &ExecStats {
        &self.stats
    }

    /// The input port.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// The output port.
    pub const fn output(&self) -> &O {
        &self.output
    }

    /// Consumes the machine, returning its memory and ports.
    pub fn into_parts(self) -> (Memory, I, O) {
        (self.memory, self.input, self.output)
    }
}

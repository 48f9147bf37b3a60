//! Threaded machine runner.
//!
//! Every spawned machine runs its fetch-decode-execute loop on its own named
//! thread; callers only ever see channel endpoints. This module provides:
//! 1. **Single machines:** `spawn` returns a `MachineHandle` owning the caller ends of both channels.
//! 2. **Custom wiring:** `spawn_with_ports` runs a machine on any `Input`/`Output` pair.
//! 3. **Pipelines:** `Pipeline` chains machines output-to-input; `feedback_loop` closes the chain into a ring.
//! 4. **In-thread runs:** `run_with_inputs` for callers that just want the outputs.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::debug;

use crate::common::{SimError, VmError};
use crate::config::MachineConfig;
use crate::core::io::{Input, InputPort, Output, OutputPort, input_channel, output_channel};
use crate::core::machine::{ExitStatus, Machine};
use crate::sim::loader::Program;

static NEXT_MACHINE_ID: AtomicU64 = AtomicU64::new(0);

/// A machine running on its own thread.
#[derive(Debug)]
pub struct MachineThread {
    name: String,
    handle: JoinHandle<Result<ExitStatus, VmError>>,
}

impl MachineThread {
    /// Thread name (`intcode-<id>`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once the run loop has returned.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the machine to halt or fault.
    pub fn join(self) -> Result<ExitStatus, SimError> {
        match self.handle.join() {
            Ok(result) => Ok(result?),
            Err(_) => Err(SimError::Panicked { name: self.name }),
        }
    }
}

/// Runs a machine on a new thread with caller-supplied ports.
///
/// The ports move into the thread; the outbound port is closed when the
/// machine halts or faults.
pub fn spawn_with_ports<I, O>(
    program: &Program,
    config: &MachineConfig,
    input: I,
    output: O,
) -> Result<MachineThread, SimError>
where
    I: Input + Send + 'static,
    O: Output + Send + 'static,
{
    let name = format!("intcode-{}", NEXT_MACHINE_ID.fetch_add(1, Ordering::Relaxed));
    let mut machine = Machine::with_config(program, input, output, config);
    let handle = thread::Builder::new()
        .name(name.clone())
        .spawn(move || machine.run())
        .map_err(SimError::Spawn)?;
    debug!(thread = %name, words = program.len(), "spawned machine");
    Ok(MachineThread { name, handle })
}

/// Caller side of a spawned machine.
#[derive(Debug)]
pub struct MachineHandle {
    input: Option<Sender<i64>>,
    output: Receiver<i64>,
    thread: MachineThread,
}

/// Spawns a machine with fresh channels sized by `config`.
pub fn spawn(program: &Program, config: &MachineConfig) -> Result<MachineHandle, SimError> {
    let (tx, input) = input_channel(config.input_capacity);
    let (output, rx) = output_channel(config.output_capacity);
    let thread = spawn_with_ports(program, config, input, output)?;
    Ok(MachineHandle {
        input: Some(tx),
        output: rx,
        thread,
    })
}

impl MachineHandle {
    /// Sends one value to the machine's inbound channel.
    pub fn send(&self, value: i64) -> Result<(), SimError> {
        self.input
            .as_ref()
            .ok_or(SimError::Disconnected)?
            .send(value)
            .map_err(|_| SimError::Disconnected)
    }

    /// Sends every value in order.
    pub fn send_all(&self, values: impl IntoIterator<Item = i64>) -> Result<(), SimError> {
        values.into_iter().try_for_each(|v| self.send(v))
    }

    /// Receives the next output value; `None` once the machine stopped and
    /// everything it emitted was consumed.
    pub fn recv(&self) -> Option<i64> {
        self.output.recv().ok()
    }

    /// The inbound sender, for sharing with other producers.
    pub const fn input(&self) -> Option<&Sender<i64>> {
        self.input.as_ref()
    }

    /// The outbound receiver, for `select!` or iteration.
    pub const fn output(&self) -> &Receiver<i64> {
        &self.output
    }

    /// Drops the inbound sender; a pending or later `input` then faults with `InputClosed`.
    pub fn close_input(&mut self) {
        drop(self.input.take());
    }

    /// Thread name of the machine.
    pub fn name(&self) -> &str {
        self.thread.name()
    }

    /// Splits into the inbound sender, the outbound receiver and the thread.
    pub fn into_parts(self) -> (Option<Sender<i64>>, Receiver<i64>, MachineThread) {
        (self.input, self.output, self.thread)
    }

    /// Closes the inbound channel, drains all remaining output, and joins.
    pub fn collect(mut self) -> Result<Vec<i64>, SimError> {
        self.close_input();
        let values: Vec<i64> = self.output.iter().collect();
        let _status = self.thread.join()?;
        Ok(values)
    }

    /// Drops both caller ends and waits for the machine.
    ///
    /// A machine still trying to read or write faults with `InputClosed`
    /// or `OutputClosed`.
    pub fn join(self) -> Result<ExitStatus, SimError> {
        let Self {
            input,
            output,
            thread,
        } = self;
        drop(input);
        drop(output);
        thread.join()
    }
}

/// Runs `program` on the calling thread against a fixed input list.
///
/// Reading past the end of `inputs` faults with `InputClosed`.
pub fn run_with_inputs(program: &Program, inputs: &[i64]) -> Result<Vec<i64>, VmError> {
    let mut input: VecDeque<i64> = inputs.iter().copied().collect();
    let mut output = Vec::new();
    let _status = Machine::new(program, &mut input, &mut output).run()?;
    Ok(output)
}

/// Machines chained output-to-input.
///
/// Stage `i`'s outbound channel is stage `i + 1`'s inbound channel. The
/// caller feeds stage 0 and reads from the last stage.
#[derive(Debug)]
pub struct Pipeline {
    input: Option<Sender<i64>>,
    output: Receiver<i64>,
    stages: Vec<MachineThread>,
}

impl Pipeline {
    /// Spawns one machine per program.
    ///
    /// `seeds[i]` is queued on stage `i`'s inbound channel before any machine
    /// starts, ahead of anything the previous stage emits (the classic
    /// per-stage "phase setting"). Links are unbounded so seeding never blocks.
    pub fn spawn(
        programs: &[Program],
        seeds: &[Vec<i64>],
        config: &MachineConfig,
    ) -> Result<Self, SimError> {
        let (senders, receivers): (Vec<Sender<i64>>, Vec<Receiver<i64>>) =
            programs.iter().map(|_| unbounded()).unzip();
        let (tail_tx, output) = unbounded();

        // Seeds go in before any stage runs so they precede upstream output.
        for (tx, stage_seeds) in senders.iter().zip(seeds) {
            for &seed in stage_seeds {
                tx.send(seed).map_err(|_| SimError::Disconnected)?;
            }
        }

        let outbound = senders
            .iter()
            .skip(1)
            .cloned()
            .chain(std::iter::once(tail_tx));
        let mut stages = Vec::with_capacity(programs.len());
        for ((program, rx), tx) in programs.iter().zip(receivers).zip(outbound) {
            stages.push(spawn_with_ports(
                program,
                config,
                InputPort::new(rx),
                OutputPort::new(tx),
            )?);
        }

        Ok(Self {
            input: senders.into_iter().next(),
            output,
            stages,
        })
    }

    /// Sends a value into stage 0.
    pub fn send(&self, value: i64) -> Result<(), SimError> {
        self.input
            .as_ref()
            .ok_or(SimError::Disconnected)?
            .send(value)
            .map_err(|_| SimError::Disconnected)
    }

    /// Receives the next value from the last stage.
    pub fn recv(&self) -> Option<i64> {
        self.output.recv().ok()
    }

    /// The last stage's outbound receiver.
    pub const fn output(&self) -> &Receiver<i64> {
        &self.output
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True if the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Closes stage 0's input, drains the last stage, and joins every stage.
    ///
    /// Returns the drained values; the first stage error wins.
    pub fn finish(mut self) -> Result<Vec<i64>, SimError> {
        drop(self.input.take());
        let values: Vec<i64> = self.output.iter().collect();
        let mut first_err = None;
        for stage in self.stages {
            if let Err(err) = stage.join() {
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
        first_err.map_or(Ok(values), Err)
    }
}

/// Runs `programs` as a ring: the last stage feeds back into stage 0.
///
/// `seeds[i]` is queued for stage `i` first, then `initial` for stage 0.
/// The caller's thread relays the last stage's values back to stage 0 until
/// the last stage closes its output.
///
/// # Returns
///
/// The last value the final stage emitted, or `None` if it emitted nothing.
pub fn feedback_loop(
    programs: &[Program],
    seeds: &[Vec<i64>],
    initial: &[i64],
    config: &MachineConfig,
) -> Result<Option<i64>, SimError> {
    let pipeline = Pipeline::spawn(programs, seeds, config)?;
    for &value in initial {
        pipeline.send(value)?;
    }

    let mut last = None;
    while let Some(value) = pipeline.recv() {
        last = Some(value);
        // Stage 0 may already have halted; its leftover input is discarded.
        let _ = pipeline.send(value);
    }

    let _drained = pipeline.finish()?;
    Ok(last)
}

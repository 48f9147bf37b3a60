//! ASCII console.
//!
//! Machines that speak ASCII emit one character code per `output` and read
//! commands one character code per `input`, each line terminated by `\n`
//! (code 10). Values outside the 7-bit range are not characters; they are
//! surfaced as raw numbers.

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender};

use crate::common::SimError;
use crate::core::ExitStatus;
use crate::sim::runner::{MachineHandle, MachineThread};

/// Line terminator in both directions.
const NEWLINE: i64 = b'\n' as i64;

/// Largest value treated as a character.
const ASCII_MAX: i64 = 0x7F;

/// One unit of console output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AsciiLine {
    /// A line of text, without its terminator.
    Text(String),
    /// A value outside the ASCII range.
    Value(i64),
}

/// Groups a value stream into `AsciiLine`s.
///
/// # Examples
///
/// ```
/// use intcode_vm::devices::{AsciiLine, LineAssembler};
///
/// let lines = LineAssembler::decode(&[72, 105, 10, 1234]);
/// assert_eq!(
///     lines,
///     vec![AsciiLine::Text("Hi".into()), AsciiLine::Value(1234)]
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineAssembler {
    buf: String,
    ready: VecDeque<AsciiLine>,
}

impl LineAssembler {
    /// Creates an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one value.
    ///
    /// A raw value arriving mid-line flushes the partial line ahead of it.
    pub fn push(&mut self, value: i64) {
        if (0..=ASCII_MAX).contains(&value) {
            if value == NEWLINE {
                self.ready.push_back(AsciiLine::Text(std::mem::take(&mut self.buf)));
            } else {
                self.buf.push(char::from(value as u8));
            }
        } else {
            self.flush();
            self.ready.push_back(AsciiLine::Value(value));
        }
    }

    /// Takes the oldest completed line.
    pub fn pop(&mut self) -> Option<AsciiLine> {
        self.ready.pop_front()
    }

    /// Completes an unterminated trailing line at end of stream.
    pub fn finish(&mut self) {
        self.flush();
    }

    /// Decodes a complete value stream.
    pub fn decode(values: &[i64]) -> Vec<AsciiLine> {
        let mut assembler = Self::new();
        values.iter().for_each(|&value| assembler.push(value));
        assembler.finish();
        assembler.ready.into_iter().collect()
    }

    fn flush(&mut self) {
        if !self.buf.is_empty() {
            self.ready.push_back(AsciiLine::Text(std::mem::take(&mut self.buf)));
        }
    }
}

/// Encodes a command line as character codes followed by `\n`.
pub fn encode_line(text: &str) -> impl Iterator<Item = i64> + '_ {
    text.bytes().map(i64::from).chain(std::iter::once(NEWLINE))
}

/// Line-oriented terminal attached to a running machine.
#[derive(Debug)]
pub struct AsciiConsole {
    tx: Sender<i64>,
    rx: Receiver<i64>,
    assembler: LineAssembler,
    machine: Option<MachineThread>,
}

impl AsciiConsole {
    /// Attaches to raw channel ends.
    pub fn new(tx: Sender<i64>, rx: Receiver<i64>) -> Self {
        Self {
            tx,
            rx,
            assembler: LineAssembler::new(),
            machine: None,
        }
    }

    /// Takes over a spawned machine; the console becomes the only reader of
    /// its output.
    ///
    /// Fails with `SimError::Disconnected` if the handle's input was closed.
    pub fn attach(handle: MachineHandle) -> Result<Self, SimError> {
        let (tx, rx, thread) = handle.into_parts();
        let tx = tx.ok_or(SimError::Disconnected)?;
        Ok(Self {
            machine: Some(thread),
            ..Self::new(tx, rx)
        })
    }

    /// Blocks for the next line of output; `None` once the machine stopped
    /// and everything it emitted was consumed.
    pub fn read_line(&mut self) -> Option<AsciiLine> {
        loop {
            if let Some(line) = self.assembler.pop() {
                return Some(line);
            }
            match self.rx.recv() {
                Ok(value) => self.assembler.push(value),
                Err(_) => {
                    self.assembler.finish();
                    return self.assembler.pop();
                }
            }
        }
    }

    /// Reads lines until the machine stops.
    pub fn read_to_end(&mut self) -> Vec<AsciiLine> {
        std::iter::from_fn(|| self.read_line()).collect()
    }

    /// Sends `text` followed by `\n`.
    pub fn write_line(&self, text: &str) -> Result<(), SimError> {
        encode_line(text).try_for_each(|code| self.tx.send(code).map_err(|_| SimError::Disconnected))
    }

    /// Drops both channel ends and waits for the attached machine.
    ///
    /// Fails with `SimError::Disconnected` if no machine was attached.
    pub fn join(self) -> Result<ExitStatus, SimError> {
        let Self {
            tx, rx, machine, ..
        } = self;
        drop(tx);
        drop(rx);
        machine.ok_or(SimError::Disconnected)?.join()
    }
}

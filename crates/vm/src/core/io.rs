//! Machine I/O ports.
//!
//! A machine talks to the outside world through exactly two ports: an `Input`
//! it consumes values from and an `Output` it emits values to. The channel
//! ports block like the channels behind them:
//! 1. **Input:** `read` blocks until a value arrives; a closed, drained channel reports `PortClosed`.
//! 2. **Output:** `write` blocks until the channel accepts (rendezvous or full buffer).
//! 3. **Close:** Dropping the sender releases consumers waiting on the outbound channel.
//!
//! Plain queues (`VecDeque<i64>` in, `Vec<i64>` out) implement the same traits
//! for driving a machine on the caller's own thread.

use std::collections::VecDeque;
use std::fmt;

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// The far end of a port is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortClosed;

impl fmt::Display for PortClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("port closed")
    }
}

impl std::error::Error for PortClosed {}

/// Source of values for the `input` instruction.
pub trait Input {
    /// Takes the next value, blocking if none is available yet.
    fn read(&mut self) -> Result<i64, PortClosed>;
}

/// Sink for values of the `output` instruction.
pub trait Output {
    /// Emits a value, blocking until it is accepted.
    fn write(&mut self, value: i64) -> Result<(), PortClosed>;

    /// Signals that no more values will follow.
    fn close(&mut self) {}
}

impl<T: Input + ?Sized> Input for &mut T {
    fn read(&mut self) -> Result<i64, PortClosed> {
        (**self).read()
    }
}

impl<T: Output + ?Sized> Output for &mut T {
    fn write(&mut self, value: i64) -> Result<(), PortClosed> {
        (**self).write(value)
    }

    fn close(&mut self) {
        (**self).close();
    }
}

impl<T: Input + ?Sized> Input for Box<T> {
    fn read(&mut self) -> Result<i64, PortClosed> {
        (**self).read()
    }
}

impl<T: Output + ?Sized> Output for Box<T> {
    fn write(&mut self, value: i64) -> Result<(), PortClosed> {
        (**self).write(value)
    }

    fn close(&mut self) {
        (**self).close();
    }
}

/// A pre-filled queue; running out of values reads as a closed port.
impl Input for VecDeque<i64> {
    fn read(&mut self) -> Result<i64, PortClosed> {
        self.pop_front().ok_or(PortClosed)
    }
}

/// Collects every emitted value.
impl Output for Vec<i64> {
    fn write(&mut self, value: i64) -> Result<(), PortClosed> {
        self.push(value);
        Ok(())
    }
}

/// Machine end of an inbound channel.
#[derive(Debug, Clone)]
pub struct InputPort {
    rx: Receiver<i64>,
}

impl InputPort {
    /// Wraps the receiving end of a channel.
    pub const fn new(rx: Receiver<i64>) -> Self {
        Self { rx }
    }
}

impl From<Receiver<i64>> for InputPort {
    fn from(rx: Receiver<i64>) -> Self {
        Self::new(rx)
    }
}

impl Input for InputPort {
    fn read(&mut self) -> Result<i64, PortClosed> {
        self.rx.recv().map_err(|_| PortClosed)
    }
}

/// Machine end of an outbound channel.
#[derive(Debug)]
pub struct OutputPort {
    tx: Option<Sender<i64>>,
}

impl OutputPort {
    /// Wraps the sending end of a channel.
    pub const fn new(tx: Sender<i64>) -> Self {
        Self { tx: Some(tx) }
    }

    /// True once `close` has dropped the sender.
    pub const fn is_closed(&self) -> bool {
        self.tx.is_none()
    }
}

impl From<Sender<i64>> for OutputPort {
    fn from(tx: Sender<i64>) -> Self {
        Self::new(tx)
    }
}

impl Output for OutputPort {
    fn write(&mut self, value: i64) -> Result<(), PortClosed> {
        match &self.tx {
            Some(tx) => tx.send(value).map_err(|_| PortClosed),
            None => Err(PortClosed),
        }
    }

    fn close(&mut self) {
        drop(self.tx.take());
    }
}

/// Creates a channel: `None` is unbounded, `Some(0)` a rendezvous, `Some(n)` bounded.
fn channel(capacity: Option<usize>) -> (Sender<i64>, Receiver<i64>) {
    capacity.map_or_else(unbounded, bounded)
}

/// Creates an inbound channel: the caller keeps the sender, the machine takes the port.
pub fn input_channel(capacity: Option<usize>) -> (Sender<i64>, InputPort) {
    let (tx, rx) = channel(capacity);
    (tx, InputPort::new(rx))
}

/// Creates an outbound channel: the machine takes the port, the caller keeps the receiver.
pub fn output_channel(capacity: Option<usize>) -> (OutputPort, Receiver<i64>) {
    let (tx, rx) = channel(capacity);
    (OutputPort::new(tx), rx)
}

/// Wires one machine's output directly to another machine's input.
pub fn link(capacity: Option<usize>) -> (OutputPort, InputPort) {
    let (tx, rx) = channel(capacity);
    (OutputPort::new(tx), InputPort::new(rx))
}

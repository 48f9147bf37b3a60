//! Intcode machine core.
//!
//! This module ties memory, decoding and I/O together. It provides:
//! 1. **Machine:** Registers, memory, lifecycle state and the run loop.
//! 2. **Execution:** Operand resolution and the per-opcode dispatch.
//! 3. **I/O:** The `Input`/`Output` port traits and their channel-backed implementations.

/// Operand resolution and instruction dispatch.
pub mod execution;

/// Machine I/O ports.
pub mod io;

/// Machine state and run loop.
pub mod machine;

pub use io::{Input, InputPort, Output, OutputPort, PortClosed, input_channel, link, output_channel};
pub use machine::{ExitStatus, Machine, State, Step};

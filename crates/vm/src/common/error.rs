//! Machine faults and error definitions.
//!
//! This module defines the error taxonomy of the workspace. It provides:
//! 1. **Machine Faults:** Fatal conditions raised by the run loop (`VmError`).
//! 2. **Loader Errors:** Malformed program text or unreadable files (`LoadError`).
//! 3. **Runner Errors:** Thread spawning, panics, and closed handles (`SimError`).
//! 4. **Configuration Errors:** Unreadable or malformed JSON configuration (`ConfigError`).
//! 5. **Device Errors:** Peripherals receiving output they cannot interpret (`DeviceError`).

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::machine::State;

/// Fatal machine faults.
///
/// Every variant stops the run loop; the machine moves to `State::Faulted`
/// and closes its outbound port so waiting consumers are released.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VmError {
    /// A memory access resolved to a negative address.
    #[error("invalid address {addr}")]
    InvalidAddress {
        /// The offending address.
        addr: i64,
    },

    /// The decoded opcode has no handler.
    #[error("illegal opcode {opcode} at pc {pc}")]
    IllegalOpcode {
        /// Opcode value (`word % 100`).
        opcode: i64,
        /// Address of the instruction word.
        pc: u64,
    },

    /// An operand carried an unknown mode digit, or a write target was immediate.
    #[error("illegal addressing mode {mode} at pc {pc}")]
    IllegalMode {
        /// The offending mode digit.
        mode: i64,
        /// Address of the instruction word.
        pc: u64,
    },

    /// `input` executed on a closed, drained inbound channel.
    #[error("input closed at pc {pc}")]
    InputClosed {
        /// Address of the `input` instruction.
        pc: u64,
    },

    /// `output` executed after the consumer dropped the outbound channel.
    #[error("output closed at pc {pc}")]
    OutputClosed {
        /// Address of the `output` instruction.
        pc: u64,
    },

    /// `step` was called on a machine that already stopped.
    #[error("machine is not running (state: {state:?})")]
    NotRunning {
        /// The terminal state the machine is in.
        state: State,
    },

    /// The configured instruction budget ran out before `halt`.
    #[error("step limit of {limit} instructions exceeded")]
    StepLimitExceeded {
        /// The configured limit.
        limit: u64,
    },
}

/// Errors produced while turning program text into a `Program`.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A token is not a base-10 signed 64-bit integer.
    #[error("bad integer {token:?} at position {index}: {source}")]
    Parse {
        /// Zero-based token index in the listing.
        index: usize,
        /// The token after trimming.
        token: String,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The listing contains no tokens.
    #[error("program listing is empty")]
    Empty,

    /// The program file could not be read.
    #[error("can't read program {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Errors surfaced by the threaded runner.
#[derive(Debug, Error)]
pub enum SimError {
    /// The machine faulted.
    #[error(transparent)]
    Vm(#[from] VmError),

    /// The OS refused to start the machine thread.
    #[error("failed to spawn machine thread: {0}")]
    Spawn(#[source] io::Error),

    /// The machine thread panicked.
    #[error("machine thread {name} panicked")]
    Panicked {
        /// Thread name.
        name: String,
    },

    /// The machine side of a channel is gone.
    #[error("machine channel disconnected")]
    Disconnected,

    /// The simulation was configured with values it cannot run.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("can't read config {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON for `Config`.
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    /// The network has more machines than can be booted.
    #[error("network size {size} exceeds the maximum of {max}")]
    NetworkSize {
        /// Requested number of machines.
        size: u64,
        /// Largest accepted size.
        max: u64,
    },
}

/// Errors raised by peripherals while interpreting machine output.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// A screen triple named a tile id outside `0..=4`.
    #[error("unknown tile id {id} at ({x}, {y})")]
    UnknownTile {
        /// The offending tile id.
        id: i64,
        /// Column of the draw command.
        x: i64,
        /// Row of the draw command.
        y: i64,
    },

    /// The machine driving the device failed.
    #[error(transparent)]
    Sim(#[from] SimError),
}

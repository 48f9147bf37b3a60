//! Intcode virtual machine library.
//!
//! This crate implements a small stored-program computer with the following:
//! 1. **Memory:** Sparse, zero-filled word store that grows on demand.
//! 2. **ISA:** Opcode/addressing-mode decoding and a linear disassembler.
//! 3. **Core:** The fetch-decode-execute machine and its channel-shaped I/O ports.
//! 4. **Simulation:** Program loader, threaded runner, and execution statistics.
//! 5. **Devices:** ASCII console, tile screen, and a packet-switched machine network.

/// Common types (addresses, error taxonomy).
pub mod common;
/// Machine and network configuration (defaults, JSON loading).
pub mod config;
/// Machine core (run loop, dispatch, I/O ports).
pub mod core;
/// Peripherals that drive machines through their channels.
pub mod devices;
/// Instruction set (opcodes, modes, decoding, disassembly).
pub mod isa;
/// Word-addressed machine memory.
pub mod mem;
/// Program loading and threaded execution.
pub mod sim;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The intcode machine; construct with `Machine::new`.
pub use crate::core::Machine;
/// Parsed program image.
pub use crate::sim::loader::Program;

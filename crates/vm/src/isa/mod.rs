//! Instruction Set Architecture (ISA) Definitions.
//!
//! An instruction word packs an opcode in its two low decimal digits and one
//! addressing-mode digit per operand above them, least significant first.
//!
//! # Structure
//!
//! * `opcodes`: Opcode values, the closed `Opcode` enum, arities and mnemonics.
//! * `mode`: Operand addressing modes (positional, immediate, relative).
//! * `instruction`: Digit extraction and the decoded `Instruction` structure.
//! * `decode`: Word to `Instruction` decoding.
//! * `disasm`: Linear disassembler for listings and instruction tracing.

/// Instruction word decoding.
pub mod decode;

/// Program disassembler for listings, debug tracing and diagnostics.
pub mod disasm;

/// Decoded instruction structure and digit extraction utilities.
pub mod instruction;

/// Operand addressing modes.
pub mod mode;

/// Opcode definitions.
pub mod opcodes;

pub use decode::decode;
pub use instruction::{Instruction, MAX_ARITY};
pub use mode::Mode;
pub use opcodes::Opcode;

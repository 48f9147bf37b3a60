//! Intcode Instruction Decoder.
//!
//! Splits a raw word into its opcode and the addressing mode of each operand.
//! Modes are read least-significant-first from `word / 100`, one decimal digit
//! per operand, for exactly as many operands as the opcode takes.

use std::fmt;

use crate::isa::instruction::{Instruction, InstructionDigits, MAX_ARITY};
use crate::isa::mode::Mode;
use crate::isa::opcodes::Opcode;

/// A mode digit outside the known set on an operand of a known opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BadMode {
    /// The offending digit.
    pub digit: i64,
    /// Operand index it belongs to.
    pub operand: usize,
}

impl fmt::Display for BadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mode digit {} on operand {}", self.digit, self.operand)
    }
}

/// Decodes an instruction word.
///
/// Unknown opcodes decode successfully with arity 0 so the caller can report
/// them; only a bad mode digit on a known opcode is rejected here.
///
/// # Arguments
///
/// * `word` - The instruction word at the program counter.
///
/// # Returns
///
/// The decoded `Instruction`, or the first `BadMode` found.
pub fn decode(word: i64) -> Result<Instruction, BadMode> {
    let code = word.opcode_field();
    let opcode = Opcode::from_code(code);
    let arity = opcode.map_or(0, Opcode::arity);

    let mut modes = [Mode::Position; MAX_ARITY];
    for (n, slot) in modes.iter_mut().enumerate().take(arity) {
        let digit = word.mode_digit(n);
        *slot = Mode::from_digit(digit).ok_or(BadMode { digit, operand: n })?;
    }

    Ok(Instruction::new(word, code, opcode, modes))
}

//! Instruction encoding and decoding utilities.
//!
//! Provides decimal digit extraction for instruction words and the
//! structure produced by decoding one.

use super::mode::Mode;
use super::opcodes::Opcode;

/// Largest operand count of any opcode.
pub const MAX_ARITY: usize = 3;

/// Divisor that strips the opcode digits off an instruction word.
pub const OPCODE_RADIX: i64 = 100;

/// Each operand's mode occupies one decimal digit.
pub const MODE_RADIX: i64 = 10;

/// Place values of the mode digits, operand 0 first.
const MODE_PLACES: [i64; MAX_ARITY] = [1, 10, 100];

/// Trait for extracting instruction fields from encoded instruction words.
pub trait InstructionDigits {
    /// Extracts the opcode field (`word % 100`).
    ///
    /// Negative words yield negative opcode values, which no handler accepts.
    fn opcode_field(&self) -> i64;

    /// Extracts the mode digit of operand `n` (`n < MAX_ARITY`).
    ///
    /// Digits missing from short words read as 0 (positional).
    fn mode_digit(&self, n: usize) -> i64;
}

impl InstructionDigits for i64 {
    #[inline(always)]
    fn opcode_field(&self) -> i64 {
        self % OPCODE_RADIX
    }

    #[inline(always)]
    fn mode_digit(&self, n: usize) -> i64 {
        (self / OPCODE_RADIX / MODE_PLACES[n]) % MODE_RADIX
    }
}

/// A decoded instruction word.
///
/// Never cached: the word at an address may be rewritten between visits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Raw instruction word.
    pub raw: i64,
    /// Opcode field, kept even when it names no opcode.
    pub code: i64,
    /// The opcode, or `None` when `code` has no handler.
    pub opcode: Option<Opcode>,
    /// Operand count; zero for unknown opcodes.
    pub arity: usize,
    modes: [Mode; MAX_ARITY],
}

impl Instruction {
    /// Builds an instruction from its parts; modes beyond `arity` are ignored.
    pub fn new(raw: i64, code: i64, opcode: Option<Opcode>, modes: [Mode; MAX_ARITY]) -> Self {
        let arity = opcode.map_or(0, Opcode::arity);
        Self {
            raw,
            code,
            opcode,
            arity,
            modes,
        }
    }

    /// Operand addressing modes, one per operand.
    pub fn modes(&self) -> &[Mode] {
        &self.modes[..self.arity]
    }

    /// Mode of operand `n`.
    #[inline]
    pub fn mode(&self, n: usize) -> Mode {
        self.modes[n]
    }

    /// Words occupied by the instruction, including the instruction word.
    pub const fn width(&self) -> usize {
        self.arity + 1
    }
}

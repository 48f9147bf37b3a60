//! Intcode opcodes.
//!
//! Defines the raw opcode values (the two low decimal digits of an
//! instruction word) and the closed `Opcode` enum the dispatcher matches on.

use std::fmt;

/// Addition: `c = a + b`.
pub const OP_ADD: i64 = 1;

/// Multiplication: `c = a * b`.
pub const OP_MUL: i64 = 2;

/// Read one value from the inbound channel into `a`.
pub const OP_INPUT: i64 = 3;

/// Write `a` to the outbound channel.
pub const OP_OUTPUT: i64 = 4;

/// Jump to `b` if `a` is non-zero.
pub const OP_JUMP_IF_TRUE: i64 = 5;

/// Jump to `b` if `a` is zero.
pub const OP_JUMP_IF_FALSE: i64 = 6;

/// `c = 1` if `a < b`, else `0`.
pub const OP_LESS_THAN: i64 = 7;

/// `c = 1` if `a == b`, else `0`.
pub const OP_EQUALS: i64 = 8;

/// Add `a` to the relative base.
pub const OP_ADJUST_BASE: i64 = 9;

/// Stop the machine.
pub const OP_HALT: i64 = 99;

/// Number of opcodes in the instruction set.
pub const OPCODE_COUNT: usize = 10;

/// The instruction set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `add a b c`
    Add,
    /// `mul a b c`
    Mul,
    /// `in a`
    Input,
    /// `out a`
    Output,
    /// `jt a b`
    JumpIfTrue,
    /// `jf a b`
    JumpIfFalse,
    /// `lt a b c`
    LessThan,
    /// `eq a b c`
    Equals,
    /// `arb a`
    AdjustBase,
    /// `halt`
    Halt,
}

impl Opcode {
    /// All opcodes, in numeric order.
    pub const ALL: [Self; OPCODE_COUNT] = [
        Self::Add,
        Self::Mul,
        Self::Input,
        Self::Output,
        Self::JumpIfTrue,
        Self::JumpIfFalse,
        Self::LessThan,
        Self::Equals,
        Self::AdjustBase,
        Self::Halt,
    ];

    /// Maps a raw opcode value to an `Opcode`, or `None` if it has no handler.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            OP_ADD => Some(Self::Add),
            OP_MUL => Some(Self::Mul),
            OP_INPUT => Some(Self::Input),
            OP_OUTPUT => Some(Self::Output),
            OP_JUMP_IF_TRUE => Some(Self::JumpIfTrue),
            OP_JUMP_IF_FALSE => Some(Self::JumpIfFalse),
            OP_LESS_THAN => Some(Self::LessThan),
            OP_EQUALS => Some(Self::Equals),
            OP_ADJUST_BASE => Some(Self::AdjustBase),
            OP_HALT => Some(Self::Halt),
            _ => None,
        }
    }

    /// The raw opcode value.
    pub const fn code(self) -> i64 {
        match self {
            Self::Add => OP_ADD,
            Self::Mul => OP_MUL,
            Self::Input => OP_INPUT,
            Self::Output => OP_OUTPUT,
            Self::JumpIfTrue => OP_JUMP_IF_TRUE,
            Self::JumpIfFalse => OP_JUMP_IF_FALSE,
            Self::LessThan => OP_LESS_THAN,
            Self::Equals => OP_EQUALS,
            Self::AdjustBase => OP_ADJUST_BASE,
            Self::Halt => OP_HALT,
        }
    }

    /// Number of operands following the instruction word.
    pub const fn arity(self) -> usize {
        match self {
            Self::Add | Self::Mul | Self::LessThan | Self::Equals => 3,
            Self::JumpIfTrue | Self::JumpIfFalse => 2,
            Self::Input | Self::Output | Self::AdjustBase => 1,
            Self::Halt => 0,
        }
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Mul => "mul",
            Self::Input => "in",
            Self::Output => "out",
            Self::JumpIfTrue => "jt",
            Self::JumpIfFalse => "jf",
            Self::LessThan => "lt",
            Self::Equals => "eq",
            Self::AdjustBase => "arb",
            Self::Halt => "halt",
        }
    }

    /// Dense index in `0..OPCODE_COUNT`, used by per-opcode counters.
    pub const fn index(self) -> usize {
        match self {
            Self::Add => 0,
            Self::Mul => 1,
            Self::Input => 2,
            Self::Output => 3,
            Self::JumpIfTrue => 4,
            Self::JumpIfFalse => 5,
            Self::LessThan => 6,
            Self::Equals => 7,
            Self::AdjustBase => 8,
            Self::Halt => 9,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}

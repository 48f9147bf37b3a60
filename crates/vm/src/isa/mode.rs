//! Operand addressing modes.

use std::fmt;

/// Mode digit for positional operands.
pub const MODE_POSITION: i64 = 0;
/// Mode digit for immediate operands.
pub const MODE_IMMEDIATE: i64 = 1;
/// Mode digit for relative operands.
pub const MODE_RELATIVE: i64 = 2;

/// How an operand's raw word becomes an effective value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// The operand is an address; the value is the word stored there.
    #[default]
    Position,
    /// The operand is the value itself. Never valid for write targets.
    Immediate,
    /// The operand is an offset from the relative base.
    Relative,
}

impl Mode {
    /// Maps a mode digit to a `Mode`.
    pub const fn from_digit(digit: i64) -> Option<Self> {
        match digit {
            MODE_POSITION => Some(Self::Position),
            MODE_IMMEDIATE => Some(Self::Immediate),
            MODE_RELATIVE => Some(Self::Relative),
            _ => None,
        }
    }

    /// The mode digit.
    pub const fn digit(self) -> i64 {
        match self {
            Self::Position => MODE_POSITION,
            Self::Immediate => MODE_IMMEDIATE,
            Self::Relative => MODE_RELATIVE,
        }
    }

    /// Short name used in listings.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Position => "pos",
            Self::Immediate => "imm",
            Self::Relative => "rel",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

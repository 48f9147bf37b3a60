//! Memory address type.
//!
//! Program words are signed, but memory is only defined for non-negative
//! addresses. `Addr` is the checked form every memory access goes through;
//! negative words are rejected with `VmError::InvalidAddress`.

use std::fmt;

use super::error::VmError;

/// A validated, non-negative memory address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Addr(pub u64);

impl Addr {
    /// Creates an address from a raw unsigned value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Converts a signed program word into an address.
    ///
    /// # Arguments
    ///
    /// * `word` - The signed value taken from memory or computed from it.
    ///
    /// # Returns
    ///
    /// The address, or `VmError::InvalidAddress` if `word` is negative.
    #[inline]
    pub const fn from_word(word: i64) -> Result<Self, VmError> {
        if word < 0 {
            Err(VmError::InvalidAddress { addr: word })
        } else {
            Ok(Self(word as u64))
        }
    }
}

impl From<u64> for Addr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

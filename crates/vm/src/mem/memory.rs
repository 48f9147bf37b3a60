//! Sparse memory with implicit zero fill.
//!
//! Low addresses live in a dense vector that grows on demand; addresses at or
//! beyond `DENSE_LIMIT` fall back to a hash map so a single far write does not
//! allocate the whole range in between.

use std::collections::HashMap;
use std::ops::Range;

use crate::common::{Addr, VmError};

/// Addresses below this bound are stored densely.
pub const DENSE_LIMIT: u64 = 1 << 20;

/// Machine memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    dense: Vec<i64>,
    sparse: HashMap<u64, i64>,
    extent: u64,
}

impl Memory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a memory initialized with `words` at addresses `0..words.len()`.
    pub fn from_words(words: &[i64]) -> Self {
        let mut mem = Self::new();
        mem.load(words);
        mem
    }

    /// Replaces the contents with `words` at addresses `0..words.len()`.
    pub fn load(&mut self, words: &[i64]) {
        self.sparse.clear();
        self.dense.clear();
        self.dense.extend_from_slice(words);
        self.extent = words.len() as u64;
    }

    /// Reads the word at a signed address.
    ///
    /// Returns 0 for addresses that were never written and
    /// `VmError::InvalidAddress` for negative addresses.
    pub fn get(&self, addr: i64) -> Result<i64, VmError> {
        Ok(self.read(Addr::from_word(addr)?))
    }

    /// Writes the word at a signed address, growing memory as needed.
    pub fn set(&mut self, addr: i64, value: i64) -> Result<(), VmError> {
        self.write(Addr::from_word(addr)?, value);
        Ok(())
    }

    /// Reads the word at a validated address.
    #[inline]
    pub fn read(&self, addr: Addr) -> i64 {
        let a = addr.val();
        if a < DENSE_LIMIT {
            self.dense.get(a as usize).copied().unwrap_or(0)
        } else {
            self.sparse.get(&a).copied().unwrap_or(0)
        }
    }

    /// Writes the word at a validated address.
    #[inline]
    pub fn write(&mut self, addr: Addr, value: i64) {
        let a = addr.val();
        if a < DENSE_LIMIT {
            let idx = a as usize;
            if idx >= self.dense.len() {
                self.dense.resize(idx + 1, 0);
            }
            self.dense[idx] = value;
        } else {
            let _ = self.sparse.insert(a, value);
        }
        self.extent = self.extent.max(a + 1);
    }

    /// One past the highest address ever loaded or written.
    pub const fn len(&self) -> u64 {
        self.extent
    }

    /// True if nothing was ever loaded or written.
    pub const fn is_empty(&self) -> bool {
        self.extent == 0
    }

    /// Copies the words in `range`, zero-filling unwritten addresses.
    pub fn snapshot(&self, range: Range<u64>) -> Vec<i64> {
        range.map(|a| self.read(Addr::new(a))).collect()
    }

    /// Copies the whole image, `0..len()`.
    ///
    /// This materializes every address up to the highest one written, so it
    /// is meant for inspection of small images.
    pub fn to_vec(&self) -> Vec<i64> {
        self.snapshot(0..self.extent)
    }
}

//! Program Loader.
//!
//! Turns the external program listing into a `Program`. It performs:
//! 1. **Parsing:** Comma-separated base-10 signed integers, whitespace around tokens ignored.
//! 2. **File loading:** Reads a listing from disk, reporting the path on failure.
//! 3. **Patching:** Copies a program with selected words replaced before it runs.
//!
//! A listing may end with a single trailing comma. Any malformed token rejects
//! the whole listing; no partial program is ever produced.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::common::LoadError;

/// An initial memory image.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Program(Vec<i64>);

impl Program {
    /// Wraps a word vector.
    pub const fn new(words: Vec<i64>) -> Self {
        Self(words)
    }

    /// Parses a comma-separated listing.
    ///
    /// # Examples
    ///
    /// ```
    /// use intcode_vm::Program;
    ///
    /// let program = Program::parse("1,9,10,3,\n2,3,11,0,99,30,40,50\n").unwrap();
    /// assert_eq!(program.len(), 12);
    /// assert!(Program::parse("1,x,3").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LoadError::Empty);
        }
        let body = text.strip_suffix(',').unwrap_or(text);

        let words = body
            .split(',')
            .enumerate()
            .map(|(index, token)| {
                let token = token.trim();
                token.parse::<i64>().map_err(|source| LoadError::Parse {
                    index,
                    token: token.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(words))
    }

    /// Reads and parses a listing file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let program = Self::parse(&text)?;
        debug!(path = %path.display(), words = program.len(), "loaded program");
        Ok(program)
    }

    /// The words of the image.
    pub fn words(&self) -> &[i64] {
        &self.0
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the program has no words.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy with `(address, value)` patches applied.
    ///
    /// Patches past the end extend the image with zeros.
    pub fn patched(&self, patches: &[(usize, i64)]) -> Self {
        let mut words = self.0.clone();
        for &(addr, value) in patches {
            if addr >= words.len() {
                words.resize(addr + 1, 0);
            }
            words[addr] = value;
        }
        Self(words)
    }

    /// Consumes the program, returning its words.
    pub fn into_words(self) -> Vec<i64> {
        self.0
    }
}

impl From<Vec<i64>> for Program {
    fn from(words: Vec<i64>) -> Self {
        Self(words)
    }
}

impl From<&[i64]> for Program {
    fn from(words: &[i64]) -> Self {
        Self(words.to_vec())
    }
}

impl FromStr for Program {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical listing: words joined by `,` without spaces.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{word}")?;
        }
        Ok(())
    }
}

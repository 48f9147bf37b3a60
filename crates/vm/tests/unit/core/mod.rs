//! # Machine Core

/// Instruction semantics and fault paths.
pub mod execution;

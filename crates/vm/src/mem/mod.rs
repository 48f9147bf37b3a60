//! Word-addressed machine memory.
//!
//! Memory is a mapping from non-negative addresses to signed 64-bit words.
//! Addresses that were never written read as zero, and writes beyond the
//! loaded program extend the address space.

/// Sparse, zero-filled memory implementation.
pub mod memory;

pub use memory::Memory;

//! # Memory Tests
//!
//! Zero fill, on-demand growth, the dense/sparse split, and rejection of
//! negative addresses.

use intcode_vm::common::{Addr, VmError};
use intcode_vm::mem::Memory;
use intcode_vm::mem::memory::DENSE_LIMIT;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_from_words_loads_at_zero() {
    let mem = Memory::from_words(&[1, 2, 3]);
    assert_eq!(mem.len(), 3);
    assert_eq!(mem.to_vec(), vec![1, 2, 3]);
}

#[test]
fn test_unwritten_addresses_read_zero() {
    let mem = Memory::from_words(&[5]);
    assert_eq!(mem.get(1), Ok(0));
    assert_eq!(mem.get(1_000_000), Ok(0));
    assert_eq!(mem.read(Addr::new(u64::MAX)), 0);
}

#[test]
fn test_negative_address_is_invalid() {
    let mut mem = Memory::new();
    assert_eq!(mem.get(-1), Err(VmError::InvalidAddress { addr: -1 }));
    assert_eq!(mem.set(-9, 1), Err(VmError::InvalidAddress { addr: -9 }));
    assert!(mem.is_empty());
}

#[test]
fn test_write_past_end_grows_with_zeros() {
    let mut mem = Memory::from_words(&[1, 2]);
    mem.set(5, 7).unwrap();
    assert_eq!(mem.len(), 6);
    assert_eq!(mem.to_vec(), vec![1, 2, 0, 0, 0, 7]);
}

#[test]
fn test_far_write_is_sparse() {
    let mut mem = Memory::new();
    let far = (DENSE_LIMIT as i64) * 1024;
    mem.set(far, 42).unwrap();
    assert_eq!(mem.get(far), Ok(42));
    assert_eq!(mem.get(far - 1), Ok(0));
    assert_eq!(mem.len(), far as u64 + 1);
    assert_eq!(mem.snapshot(far as u64 - 1..far as u64 + 2), vec![0, 42, 0]);
}

#[test]
fn test_load_replaces_contents() {
    let mut mem = Memory::from_words(&[9, 9, 9]);
    mem.set(DENSE_LIMIT as i64 + 3, 1).unwrap();
    mem.load(&[4]);
    assert_eq!(mem.len(), 1);
    assert_eq!(mem.get(1), Ok(0));
    assert_eq!(mem.get(DENSE_LIMIT as i64 + 3), Ok(0));
}

proptest! {
    #[test]
    fn prop_last_write_wins(addr in 0i64..(1 << 40), first in any::<i64>(), second in any::<i64>()) {
        let mut mem = Memory::new();
        mem.set(addr, first).unwrap();
        mem.set(addr, second).unwrap();
        prop_assert_eq!(mem.get(addr), Ok(second));
        prop_assert_eq!(mem.len(), addr as u64 + 1);
    }
}

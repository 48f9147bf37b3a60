//! Common utilities and types used throughout the virtual machine.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Address Types:** A checked, non-negative memory address.
//! 2. **Error Handling:** Machine faults plus loader, runner and device errors.

/// Checked memory address type.
pub mod addr;

/// Error types for the machine, loader, runner, configuration and devices.
pub mod error;

pub use addr::Addr;
pub use error::{ConfigError, DeviceError, LoadError, SimError, VmError};

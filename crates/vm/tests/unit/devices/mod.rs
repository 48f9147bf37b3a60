//! # Devices

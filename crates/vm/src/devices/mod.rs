//! Peripherals.
//!
//! Devices sit on the far side of a machine's channels and give its raw
//! value stream a meaning. This module provides:
//! 1. **ASCII console:** Text lines in, text lines (or large raw values) out.
//! 2. **Screen:** Tile grid painted by `(x, y, tile)` triples, plus a score display.
//! 3. **Network:** A packet switch connecting many machines, with a NAT on a fixed address.

/// Line-oriented ASCII terminal.
pub mod ascii;

/// Packet-switched machine network.
pub mod network;

/// Tile screen and score display.
pub mod screen;

pub use ascii::{AsciiConsole, AsciiLine, LineAssembler, encode_line};
pub use network::{IdleTracker, NatMode, Network, Packet};
pub use screen::{Screen, Tile};

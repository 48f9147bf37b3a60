//! Configuration system for the intcode virtual machine.
//!
//! This module defines the configuration structures used to parameterize
//! machines and machine networks. It provides:
//! 1. **Defaults:** Baseline channel capacities, NAT address, idle threshold.
//! 2. **Structures:** `MachineConfig` for a single machine, `NetworkConfig` for the switch.
//! 3. **Loading:** JSON deserialization from a string or a file, with validation.
//!
//! Every field is optional in JSON; omitted fields take the values in `defaults`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Outbound channel capacity: zero makes `output` a rendezvous with the consumer.
    pub const OUTPUT_CAPACITY: Option<usize> = Some(0);

    /// Inbound channel capacity: unbounded so callers can queue input ahead of time.
    pub const INPUT_CAPACITY: Option<usize> = None;

    /// Number of machines on the network.
    pub const NETWORK_SIZE: u64 = 50;

    /// Address of the NAT device on the network.
    pub const NAT_ADDRESS: u64 = 255;

    /// Consecutive empty reads after which a machine counts as idle.
    pub const IDLE_THRESHOLD: u64 = 100;

    /// Switch polling interval while waiting for packets, in milliseconds.
    pub const POLL_INTERVAL_MS: u64 = 1;
}

/// Largest accepted `NetworkConfig::size`; every machine is an OS thread.
pub const MAX_NETWORK_SIZE: u64 = 4096;

/// Root configuration.
///
/// # Examples
///
/// ```
/// use intcode_vm::Config;
///
/// let json = r#"{
///     "machine": { "trace_instructions": true, "output_capacity": 16 },
///     "network": { "size": 4 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.machine.trace_instructions);
/// assert_eq!(config.machine.output_capacity, Some(16));
/// assert_eq!(config.network.size, 4);
/// assert_eq!(config.network.nat_address, 255);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Per-machine settings
    #[serde(default)]
    pub machine: MachineConfig,
    /// Network switch settings
    #[serde(default)]
    pub network: NetworkConfig,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.network.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// Settings for a single machine and its channels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MachineConfig {
    /// Inbound channel capacity (`null` = unbounded, `0` = rendezvous)
    #[serde(default = "MachineConfig::default_input_capacity")]
    pub input_capacity: Option<usize>,

    /// Outbound channel capacity (`null` = unbounded, `0` = rendezvous)
    #[serde(default = "MachineConfig::default_output_capacity")]
    pub output_capacity: Option<usize>,

    /// Emit every executed instruction as a TRACE event
    #[serde(default)]
    pub trace_instructions: bool,

    /// Fault with `StepLimitExceeded` after this many instructions
    #[serde(default)]
    pub max_steps: Option<u64>,
}

impl MachineConfig {
    const fn default_input_capacity() -> Option<usize> {
        defaults::INPUT_CAPACITY
    }

    const fn default_output_capacity() -> Option<usize> {
        defaults::OUTPUT_CAPACITY
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            input_capacity: defaults::INPUT_CAPACITY,
            output_capacity: defaults::OUTPUT_CAPACITY,
            trace_instructions: false,
            max_steps: None,
        }
    }
}

/// Settings for the packet-switched machine network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkConfig {
    /// Number of machines, addressed `0..size`
    #[serde(default = "NetworkConfig::default_size")]
    pub size: u64,

    /// Address that the NAT listens on
    #[serde(default = "NetworkConfig::default_nat_address")]
    pub nat_address: u64,

    /// Consecutive empty reads before a machine is considered idle
    #[serde(default = "NetworkConfig::default_idle_threshold")]
    pub idle_threshold: u64,

    /// How long the switch waits for a packet before checking idleness
    #[serde(default = "NetworkConfig::default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl NetworkConfig {
    const fn default_size() -> u64 {
        defaults::NETWORK_SIZE
    }

    const fn default_nat_address() -> u64 {
        defaults::NAT_ADDRESS
    }

    const fn default_idle_threshold() -> u64 {
        defaults::IDLE_THRESHOLD
    }

    const fn default_poll_interval_ms() -> u64 {
        defaults::POLL_INTERVAL_MS
    }

    /// Rejects networks too large to boot.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.size > MAX_NETWORK_SIZE {
            return Err(ConfigError::NetworkSize {
                size: self.size,
                max: MAX_NETWORK_SIZE,
            });
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            size: defaults::NETWORK_SIZE,
            nat_address: defaults::NAT_ADDRESS,
            idle_threshold: defaults::IDLE_THRESHOLD,
            poll_interval_ms: defaults::POLL_INTERVAL_MS,
        }
    }
}

//! # Configuration Tests
//!
//! Defaults, partial JSON documents, and loading from disk.

use std::io::Write;

use intcode_vm::common::ConfigError;
use intcode_vm::config::*;
use tempfile::NamedTempFile;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.machine, MachineConfig::default());
    assert_eq!(config.network, NetworkConfig::default());
}

#[test]
fn test_machine_config_defaults() {
    let machine = MachineConfig::default();
    assert_eq!(machine.input_capacity, None);
    assert_eq!(machine.output_capacity, Some(0));
    assert!(!machine.trace_instructions);
    assert_eq!(machine.max_steps, None);
}

#[test]
fn test_network_config_defaults() {
    let network = NetworkConfig::default();
    assert_eq!(network.size, 50);
    assert_eq!(network.nat_address, 255);
    assert_eq!(network.idle_threshold, 100);
    assert_eq!(network.poll_interval_ms, 1);
}

#[test]
fn test_empty_document_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config = Config::from_json(
        r#"{ "machine": { "max_steps": 5000 }, "network": { "idle_threshold": 3 } }"#,
    )
    .unwrap();
    assert_eq!(config.machine.max_steps, Some(5000));
    assert_eq!(config.machine.output_capacity, Some(0));
    assert_eq!(config.network.idle_threshold, 3);
    assert_eq!(config.network.size, 50);
}

#[test]
fn test_null_capacity_is_unbounded() {
    let config = Config::from_json(r#"{ "machine": { "output_capacity": null } }"#).unwrap();
    assert_eq!(config.machine.output_capacity, None);
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        Config::from_json(r#"{ "machine": { "max_steps": "many" } }"#),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(Config::from_json("{"), Err(ConfigError::Json(_))));
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "network": {{ "size": 4, "nat_address": 9 }} }}"#).unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.network.size, 4);
    assert_eq!(config.network.nat_address, 9);
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Config::from_file(dir.path().join("nope.json")),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_oversized_network_is_rejected() {
    assert!(matches!(
        Config::from_json(r#"{ "network": { "size": 18446744073709551615 } }"#),
        Err(ConfigError::NetworkSize {
            size: u64::MAX,
            max: MAX_NETWORK_SIZE
        })
    ));

    let largest = format!(r#"{{ "network": {{ "size": {MAX_NETWORK_SIZE} }} }}"#);
    assert_eq!(Config::from_json(&largest).unwrap().network.size, MAX_NETWORK_SIZE);
}

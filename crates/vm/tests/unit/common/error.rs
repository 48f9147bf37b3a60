//! # Error Tests
//!
//! Display text and `From` layering of the error enums.

use intcode_vm::common::{DeviceError, LoadError, SimError, VmError};
use intcode_vm::core::State;
use intcode_vm::Program;

#[test]
fn test_vm_error_messages() {
    assert_eq!(
        VmError::IllegalOpcode { opcode: 0, pc: 7 }.to_string(),
        "illegal opcode 0 at pc 7"
    );
    assert_eq!(
        VmError::IllegalMode { mode: 3, pc: 0 }.to_string(),
        "illegal addressing mode 3 at pc 0"
    );
    assert_eq!(
        VmError::InvalidAddress { addr: -4 }.to_string(),
        "invalid address -4"
    );
    assert_eq!(
        VmError::NotRunning {
            state: State::Halted
        }
        .to_string(),
        "machine is not running (state: Halted)"
    );
}

#[test]
fn test_sim_error_is_transparent_over_vm_error() {
    let err = SimError::from(VmError::InputClosed { pc: 2 });
    assert_eq!(err.to_string(), "input closed at pc 2");
    assert!(matches!(err, SimError::Vm(VmError::InputClosed { pc: 2 })));
}

#[test]
fn test_load_error_names_token_and_position() {
    let err = Program::parse("1, x ,3").unwrap_err();
    let LoadError::Parse { index, token, .. } = &err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(*index, 1);
    assert_eq!(token, "x");
    assert!(err.to_string().starts_with("bad integer \"x\" at position 1"));
}

#[test]
fn test_load_error_keeps_source() {
    let err = Program::parse("1,2,abc").unwrap_err();
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_device_error_wraps_sim_error() {
    let err = DeviceError::from(SimError::Disconnected);
    assert_eq!(err.to_string(), "machine channel disconnected");

    let tile = DeviceError::UnknownTile { id: 9, x: 1, y: 2 };
    assert_eq!(tile.to_string(), "unknown tile id 9 at (1, 2)");
}

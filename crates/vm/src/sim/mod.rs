//! Simulation utilities and program loading.
//!
//! Provides the program loader and the threaded runner that executes
//! machines and wires their channels together.

/// Program listing parser and file loader.
pub mod loader;

/// Threaded execution, pipelines and feedback rings.
pub mod runner;

pub use loader::Program;
pub use runner::{
    MachineHandle, MachineThread, Pipeline, feedback_loop, run_with_inputs, spawn,
    spawn_with_ports,
};

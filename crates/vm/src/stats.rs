//! Execution statistics collection and reporting.
//!
//! This module tracks what a machine did while it ran. It provides:
//! 1. **Throughput:** Instructions retired and host-side instructions per second.
//! 2. **Instruction mix:** Counts per opcode.
//! 3. **I/O:** Values consumed from the inbound channel and emitted on the outbound one.
//! 4. **Control flow:** Jumps taken versus jumps that fell through.

use std::fmt;
use std::time::Instant;

use crate::isa::Opcode;
use crate::isa::opcodes::OPCODE_COUNT;

/// Execution statistics for one machine.
#[derive(Clone, Debug)]
pub struct ExecStats {
    start_time: Instant,
    /// Number of instructions executed, including the final `halt`.
    pub instructions_retired: u64,
    /// Instructions executed per opcode, indexed by `Opcode::index`.
    pub per_opcode: [u64; OPCODE_COUNT],
    /// Values consumed by `input`.
    pub values_read: u64,
    /// Values emitted by `output`.
    pub values_written: u64,
    /// Conditional jumps that redirected the program counter.
    pub jumps_taken: u64,
    /// Conditional jumps that fell through.
    pub jumps_not_taken: u64,
}

impl Default for ExecStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            instructions_retired: 0,
            per_opcode: [0; OPCODE_COUNT],
            values_read: 0,
            values_written: 0,
            jumps_taken: 0,
            jumps_not_taken: 0,
        }
    }
}

impl ExecStats {
    /// Records one retired instruction.
    #[inline]
    pub fn retire(&mut self, op: Opcode) {
        self.instructions_retired += 1;
        self.per_opcode[op.index()] += 1;
    }

    /// Number of times `op` was executed.
    pub fn count(&self, op: Opcode) -> u64 {
        self.per_opcode[op.index()]
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for ExecStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let kips = if seconds > 0.0 {
            (self.instructions_retired as f64 / seconds) / 1000.0
        } else {
            0.0
        };
        writeln!(f, "==========================================================")?;
        writeln!(f, "INTCODE EXECUTION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {seconds:.4} s")?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_kips                 {kips:.2}")?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INSTRUCTION MIX")?;
        for op in Opcode::ALL {
            writeln!(f, "  op.{:<20} {}", op.mnemonic(), self.count(op))?;
        }
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "I/O AND CONTROL")?;
        writeln!(f, "  io.values_read         {}", self.values_read)?;
        writeln!(f, "  io.values_written      {}", self.values_written)?;
        writeln!(f, "  jumps.taken            {}", self.jumps_taken)?;
        write!(f, "  jumps.not_taken        {}", self.jumps_not_taken)
    }
}

//! Program Disassembler.
//!
//! Walks a word slice from address 0 and splits it into instruction lines
//! and raw data lines, for listings, debug tracing and test diagnostics.
//!
//! A word starts an instruction line when it decodes to a known opcode with
//! valid modes and enough words follow it for the operands. Anything else is
//! a one-word data line and the walk resumes at the next word.
//!
//! # Usage
//!
//! ```
//! use intcode_vm::isa::disasm::disassemble;
//!
//! let lines = disassemble(&[1002, 4, 3, 4, 33]);
//! assert_eq!(lines[0].to_string(), "[   0]      mul   pos(4)   imm(3)   pos(4)");
//! assert_eq!(lines[1].to_string(), "[   4] data 33");
//! ```

use std::fmt;

use crate::isa::decode::decode;
use crate::isa::instruction::Instruction;

/// What a listing line holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// A word that is not a complete instruction.
    Data,
    /// A decoded instruction and its operands.
    Instr(Instruction),
}

/// One line of a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// Address of the first word.
    pub offset: usize,
    /// Words covered by the line.
    pub words: Vec<i64>,
    /// Instruction or data.
    pub kind: LineKind,
}

impl Line {
    /// Number of words covered.
    pub fn width(&self) -> usize {
        self.words.len()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LineKind::Instr(inst) => {
                write!(f, "[{:4}] ", self.offset)?;
                f.write_str(&format_instruction(inst, &self.words[1..]))
            }
            LineKind::Data => {
                let words: Vec<String> = self.words.iter().map(i64::to_string).collect();
                write!(f, "[{:4}] data {}", self.offset, words.join(", "))
            }
        }
    }
}

/// Formats an instruction and its raw operands as `mnemonic  mode(raw) ...`.
///
/// # Arguments
///
/// * `inst` - The decoded instruction.
/// * `operands` - Raw operand words; must hold at least `inst.arity` words.
pub fn format_instruction(inst: &Instruction, operands: &[i64]) -> String {
    let mnemonic = inst
        .opcode
        .map_or_else(|| format!("op{}", inst.code), |op| op.mnemonic().to_string());
    let mut text = format!("{mnemonic:>8}");
    for (mode, raw) in inst.modes().iter().zip(operands) {
        text.push_str(&format!(" {:>8}", format!("{mode}({raw})")));
    }
    text
}

/// Disassembles a program image into listing lines.
pub fn disassemble(words: &[i64]) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut offset = 0;
    while offset < words.len() {
        let decoded = decode(words[offset])
            .ok()
            .filter(|inst| inst.opcode.is_some() && offset + inst.width() <= words.len());
        let (kind, width) = match decoded {
            Some(inst) => (LineKind::Instr(inst), inst.width()),
            None => (LineKind::Data, 1),
        };
        lines.push(Line {
            offset,
            words: words[offset..offset + width].to_vec(),
            kind,
        });
        offset += width;
    }
    lines
}

/// Renders a whole listing, one line per row.
pub fn listing(words: &[i64]) -> String {
    disassemble(words)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

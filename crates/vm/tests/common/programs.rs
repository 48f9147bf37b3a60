//! Hand-assembled programs with known behavior.

/// Reads one value and writes it back.
pub const ECHO: &[i64] = &[3, 0, 4, 0, 99];

/// Outputs a copy of itself.
pub const QUINE: &[i64] = &[
    109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99,
];

/// Outputs a 16-digit product.
pub const SIXTEEN_DIGITS: &[i64] = &[1102, 34_915_192, 34_915_192, 7, 4, 7, 99, 0];

/// Outputs the large literal in its middle.
pub const LARGE_LITERAL: &[i64] = &[104, 1_125_899_906_842_624, 99];

/// Outputs 1 if the input equals 8, else 0 (position mode).
pub const EQ_8_POSITION: &[i64] = &[3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];

/// Outputs 1 if the input is less than 8, else 0 (position mode).
pub const LT_8_POSITION: &[i64] = &[3, 9, 7, 9, 10, 9, 4, 9, 99, -1, 8];

/// Outputs 1 if the input equals 8, else 0 (immediate mode).
pub const EQ_8_IMMEDIATE: &[i64] = &[3, 3, 1108, -1, 8, 3, 4, 3, 99];

/// Outputs 1 if the input is less than 8, else 0 (immediate mode).
pub const LT_8_IMMEDIATE: &[i64] = &[3, 3, 1107, -1, 8, 3, 4, 3, 99];

/// Outputs 0 if the input is 0, else 1 (position-mode jumps).
pub const NONZERO_POSITION: &[i64] = &[3, 12, 6, 12, 15, 1, 13, 14, 13, 4, 13, 99, -1, 0, 1, 9];

/// Outputs 0 if the input is 0, else 1 (immediate-mode jumps).
pub const NONZERO_IMMEDIATE: &[i64] = &[3, 3, 1105, -1, 9, 1101, 0, 0, 12, 4, 12, 99, 1];

/// Outputs 999, 1000 or 1001 for inputs below, equal to, or above 8.
pub const COMPARE_8: &[i64] = &[
    3, 21, 1008, 21, 8, 20, 1005, 20, 22, 107, 8, 21, 20, 1006, 20, 31, 1106, 0, 36, 98, 0, 0,
    1002, 21, 125, 20, 4, 20, 1105, 1, 46, 104, 999, 1105, 1, 46, 1101, 1000, 1, 20, 4, 20, 1105,
    1, 46, 98, 99,
];

/// Forwards every input; halts after forwarding -1.
pub const FORWARD_UNTIL_TERMINATOR: &[i64] = &[3, 100, 4, 100, 1008, 100, -1, 101, 1006, 101, 0, 99];

/// Amplifier: reads a phase then a signal, outputs `signal * 10 + phase`.
pub const AMPLIFIER: &[i64] = &[3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0];

/// Feedback amplifier: five rounds of `signal * 2 + (phase - 4)`.
pub const FEEDBACK_AMPLIFIER: &[i64] = &[
    3, 26, 1001, 26, -4, 26, 3, 27, 1002, 27, 2, 27, 1, 27, 26, 27, 4, 27, 1001, 28, -1, 28, 1005,
    28, 6, 99, 0, 0, 5,
];

/// Echoes characters up to and including `\n`, then outputs 1000.
pub const ECHO_LINE: &[i64] = &[3, 100, 4, 100, 1008, 100, 10, 101, 1006, 101, 0, 104, 1000, 99];

/// Network node for a 4-machine ring.
///
/// Node 0 sends `(1, 7, 42)` at boot. Every node forwards each packet it
/// receives to the next address with `x + 1`; the last node sends to 255.
pub const RING_NODE: &[i64] = &[
    3, 100, 1005, 100, 11, 104, 1, 104, 7, 104, 42, 3, 101, 1008, 101, -1, 102, 1005, 102, 11, 3,
    103, 1001, 100, 1, 104, 1008, 104, 4, 105, 1006, 105, 37, 1101, 0, 255, 104, 4, 104, 1001, 101,
    1, 101, 4, 101, 4, 103, 1105, 1, 11,
];

//! # Instruction Semantics
//!
//! Arithmetic, comparisons, jumps, relative addressing and the fault paths
//! of operand resolution, checked against programs with known results.

use intcode_vm::common::VmError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::harness::{TestContext, run_program};
use crate::common::programs::{
    COMPARE_8, ECHO, EQ_8_IMMEDIATE, EQ_8_POSITION, LARGE_LITERAL, LT_8_IMMEDIATE, LT_8_POSITION,
    NONZERO_IMMEDIATE, NONZERO_POSITION, QUINE, SIXTEEN_DIGITS,
};

#[rstest]
#[case(&[1, 0, 0, 0, 99], &[2, 0, 0, 0, 99])]
#[case(&[2, 3, 0, 3, 99], &[2, 3, 0, 6, 99])]
#[case(&[2, 4, 4, 5, 99, 0], &[2, 4, 4, 5, 99, 9801])]
#[case(&[1, 1, 1, 4, 99, 5, 6, 0, 99], &[30, 1, 1, 4, 2, 5, 6, 0, 99])]
#[case(
    &[1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50],
    &[3500, 9, 10, 70, 2, 3, 11, 0, 99, 30, 40, 50]
)]
fn test_arithmetic_final_memory(#[case] program: &[i64], #[case] expected: &[i64]) {
    let mut ctx = TestContext::new(program);
    let _status = ctx.run().unwrap();
    assert_eq!(ctx.machine.memory().to_vec(), expected);
}

#[rstest]
#[case(&[1002, 4, 3, 4, 33])]
#[case(&[1101, 100, -1, 4, 0])]
fn test_immediate_operands(#[case] program: &[i64]) {
    let mut ctx = TestContext::new(program);
    let status = ctx.run().unwrap();
    assert_eq!(ctx.mem(4), 99);
    assert_eq!(status.pc, 4);
}

#[rstest]
#[case(EQ_8_POSITION, 8, 1)]
#[case(EQ_8_POSITION, 7, 0)]
#[case(LT_8_POSITION, 7, 1)]
#[case(LT_8_POSITION, 8, 0)]
#[case(EQ_8_IMMEDIATE, 8, 1)]
#[case(EQ_8_IMMEDIATE, -8, 0)]
#[case(LT_8_IMMEDIATE, 5, 1)]
#[case(LT_8_IMMEDIATE, 9, 0)]
#[case(NONZERO_POSITION, 0, 0)]
#[case(NONZERO_POSITION, 5, 1)]
#[case(NONZERO_IMMEDIATE, 0, 0)]
#[case(NONZERO_IMMEDIATE, -3, 1)]
#[case(COMPARE_8, 7, 999)]
#[case(COMPARE_8, 8, 1000)]
#[case(COMPARE_8, 9, 1001)]
fn test_compare_and_jump(#[case] program: &[i64], #[case] input: i64, #[case] expected: i64) {
    assert_eq!(run_program(program, &[input]).unwrap(), vec![expected]);
}

#[test]
fn test_quine_outputs_itself() {
    assert_eq!(run_program(QUINE, &[]).unwrap(), QUINE.to_vec());
}

#[test]
fn test_large_values() {
    let product = run_program(SIXTEEN_DIGITS, &[]).unwrap();
    assert_eq!(product, vec![1_219_070_632_396_864]);
    assert_eq!(product[0].to_string().len(), 16);

    assert_eq!(
        run_program(LARGE_LITERAL, &[]).unwrap(),
        vec![1_125_899_906_842_624]
    );
}

#[test]
fn test_relative_read() {
    let mut ctx = TestContext::new(&[109, 2000, 109, 19, 204, -34, 99]).poke(1985, 77);
    let _status = ctx.run().unwrap();
    assert_eq!(ctx.outputs(), &[77]);
    assert_eq!(ctx.machine.relative_base(), 2019);
}

#[test]
fn test_relative_write_targets() {
    let mut ctx = TestContext::new(&[109, 10, 21101, 3, 4, 0, 204, 0, 99]);
    let _status = ctx.run().unwrap();
    assert_eq!(ctx.mem(10), 7);
    assert_eq!(ctx.outputs(), &[7]);

    let outputs = run_program(&[109, 100, 203, 0, 204, 0, 99], &[42]).unwrap();
    assert_eq!(outputs, vec![42]);
}

#[test]
fn test_negative_relative_base() {
    // Base -5 plus offset 10 addresses word 5.
    let outputs = run_program(&[109, -5, 204, 10, 99, 31], &[]).unwrap();
    assert_eq!(outputs, vec![31]);
}

#[test]
fn test_self_modifying_code_is_decoded_fresh() {
    let mut ctx = TestContext::new(&[1101, 0, 99, 4, 5000]);
    let status = ctx.run().unwrap();
    assert_eq!(status.pc, 4);
    assert_eq!(status.steps, 2);
}

#[test]
fn test_arithmetic_wraps() {
    let outputs = run_program(&[1101, i64::MAX, 1, 0, 4, 0, 99], &[]).unwrap();
    assert_eq!(outputs, vec![i64::MIN]);

    let outputs = run_program(&[1102, i64::MIN, -1, 0, 4, 0, 99], &[]).unwrap();
    assert_eq!(outputs, vec![i64::MIN]);
}

#[rstest]
#[case::unknown_opcode(&[5000], VmError::IllegalOpcode { opcode: 0, pc: 0 })]
#[case::opcode_after_add(&[1, 0, 0, 0, 42], VmError::IllegalOpcode { opcode: 42, pc: 4 })]
#[case::runs_into_zero(&[1101, 1, 1, 10], VmError::IllegalOpcode { opcode: 0, pc: 4 })]
#[case::negative_word(&[-99], VmError::IllegalOpcode { opcode: -99, pc: 0 })]
#[case::bad_mode_digit(&[301, 0, 0, 0, 99], VmError::IllegalMode { mode: 3, pc: 0 })]
#[case::immediate_target(&[11101, 1, 1, 5, 99], VmError::IllegalMode { mode: 1, pc: 0 })]
#[case::immediate_input_target(&[103, 5, 99], VmError::IllegalMode { mode: 1, pc: 0 })]
#[case::negative_read(&[1, -1, 0, 0, 99], VmError::InvalidAddress { addr: -1 })]
#[case::negative_write(&[1101, 0, 0, -3, 99], VmError::InvalidAddress { addr: -3 })]
#[case::negative_jump(&[1105, 1, -5], VmError::InvalidAddress { addr: -5 })]
#[case::input_exhausted(&[3, 0, 99], VmError::InputClosed { pc: 0 })]
fn test_faults(#[case] program: &[i64], #[case] expected: VmError) {
    assert_eq!(run_program(program, &[]), Err(expected));
}

#[test]
fn test_output_before_fault_is_kept() {
    let mut ctx = TestContext::new(&[104, 1, 104, 2, 5000]);
    assert!(ctx.run().is_err());
    assert_eq!(ctx.outputs(), &[1, 2]);
}

proptest! {
    #[test]
    fn prop_echo_returns_input(x in any::<i64>()) {
        prop_assert_eq!(run_program(ECHO, &[x]).unwrap(), vec![x]);
    }

    #[test]
    fn prop_equals_eight(x in any::<i64>()) {
        let expected = vec![i64::from(x == 8)];
        prop_assert_eq!(&run_program(EQ_8_POSITION, &[x]).unwrap(), &expected);
        prop_assert_eq!(&run_program(EQ_8_IMMEDIATE, &[x]).unwrap(), &expected);
    }

    #[test]
    fn prop_less_than_eight(x in any::<i64>()) {
        let expected = vec![i64::from(x < 8)];
        prop_assert_eq!(&run_program(LT_8_POSITION, &[x]).unwrap(), &expected);
        prop_assert_eq!(&run_program(LT_8_IMMEDIATE, &[x]).unwrap(), &expected);
    }

    #[test]
    fn prop_addressing_modes_agree(a in any::<i64>(), b in any::<i64>(), base in 0i64..1000) {
        let expected = vec![a.wrapping_add(b), a.wrapping_mul(b)];

        let mut by_position =
            TestContext::new(&[1, 50, 51, 52, 2, 50, 51, 53, 4, 52, 4, 53, 99])
                .poke(50, a)
                .poke(51, b);
        let _status = by_position.run().unwrap();
        prop_assert_eq!(by_position.outputs(), expected.as_slice());

        let by_immediate =
            run_program(&[1101, a, b, 52, 1102, a, b, 53, 4, 52, 4, 53, 99], &[]).unwrap();
        prop_assert_eq!(&by_immediate, &expected);

        let (x, y, sum, product) = (50 - base, 51 - base, 52 - base, 53 - base);
        let mut by_relative = TestContext::new(&[
            109, base, 22201, x, y, sum, 22202, x, y, product, 204, sum, 204, product, 99,
        ])
        .poke(50, a)
        .poke(51, b);
        let _status = by_relative.run().unwrap();
        prop_assert_eq!(by_relative.outputs(), expected.as_slice());
        prop_assert_eq!(by_relative.mem(52), a.wrapping_add(b));
    }
}

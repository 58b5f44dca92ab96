//! Execution tests for segment, stack, and arithmetic translation

use super::machine::Machine;
use crate::asm::sym;
use crate::program::Translator;
use hvt_parser::parse_unit;
use pretty_assertions::assert_eq;

/// Translate one unit (no bootstrap), point SP at the stack base, run.
fn run_unit(source: &str) -> Machine {
    run_unit_with(source, |_| {})
}

fn run_unit_with(source: &str, setup: impl FnOnce(&mut Machine)) -> Machine {
    let unit = parse_unit("Test", source).unwrap();
    let mut translator = Translator::new();
    let code = translator.translate_unit(&unit).unwrap();

    let mut machine = Machine::load(&code);
    machine.ram[0] = sym::STACK_BASE as i16;
    setup(&mut machine);
    machine.run(10_000);
    machine
}

#[test]
fn test_push_constant_grows_stack() {
    let machine = run_unit("push constant 7\npush constant 8\n");
    assert_eq!(machine.sp(), 258);
    assert_eq!(machine.ram[256], 7);
    assert_eq!(machine.ram[257], 8);
}

#[test]
fn test_end_to_end_addition() {
    // 7 + 8 on an empty stack leaves exactly 15 on top.
    let machine = run_unit("push constant 7\npush constant 8\nadd\n");
    assert_eq!(machine.sp(), 257);
    assert_eq!(machine.stack_top(), 15);
}

#[test]
fn test_sub_and_neg() {
    let machine = run_unit("push constant 10\npush constant 4\nsub\nneg\n");
    assert_eq!(machine.stack_top(), -6);
}

#[test]
fn test_bitwise_ops() {
    let machine = run_unit("push constant 12\npush constant 10\nand\n");
    assert_eq!(machine.stack_top(), 8);

    let machine = run_unit("push constant 12\npush constant 10\nor\n");
    assert_eq!(machine.stack_top(), 14);

    let machine = run_unit("push constant 0\nnot\n");
    assert_eq!(machine.stack_top(), -1);
}

#[test]
fn test_push_pop_round_trip_leaves_state_unchanged() {
    let machine = run_unit_with("push local 2\npop local 2\n", |m| {
        m.ram[1] = 300; // LCL
        m.ram[302] = 77;
    });
    assert_eq!(machine.sp(), 256);
    assert_eq!(machine.ram[302], 77);
}

#[test]
fn test_pop_through_pointer_segments() {
    let machine = run_unit_with(
        "push constant 42\npop this 5\npush constant 43\npop that 1\n",
        |m| {
            m.ram[3] = 3000; // THIS
            m.ram[4] = 3100; // THAT
        },
    );
    assert_eq!(machine.ram[3005], 42);
    assert_eq!(machine.ram[3101], 43);
    assert_eq!(machine.sp(), 256);
}

#[test]
fn test_temp_segment_is_fixed() {
    let machine = run_unit("push constant 9\npop temp 3\n");
    assert_eq!(machine.ram[8], 9);
}

#[test]
fn test_static_cells_survive_and_namespace() {
    let machine = run_unit("push constant 11\npop static 0\npush static 0\n");
    assert_eq!(machine.ram[machine.address_of("Test.0") as usize], 11);
    assert_eq!(machine.stack_top(), 11);
}

#[test]
fn test_pointer_zero_and_one_alias_this_and_that() {
    let machine = run_unit(
        "push constant 3000\npop pointer 0\npush constant 3100\npop pointer 1\npush pointer 0\n",
    );
    assert_eq!(machine.ram[3], 3000); // THIS
    assert_eq!(machine.ram[4], 3100); // THAT
    assert_eq!(machine.stack_top(), 3000);
}

#[test]
fn test_pointer_write_then_this_segment_read() {
    // pop pointer 0 rebases this; the next this-segment access uses it
    let machine = run_unit_with(
        "push constant 3000\npop pointer 0\npush this 7\n",
        |m| m.ram[3007] = 55,
    );
    assert_eq!(machine.stack_top(), 55);
}

#[test]
fn test_comparison_encodings() {
    // false is all-zero, true is all-ones
    let machine = run_unit("push constant 5\npush constant 3\nlt\n");
    assert_eq!(machine.stack_top(), 0);

    let machine = run_unit("push constant 3\npush constant 5\nlt\n");
    assert_eq!(machine.stack_top(), -1);

    let machine = run_unit("push constant 5\npush constant 3\ngt\n");
    assert_eq!(machine.stack_top(), -1);

    let machine = run_unit("push constant 4\npush constant 4\neq\n");
    assert_eq!(machine.stack_top(), -1);

    let machine = run_unit("push constant 4\npush constant 5\neq\n");
    assert_eq!(machine.stack_top(), 0);
}

#[test]
fn test_comparison_result_feeds_if_goto() {
    let machine = run_unit(
        "push constant 3\n\
         push constant 5\n\
         lt\n\
         if-goto TOOK\n\
         push constant 0\n\
         goto DONE\n\
         label TOOK\n\
         push constant 1\n\
         label DONE\n",
    );
    assert_eq!(machine.stack_top(), 1);
}

#[test]
fn test_loop_via_scoped_labels() {
    // Sum 1..=5 with a counter in local 0 and the accumulator in local 1
    let machine = run_unit_with(
        "push constant 5\n\
         pop local 0\n\
         push constant 0\n\
         pop local 1\n\
         label LOOP\n\
         push local 0\n\
         if-goto BODY\n\
         goto DONE\n\
         label BODY\n\
         push local 1\n\
         push local 0\n\
         add\n\
         pop local 1\n\
         push local 0\n\
         push constant 1\n\
         sub\n\
         pop local 0\n\
         goto LOOP\n\
         label DONE\n\
         push local 1\n",
        |m| m.ram[1] = 300,
    );
    assert_eq!(machine.stack_top(), 15);
}

use day2_5_7_intcode::{
    diagnostic::run_diagnostic,
    gravity::{alarm_answer, restore_alarm, run_alarm, search_noun_verb},
    int_code::{
        com::{DecodePolicy, IntCodeComputer},
        inst::{decode, Opcode, ParameterMode},
        parse_int_code,
    },
    Error,
};

fn log_init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn final_image(code: &[i64]) -> Vec<i64> {
    IntCodeComputer::default()
        .execute(code, &[])
        .unwrap()
        .image()
        .to_vec()
}

#[test]
fn decode_splits_opcode_and_modes() {
    let inst = decode(1002);
    assert_eq!(inst.opcode(), Some(Opcode::Multiply));
    assert_eq!(
        inst.modes(),
        &[
            ParameterMode::Position,
            ParameterMode::Immediate,
            ParameterMode::Position
        ]
    );

    let inst = decode(11108);
    assert_eq!(inst.opcode(), Some(Opcode::Equals));
    assert_eq!(inst.modes(), &[ParameterMode::Immediate; 3]);

    assert_eq!(decode(99).opcode(), Some(Opcode::Halt));
    assert_eq!(decode(42).opcode(), None);
    assert_eq!(decode(-1).opcode(), None);
    // Unknown mode digits read as immediate.
    assert_eq!(decode(204).modes()[0], ParameterMode::Immediate);
}

#[test]
fn add_and_multiply_in_place() {
    log_init();
    assert_eq!(final_image(&[1, 0, 0, 0, 99]), vec![2, 0, 0, 0, 99]);
    assert_eq!(final_image(&[2, 3, 0, 3, 99]), vec![2, 3, 0, 6, 99]);
    assert_eq!(final_image(&[2, 4, 4, 5, 99, 0]), vec![2, 4, 4, 5, 99, 9801]);
    assert_eq!(
        final_image(&[1, 1, 1, 4, 99, 5, 6, 0, 99]),
        vec![30, 1, 1, 4, 2, 5, 6, 0, 99]
    );
    assert_eq!(
        final_image(&[1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]),
        vec![3500, 9, 10, 70, 2, 3, 11, 0, 99, 30, 40, 50]
    );
}

#[test]
fn repeated_runs_start_from_the_same_image() {
    let code = [1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50];
    let computer = IntCodeComputer::default();
    let first = computer.execute(&code, &[]).unwrap();
    let second = computer.execute(&code, &[]).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.step_count(), 3);
}

#[test]
fn immediate_mode_operands() {
    assert_eq!(final_image(&[1101, 100, -1, 4, 0]), vec![1101, 100, -1, 4, 99]);
    assert_eq!(final_image(&[1002, 4, 3, 4, 33]), vec![1002, 4, 3, 4, 99]);
}

#[test]
fn input_is_echoed_through_memory() {
    let res = IntCodeComputer::default()
        .execute(&[3, 0, 4, 0, 99], &[7])
        .unwrap();
    assert_eq!(res.outputs(), &[7]);
    assert_eq!(res.image(), &[7, 0, 4, 0, 99]);
}

#[test]
fn less_than_and_equals_write_flags() {
    let computer = IntCodeComputer::default();
    assert_eq!(
        computer.execute(&[1107, 5, 9, 5, 99, -1], &[]).unwrap().image()[5],
        1
    );
    assert_eq!(
        computer.execute(&[1107, 9, 5, 5, 99, -1], &[]).unwrap().image()[5],
        0
    );
    assert_eq!(
        computer.execute(&[1108, 4, 4, 5, 99, -1], &[]).unwrap().image()[5],
        1
    );

    // Position mode, equal to 8.
    let code = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
    assert_eq!(computer.execute(&code, &[8]).unwrap().outputs(), &[1]);
    assert_eq!(computer.execute(&code, &[7]).unwrap().outputs(), &[0]);
    // Immediate mode, less than 8.
    let code = [3, 3, 1107, -1, 8, 3, 4, 3, 99];
    assert_eq!(computer.execute(&code, &[5]).unwrap().outputs(), &[1]);
    assert_eq!(computer.execute(&code, &[8]).unwrap().outputs(), &[0]);
}

#[test]
fn jump_if_false_takes_or_falls_through() {
    let computer = IntCodeComputer::default();
    // Zero jumps over the first output to position 7.
    let code = [1106, 0, 7, 104, 1, 99, 0, 104, 2, 99];
    assert_eq!(computer.execute(&code, &[]).unwrap().outputs(), &[2]);
    // Non-zero falls through by three cells.
    let code = [1106, 5, 7, 104, 1, 99, 0, 104, 2, 99];
    assert_eq!(computer.execute(&code, &[]).unwrap().outputs(), &[1]);

    let code = [3, 12, 6, 12, 15, 1, 13, 14, 13, 4, 13, 99, -1, 0, 1, 9];
    assert_eq!(computer.execute(&code, &[0]).unwrap().outputs(), &[0]);
    assert_eq!(computer.execute(&code, &[3]).unwrap().outputs(), &[1]);
}

#[test]
fn jump_if_true_takes_or_falls_through() {
    let computer = IntCodeComputer::default();
    let code = [3, 3, 1105, -1, 9, 1101, 0, 0, 12, 4, 12, 99, 1];
    assert_eq!(computer.execute(&code, &[0]).unwrap().outputs(), &[0]);
    assert_eq!(computer.execute(&code, &[-4]).unwrap().outputs(), &[1]);
}

#[test]
fn compare_with_eight() {
    let code = parse_int_code(
        "3,21,1008,21,8,20,1005,20,22,107,8,21,20,1006,20,31,\
         1106,0,36,98,0,0,1002,21,125,20,4,20,1105,1,46,104,\
         999,1105,1,46,1101,1000,1,20,4,20,1105,1,46,98,99",
    )
    .unwrap();
    let computer = IntCodeComputer::default();
    assert_eq!(computer.execute(&code, &[7]).unwrap().outputs(), &[999]);
    assert_eq!(computer.execute(&code, &[8]).unwrap().outputs(), &[1000]);
    assert_eq!(computer.execute(&code, &[9]).unwrap().outputs(), &[1001]);
}

#[test]
fn unknown_opcode_is_skipped_when_lenient() {
    log_init();
    let res = IntCodeComputer::new(DecodePolicy::Lenient)
        .execute(&[104, 7, 42, 99], &[])
        .unwrap();
    assert_eq!(res.outputs(), &[7]);

    let res = IntCodeComputer::default()
        .execute(&[104, 7, 42, 104, 8, 99], &[])
        .unwrap();
    assert_eq!(res.outputs(), &[7, 8]);
}

#[test]
fn unknown_opcode_is_fatal_when_strict() {
    let res = IntCodeComputer::new(DecodePolicy::Strict).execute(&[104, 7, 42, 99], &[]);
    assert_eq!(res, Err(Error::InvalidOpcode { inst_p: 2, code: 42 }));
}

#[test]
fn fatal_errors_stop_the_run() {
    let computer = IntCodeComputer::default();
    assert_eq!(
        computer.execute(&[1, 0, 10, 0, 99], &[]),
        Err(Error::ImageIndexError(10))
    );
    assert_eq!(
        computer.execute(&[1, 0, 0, -1, 99], &[]),
        Err(Error::ImageIndexError(-1))
    );
    assert_eq!(
        computer.execute(&[3, 0, 3, 0, 99], &[1]),
        Err(Error::NotEnoughInput)
    );
    assert_eq!(
        computer.execute(&[1105, 1, -3, 99], &[]),
        Err(Error::InvalidJumpTarget(-3))
    );
    assert_eq!(
        computer.execute(&[1, 0, 0], &[]),
        Err(Error::ExecutionExceedIntCode(3, 3))
    );
    assert_eq!(
        computer.execute(&[1102, i64::MAX, 2, 0, 99], &[]),
        Err(Error::ArithmeticOverflow(0))
    );
}

#[test]
fn leaving_code_without_halt() {
    log_init();
    let res = IntCodeComputer::default().execute(&[104, 1], &[]).unwrap();
    assert_eq!(res.outputs(), &[1]);
    assert_eq!(res.step_count(), 1);
    // Junk skipped up to the end still keeps the outputs.
    let res = IntCodeComputer::default()
        .execute(&[104, 7, 42], &[])
        .unwrap();
    assert_eq!(res.outputs(), &[7]);
    // Jumping past the end stops the same way.
    let res = IntCodeComputer::default()
        .execute(&[104, 3, 1105, 1, 10], &[])
        .unwrap();
    assert_eq!(res.outputs(), &[3]);

    let strict = IntCodeComputer::new(DecodePolicy::Strict);
    assert_eq!(
        strict.execute(&[104, 1], &[]),
        Err(Error::ExecutionExceedIntCode(2, 2))
    );
    // Operands past the end are fatal either way.
    assert_eq!(
        IntCodeComputer::default().execute(&[104, 1, 1, 0], &[]),
        Err(Error::ExecutionExceedIntCode(4, 4))
    );
}

#[test]
fn parse_int_code_trims_and_rejects() {
    assert_eq!(parse_int_code(" 1, -2 ,3\n"), Ok(vec![1, -2, 3]));
    assert_eq!(parse_int_code(""), Err(Error::EmptyError));
    assert_eq!(
        parse_int_code("1,x,3"),
        Err(Error::ParseIntError("x".to_string()))
    );
}

#[test]
fn alarm_restore_and_search() {
    let code = [1, 0, 0, 0, 99, 50, 60, 70, 80, 90, 100, 110, 120, 130, 140, 150];
    let computer = IntCodeComputer::default();
    assert_eq!(restore_alarm(&code, 12, 2).unwrap()[..3], [1, 12, 2]);
    assert_eq!(run_alarm(&computer, &code, 12, 2), Ok(122));
    assert_eq!(search_noun_verb(&computer, &code, 250, 100), Some((10, 15)));
    assert_eq!(search_noun_verb(&computer, &code, -1, 100), None);
    assert_eq!(restore_alarm(&[1, 0], 12, 2), Err(Error::ImageIndexError(2)));
}

#[test]
fn alarm_answer_refuses_overflow() {
    assert_eq!(alarm_answer(12, 2), Some(1202));
    assert_eq!(alarm_answer(10, 15), Some(1015));
    assert_eq!(alarm_answer(i64::MAX / 10, 0), None);
    assert_eq!(alarm_answer(i64::MAX / 100, 100), None);
}

#[test]
fn diagnostic_reports_code_and_failed_tests() {
    let computer = IntCodeComputer::default();
    let diagnostic = run_diagnostic(&computer, &[3, 0, 104, 0, 104, 3, 4, 0, 99], 5).unwrap();
    assert_eq!(diagnostic.outputs(), &[0, 3, 5]);
    assert_eq!(diagnostic.code(), Some(5));
    assert_eq!(diagnostic.failed_tests(), vec![1]);

    let diagnostic = run_diagnostic(&computer, &[3, 0, 99], 1).unwrap();
    assert_eq!(diagnostic.code(), None);
    assert!(diagnostic.failed_tests().is_empty());
}

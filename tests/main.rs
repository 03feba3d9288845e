use celopt::{
    error_template, value_of, ArgType, Compare, OptionSpec, OptionTable, OrderingMode, ParseError,
    Session, Step, Value, LONG_ONLY_BASE,
};
use std::cell::{Cell, RefCell};

fn run(session: &mut Session) -> Vec<Step> {
    let mut steps = Vec::default();

    loop {
        match session.parse() {
            Step::Done => return steps,
            step => steps.push(step),
        }
    }
}

#[test]
fn flags_arguments_and_operands() {
    let verbose = Cell::new(0);
    let table = OptionTable::new(vec![
        OptionSpec::new("verbose", 0).flag(&verbose, 1),
        OptionSpec::new("brief", 0).flag(&verbose, 0),
        OptionSpec::short('f').required(ArgType::Str),
    ]);
    let mut session = Session::builder(&table)
        .posixly_correct(false)
        .init(&["prog", "--verbose", "-f", "x.txt", "extra"])
        .unwrap();

    let steps = run(&mut session);

    assert_eq!(
        steps,
        vec![
            Step::Handled,
            Step::Matched {
                code: 'f' as u32,
                arg: Some(Value::Str("x.txt".to_string())),
            },
        ]
    );
    assert_eq!(steps.iter().map(Step::code).collect::<Vec<_>>(), vec![0, 'f' as i64]);
    assert_eq!(verbose.get(), 1);
    assert_eq!(session.operands(), &["extra"]);
}

#[test]
fn ambiguous_long_option() {
    let table = OptionTable::new(vec![
        OptionSpec::new("verbose", 'v' as u32),
        OptionSpec::new("version", 'V' as u32),
    ]);
    let mut session = Session::builder(&table).init(&["prog", "--ver"]).unwrap();

    let step = session.parse();
    assert_eq!(step.code(), '*' as i64);
    assert_eq!(
        step,
        Step::Error(ParseError::Ambiguous {
            option: "--ver".to_string(),
            candidates: "verbose, version".to_string(),
        })
    );
    assert_eq!(session.ambiguous_matches_text(), "verbose, version");
    assert_eq!(
        format!("{}: {}", session.program_name(), step_error(&step)),
        "prog: ambiguous option '--ver' (verbose, version)"
    );
}

fn step_error(step: &Step) -> String {
    match step {
        Step::Error(error) => error.to_string(),
        _ => panic!("{step:?} is not an error"),
    }
}

#[test]
fn terminator_stops_options() {
    let table = OptionTable::new(vec![OptionSpec::short('x')]);
    let mut session = Session::builder(&table)
        .posixly_correct(false)
        .init(&["prog", "--", "-x"])
        .unwrap();

    assert!(run(&mut session).is_empty());
    assert_eq!(session.operands(), &["-x"]);
}

#[test]
fn require_order() {
    let table = OptionTable::require_order(vec![OptionSpec::short('a'), OptionSpec::short('b')]);
    let mut session = Session::builder(&table)
        .posixly_correct(false)
        .init(&["prog", "-a", "file", "-b"])
        .unwrap();
    assert_eq!(session.ordering(), OrderingMode::RequireOrder);

    assert_eq!(
        run(&mut session),
        vec![Step::Matched {
            code: 'a' as u32,
            arg: None
        }]
    );
    assert_eq!(session.into_operands(), vec!["file", "-b"]);
}

#[test]
fn return_in_order() {
    let table = OptionTable::return_in_order(vec![OptionSpec::short('a')]);
    let mut session = Session::builder(&table)
        .posixly_correct(false)
        .init(&["prog", "one", "-a", "two"])
        .unwrap();

    let codes: Vec<i64> = run(&mut session).iter().map(Step::code).collect();
    assert_eq!(codes, vec![1, 'a' as i64, 1]);
}

#[test]
fn extension_tables() {
    let seen = RefCell::new(Vec::default());
    let primary = OptionTable::new(vec![OptionSpec::new("alpha", 'a' as u32)]);
    let first = OptionTable::new(vec![
        OptionSpec::new("shared", 's' as u32).optional(ArgType::Int),
        OptionSpec::new("alpine", LONG_ONLY_BASE),
    ]);
    let second = OptionTable::new(vec![OptionSpec::new("shared", 'S' as u32)]);
    let mut session = Session::builder(&primary)
        .posixly_correct(false)
        .init(&["prog", "--shared", "3", "-S", "--alpi", "--al"])
        .unwrap();
    session
        .extend_with_callback(&first, |code, arg| {
            seen.borrow_mut().push((code, arg.and_then(Value::as_int)))
        })
        .unwrap();
    session.extend(&second).unwrap();

    let steps = run(&mut session);

    assert_eq!(steps[0], Step::Handled);
    assert_eq!(
        steps[1],
        Step::Matched {
            code: 'S' as u32,
            arg: None
        }
    );
    assert_eq!(steps[2], Step::Handled);
    assert_eq!(step_error(&steps[3]), "ambiguous option '--al' (alpha, alpine)");
    assert_eq!(
        seen.borrow().as_slice(),
        &[('s' as u32, Some(3)), (LONG_ONLY_BASE, None)]
    );
}

#[test]
fn diagnostics() {
    let table = OptionTable::new(vec![
        OptionSpec::new("count", 'c' as u32).required(ArgType::Uint),
        OptionSpec::new("quiet", 'q' as u32),
    ]);
    let mut session = Session::builder(&table)
        .posixly_correct(false)
        .init(&["prog", "-x", "--count=-1", "--quiet=yes", "-c"])
        .unwrap();

    let messages: Vec<String> = run(&mut session).iter().map(step_error).collect();
    assert_eq!(
        messages,
        vec![
            "unknown option '-x'",
            "no or invalid argument given for '--count'",
            "option '--quiet' takes no argument",
            "no or invalid argument given for '-c'",
        ]
    );
    assert_eq!(error_template('+'), "option '%s' takes no argument");
}

#[test]
fn value_lookup() {
    let streams = [("stdin", 0), ("standard input", 0), ("stdout", 1), ("standard output", 1)];
    let table = OptionTable::new(vec![
        OptionSpec::new("connect", LONG_ONLY_BASE).required(ArgType::Str)
    ]);
    let mut session = Session::builder(&table)
        .init(&["prog", "--connect", "Standard_Output"])
        .unwrap();

    match session.parse() {
        Step::Matched {
            arg: Some(Value::Str(stream)),
            ..
        } => {
            let compare = Compare::exact().case_insensitive().normalize_separators();
            assert_eq!(value_of(&streams, &stream, compare, -1), 1);
            assert_eq!(value_of(&streams, &stream, Compare::exact(), -1), -1);
        }
        step => panic!("unexpected {step:?}"),
    }
}

use celopt::{value_of, ArgType, Compare, OptionSpec, OptionTable, Session, Step, LONG_ONLY_BASE};
use std::cell::Cell;
use std::process::ExitCode;

const CONNECT: u32 = LONG_ONLY_BASE;
const HELP: u32 = LONG_ONLY_BASE + 1;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let verbose = Cell::new(0);
    let mut connect = -1;

    let table = OptionTable::new(vec![
        OptionSpec::new("verbose", 0).flag(&verbose, 1),
        OptionSpec::new("brief", 0).flag(&verbose, 0),
        OptionSpec::new("add", 'a' as u32),
        OptionSpec::new("create", 'c' as u32).required(ArgType::Str),
        OptionSpec::new("number", 'n' as u32).optional(ArgType::Real),
        OptionSpec::new("count", 'i' as u32).required(ArgType::Int),
        OptionSpec::new("size", 's' as u32).required(ArgType::Uint),
        OptionSpec::new("yes", 'y' as u32).optional(ArgType::Bool),
        OptionSpec::new("connect", CONNECT).required(ArgType::Str),
        OptionSpec::new("help", HELP),
    ]);

    let mut session = match Session::builder(&table).fallback_name("opt_test").init(&args) {
        Ok(session) => session,
        Err(error) => {
            eprintln!("opt_test: failed to parse options: {error}");
            return ExitCode::FAILURE;
        }
    };
    let name = session.program_name().to_string();

    loop {
        match session.parse() {
            Step::Done => break,
            Step::Handled => {}
            Step::Operand(operand) => println!("{name}: operand '{operand}'"),
            Step::Matched { code, arg } => match (code, arg) {
                (code, _) if code == 'a' as u32 => println!("{name}: option -a given"),
                (code, Some(value)) if code == 'c' as u32 => {
                    println!("{name}: option -c given with value '{value}'")
                }
                (code, value) if code == 'n' as u32 => match value {
                    Some(value) => println!("{name}: option -n given with value '{value}'"),
                    None => println!("{name}: option -n given"),
                },
                (code, Some(value)) if code == 'i' as u32 || code == 's' as u32 => {
                    let c = char::from_u32(code).unwrap_or('?');
                    println!("{name}: option -{c} given with value '{value}'")
                }
                (code, value) if code == 'y' as u32 => {
                    let answer = value.and_then(|value| value.as_bool()).unwrap_or(true);
                    println!("{name}: option -y given ({answer})");
                }
                (CONNECT, Some(value)) => {
                    let streams = [
                        ("stdin", 0),
                        ("standard input", 0),
                        ("stdout", 1),
                        ("standard output", 1),
                        ("stderr", 2),
                        ("standard error", 2),
                    ];
                    let compare = Compare::exact().case_insensitive().normalize_separators();
                    connect = value_of(&streams, value.as_str().unwrap_or_default(), compare, -1);

                    if connect == -1 {
                        println!("{name}: 'stdin', 'stdout' or 'stderr' must be given for --connect");
                        return ExitCode::FAILURE;
                    }
                }
                (HELP, _) => {
                    println!("{name}: option --help given");
                    return ExitCode::SUCCESS;
                }
                (code, _) => unreachable!("not all options covered: {code}"),
            },
            Step::Error(error) => {
                eprintln!("{name}: {error}");
                return ExitCode::FAILURE;
            }
        }
    }

    if verbose.get() != 0 {
        println!("verbose flag is set");
    }
    println!("connect option is set to {connect}");

    if !session.operands().is_empty() {
        println!("non-option ARGV-arguments: {}", session.operands().join(" "));
    }

    ExitCode::SUCCESS
}

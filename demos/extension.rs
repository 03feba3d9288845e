use celopt::{ArgType, OptionSpec, OptionTable, Session, Step, Value, LONG_ONLY_BASE};
use std::cell::{Cell, RefCell};
use std::process::ExitCode;

// Options contributed by a library, delivered through its callback.
struct Library {
    debug: Cell<i32>,
    trace_level: Cell<u64>,
    log_files: RefCell<Vec<String>>,
}

impl Library {
    fn table(&self) -> OptionTable<'_> {
        OptionTable::new(vec![
            OptionSpec::new("lib-debug", 0).flag(&self.debug, 1),
            OptionSpec::new("lib-trace", 'T' as u32).optional(ArgType::Uint),
            OptionSpec::new("lib-log", LONG_ONLY_BASE).required(ArgType::Str),
        ])
    }

    fn handle(&self, code: u32, arg: Option<&Value>) {
        match (code, arg) {
            (LONG_ONLY_BASE, Some(Value::Str(file))) => {
                self.log_files.borrow_mut().push(file.clone())
            }
            (_, arg) => self
                .trace_level
                .set(arg.and_then(Value::as_uint).unwrap_or(1)),
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let library = Library {
        debug: Cell::new(0),
        trace_level: Cell::new(0),
        log_files: RefCell::new(Vec::default()),
    };
    let library_table = library.table();
    let table = OptionTable::new(vec![
        OptionSpec::new("quiet", 'q' as u32),
        OptionSpec::new("output", 'o' as u32).required(ArgType::Str),
    ]);

    let mut session = match Session::builder(&table).fallback_name("extension").init(&args) {
        Ok(session) => session,
        Err(error) => {
            eprintln!("extension: failed to parse options: {error}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) =
        session.extend_with_callback(&library_table, |code, arg| library.handle(code, arg))
    {
        eprintln!("extension: failed to register the library options: {error}");
        return ExitCode::FAILURE;
    }

    let name = session.program_name().to_string();
    let mut quiet = false;
    let mut output = None;

    loop {
        match session.parse() {
            Step::Done => break,
            Step::Handled | Step::Operand(_) => {}
            Step::Matched { code, arg } if code == 'q' as u32 && arg.is_none() => quiet = true,
            Step::Matched { code, arg: Some(Value::Str(path)) } if code == 'o' as u32 => {
                output.replace(path);
            }
            Step::Matched { code, .. } => unreachable!("not all options covered: {code}"),
            Step::Error(error) => {
                eprintln!("{name}: {error}");
                return ExitCode::FAILURE;
            }
        }
    }

    if !quiet {
        println!("output: {}", output.as_deref().unwrap_or("-"));
        println!("library debug: {}", library.debug.get());
        println!("library trace level: {}", library.trace_level.get());
        println!("library log files: {:?}", library.log_files.borrow());
        println!("operands: {:?}", session.operands());
    }

    ExitCode::SUCCESS
}

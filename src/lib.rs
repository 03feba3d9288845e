//! `celopt` is an incremental, table driven command line option parser for Rust.
//!
//! It follows the POSIX `getopt` and GNU `getopt_long` conventions, but asks the program to drive the loop.
//! Describe the recognized options in an [`OptionTable`], start a [`Session`] over the program arguments, and call [`Session::parse`] until it reports [`Step::Done`].
//! Each call does exactly one unit of work and tells you what it found.
//!
//! `celopt` aims for the following:
//! * *Familiar syntax*:
//! Short options may be clustered (`-abc`), take attached (`-fVALUE`, `-f=VALUE`) or separate (`-f VALUE`) arguments.
//! Long options take `--name=VALUE` or `--name VALUE`, and may be abbreviated to any unambiguous prefix.
//! A `--` ends option recognition.
//! * *Typed option-arguments*:
//! Arguments are converted to a boolean, integer, unsigned integer, real number or string as declared, and a conversion failure is reported as an error.
//! * *Caller owned state*:
//! There is no global parser state; everything lives in the [`Session`].
//! Flag options write straight into a caller owned [`Cell`](std::cell::Cell).
//! * *Composable tables*:
//! Libraries may contribute their own options via [`Session::extend_with_callback`], without the program knowing about them.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/opt_test.rs")]
//! ```
//!
//! ```console
//! $ opt_test -a in.txt --verb -n 2.5 --connect "Standard_Output" -- -out.txt
//! opt_test: option -a given
//! opt_test: option -n given with value '2.5'
//! verbose flag is set
//! connect option is set to 1
//! non-option ARGV-arguments: in.txt -out.txt
//!
//! $ opt_test --con stderr --bogus
//! opt_test: unknown option '--bogus'
//!
//! $ opt_test -i 12abc
//! opt_test: no or invalid argument given for '-i'
//! ```
//!
//! # Option tables
//! Each [`OptionSpec`] names a long option, a code, an [`ArgMode`] and optionally a flag target.
//! A code that is a character also makes the option available as `-c`.
//! Long-only options take codes from [`LONG_ONLY_BASE`] upward, so they can never be typed inside a short cluster.
//! The codes `?`, `-`, `+`, `*` and `=` are reserved for errors.
//!
//! | Argument mode | Attached | Separate |
//! |---|---|---|
//! | `ArgMode::None` | an error (`+`) | not taken |
//! | `ArgMode::Required(ty)` | taken | taken when the next argument is not an option |
//! | `ArgMode::Optional(ty)` | taken | taken only when it converts to `ty` |
//!
//! # Ordering
//! By default operands and options may be interleaved; operands are moved to the front of the session's arguments as they are passed over ([`OrderingMode::Permute`]).
//! A table built with [`OptionTable::require_order`], or the `POSIXLY_CORRECT` environment variable, stops option recognition at the first operand.
//! A table built with [`OptionTable::return_in_order`] reports every operand in place as a [`Step::Operand`].
//!
//! # Extension tables
//! ```no_run
#![doc = include_str!("../demos/extension.rs")]
//! ```
//!
//! # Diagnostics
//! A [`Step::Error`] carries a [`ParseError`] whose `Display` is a complete message; prefix it with [`Session::program_name`].
//! The printf-style templates of the legacy error codes are available from [`error_template`].
//!
//! # Logging
//! With the `tracing_debug` feature, the session emits `tracing` debug events for its initialization, every step, and its teardown.
pub use celopt_engine::*;

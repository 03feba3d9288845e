use std::cell::Cell;
use thiserror::Error;

use crate::constant::*;

/// The type an option-argument is converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    /// `t`, `T`, `y`, `Y` or `1` (after leading whitespace) mean `true`; anything else `false`.
    Bool,
    /// Signed integer with C-style base detection (`0x..` hex, `0..` octal, otherwise decimal).
    Int,
    /// Unsigned integer with C-style base detection.
    Uint,
    /// Floating point number.
    Real,
    /// The text itself.
    Str,
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ArgType::Bool => "boolean",
            ArgType::Int => "integer",
            ArgType::Uint => "unsigned integer",
            ArgType::Real => "real number",
            ArgType::Str => "string",
        };
        write!(f, "{name}")
    }
}

/// Whether an option takes an option-argument, and of which type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgMode {
    /// The option takes no argument; `--name=value` is an error.
    None,
    /// The option must be given an argument (`-fVAL`, `-f=VAL`, `-f VAL`, `--foo=VAL`, `--foo VAL`).
    Required(ArgType),
    /// An attached argument is taken if present.
    /// A following operand is only taken when it converts successfully.
    Optional(ArgType),
}

impl ArgMode {
    pub(crate) fn arg_type(&self) -> Option<ArgType> {
        match self {
            ArgMode::None => None,
            ArgMode::Required(arg_type) | ArgMode::Optional(arg_type) => Some(*arg_type),
        }
    }
}

/// A caller owned cell written when its option matches, bypassing the normal result code.
#[derive(Debug, Clone, Copy)]
pub struct Flag<'a> {
    cell: &'a Cell<i32>,
    value: i32,
}

impl<'a> Flag<'a> {
    pub(crate) fn set(&self) {
        self.cell.set(self.value);
    }

    pub(crate) fn reset(&self) {
        self.cell.set(0);
    }

    /// The value stored into the cell on a match.
    pub fn value(&self) -> i32 {
        self.value
    }
}

/// How operands are treated relative to options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderingMode {
    /// Options are recognized anywhere; operands are compacted to the front (GNU default).
    Permute,
    /// Option recognition stops at the first operand (POSIX).
    RequireOrder,
    /// Each operand is reported in place as [`Step::Operand`](crate::Step::Operand).
    ReturnInOrder,
}

/// One recognized option.
///
/// ### Example
/// ```
/// # use celopt_engine as celopt;
/// use celopt::{ArgType, OptionSpec, LONG_ONLY_BASE};
/// use std::cell::Cell;
///
/// let verbose = Cell::new(0);
/// let entries = vec![
///     OptionSpec::new("verbose", 0).flag(&verbose, 1),
///     OptionSpec::new("file", 'f' as u32).required(ArgType::Str),
///     OptionSpec::new("level", LONG_ONLY_BASE).optional(ArgType::Uint),
///     OptionSpec::short('x'),
/// ];
/// # let _ = entries;
/// ```
#[derive(Debug, Clone)]
pub struct OptionSpec<'a> {
    long: &'a str,
    code: u32,
    mode: ArgMode,
    flag: Option<Flag<'a>>,
}

impl<'a> OptionSpec<'a> {
    /// An option named `--long` whose code is `code`.
    /// When `code` is a character, the option is also recognized as `-c`.
    /// An empty `long` declares a short-only option.
    pub fn new(long: &'a str, code: u32) -> Self {
        Self {
            long,
            code,
            mode: ArgMode::None,
            flag: None,
        }
    }

    /// A short-only option `-c`.
    pub fn short(c: char) -> Self {
        Self::new("", c as u32)
    }

    /// Require an option-argument of type `arg_type`.
    pub fn required(mut self, arg_type: ArgType) -> Self {
        self.mode = ArgMode::Required(arg_type);
        self
    }

    /// Accept an optional option-argument of type `arg_type`.
    pub fn optional(mut self, arg_type: ArgType) -> Self {
        self.mode = ArgMode::Optional(arg_type);
        self
    }

    /// Write `value` into `cell` on a match, instead of reporting the option's code.
    pub fn flag(mut self, cell: &'a Cell<i32>, value: i32) -> Self {
        self.flag.replace(Flag { cell, value });
        self
    }

    /// The long name, empty for a short-only option.
    pub fn long_name(&self) -> &'a str {
        self.long
    }

    /// The code reported when the option matches.
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Whether, and how, the option takes an argument.
    pub fn mode(&self) -> ArgMode {
        self.mode
    }

    /// The cell written on a match, if any.
    pub fn flag_target(&self) -> Option<&Flag<'a>> {
        self.flag.as_ref()
    }

    /// Whether `-c` inside a short cluster names this option.
    pub(crate) fn matches_short(&self, c: char) -> bool {
        // Code 0 marks "no short name", so a NUL inside a cluster never matches.
        self.code != 0 && self.code == c as u32
    }

    fn directive(&self) -> Option<OrderingMode> {
        match self.long {
            REQUIRE_ORDER_DIRECTIVE => Some(OrderingMode::RequireOrder),
            RETURN_IN_ORDER_DIRECTIVE => Some(OrderingMode::ReturnInOrder),
            _ => None,
        }
    }
}

/// A malformed option table.
///
/// These are programming errors of the integrating application, not bad user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// The code is one of `?`, `-`, `+`, `*` or `=`.
    #[error("option '{long}' uses the reserved code {code:#x}.")]
    ReservedCode {
        /// The offending entry's long name.
        long: String,
        /// The reserved code.
        code: u32,
    },

    /// `--name=value` could never match this name.
    #[error("long option '{0}' contains '='.")]
    EqualsInLongName(String),

    /// Code 0 is only allowed for long options with a flag target.
    #[error("option '{0}' has code 0, which requires both a long name and a flag target.")]
    ZeroCode(String),

    /// Flag options take no argument.
    #[error("option '{0}' writes a flag target, so it cannot take an argument.")]
    FlagWithArgument(String),

    /// The first entry starts with `+` or `-` without being a directive.
    #[error("leading entry '{0}' must be exactly \"+\" or \"-\" with code 0.")]
    MalformedDirective(String),
}

/// An ordered sequence of [`OptionSpec`].
///
/// The first entry may be an ordering directive rather than an option: a long name of exactly `"+"` selects
/// [`OrderingMode::RequireOrder`], and `"-"` selects [`OrderingMode::ReturnInOrder`].
/// The directive is only honoured on the primary table of a session.
#[derive(Debug, Clone, Default)]
pub struct OptionTable<'a> {
    entries: Vec<OptionSpec<'a>>,
}

impl<'a> OptionTable<'a> {
    /// A table of `entries`, recognizing an explicitly written leading directive.
    pub fn new(entries: Vec<OptionSpec<'a>>) -> Self {
        Self { entries }
    }

    /// A table with no directive.
    pub fn permute(entries: Vec<OptionSpec<'a>>) -> Self {
        Self::new(entries)
    }

    /// A table led by the `"+"` directive.
    pub fn require_order(entries: Vec<OptionSpec<'a>>) -> Self {
        Self::directed(REQUIRE_ORDER_DIRECTIVE, entries)
    }

    /// A table led by the `"-"` directive.
    pub fn return_in_order(entries: Vec<OptionSpec<'a>>) -> Self {
        Self::directed(RETURN_IN_ORDER_DIRECTIVE, entries)
    }

    fn directed(directive: &'static str, entries: Vec<OptionSpec<'a>>) -> Self {
        let mut all = Vec::with_capacity(entries.len() + 1);
        all.push(OptionSpec::new(directive, 0));
        all.extend(entries);
        Self::new(all)
    }

    /// The ordering directive carried by the leading entry, if any.
    pub fn directive(&self) -> Option<OrderingMode> {
        self.entries.first().and_then(OptionSpec::directive)
    }

    /// The options of this table, excluding a leading directive.
    pub fn options(&self) -> &[OptionSpec<'a>] {
        match self.directive() {
            Some(_) => &self.entries[1..],
            None => &self.entries,
        }
    }

    /// Check every entry against the table invariants.
    pub fn validate(&self) -> Result<(), TableError> {
        if let Some(first) = self.entries.first() {
            let leading = first.long.starts_with('+') || first.long.starts_with('-');

            if leading && (first.directive().is_none() || first.code != 0) {
                return Err(TableError::MalformedDirective(first.long.to_string()));
            }
        }

        for spec in self.options() {
            if RESERVED_CODES.contains(&spec.code) {
                return Err(TableError::ReservedCode {
                    long: spec.long.to_string(),
                    code: spec.code,
                });
            }

            if spec.long.contains('=') {
                return Err(TableError::EqualsInLongName(spec.long.to_string()));
            }

            if spec.code == 0 && (spec.long.is_empty() || spec.flag.is_none()) {
                return Err(TableError::ZeroCode(spec.long.to_string()));
            }

            if spec.flag.is_some() && spec.mode != ArgMode::None {
                return Err(TableError::FlagWithArgument(spec.long.to_string()));
            }
        }

        Ok(())
    }

    /// Contract check run when the table is introduced to a session.
    pub(crate) fn assert_valid(&self) {
        if cfg!(debug_assertions) {
            if let Err(error) = self.validate() {
                panic!("malformed option table: {error}");
            }
        }
    }

    pub(crate) fn reset_flags(&self) {
        for spec in self.options() {
            if let Some(flag) = &spec.flag {
                flag.reset();
            }
        }
    }
}

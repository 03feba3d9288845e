use std::collections::TryReserveError;
use thiserror::Error;

use crate::classify::{classify, ArgKind};
use crate::convert::{convert, Value};
use crate::diagnostics::{long_option_text, short_option_text, AmbiguousMatches};
use crate::model::{ArgMode, ArgType, OptionTable, OrderingMode};
use crate::parser::builder::SessionBuilder;
use crate::parser::step::{ParseError, Step};
use crate::registry::{Callback, Found, LongMatch, TableChain};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A session could not be started or extended.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InitError {
    /// Storage for the argument copy or a table chain node could not be reserved.
    #[error("cannot reserve storage for the {what}: {source}")]
    Allocation {
        /// What the storage was for.
        what: &'static str,
        /// The underlying reservation failure.
        source: TryReserveError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Scanning,
    Exhausted,
    Released,
}

/// One option parsing session over a private copy of the argument vector.
///
/// Each [`Session::parse`] call does one unit of work (one short option of a cluster, one long option, or a run of operands) and reports it as a [`Step`].
/// Under [`OrderingMode::Permute`] and [`OrderingMode::RequireOrder`], operands are moved to the front of the session's arguments as they are passed over.
/// Once [`Step::Done`] is reported, [`Session::operands`] holds all of them in their original relative order.
///
/// ### Example
/// ```
/// # use celopt_engine as celopt;
/// use celopt::{ArgType, OptionSpec, OptionTable, Session, Step, Value};
/// use std::cell::Cell;
///
/// let verbose = Cell::new(0);
/// let table = OptionTable::new(vec![
///     OptionSpec::new("verbose", 0).flag(&verbose, 1),
///     OptionSpec::new("file", 'f' as u32).required(ArgType::Str),
/// ]);
/// let mut session = Session::builder(&table)
///     .posixly_correct(false)
///     .separator('/')
///     .init(&["/bin/prog", "in.txt", "--verbose", "-f", "out.txt"])
///     .unwrap();
///
/// assert_eq!(session.program_name(), "prog");
/// assert_eq!(session.parse(), Step::Handled);
/// assert_eq!(
///     session.parse(),
///     Step::Matched { code: 'f' as u32, arg: Some(Value::Str("out.txt".to_string())) }
/// );
/// assert_eq!(session.parse(), Step::Done);
/// assert_eq!(verbose.get(), 1);
/// assert_eq!(session.operands(), &["in.txt"]);
/// ```
pub struct Session<'a> {
    chain: TableChain<'a>,
    args: Vec<String>,
    program_name: String,
    // Index of the next argument to examine.
    next: usize,
    // Index at which the next passed-over operand is compacted.
    written: usize,
    // Byte offset of the next short option inside args[next], while a cluster is part way through.
    pending: Option<usize>,
    ordering: OrderingMode,
    operands_only: bool,
    ambiguous: AmbiguousMatches,
    phase: Phase,
}

impl<'a> std::fmt::Debug for Session<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("program_name", &self.program_name)
            .field("ordering", &self.ordering)
            .field("phase", &self.phase)
            .field("next", &self.next)
            .field("written", &self.written)
            .finish()
    }
}

impl<'a> Session<'a> {
    /// Configure a session whose primary option table is `table`.
    pub fn builder(table: &'a OptionTable<'a>) -> SessionBuilder<'a> {
        SessionBuilder::new(table)
    }

    /// Start a session with `table` as its primary table.
    ///
    /// The program name is the text of `args[0]` after its last `separator`, or `fallback_name` when `args[0]` is empty or missing.
    /// The `POSIXLY_CORRECT` environment variable forces [`OrderingMode::RequireOrder`].
    pub fn init<S: AsRef<str>>(
        table: &'a OptionTable<'a>,
        args: &[S],
        fallback_name: &str,
        separator: char,
    ) -> Result<Self, InitError> {
        Self::builder(table)
            .fallback_name(fallback_name)
            .separator(separator)
            .init(args)
    }

    pub(crate) fn start<S: AsRef<str>>(
        table: &'a OptionTable<'a>,
        args: &[S],
        program_name: String,
        ordering: OrderingMode,
    ) -> Result<Self, InitError> {
        table.assert_valid();

        let mut copy = Vec::default();
        copy.try_reserve_exact(args.len())
            .map_err(|source| InitError::Allocation {
                what: "argument vector",
                source,
            })?;
        copy.extend(args.iter().map(|arg| arg.as_ref().to_string()));
        table.reset_flags();

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Starting session for '{program_name}' over {} arguments in {ordering:?} order.",
                copy.len()
            );
        }

        Ok(Self {
            chain: TableChain::register(table),
            args: copy,
            program_name,
            next: 1,
            written: 1,
            pending: None,
            ordering,
            operands_only: false,
            ambiguous: AmbiguousMatches::default(),
            phase: Phase::Scanning,
        })
    }

    /// Append an extension table to the chain, behind every table registered so far.
    ///
    /// Returns the program name.
    pub fn extend(&mut self, table: &'a OptionTable<'a>) -> Result<&str, InitError> {
        self.push_table(table, None)
    }

    /// Append an extension table whose matches are delivered to `callback` instead of being reported.
    ///
    /// After the callback runs, the parse step reports [`Step::Handled`].
    /// Returns the program name.
    pub fn extend_with_callback<F>(
        &mut self,
        table: &'a OptionTable<'a>,
        callback: F,
    ) -> Result<&str, InitError>
    where
        F: FnMut(u32, Option<&Value>) + 'a,
    {
        self.push_table(table, Some(Box::new(callback)))
    }

    fn push_table(
        &mut self,
        table: &'a OptionTable<'a>,
        callback: Option<Callback<'a>>,
    ) -> Result<&str, InitError> {
        self.assert_active("extend");
        table.assert_valid();
        self.chain
            .extend(table, callback)
            .map_err(|source| InitError::Allocation {
                what: "option table chain",
                source,
            })?;
        table.reset_flags();

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Extended the option tables to {}.", self.chain.len());
        }

        Ok(&self.program_name)
    }

    /// The program name derived at initialization.
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// How operands are treated in this session.
    pub fn ordering(&self) -> OrderingMode {
        self.ordering
    }

    /// The table the session was started with.
    pub fn primary_table(&self) -> &'a OptionTable<'a> {
        self.chain.primary()
    }

    /// The number of registered tables, the primary one included.
    pub fn table_count(&self) -> usize {
        self.chain.len()
    }

    /// The operands passed over so far, compacted in their original order.
    /// After [`Step::Done`] this is every operand.
    pub fn operands(&self) -> &[String] {
        self.args.get(1..self.written).unwrap_or(&[])
    }

    /// The program name argument followed by [`Session::operands`].
    pub fn arguments(&self) -> &[String] {
        let end = self.written.min(self.args.len());
        &self.args[..end]
    }

    /// Consume the session, keeping its operands.
    pub fn into_operands(self) -> Vec<String> {
        let mut args = self.args;
        args.truncate(self.written);

        if !args.is_empty() {
            args.remove(0);
        }

        args
    }

    /// The candidates of the latest ambiguous long option.
    pub fn ambiguous_matches(&self) -> &AmbiguousMatches {
        &self.ambiguous
    }

    /// [`Session::ambiguous_matches`] rendered for a diagnostic.
    pub fn ambiguous_matches_text(&self) -> String {
        self.ambiguous.render()
    }

    /// Parse the next unit of work.
    ///
    /// # Panics
    /// If the session has been released by [`Session::free`].
    pub fn parse(&mut self) -> Step {
        self.assert_active("parse");
        self.ambiguous.clear();

        let step = match self.phase {
            Phase::Exhausted => Step::Done,
            _ => self.scan(),
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsed up to argument {}: {step:?}.", self.next);
        }

        step
    }

    /// Stop recognizing options; every remaining argument (including a part way through short cluster) becomes an operand.
    ///
    /// # Panics
    /// If the session has been released by [`Session::free`].
    pub fn abort(&mut self) {
        self.assert_active("abort");

        if self.phase == Phase::Exhausted {
            return;
        }

        while self.next < self.args.len() {
            self.compact_operand();
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Aborted with {} operands.", self.written.saturating_sub(1));
        }

        self.finish();
    }

    /// Release the argument copy and the extension tables.
    /// Calling this more than once is harmless.
    pub fn free(&mut self) {
        if self.phase == Phase::Released {
            return;
        }

        self.args = Vec::default();
        self.written = 1;
        self.next = 1;
        self.pending = None;
        self.ambiguous.clear();
        self.chain.release_extensions();
        self.phase = Phase::Released;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Released session for '{}'.", self.program_name);
        }
    }

    fn assert_active(&self, operation: &str) {
        assert!(
            self.phase != Phase::Released,
            "{operation} called on a session that has been freed"
        );
    }

    fn scan(&mut self) -> Step {
        if let Some(offset) = self.pending.take() {
            return self.short_option(offset);
        }

        loop {
            let token = self.args.get(self.next).map(String::as_str);

            match classify(token, self.operands_only) {
                ArgKind::End => return self.finish(),
                ArgKind::Terminator => {
                    self.operands_only = true;
                    self.next += 1;
                }
                ArgKind::Operand => match self.ordering {
                    OrderingMode::ReturnInOrder => {
                        let operand = std::mem::take(&mut self.args[self.next]);
                        self.next += 1;
                        return Step::Operand(operand);
                    }
                    OrderingMode::RequireOrder => {
                        self.operands_only = true;
                        self.compact_operand();
                    }
                    OrderingMode::Permute => self.compact_operand(),
                },
                ArgKind::ShortCluster => return self.short_option(1),
                ArgKind::LongOption => return self.long_option(),
            }
        }
    }

    fn compact_operand(&mut self) {
        // Everything between `written` and `next` is already consumed, so the swap preserves operand order.
        self.args.swap(self.written, self.next);
        self.written += 1;
        self.next += 1;
    }

    fn finish(&mut self) -> Step {
        self.args.truncate(self.written);
        self.pending = None;
        self.phase = Phase::Exhausted;
        Step::Done
    }

    fn short_option(&mut self, offset: usize) -> Step {
        let token = self.args[self.next].clone();
        let c = match token[offset..].chars().next() {
            Some(c) => c,
            None => unreachable!("internal error - a short cluster always resumes on a character"),
        };
        let after = offset + c.len_utf8();
        let rest = &token[after..];

        let found = match self.chain.find_short(c) {
            Some(found) => found,
            None => {
                self.advance_cluster(after, rest);
                return Step::Error(ParseError::UnknownOption(short_option_text(c as u32)));
            }
        };
        let option = short_option_text(found.spec.code());

        match found.spec.mode() {
            ArgMode::None => {
                if rest.starts_with('=') {
                    self.next += 1;
                    return Step::Error(ParseError::UnexpectedArgument(option));
                }

                self.advance_cluster(after, rest);
                self.report(found, None)
            }
            ArgMode::Required(arg_type) | ArgMode::Optional(arg_type) => {
                let optional = matches!(found.spec.mode(), ArgMode::Optional(_));

                if rest.is_empty() {
                    self.next += 1;
                    return self.following_argument(found, arg_type, optional, option);
                }

                // -fVALUE or -f=VALUE
                let explicit = rest.strip_prefix('=');

                match convert(explicit.unwrap_or(rest), arg_type) {
                    Ok(value) => {
                        self.next += 1;
                        self.report(found, Some(value))
                    }
                    Err(_) if optional && explicit.is_none() => {
                        // Not an argument after all; the rest of the cluster holds more options.
                        self.pending = Some(after);
                        self.report(found, None)
                    }
                    Err(cause) => {
                        self.next += 1;
                        Step::Error(ParseError::MissingArgument {
                            option,
                            cause: Some(cause),
                        })
                    }
                }
            }
        }
    }

    fn advance_cluster(&mut self, after: usize, rest: &str) {
        if rest.is_empty() {
            self.next += 1;
        } else {
            self.pending = Some(after);
        }
    }

    fn long_option(&mut self) -> Step {
        let token = self.args[self.next].clone();
        self.next += 1;

        let body = &token[2..];
        let (name, explicit) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let found = match self.chain.find_long(name, &mut self.ambiguous) {
            LongMatch::Unique(found) => found,
            LongMatch::Ambiguous => {
                return Step::Error(ParseError::Ambiguous {
                    option: long_option_text(body),
                    candidates: self.ambiguous.render(),
                });
            }
            LongMatch::Unknown => {
                return Step::Error(ParseError::UnknownOption(long_option_text(body)));
            }
        };
        let option = long_option_text(found.spec.long_name());

        let mode = found.spec.mode();
        let optional = matches!(mode, ArgMode::Optional(_));

        match (mode.arg_type(), explicit) {
            (None, Some(_)) => Step::Error(ParseError::UnexpectedArgument(option)),
            (None, None) => self.report(found, None),
            (Some(arg_type), Some(text)) => match convert(text, arg_type) {
                Ok(value) => self.report(found, Some(value)),
                Err(cause) => Step::Error(ParseError::MissingArgument {
                    option,
                    cause: Some(cause),
                }),
            },
            (Some(arg_type), None) => self.following_argument(found, arg_type, optional, option),
        }
    }

    /// Take the option-argument from the next token, if it is an operand.
    /// An optional argument is only taken when it converts; otherwise the token is left for the next step.
    fn following_argument(
        &mut self,
        found: Found<'a>,
        arg_type: ArgType,
        optional: bool,
        option: String,
    ) -> Step {
        let token = self.args.get(self.next).map(String::as_str);

        let attempt = match (classify(token, self.operands_only), token) {
            (ArgKind::Operand, Some(text)) => Some(convert(text, arg_type)),
            _ => None,
        };

        match attempt {
            Some(Ok(value)) => {
                self.next += 1;
                self.report(found, Some(value))
            }
            Some(Err(_)) | None if optional => self.report(found, None),
            Some(Err(cause)) => {
                // The rejected argument is consumed along with its option.
                self.next += 1;
                Step::Error(ParseError::MissingArgument {
                    option,
                    cause: Some(cause),
                })
            }
            None => Step::Error(ParseError::MissingArgument {
                option,
                cause: None,
            }),
        }
    }

    fn report(&mut self, found: Found<'a>, arg: Option<Value>) -> Step {
        if let Some(flag) = found.spec.flag_target() {
            flag.set();
            return Step::Handled;
        }

        let code = found.spec.code();

        if let Some(callback) = self.chain.callback(found.node) {
            callback(code, arg.as_ref());
            return Step::Handled;
        }

        Step::Matched { code, arg }
    }
}

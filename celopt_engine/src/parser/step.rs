use thiserror::Error;

use crate::convert::{ConversionError, Value};
use crate::diagnostics::error_template;

/// A user-input error reported by [`Session::parse`](crate::Session::parse).
///
/// Each variant carries the offending option already rendered for a diagnostic (ex: `-x`, `--verbose`).
/// The `Display` output is the canonical message; prefix it with the program name when reporting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// `?`: no table names the option.
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// `-`: a required argument is absent, or an argument does not convert.
    #[error("no or invalid argument given for '{option}'")]
    MissingArgument {
        /// The offending option, as rendered for diagnostics.
        option: String,
        /// Why the argument was rejected, when one was present but could not be converted.
        cause: Option<ConversionError>,
    },

    /// `+`: `=value` was given to an option without an argument.
    #[error("option '{0}' takes no argument")]
    UnexpectedArgument(String),

    /// `*`: the long option prefix matches more than one long name.
    #[error("ambiguous option '{option}' ({candidates})")]
    Ambiguous {
        /// The offending option, as rendered for diagnostics.
        option: String,
        /// The rendered candidate list.
        candidates: String,
    },
}

impl ParseError {
    /// The one character code of this error: `?`, `-`, `+` or `*`.
    pub fn code(&self) -> char {
        match self {
            ParseError::UnknownOption(_) => '?',
            ParseError::MissingArgument { .. } => '-',
            ParseError::UnexpectedArgument(_) => '+',
            ParseError::Ambiguous { .. } => '*',
        }
    }

    /// The offending option, as rendered for diagnostics.
    pub fn option(&self) -> &str {
        match self {
            ParseError::UnknownOption(option)
            | ParseError::MissingArgument { option, .. }
            | ParseError::UnexpectedArgument(option)
            | ParseError::Ambiguous { option, .. } => option,
        }
    }

    /// The printf-style template behind this error's message.
    pub fn template(&self) -> &'static str {
        error_template(self.code())
    }
}

/// The outcome of one [`Session::parse`](crate::Session::parse) call.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// An option without a flag target matched; `arg` holds its converted option-argument, if any.
    Matched {
        /// The matched option's code.
        code: u32,
        /// The converted option-argument.
        arg: Option<Value>,
    },
    /// A match was fully dealt with (a flag target was written, or an extension callback ran).
    Handled,
    /// An operand, reported in place (only under [`OrderingMode::ReturnInOrder`](crate::OrderingMode::ReturnInOrder)).
    Operand(String),
    /// No options remain; the operands are now compacted at the front of the session's arguments.
    Done,
    /// The user supplied something the option tables do not allow.
    Error(ParseError),
}

impl Step {
    /// The legacy integer encoding: the option code, `0`, `1`, `-1`, or the error character.
    pub fn code(&self) -> i64 {
        match self {
            Step::Matched { code, .. } => i64::from(*code),
            Step::Handled => 0,
            Step::Operand(_) => 1,
            Step::Done => -1,
            Step::Error(error) => i64::from(u32::from(error.code())),
        }
    }

    /// Whether this is [`Step::Done`].
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done)
    }
}

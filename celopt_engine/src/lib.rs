//! Engine module for `celopt`.
//! See [documentation root](https://docs.rs/celopt/latest/celopt/index.html) for full details.
#![deny(missing_docs)]
mod classify;
mod compare;
mod constant;
mod convert;
mod diagnostics;
mod model;
mod parser;
mod registry;

pub use classify::{classify, ArgKind};
pub use compare::{find_value, value_of, Compare};
pub use constant::{AMBIGUOUS_CAPACITY, LONG_ONLY_BASE, POSIXLY_CORRECT};
pub use convert::{convert, ConversionError, Value};
pub use diagnostics::{error_template, long_option_text, short_option_text, AmbiguousMatches};
pub use model::*;
pub use parser::{InitError, ParseError, Session, SessionBuilder, Step};
pub use registry::Callback;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

use std::env;

use crate::constant::*;
use crate::model::{OptionTable, OrderingMode};
use crate::parser::session::{InitError, Session};

/// Configures how a [`Session`] starts.
///
/// ### Example
/// ```
/// # use celopt_engine as celopt;
/// use celopt::{OptionSpec, OptionTable, OrderingMode, Session};
///
/// let table = OptionTable::new(vec![OptionSpec::short('a')]);
/// let session = Session::builder(&table)
///     .fallback_name("tool")
///     .separator('/')
///     .posixly_correct(true)
///     .init(&[""])
///     .unwrap();
///
/// assert_eq!(session.program_name(), "tool");
/// assert_eq!(session.ordering(), OrderingMode::RequireOrder);
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder<'a> {
    table: &'a OptionTable<'a>,
    fallback_name: String,
    separator: char,
    posixly_correct: bool,
}

impl<'a> SessionBuilder<'a> {
    pub(crate) fn new(table: &'a OptionTable<'a>) -> Self {
        Self {
            table,
            fallback_name: DEFAULT_PROGRAM_NAME.to_string(),
            separator: std::path::MAIN_SEPARATOR,
            posixly_correct: env::var_os(POSIXLY_CORRECT).is_some(),
        }
    }

    /// The program name used when the zeroth argument is empty or absent.
    pub fn fallback_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_name = name.into();
        self
    }

    /// The path separator after which the zeroth argument names the program.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Force [`OrderingMode::RequireOrder`], whatever the table's directive says.
    /// Defaults to whether the `POSIXLY_CORRECT` environment variable is set.
    pub fn posixly_correct(mut self, posixly_correct: bool) -> Self {
        self.posixly_correct = posixly_correct;
        self
    }

    /// Start the session over `args`, where `args[0]` is the program path.
    ///
    /// # Panics
    /// If the separator is NUL, or (in debug builds) if the table is malformed.
    pub fn init<S: AsRef<str>>(self, args: &[S]) -> Result<Session<'a>, InitError> {
        assert!(self.separator != '\0', "the path separator cannot be NUL");

        let program_name = self.program_name(args.first().map(AsRef::as_ref));
        let ordering = if self.posixly_correct {
            OrderingMode::RequireOrder
        } else {
            self.table.directive().unwrap_or(OrderingMode::Permute)
        };

        Session::start(self.table, args, program_name, ordering)
    }

    fn program_name(&self, path: Option<&str>) -> String {
        let name = match path {
            Some(path) => match path.rsplit_once(self.separator) {
                Some((_, name)) => name,
                None => path,
            },
            None => "",
        };

        if name.is_empty() {
            self.fallback_name.clone()
        } else {
            name.to_string()
        }
    }
}

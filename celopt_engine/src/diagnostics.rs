use crate::constant::*;

/// Render a short option for a diagnostic: `-c`, or `-<XX>` when the code is not printable.
pub fn short_option_text(code: u32) -> String {
    match char::from_u32(code) {
        Some(c) if is_printable(c) => format!("-{c}"),
        _ => format!("-<{code:02X}>"),
    }
}

/// Render a long option for a diagnostic: `--name`.
///
/// Anything from the first `=` on is dropped.
/// Names wider than the display width are cut short and end in `...`.
pub fn long_option_text(name: &str) -> String {
    let name = match name.split_once('=') {
        Some((name, _)) => name,
        None => name,
    };

    match name.char_indices().nth(LONG_OPTION_DISPLAY_WIDTH) {
        Some((cut, _)) => format!("--{}{ELLIPSIS}", &name[..cut]),
        None => format!("--{name}"),
    }
}

fn is_printable(c: char) -> bool {
    c == ' ' || (!c.is_control() && !c.is_whitespace())
}

/// The long names that an ambiguous prefix matched, in table order.
///
/// Holds at most [`AMBIGUOUS_CAPACITY`] names; any further candidates only mark the list as truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbiguousMatches {
    names: Vec<String>,
    truncated: bool,
}

impl AmbiguousMatches {
    pub(crate) fn clear(&mut self) {
        self.names.clear();
        self.truncated = false;
    }

    pub(crate) fn push(&mut self, name: &str) {
        if self.names.len() < AMBIGUOUS_CAPACITY {
            self.names.push(name.to_string());
        } else {
            self.truncated = true;
        }
    }

    /// The remembered candidates.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether more candidates matched than could be remembered.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Whether no candidates were recorded.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Comma joined names, bounded in width, ending in `...` when anything was left out.
    pub fn render(&self) -> String {
        let mut out = String::default();
        let mut complete = true;

        for (i, name) in self.names.iter().enumerate() {
            let more_follow = i + 1 < self.names.len() || self.truncated;
            let reserve = if more_follow {
                ", ".len() + ELLIPSIS.len()
            } else {
                0
            };

            if out.len() + name.len() + reserve < AMBIGUOUS_DISPLAY_WIDTH {
                out.push_str(name);

                if more_follow {
                    out.push_str(", ");
                }
            } else {
                complete = false;
                break;
            }
        }

        if !complete || self.truncated {
            out.push_str(ELLIPSIS);
        }

        out
    }
}

/// The printf-style diagnostic template for an error code (`?`, `-`, `+` or `*`).
///
/// Each `%s` takes the offending option text; the `*` template takes the candidate list second.
pub fn error_template(code: char) -> &'static str {
    match code {
        '?' => "unknown option '%s'",
        '-' => "no or invalid argument given for '%s'",
        '+' => "option '%s' takes no argument",
        '*' => "ambiguous option '%s' (%s)",
        _ => "not all options covered",
    }
}

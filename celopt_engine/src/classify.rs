/// The category of one raw argument token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// No token (past the end of the argument vector).
    End,
    /// Exactly `--`; everything after it is an operand.
    Terminator,
    /// `-x...`: one or more short options, possibly followed by an attached argument.
    ShortCluster,
    /// `--name` or `--name=value`.
    LongOption,
    /// Anything else, including a lone `-`.
    Operand,
}

/// Categorize `token`.
///
/// When `operands_only` is set (after `--`, or after the first operand in POSIX order), every token is an operand.
/// This is pure: latching `operands_only` on a [`ArgKind::Terminator`] is left to the caller.
pub fn classify(token: Option<&str>, operands_only: bool) -> ArgKind {
    let token = match token {
        Some(token) => token,
        None => return ArgKind::End,
    };

    if operands_only {
        return ArgKind::Operand;
    }

    match token.strip_prefix('-') {
        Some("-") => ArgKind::Terminator,
        Some(rest) if rest.starts_with('-') => ArgKind::LongOption,
        Some("") => ArgKind::Operand,
        Some(_) => ArgKind::ShortCluster,
        None => ArgKind::Operand,
    }
}

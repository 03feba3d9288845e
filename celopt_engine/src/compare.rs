/// How [`find_value`] compares an input against the candidate strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compare {
    case_insensitive: bool,
    normalize_separators: bool,
}

impl Compare {
    /// Exact, byte-for-byte comparison.
    pub fn exact() -> Self {
        Self::default()
    }

    /// Ignore ASCII case.
    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// Treat `_`, space and `-` as the same separator, so `unsigned-int` and `unsigned_int` match `"unsigned int"`.
    pub fn normalize_separators(mut self) -> Self {
        self.normalize_separators = true;
        self
    }

    fn normalize(&self, c: char) -> char {
        let c = if self.normalize_separators && (c == ' ' || c == '_') {
            '-'
        } else {
            c
        };

        if self.case_insensitive {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }

    /// Whether `left` and `right` compare equal under these settings.
    pub fn equals(&self, left: &str, right: &str) -> bool {
        left.chars()
            .map(|c| self.normalize(c))
            .eq(right.chars().map(|c| self.normalize(c)))
    }
}

/// The value paired with the first string in `pairs` that equals `input`.
///
/// ### Example
/// ```
/// # use celopt_engine as celopt;
/// use celopt::{find_value, Compare};
///
/// let streams = [("standard input", 0), ("standard output", 1), ("stdout", 1)];
/// let compare = Compare::exact().case_insensitive().normalize_separators();
///
/// assert_eq!(find_value(&streams, "Standard_Output", compare), Some(1));
/// assert_eq!(find_value(&streams, "stderr", compare), None);
/// ```
pub fn find_value<T: Copy>(pairs: &[(&str, T)], input: &str, compare: Compare) -> Option<T> {
    pairs
        .iter()
        .find(|(candidate, _)| compare.equals(candidate, input))
        .map(|(_, value)| *value)
}

/// Like [`find_value`], answering `no_match` when nothing compares equal.
pub fn value_of<T: Copy>(pairs: &[(&str, T)], input: &str, compare: Compare, no_match: T) -> T {
    find_value(pairs, input, compare).unwrap_or(no_match)
}

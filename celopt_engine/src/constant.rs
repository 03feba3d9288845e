/// Codes a table entry may never use as its short name; they double as the error codes of a parse step.
pub(crate) const RESERVED_CODES: [u32; 5] = ['?' as u32, '-' as u32, '+' as u32, '*' as u32, '=' as u32];

/// First code beyond the range of `char`.
///
/// Long-only options should take their codes from here upward, so they can never be typed inside a short cluster.
pub const LONG_ONLY_BASE: u32 = char::MAX as u32 + 1;

/// Long name of the leading directive entry that selects [`OrderingMode::RequireOrder`](crate::OrderingMode::RequireOrder).
pub(crate) const REQUIRE_ORDER_DIRECTIVE: &str = "+";

/// Long name of the leading directive entry that selects [`OrderingMode::ReturnInOrder`](crate::OrderingMode::ReturnInOrder).
pub(crate) const RETURN_IN_ORDER_DIRECTIVE: &str = "-";

/// Environment variable that forces [`OrderingMode::RequireOrder`](crate::OrderingMode::RequireOrder).
pub const POSIXLY_CORRECT: &str = "POSIXLY_CORRECT";

/// Program name used when neither the argument vector nor the caller provide one.
pub(crate) const DEFAULT_PROGRAM_NAME: &str = "program";

/// Maximum number of long name characters shown in a diagnostic before eliding with `...`.
pub(crate) const LONG_OPTION_DISPLAY_WIDTH: usize = 40;

/// Number of candidates remembered for an ambiguous long option prefix.
pub const AMBIGUOUS_CAPACITY: usize = 8;

/// Byte budget of the rendered ambiguous candidate list.
pub(crate) const AMBIGUOUS_DISPLAY_WIDTH: usize = 64;

pub(crate) const ELLIPSIS: &str = "...";

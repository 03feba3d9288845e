use thiserror::Error;

use crate::model::ArgType;

/// A converted option-argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// From [`ArgType::Bool`].
    Bool(bool),
    /// From [`ArgType::Int`].
    Int(i64),
    /// From [`ArgType::Uint`].
    Uint(u64),
    /// From [`ArgType::Real`].
    Real(f64),
    /// From [`ArgType::Str`].
    Str(String),
}

impl Value {
    /// The boolean, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The signed integer, if this is a [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The unsigned integer, if this is a [`Value::Uint`].
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Uint(value) => Some(*value),
            _ => None,
        }
    }

    /// The real number, if this is a [`Value::Real`].
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(value) => Some(*value),
            _ => None,
        }
    }

    /// The text, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Uint(value) => write!(f, "{value}"),
            Value::Real(value) => write!(f, "{value}"),
            Value::Str(value) => write!(f, "{value}"),
        }
    }
}

/// Why an option-argument could not be converted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// The text is not a well formed value of the type.
    #[error("cannot convert '{text}' to {arg_type}.")]
    Invalid {
        /// The rejected text.
        text: String,
        /// The requested type.
        arg_type: ArgType,
    },

    /// The text is well formed, but the value does not fit the type.
    #[error("'{text}' is out of range for {arg_type}.")]
    OutOfRange {
        /// The rejected text.
        text: String,
        /// The requested type.
        arg_type: ArgType,
    },
}

/// Convert `text` into a [`Value`] of `arg_type`.
///
/// Numeric conversions must consume the entire text (leading whitespace aside).
/// `"12abc"` is rejected rather than truncated to `12`.
pub fn convert(text: &str, arg_type: ArgType) -> Result<Value, ConversionError> {
    let invalid = || ConversionError::Invalid {
        text: text.to_string(),
        arg_type,
    };
    let out_of_range = || ConversionError::OutOfRange {
        text: text.to_string(),
        arg_type,
    };

    match arg_type {
        ArgType::Bool => {
            let first = text.trim_start_matches(is_space).chars().next();
            Ok(Value::Bool(matches!(
                first,
                Some('t' | 'T' | 'y' | 'Y' | '1')
            )))
        }
        ArgType::Int => {
            let (negative, unsigned) = split_sign(text.trim_start_matches(is_space));
            let magnitude = match parse_magnitude(unsigned) {
                Ok(magnitude) => magnitude,
                Err(IntegerError::Invalid) => return Err(invalid()),
                Err(IntegerError::Overflow) => return Err(out_of_range()),
            };

            let value = if negative {
                0i64.checked_sub_unsigned(magnitude)
            } else {
                i64::try_from(magnitude).ok()
            };
            value.map(Value::Int).ok_or_else(out_of_range)
        }
        ArgType::Uint => {
            let (negative, unsigned) = split_sign(text.trim_start_matches(is_space));

            if negative {
                return Err(invalid());
            }

            match parse_magnitude(unsigned) {
                Ok(magnitude) => Ok(Value::Uint(magnitude)),
                Err(IntegerError::Invalid) => Err(invalid()),
                Err(IntegerError::Overflow) => Err(out_of_range()),
            }
        }
        ArgType::Real => {
            let trimmed = text.trim_start_matches(is_space);
            let value: f64 = trimmed.parse().map_err(|_| invalid())?;
            let (_, unsigned) = split_sign(trimmed);

            // Overflow to infinity, or a non-zero mantissa underflowing to zero.
            let overflow = value.is_infinite() && !unsigned.starts_with(['i', 'I']);
            let underflow = value == 0.0 && has_nonzero_mantissa(unsigned);

            if overflow || underflow {
                Err(out_of_range())
            } else {
                Ok(Value::Real(value))
            }
        }
        ArgType::Str => Ok(Value::Str(text.to_string())),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum IntegerError {
    Invalid,
    Overflow,
}

// The C locale's isspace(), which (unlike char::is_ascii_whitespace) includes vertical tab.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

fn parse_magnitude(text: &str) -> Result<u64, IntegerError> {
    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_hexdigit()));

    let (radix, digits) = match hex {
        Some(rest) => (16, rest),
        None if text.len() > 1 && text.starts_with('0') => (8, &text[1..]),
        None => (10, text),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(IntegerError::Invalid);
    }

    // The digits are validated, so the only remaining failure is overflow.
    u64::from_str_radix(digits, radix).map_err(|_| IntegerError::Overflow)
}

fn has_nonzero_mantissa(text: &str) -> bool {
    text.chars()
        .take_while(|c| !matches!(c, 'e' | 'E'))
        .any(|c| matches!(c, '1'..='9'))
}

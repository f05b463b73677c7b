//! Error types for codec and tree operations.

use std::fmt;

/// Error type for codec and tree operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    // Decode errors
    /// Fewer bytes remain than the current wire element demands.
    Truncated { needed: usize, remaining: usize },
    /// A header byte that belongs to no MessagePack family (`0xC1`).
    UnknownHeader(u8),
    /// Container nesting exceeded the decoder's depth cap.
    DepthLimitExceeded,

    // Tree errors
    /// Expected one node kind but found another.
    UnexpectedKind {
        expected: &'static str,
        found: &'static str,
    },

    // JSON bridge errors
    /// Failed to parse JSON input.
    JsonParse(String),
    /// Failed to serialize to JSON.
    JsonSerialize(String),
    /// f64 is NaN or Infinity (not representable in JSON).
    NonFiniteFloat(f64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Truncated { needed, remaining } => {
                write!(f, "truncated input: need {needed} bytes, {remaining} remain")
            }
            Error::UnknownHeader(b) => write!(f, "unknown header byte {b:#04x}"),
            Error::DepthLimitExceeded => write!(f, "container nesting too deep"),
            Error::UnexpectedKind { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Error::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            Error::JsonSerialize(msg) => write!(f, "JSON serialize error: {msg}"),
            Error::NonFiniteFloat(n) => write!(f, "cannot render non-finite float {n} as JSON"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias for codec and tree operations.
pub type Result<T> = std::result::Result<T, Error>;

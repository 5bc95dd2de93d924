//! Validator errors

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// Numeric timestamp that is neither 10 (seconds) nor 13 (milliseconds) digits long
    InvalidTimestamp { input: String },
}

impl TimestampError {
    pub(crate) fn invalid(input: impl fmt::Display) -> Self {
        TimestampError::InvalidTimestamp {
            input: input.to_string(),
        }
    }
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::InvalidTimestamp { input } => {
                write!(f, "Invalid timestamp: {}", input)
            }
        }
    }
}

impl std::error::Error for TimestampError {}

//! Reference data errors

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// The backing store could not be queried
    Fetch(String),
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceError::Fetch(msg) => write!(f, "Failed to fetch reference data: {}", msg),
        }
    }
}

impl std::error::Error for ReferenceError {}

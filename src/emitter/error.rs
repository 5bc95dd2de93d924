//! Emitter errors

use std::fmt;

#[derive(Debug)]
pub enum EmitError {
    /// A statement with nothing to select
    EmptySelect,
    /// A join without any ON condition
    EmptyJoinCondition,
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::EmptySelect => write!(f, "Statement has an empty select list"),
            EmitError::EmptyJoinCondition => write!(f, "Join has no ON condition"),
        }
    }
}

impl std::error::Error for EmitError {}

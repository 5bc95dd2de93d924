//! Rejection reasons returned to the HTTP layer

use std::fmt;

use crate::emitter::EmitError;
use crate::validate::TimestampError;

/// How the HTTP layer should classify a rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// Malformed or incompatible parameters (400)
    BadRequest,
    /// Well-formed reference to something that does not exist (404)
    NotFound,
    /// The compiler produced an invalid statement (500)
    Internal,
}

#[derive(Debug)]
pub enum Rejection {
    InvalidCollectionName(String),
    CollectionNotFound(String),
    InvalidSymbolCode(String),
    SymbolCodeNotFound(String),
    InvalidChain(String),
    ChainNotFound(String),
    InvalidTimeRange(String),
    InvalidAggregateFunction(String),
    InvalidAggregateColumn(String),
    /// A non-count function on an identifier column
    IllegalAggregate {
        function: String,
        column: String,
    },
    InvalidTimestamp(TimestampError),
    Internal(EmitError),
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::CollectionNotFound(_)
            | Rejection::SymbolCodeNotFound(_)
            | Rejection::ChainNotFound(_) => RejectionKind::NotFound,
            Rejection::Internal(_) => RejectionKind::Internal,
            _ => RejectionKind::BadRequest,
        }
    }

    /// HTTP status code for this rejection
    pub fn status(&self) -> u16 {
        match self.kind() {
            RejectionKind::BadRequest => 400,
            RejectionKind::NotFound => 404,
            RejectionKind::Internal => 500,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InvalidCollectionName(v) => write!(f, "Invalid EOSIO name type: {}", v),
            Rejection::CollectionNotFound(v) => write!(f, "Collection not found: {}", v),
            Rejection::InvalidSymbolCode(v) => write!(f, "Invalid EOSIO Symbol code: {}", v),
            Rejection::SymbolCodeNotFound(v) => write!(f, "Symbol code not found: {}", v),
            Rejection::InvalidChain(v) => write!(f, "Invalid chain name: {}", v),
            Rejection::ChainNotFound(v) => write!(f, "Chain not found: {}", v),
            Rejection::InvalidTimeRange(v) => write!(f, "Invalid time range: {}", v),
            Rejection::InvalidAggregateFunction(v) => write!(f, "Invalid aggregate function: {}", v),
            Rejection::InvalidAggregateColumn(v) => write!(f, "Invalid aggregate column: {}", v),
            Rejection::IllegalAggregate { function, column } => write!(
                f,
                "Invalid aggregate column: {} for aggregate function: {}",
                column, function
            ),
            Rejection::InvalidTimestamp(e) => write!(f, "{}", e),
            Rejection::Internal(e) => write!(f, "Failed to build query: {}", e),
        }
    }
}

impl std::error::Error for Rejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Rejection::InvalidTimestamp(e) => Some(e),
            Rejection::Internal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TimestampError> for Rejection {
    fn from(err: TimestampError) -> Self {
        Rejection::InvalidTimestamp(err)
    }
}

impl From<EmitError> for Rejection {
    fn from(err: EmitError) -> Self {
        Rejection::Internal(err)
    }
}

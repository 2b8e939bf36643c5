//! Error taxonomy shared by the rule engine, the room dispatcher, and the
//! session layer.

use thiserror::Error;

/// The five failure kinds an action against a room or a game can produce.
///
/// None of these abort the process or mutate state; every variant maps to
/// an error response sent back to the originating connection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rule violation: {0}")]
    RuleViolation(String),

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),
}

impl GameError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn rule_violation(msg: impl Into<String>) -> Self {
        Self::RuleViolation(msg.into())
    }

    pub fn illegal_state(msg: impl Into<String>) -> Self {
        Self::IllegalState(msg.into())
    }

    pub fn precondition_failed(msg: impl Into<String>) -> Self {
        Self::PreconditionFailed(msg.into())
    }

    /// The kind name as it appears in logs; not part of the wire protocol
    /// (the wire error shape only carries a free-text message).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::RuleViolation(_) => "RULE_VIOLATION",
            Self::IllegalState(_) => "ILLEGAL_STATE",
            Self::PreconditionFailed(_) => "PRECONDITION_FAILED",
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;

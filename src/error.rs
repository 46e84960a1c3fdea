use thiserror::Error;

use crate::element::{LineId, StationId};

/// Errors raised when the line drawing state machine is driven out of order
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The operation is not valid in the current drawing state
    #[error("cannot {action} while {state}")]
    InvalidStateTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Integrity and lookup failures in the line graph
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("line {0} does not exist")]
    UnknownLine(LineId),

    #[error("station {0} does not exist")]
    UnknownStation(StationId),

    /// A line lists a child whose parent reference points elsewhere
    #[error("line {parent} lists child {child}, but the child's parent is {actual:?}")]
    AsymmetricChild {
        parent: LineId,
        child: LineId,
        actual: Option<LineId>,
    },

    /// A line names a parent that does not list it as a child
    #[error("line {child} names parent {parent}, which does not list it as a child")]
    OrphanedChild { parent: LineId, child: LineId },

    #[error("line {0} references a line that does not exist")]
    DanglingReference(LineId),

    #[error("parent chain starting at line {0} forms a cycle")]
    Cycle(LineId),
}

/// Failures loading, saving or validating the editor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to (de)serialize config: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/*!
# Unified Error Type

This module provides the single error enum used across the crate. Invalid
inputs are the only hard failures in the pipeline; algorithmic shortfalls
(fewer packs than hoped, coverage below target, an unreachable terminal) are
reported as ordinary values by the stage that observes them.
*/

use std::error::Error;
use std::fmt;

use crate::broadcast::BroadcastError;

/// Unified error type for all kmtm operations.
#[derive(Debug)]
pub enum KmtmError {
    /// Invalid argument or parameter
    InvalidArgument(String),

    /// Node not found in graph
    NodeNotFound(String),

    /// Graph is empty or invalid for the operation
    InvalidGraph(String),

    /// No path exists between nodes
    NoPath(String),

    /// Algorithm terminated unexpectedly
    AlgorithmError(String),

    /// A wall-clock limit was breached
    Timeout(String),

    /// Exceeded an iteration or round cap
    ExceededMaxIterations { iterations: usize, message: String },
}

impl KmtmError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        KmtmError::InvalidArgument(message.into())
    }

    /// Creates a node not found error.
    pub fn node_not_found(message: impl Into<String>) -> Self {
        KmtmError::NodeNotFound(message.into())
    }

    /// Creates an invalid graph error.
    pub fn invalid_graph(message: impl Into<String>) -> Self {
        KmtmError::InvalidGraph(message.into())
    }

    /// Creates a no path error.
    pub fn no_path(message: impl Into<String>) -> Self {
        KmtmError::NoPath(message.into())
    }

    /// Creates an algorithm error.
    pub fn algorithm_error(message: impl Into<String>) -> Self {
        KmtmError::AlgorithmError(message.into())
    }
}

impl fmt::Display for KmtmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KmtmError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            KmtmError::NodeNotFound(msg) => write!(f, "Node not found: {}", msg),
            KmtmError::InvalidGraph(msg) => write!(f, "Invalid graph: {}", msg),
            KmtmError::NoPath(msg) => write!(f, "No path exists: {}", msg),
            KmtmError::AlgorithmError(msg) => write!(f, "Algorithm error: {}", msg),
            KmtmError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            KmtmError::ExceededMaxIterations {
                iterations,
                message,
            } => {
                write!(f, "Exceeded max iterations ({}): {}", iterations, message)
            }
        }
    }
}

impl Error for KmtmError {}

impl From<BroadcastError> for KmtmError {
    fn from(e: BroadcastError) -> Self {
        match e {
            BroadcastError::Timeout { elapsed } => {
                KmtmError::Timeout(format!("broadcast simulation after {:?}", elapsed))
            }
            BroadcastError::RoundCapExceeded { rounds } => KmtmError::ExceededMaxIterations {
                iterations: rounds,
                message: "broadcast round cap reached".to_string(),
            },
            BroadcastError::DepthCapExceeded { steps } => KmtmError::ExceededMaxIterations {
                iterations: steps,
                message: "depth computation step cap reached".to_string(),
            },
        }
    }
}

//! Error types for Dagflow.
//!
//! All errors in Dagflow are represented by the `DagflowError` enum,
//! which provides specific variants for different error categories.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dag::VertexRef;

/// Unified error type for all Dagflow operations.
///
/// None of these errors are transient: each one reports a mistake in the
/// declared pipeline or in the way the collaborator drives the graph.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum DagflowError {
    /// A structural precondition was violated (missing label, inputs or
    /// outputs, an edge without endpoints, a bad configuration file).
    #[error("{0}")]
    Config(String),

    /// A single-consumer channel was declared as input of two vertices.
    #[error("channel `{channel}` is used as input by {vertex} but it is already consumed by {existing}")]
    MultipleInputChannel {
        channel: String,
        vertex: VertexRef,
        existing: VertexRef,
    },

    /// A channel was declared as output of two vertices.
    #[error("channel `{channel}` is used as output by {vertex} but it is already produced by {existing}")]
    MultipleOutputChannel {
        channel: String,
        vertex: VertexRef,
        existing: VertexRef,
    },

    /// The normalized graph contains a cycle passing through the named vertex.
    #[error("graph contains a cycle through vertex {0}")]
    Cycle(String),

    /// Data conversion errors (JSON, TOML).
    #[error("{0}")]
    Convert(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<DagflowError> for String {
    fn from(val: DagflowError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for DagflowError {
    fn from(error: std::io::Error) -> Self {
        DagflowError::IoError(error.to_string())
    }
}

impl From<DagflowError> for std::io::Error {
    fn from(val: DagflowError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<serde_json::Error> for DagflowError {
    fn from(error: serde_json::Error) -> Self {
        DagflowError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for DagflowError {
    fn from(error: toml::de::Error) -> Self {
        DagflowError::Config(error.to_string())
    }
}

use std::io;

use thiserror::Error;

use crate::types::{NodeId, Weight};

/// failures raised by the single pair shortest path algorithms
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {

    #[error("vertex {0} is not part of the graph")]
    UnknownVertex(NodeId),

    #[error("edge from {start} to {end} has invalid weight {weight}, dijkstra requires non-negative weights")]
    InvalidEdgeWeight { start: NodeId, end: NodeId, weight: Weight },
}

/// a query against a precomputed many to many result used a vertex outside the original sets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {

    #[error("{0} is not one of the source vertices")]
    SourceNotFound(NodeId),

    #[error("{0} is not one of the target vertices")]
    TargetNotFound(NodeId),
}

#[derive(Debug, Error)]
pub enum GraphFileError {

    #[error("unable to access graph file: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("graph file does not contain a 'p sp' size line")]
    MissingSizeLine,
}

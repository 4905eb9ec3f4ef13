use thiserror::Error;

use crate::node::NodeId;

/// Rejected circuit edits. The circuit is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("node {0} is not a resistor")]
    NotAResistor(NodeId),

    #[error("node {0} cannot be connected to itself")]
    SelfLoop(NodeId),

    #[error("{from} is already connected to {to}")]
    DuplicateConnection { from: NodeId, to: NodeId },

    #[error("{from} is not connected to {to}")]
    MissingConnection { from: NodeId, to: NodeId },

    #[error("connection {from} -> {to} runs against the terminals")]
    TerminalDirection { from: NodeId, to: NodeId },

    #[error("resistance must be a positive number of ohms (got {0})")]
    InvalidResistance(f64),

    #[error("terminal {0} cannot be removed")]
    TerminalNode(NodeId),
}

/// Why a circuit has no defined equivalent resistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TopologyIssue {
    #[error("node {node} has no outgoing connection")]
    Dangling { node: NodeId },

    #[error("the connections through {node} form a cycle")]
    Cycle { node: NodeId },

    #[error("the start terminal is wired straight to the end terminal")]
    ShortCircuit,

    #[error("the end terminal cannot be reached from the start terminal")]
    EndUnreachable,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReductionError {
    #[error("invalid circuit: {0}")]
    InvalidTopology(#[from] TopologyIssue),

    #[error("circuit cannot be simplified by series and parallel folds (after {passes} passes)")]
    CannotSimplify { passes: usize },
}

//! Resistor networks between a start and an end terminal.
//!
//! A [`Circuit`] is an arena of nodes wired by directed connections. Reducing
//! it copies the reachable graph into a [`ReductionHierarchy`], validates it,
//! then folds series chains and parallel pairs until a single equivalent
//! resistor remains. The fold log kept by [`Reduction`] drives the
//! back-substitution in [`Reduction::solve`] and the symbolic equations.

pub mod circuit;
pub mod equation;
pub mod error;
pub mod hierarchy;
pub mod node;
pub mod reduce;
pub mod solve;
pub mod validate;

#[cfg(test)]
mod solve_test;
#[cfg(test)]
mod validate_test;

pub use circuit::Circuit;
pub use error::{CircuitError, ReductionError, TopologyIssue};
pub use hierarchy::{HierarchyKind, HierarchyNode, ReductionHierarchy};
pub use node::{Node, NodeId, NodeKind, Resistor, TERMINAL_OFFSET};
pub use reduce::{FoldKind, FoldOperand, FoldStep, MAX_FOLD_PASSES, Reduction};
pub use solve::{CircuitSolution, ResistorReading};

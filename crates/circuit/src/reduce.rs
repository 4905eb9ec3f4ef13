//! Series/parallel fold loop.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::circuit::Circuit;
use crate::error::ReductionError;
use crate::hierarchy::{HierarchyKind, ReductionHierarchy};
use crate::validate::validate;

/// Upper bound on fold passes for a single reduction
pub const MAX_FOLD_PASSES: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FoldKind {
    Series,
    Parallel,
}

/// State of one side of a fold, captured before the fold is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldOperand {
    /// Hierarchy index
    pub node: usize,
    /// Display index when the node is an original resistor
    pub resistor: Option<usize>,
    pub resistance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldStep {
    pub kind: FoldKind,
    /// Node that carries the combined value afterwards
    pub kept: FoldOperand,
    /// Node that disappears from the graph
    pub absorbed: FoldOperand,
}

impl FoldStep {
    /// Resistance of the combined node
    pub fn combined(&self) -> f64 {
        combine(self.kind, self.kept.resistance, self.absorbed.resistance)
    }
}

fn combine(kind: FoldKind, a: f64, b: f64) -> f64 {
    match kind {
        FoldKind::Series => a + b,
        FoldKind::Parallel => 1.0 / (1.0 / a + 1.0 / b),
    }
}

#[derive(Debug, Clone, Copy)]
enum Fold {
    Series { parent: usize, child: usize },
    Parallel { parent: usize, kept: usize, absorbed: usize },
}

/// A circuit folded down to a single equivalent resistor.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub(crate) hierarchy: ReductionHierarchy,
    pub(crate) steps: Vec<FoldStep>,
    pub(crate) result: usize,
    pub(crate) resistance: f64,
}

impl Reduction {
    pub(crate) fn new(circuit: &Circuit) -> Result<Self, ReductionError> {
        let hierarchy = ReductionHierarchy::build(circuit);
        if let Err(issue) = validate(&hierarchy) {
            debug!(%issue, "circuit has no equivalent resistance");
            return Err(issue.into());
        }

        let mut work = hierarchy.clone();
        let mut steps = Vec::new();
        let mut passes = 0;

        let result = loop {
            if let Some(result) = reduced_node(&work) {
                break result;
            }
            if passes >= MAX_FOLD_PASSES {
                warn!(passes, "fold pass limit reached");
                return Err(ReductionError::CannotSimplify { passes });
            }
            let in_degree = work.in_degrees();
            let mut visited = vec![false; work.len()];
            let Some(fold) = find_fold(&work, work.root(), &in_degree, &mut visited) else {
                warn!(passes, folds = steps.len(), "no series or parallel fold applies");
                return Err(ReductionError::CannotSimplify { passes });
            };
            steps.push(apply(&mut work, fold));
            passes += 1;
        };

        let resistance = work.node(result).value;
        debug!(resistance, folds = steps.len(), "circuit reduced");
        Ok(Self {
            hierarchy,
            steps,
            result,
            resistance,
        })
    }

    pub fn equivalent_resistance(&self) -> f64 {
        self.resistance
    }

    /// Folds in the order they were applied
    pub fn steps(&self) -> &[FoldStep] {
        &self.steps
    }

    /// Hierarchy as it was before the first fold
    pub fn hierarchy(&self) -> &ReductionHierarchy {
        &self.hierarchy
    }

    /// Hierarchy index of the node holding the equivalent resistance
    pub fn result_node(&self) -> usize {
        self.result
    }
}

/// The start's single connection, once that node leads straight to the end
fn reduced_node(work: &ReductionHierarchy) -> Option<usize> {
    let end = work.end()?;
    match work.node(work.root()).connections[..] {
        [only] if work.node(only).connections[..] == [end] => Some(only),
        _ => None,
    }
}

fn find_fold(
    work: &ReductionHierarchy,
    index: usize,
    in_degree: &[usize],
    visited: &mut [bool],
) -> Option<Fold> {
    if visited[index] {
        return None;
    }
    visited[index] = true;
    let node = work.node(index);

    if node.kind != HierarchyKind::Start {
        if let [child] = node.connections[..] {
            if work.node(child).kind == HierarchyKind::Resistor && in_degree[child] == 1 {
                return Some(Fold::Series {
                    parent: index,
                    child,
                });
            }
        }
    }

    if node.connections.len() >= 2 {
        for (i, &a) in node.connections.iter().enumerate() {
            for &b in &node.connections[i + 1..] {
                let shared = match (&work.node(a).connections[..], &work.node(b).connections[..]) {
                    ([ta], [tb]) => ta == tb,
                    _ => false,
                };
                if shared && in_degree[a] == 1 && in_degree[b] == 1 {
                    return Some(Fold::Parallel {
                        parent: index,
                        kept: a,
                        absorbed: b,
                    });
                }
            }
        }
    }

    node.connections
        .iter()
        .filter(|&&c| work.node(c).kind == HierarchyKind::Resistor)
        .find_map(|&c| find_fold(work, c, in_degree, visited))
}

fn operand(work: &ReductionHierarchy, index: usize) -> FoldOperand {
    let node = work.node(index);
    FoldOperand {
        node: index,
        resistor: node.resistor,
        resistance: node.value,
    }
}

fn apply(work: &mut ReductionHierarchy, fold: Fold) -> FoldStep {
    let step = match fold {
        Fold::Series { parent, child } => FoldStep {
            kind: FoldKind::Series,
            kept: operand(work, parent),
            absorbed: operand(work, child),
        },
        Fold::Parallel { kept, absorbed, .. } => FoldStep {
            kind: FoldKind::Parallel,
            kept: operand(work, kept),
            absorbed: operand(work, absorbed),
        },
    };
    let combined = step.combined();

    match fold {
        Fold::Series { parent, child } => {
            let adopted = std::mem::take(&mut work.node_mut(child).connections);
            let parent = work.node_mut(parent);
            parent.value = combined;
            parent.connections = adopted;
        }
        Fold::Parallel {
            parent,
            kept,
            absorbed,
        } => {
            work.node_mut(kept).value = combined;
            work.node_mut(absorbed).connections.clear();
            let siblings = &mut work.node_mut(parent).connections;
            if let Some(position) = siblings.iter().position(|&c| c == absorbed) {
                siblings.remove(position);
            }
        }
    }

    debug!(
        kind = ?step.kind,
        kept = step.kept.node,
        absorbed = step.absorbed.node,
        combined,
        "folded"
    );
    step
}

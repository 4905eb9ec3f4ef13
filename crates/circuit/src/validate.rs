//! Topology checks run before any fold.

use crate::error::TopologyIssue;
use crate::hierarchy::{HierarchyKind, ReductionHierarchy};

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Checks that the hierarchy describes a resistor network from start to end
/// that the fold loop can work on: the start is wired to something other
/// than the end, every reachable node except the end has an outgoing
/// connection, and no path loops back on itself.
pub fn validate(hierarchy: &ReductionHierarchy) -> Result<(), TopologyIssue> {
    let root = hierarchy.node(hierarchy.root());
    if root.connections.is_empty() {
        return Err(TopologyIssue::EndUnreachable);
    }
    if let Some(end) = hierarchy.end() {
        if root.connections.contains(&end) {
            return Err(TopologyIssue::ShortCircuit);
        }
    }

    let mut marks = vec![Mark::Unvisited; hierarchy.len()];
    visit(hierarchy, hierarchy.root(), &mut marks)?;

    if hierarchy.end().is_none() {
        return Err(TopologyIssue::EndUnreachable);
    }
    Ok(())
}

fn visit(
    hierarchy: &ReductionHierarchy,
    index: usize,
    marks: &mut [Mark],
) -> Result<(), TopologyIssue> {
    let node = hierarchy.node(index);
    if node.connections.is_empty() && node.kind != HierarchyKind::End {
        return Err(TopologyIssue::Dangling { node: node.source });
    }

    marks[index] = Mark::OnPath;
    for &child in &node.connections {
        match marks[child] {
            Mark::OnPath => {
                return Err(TopologyIssue::Cycle {
                    node: hierarchy.node(child).source,
                });
            }
            Mark::Unvisited => visit(hierarchy, child, marks)?,
            Mark::Done => {}
        }
    }
    marks[index] = Mark::Done;
    Ok(())
}

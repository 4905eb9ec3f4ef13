//! Flattened copy of the reachable part of a circuit.
//!
//! Reduction mutates values and connections destructively, so it always
//! works on a fresh hierarchy and never on the live [`Circuit`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::node::{NodeId, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HierarchyKind {
    Start,
    End,
    Resistor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    /// Sequential id in discovery order; also the index into the hierarchy
    pub id: usize,
    /// Circuit node this entry was copied from
    pub source: NodeId,
    pub kind: HierarchyKind,
    /// Ohms; zero for the terminals
    pub value: f64,
    /// Display index of the original resistor, `None` for terminals
    pub resistor: Option<usize>,
    pub connections: Vec<usize>,
}

impl HierarchyNode {
    pub fn label(&self) -> String {
        match (self.kind, self.resistor) {
            (HierarchyKind::Start, _) => "+".to_string(),
            (HierarchyKind::End, _) => "-".to_string(),
            (HierarchyKind::Resistor, Some(index)) => format!("R{}", index + 1),
            (HierarchyKind::Resistor, None) => "R?".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReductionHierarchy {
    nodes: Vec<HierarchyNode>,
    end: Option<usize>,
}

impl ReductionHierarchy {
    /// Copies every node reachable from the start terminal, depth first in
    /// connection order. A node reached along several paths is copied once
    /// and stays shared.
    pub fn build(circuit: &Circuit) -> Self {
        let mut ids: HashMap<NodeId, usize> = HashMap::new();
        let mut order: Vec<NodeId> = Vec::new();
        let mut stack = vec![circuit.start()];

        while let Some(id) = stack.pop() {
            if ids.contains_key(&id) {
                continue;
            }
            let Some(node) = circuit.node(id) else {
                continue;
            };
            ids.insert(id, order.len());
            order.push(id);
            stack.extend(node.connections.iter().rev().copied());
        }

        let nodes: Vec<HierarchyNode> = order
            .iter()
            .enumerate()
            .filter_map(|(index, &source)| {
                let node = circuit.node(source)?;
                let (kind, value, resistor) = match &node.kind {
                    NodeKind::Start => (HierarchyKind::Start, 0.0, None),
                    NodeKind::End => (HierarchyKind::End, 0.0, None),
                    NodeKind::Resistor(r) => {
                        (HierarchyKind::Resistor, r.resistance, Some(r.index))
                    }
                };
                Some(HierarchyNode {
                    id: index,
                    source,
                    kind,
                    value,
                    resistor,
                    connections: node
                        .connections
                        .iter()
                        .filter_map(|c| ids.get(c).copied())
                        .collect(),
                })
            })
            .collect();

        let end = ids.get(&circuit.end()).copied();
        Self { nodes, end }
    }

    /// Index of the start terminal
    pub fn root(&self) -> usize {
        0
    }

    /// Index of the end terminal, if it is reachable
    pub fn end(&self) -> Option<usize> {
        self.end
    }

    pub fn node(&self, index: usize) -> &HierarchyNode {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut HierarchyNode {
        &mut self.nodes[index]
    }

    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, source: NodeId) -> Option<&HierarchyNode> {
        self.nodes.iter().find(|n| n.source == source)
    }

    /// Number of incoming connections per node
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.nodes.len()];
        for node in &self.nodes {
            for &c in &node.connections {
                degrees[c] += 1;
            }
        }
        degrees
    }
}

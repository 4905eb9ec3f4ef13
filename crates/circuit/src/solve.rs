//! Back-substitution of voltages and currents through the fold log.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::node::NodeId;
use crate::reduce::{FoldKind, Reduction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResistorReading {
    pub node: NodeId,
    pub index: usize,
    pub resistance: f64,
    /// Volts dropped across the resistor
    pub voltage: f64,
    /// Amperes through the resistor
    pub current: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitSolution {
    pub voltage: f64,
    pub equivalent_resistance: f64,
    pub total_current: f64,
    /// One reading per reachable resistor, ordered by display index
    pub resistors: Vec<ResistorReading>,
}

impl CircuitSolution {
    pub fn reading(&self, node: NodeId) -> Option<&ResistorReading> {
        self.resistors.iter().find(|r| r.node == node)
    }
}

impl Reduction {
    /// Distributes `voltage`, applied across the terminals, over every
    /// resistor.
    ///
    /// Walks the fold log backwards starting from the equivalent resistor:
    /// a series fold splits the voltage at equal current, a parallel fold
    /// splits the current at equal voltage.
    pub fn solve(&self, voltage: f64) -> CircuitSolution {
        let total_current = voltage / self.resistance;
        let mut values: Vec<Option<(f64, f64)>> = vec![None; self.hierarchy.len()];
        values[self.result] = Some((voltage, total_current));

        for step in self.steps.iter().rev() {
            let Some((v, i)) = values[step.kept.node] else {
                continue;
            };
            let r1 = step.kept.resistance;
            let r2 = step.absorbed.resistance;
            let (kept, absorbed) = match step.kind {
                FoldKind::Series => ((i * r1, i), (i * r2, i)),
                FoldKind::Parallel => ((v, v / r1), (v, v / r2)),
            };
            values[step.kept.node] = Some(kept);
            values[step.absorbed.node] = Some(absorbed);
        }

        let mut resistors: Vec<ResistorReading> = self
            .hierarchy
            .nodes()
            .iter()
            .filter_map(|node| {
                let index = node.resistor?;
                let (voltage, current) = values[node.id]?;
                Some(ResistorReading {
                    node: node.source,
                    index,
                    resistance: node.value,
                    voltage,
                    current,
                })
            })
            .collect();
        resistors.sort_by_key(|r| r.index);

        debug!(voltage, total_current, resistors = resistors.len(), "solved circuit");
        CircuitSolution {
            voltage,
            equivalent_resistance: self.resistance,
            total_current,
            resistors,
        }
    }
}

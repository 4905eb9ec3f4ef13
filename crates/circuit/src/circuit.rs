use nalgebra::Point2;
use tracing::{debug, warn};

use crate::error::{CircuitError, ReductionError};
use crate::node::{Node, NodeId, NodeKind, Resistor};
use crate::reduce::Reduction;

/// Arena of circuit nodes with exactly one start and one end terminal.
///
/// Removed resistors leave a tombstone so that every [`NodeId`] handed out
/// stays stable. Every successful edit bumps [`revision`](Self::revision).
///
/// # Examples
///
/// ```
/// use circuit::Circuit;
/// use nalgebra::Point2;
///
/// let mut circuit = Circuit::new(Point2::new(-5.0, 0.0), Point2::new(20.0, 0.0));
/// let r1 = circuit.add_resistor(Point2::new(0.0, 0.0), 100.0).unwrap();
/// let r2 = circuit.add_resistor(Point2::new(10.0, 0.0), 150.0).unwrap();
/// circuit.add_connection(circuit.start(), r1).unwrap();
/// circuit.add_connection(r1, r2).unwrap();
/// circuit.add_connection(r2, circuit.end()).unwrap();
///
/// let reduction = circuit.reduce().unwrap();
/// assert!((reduction.equivalent_resistance() - 250.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    nodes: Vec<Option<Node>>,
    start: NodeId,
    end: NodeId,
    revision: u64,
}

impl Circuit {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self {
            nodes: vec![
                Some(Node::new(NodeKind::Start, start)),
                Some(Node::new(NodeKind::End, end)),
            ],
            start: NodeId(0),
            end: NodeId(1),
            revision: 0,
        }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    /// Counter bumped by every successful edit
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn get(&self, id: NodeId) -> Result<&Node, CircuitError> {
        self.node(id).ok_or(CircuitError::UnknownNode(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, CircuitError> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CircuitError::UnknownNode(id))
    }

    fn resistor_mut(&mut self, id: NodeId) -> Result<&mut Resistor, CircuitError> {
        self.get_mut(id)?
            .resistor_mut()
            .ok_or(CircuitError::NotAResistor(id))
    }

    /// Live nodes in arena order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i), n)))
    }

    /// Live resistors, ordered by display index
    pub fn resistors(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes().filter(|(_, n)| n.resistor().is_some())
    }

    pub fn resistor_count(&self) -> usize {
        self.resistors().count()
    }

    /// Every `(from, to)` connection
    pub fn connections(&self) -> Vec<(NodeId, NodeId)> {
        self.nodes()
            .flat_map(|(id, n)| n.connections.iter().map(move |to| (id, *to)))
            .collect()
    }

    /// Wire endpoints of the connection `from -> to`
    pub fn wire_points(&self, from: NodeId, to: NodeId) -> Option<(Point2<f64>, Point2<f64>)> {
        let a = self.node(from)?;
        let b = self.node(to)?;
        Some((a.output_point(&b.position), b.input_point(&a.position)))
    }

    fn validate_resistance(resistance: f64) -> Result<(), CircuitError> {
        if resistance.is_finite() && resistance > 0.0 {
            Ok(())
        } else {
            Err(CircuitError::InvalidResistance(resistance))
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn add_resistor(
        &mut self,
        position: Point2<f64>,
        resistance: f64,
    ) -> Result<NodeId, CircuitError> {
        Self::validate_resistance(resistance).inspect_err(|e| warn!(%e, "rejected resistor"))?;
        let id = NodeId(self.nodes.len());
        let resistor = Resistor::new(resistance, self.resistor_count());
        self.nodes
            .push(Some(Node::new(NodeKind::Resistor(resistor), position)));
        self.touch();
        debug!(%id, resistance, "added resistor");
        Ok(id)
    }

    /// Removes a resistor together with every connection into it
    pub fn remove_resistor(&mut self, id: NodeId) -> Result<Node, CircuitError> {
        let node = self.get(id)?;
        if node.is_terminal() {
            warn!(%id, "refused to remove terminal");
            return Err(CircuitError::TerminalNode(id));
        }
        let removed = self.nodes[id.0].take().ok_or(CircuitError::UnknownNode(id))?;
        for node in self.nodes.iter_mut().flatten() {
            node.connections.retain(|c| *c != id);
        }
        let mut index = 0;
        for node in self.nodes.iter_mut().flatten() {
            if let Some(r) = node.resistor_mut() {
                r.index = index;
                index += 1;
            }
        }
        self.touch();
        debug!(%id, "removed resistor");
        Ok(removed)
    }

    /// Wires `from -> to`.
    ///
    /// Rejects unknown nodes, self-loops, duplicate edges, and edges into the
    /// start terminal or out of the end terminal.
    pub fn add_connection(&mut self, from: NodeId, to: NodeId) -> Result<(), CircuitError> {
        let result = self.check_connection(from, to);
        if let Err(e) = &result {
            warn!(%from, %to, %e, "rejected connection");
        }
        result?;
        self.get_mut(from)?.connections.push(to);
        self.touch();
        debug!(%from, %to, "connected");
        Ok(())
    }

    fn check_connection(&self, from: NodeId, to: NodeId) -> Result<(), CircuitError> {
        let source = self.get(from)?;
        self.get(to)?;
        if from == to {
            return Err(CircuitError::SelfLoop(from));
        }
        if to == self.start || from == self.end {
            return Err(CircuitError::TerminalDirection { from, to });
        }
        if source.connections.contains(&to) {
            return Err(CircuitError::DuplicateConnection { from, to });
        }
        Ok(())
    }

    pub fn remove_connection(&mut self, from: NodeId, to: NodeId) -> Result<(), CircuitError> {
        let node = self.get_mut(from)?;
        let position = node
            .connections
            .iter()
            .position(|c| *c == to)
            .ok_or(CircuitError::MissingConnection { from, to })?;
        node.connections.remove(position);
        self.touch();
        debug!(%from, %to, "disconnected");
        Ok(())
    }

    /// Sets a resistor's value; non-finite or non-positive values are rejected
    pub fn set_resistance(&mut self, id: NodeId, resistance: f64) -> Result<(), CircuitError> {
        Self::validate_resistance(resistance)
            .inspect_err(|e| warn!(%id, %e, "rejected resistance"))?;
        self.resistor_mut(id)?.resistance = resistance;
        self.touch();
        Ok(())
    }

    /// Toggles a resistor between horizontal and vertical
    pub fn rotate_resistor(&mut self, id: NodeId) -> Result<f64, CircuitError> {
        let resistor = self.resistor_mut(id)?;
        resistor.rotation = if resistor.rotation == 0.0 {
            std::f64::consts::FRAC_PI_2
        } else {
            0.0
        };
        let rotation = resistor.rotation;
        self.touch();
        Ok(rotation)
    }

    pub fn move_node(&mut self, id: NodeId, position: Point2<f64>) -> Result<(), CircuitError> {
        self.get_mut(id)?.position = position;
        self.touch();
        Ok(())
    }

    /// Folds the circuit down to its equivalent resistance
    pub fn reduce(&self) -> Result<Reduction, ReductionError> {
        Reduction::new(self)
    }

    /// Shorthand for `reduce()` keeping only the resistance
    pub fn equivalent_resistance(&self) -> Result<f64, ReductionError> {
        self.reduce().map(|r| r.equivalent_resistance())
    }
}

use nalgebra::Point2;

use crate::circuit::Circuit;
use crate::error::{ReductionError, TopologyIssue};
use crate::hierarchy::{HierarchyKind, ReductionHierarchy};
use crate::validate::validate;

fn empty() -> Circuit {
    Circuit::new(Point2::new(-10.0, 0.0), Point2::new(30.0, 0.0))
}

#[test]
fn test_dangling_resistor() {
    let mut circuit = empty();
    let r1 = circuit.add_resistor(Point2::origin(), 100.0).unwrap();
    circuit.add_connection(circuit.start(), r1).unwrap();

    assert_eq!(
        circuit.reduce().unwrap_err(),
        ReductionError::InvalidTopology(TopologyIssue::Dangling { node: r1 })
    );
}

#[test]
fn test_dangling_branch_beside_valid_one() {
    let mut circuit = empty();
    let r1 = circuit.add_resistor(Point2::origin(), 100.0).unwrap();
    let r2 = circuit.add_resistor(Point2::new(0.0, 5.0), 100.0).unwrap();
    circuit.add_connection(circuit.start(), r1).unwrap();
    circuit.add_connection(r1, circuit.end()).unwrap();
    circuit.add_connection(circuit.start(), r2).unwrap();

    assert_eq!(
        circuit.equivalent_resistance(),
        Err(ReductionError::InvalidTopology(TopologyIssue::Dangling { node: r2 }))
    );
}

#[test]
fn test_unwired_start() {
    let circuit = empty();
    assert_eq!(
        circuit.reduce().unwrap_err(),
        ReductionError::InvalidTopology(TopologyIssue::EndUnreachable)
    );
}

#[test]
fn test_short_circuit() {
    let mut circuit = empty();
    circuit.add_connection(circuit.start(), circuit.end()).unwrap();
    assert_eq!(
        circuit.reduce().unwrap_err(),
        ReductionError::InvalidTopology(TopologyIssue::ShortCircuit)
    );
}

#[test]
fn test_cycle() {
    let mut circuit = empty();
    let r1 = circuit.add_resistor(Point2::origin(), 100.0).unwrap();
    let r2 = circuit.add_resistor(Point2::new(5.0, 0.0), 100.0).unwrap();
    circuit.add_connection(circuit.start(), r1).unwrap();
    circuit.add_connection(r1, r2).unwrap();
    circuit.add_connection(r2, r1).unwrap();
    circuit.add_connection(r2, circuit.end()).unwrap();

    assert_eq!(
        circuit.reduce().unwrap_err(),
        ReductionError::InvalidTopology(TopologyIssue::Cycle { node: r1 })
    );
}

#[test]
fn test_unreachable_resistors_are_ignored() {
    let mut circuit = empty();
    let r1 = circuit.add_resistor(Point2::origin(), 100.0).unwrap();
    circuit.add_resistor(Point2::new(0.0, 5.0), 100.0).unwrap();
    circuit.add_connection(circuit.start(), r1).unwrap();
    circuit.add_connection(r1, circuit.end()).unwrap();

    let hierarchy = ReductionHierarchy::build(&circuit);
    assert_eq!(hierarchy.len(), 3);
    assert_eq!(validate(&hierarchy), Ok(()));
}

#[test]
fn test_hierarchy_shares_downstream_nodes() {
    let mut circuit = empty();
    let r1 = circuit.add_resistor(Point2::new(0.0, 5.0), 100.0).unwrap();
    let r2 = circuit.add_resistor(Point2::new(0.0, -5.0), 100.0).unwrap();
    let r3 = circuit.add_resistor(Point2::new(10.0, 0.0), 100.0).unwrap();
    let (start, end) = (circuit.start(), circuit.end());
    for (from, to) in [(start, r1), (start, r2), (r1, r3), (r2, r3), (r3, end)] {
        circuit.add_connection(from, to).unwrap();
    }

    let hierarchy = ReductionHierarchy::build(&circuit);

    assert_eq!(hierarchy.len(), 5);
    let sources: Vec<_> = hierarchy.nodes().iter().map(|n| n.source).collect();
    assert_eq!(sources, vec![start, r1, r3, end, r2]);
    assert_eq!(hierarchy.node(0).kind, HierarchyKind::Start);
    assert_eq!(hierarchy.node(0).resistor, None);
    assert_eq!(hierarchy.end(), Some(3));

    let shared = hierarchy.find(r3).unwrap();
    assert_eq!(hierarchy.in_degrees()[shared.id], 2);
    assert_eq!(hierarchy.node(1).connections, hierarchy.node(4).connections);
}

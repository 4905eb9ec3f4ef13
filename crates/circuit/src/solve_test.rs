use approx::assert_relative_eq;

use crate::reduce_test::{chain, parallel, sample};

#[test]
fn test_series_voltage_divider() {
    let (circuit, ids) = chain(&[100.0, 150.0]);
    let solution = circuit.reduce().unwrap().solve(5.0);

    assert_relative_eq!(solution.total_current, 0.02);
    let r1 = solution.reading(ids[0]).unwrap();
    let r2 = solution.reading(ids[1]).unwrap();
    assert_relative_eq!(r1.current, 0.02);
    assert_relative_eq!(r2.current, 0.02);
    assert_relative_eq!(r1.voltage, 2.0, epsilon = 1e-12);
    assert_relative_eq!(r2.voltage, 3.0, epsilon = 1e-12);
}

#[test]
fn test_parallel_current_divider() {
    let (circuit, ids) = parallel(&[100.0, 400.0]);
    let solution = circuit.reduce().unwrap().solve(8.0);

    assert_relative_eq!(solution.equivalent_resistance, 80.0, epsilon = 1e-9);
    assert_relative_eq!(solution.total_current, 0.1, epsilon = 1e-12);
    assert_relative_eq!(solution.reading(ids[0]).unwrap().current, 0.08, epsilon = 1e-12);
    assert_relative_eq!(solution.reading(ids[1]).unwrap().current, 0.02, epsilon = 1e-12);
    assert_relative_eq!(solution.reading(ids[1]).unwrap().voltage, 8.0);
}

#[test]
fn test_single_resistor_takes_everything() {
    let (circuit, ids) = chain(&[50.0]);
    let solution = circuit.reduce().unwrap().solve(10.0);

    assert_eq!(solution.resistors.len(), 1);
    let reading = solution.reading(ids[0]).unwrap();
    assert_relative_eq!(reading.voltage, 10.0);
    assert_relative_eq!(reading.current, 0.2);
}

#[test]
fn test_mixed_network_readings() {
    let sample = sample();
    let solution = sample.circuit.reduce().unwrap().solve(10.0);
    let [r1, r2, r3, r4, r5] = sample.r;

    assert_relative_eq!(solution.total_current, 0.05, epsilon = 1e-12);

    let expected = [
        (r1, 8.0, 0.04),
        (r2, 2.0, 0.02),
        (r3, 2.0, 0.016),
        (r4, 2.0, 0.004),
        (r5, 10.0, 0.01),
    ];
    for (id, voltage, current) in expected {
        let reading = solution.reading(id).unwrap();
        assert_relative_eq!(reading.voltage, voltage, epsilon = 1e-9);
        assert_relative_eq!(reading.current, current, epsilon = 1e-12);
    }
}

#[test]
fn test_kirchhoff_sums() {
    let sample = sample();
    let solution = sample.circuit.reduce().unwrap().solve(12.0);
    let [r1, r2, r3, r4, r5] = sample.r.map(|id| solution.reading(id).unwrap());

    // Ohm's law on every resistor
    for reading in &solution.resistors {
        assert_relative_eq!(reading.voltage, reading.current * reading.resistance, epsilon = 1e-9);
    }
    // Current out of R1 splits over R2..R4
    assert_relative_eq!(r1.current, r2.current + r3.current + r4.current, epsilon = 1e-12);
    // Both branches see the full supply
    assert_relative_eq!(r1.voltage + r2.voltage, 12.0, epsilon = 1e-9);
    assert_relative_eq!(r5.voltage, 12.0, epsilon = 1e-9);
    // Everything arriving at the end terminal
    assert_relative_eq!(
        r2.current + r3.current + r4.current + r5.current,
        solution.total_current,
        epsilon = 1e-12
    );
}

#[test]
fn test_readings_ordered_by_label() {
    let sample = sample();
    let solution = sample.circuit.reduce().unwrap().solve(1.0);
    let indices: Vec<usize> = solution.resistors.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

//! End-to-end tests across the stamp crates
//!
//! These tests drive the complete workflow:
//! 1. Build stamps from constants and declared parameters
//! 2. Recompute a graph of reinterpret, phi and guard nodes to a fixpoint
//! 3. Check the settled stamps with the verification oracle
//!
//! Scenario numbers refer to the five reference reinterpret cases.

use stamp_infer::{InferConfig, Operation, ReinterpretPrecision, StampGraph};
use stamp_lattice::{Constant, FloatStamp, IntegerStamp, Lattice, PrimitiveType, Stamp};
use stamp_oracle::{check_reinterpret, interesting_bits};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parameter -> reinterpret graph, returning the reinterpreted stamp
fn reinterpret_through_graph(declared: Stamp, target: PrimitiveType) -> Stamp {
    init_tracing();
    let mut graph = StampGraph::new();
    let p = graph.add_node(Operation::Parameter(declared), &[]).unwrap();
    let r = graph.add_node(Operation::Reinterpret(target), &[p]).unwrap();
    graph.run(&InferConfig::default()).unwrap();
    graph.stamp(r).unwrap()
}

// ============================================================================
// Reference Scenarios
// ============================================================================

#[test]
fn test_scenario_1_unit_interval_bits() {
    let declared: Stamp = FloatStamp::new(32, 1.0, 2.0, false).unwrap().into();
    let bits = reinterpret_through_graph(declared, PrimitiveType::I32);
    let bits = bits.as_integer().unwrap();
    for raw in [0x3F80_0000i64, 0x3FC0_0000, 0x3FFF_FFFF, 0x4000_0000] {
        assert!(bits.contains(raw), "{:#x} missing from {}", raw, bits);
    }
}

#[test]
fn test_scenario_2_signed_zero_bits() {
    let declared: Stamp = FloatStamp::new(32, -0.0, 0.0, false).unwrap().into();
    let bits = reinterpret_through_graph(declared, PrimitiveType::I32);
    assert!(bits.contains(&Constant::from_raw_bits(PrimitiveType::I32, 0x0000_0000)));
    assert!(bits.contains(&Constant::from_raw_bits(PrimitiveType::I32, 0x8000_0000)));
}

#[test]
fn test_scenario_3_nan_bits_both_signs() {
    let declared: Stamp = FloatStamp::nan_only(32).unwrap().into();
    let bits = reinterpret_through_graph(declared, PrimitiveType::I32);
    for raw in [0x7F80_0001u64, 0x7FC0_0000, 0x7FFF_FFFF, 0xFF80_0001, 0xFFC0_0000, 0xFFFF_FFFF] {
        assert!(bits.contains(&Constant::from_raw_bits(PrimitiveType::I32, raw)));
    }
}

#[test]
fn test_scenario_4_zero_bits_are_positive_zero() {
    let declared: Stamp = IntegerStamp::new(32, 0, 0, 0, 0).unwrap().into();
    let value = reinterpret_through_graph(declared, PrimitiveType::F32);
    let value = value.as_float().unwrap();
    assert!(value.contains(0.0));
    assert!(!value.can_be_nan());
    assert_eq!((value.lower_bound(), value.upper_bound()), (0.0, 0.0));
    assert!(!value.contains(f32::MIN_POSITIVE as f64));
    assert!(!value.contains(-(f32::from_bits(1) as f64)));
    // a zero range cannot tell the two zero encodings apart
    assert!(value.contains(-0.0));
    assert!(!value.is_constant());
}

#[test]
fn test_scenario_5_join_of_constants() {
    let mut graph = StampGraph::new();
    let a = graph
        .add_node(Operation::Constant(Constant::float(PrimitiveType::F32, 1.0)), &[])
        .unwrap();
    let b = graph
        .add_node(Operation::Constant(Constant::float(PrimitiveType::F32, 3.0)), &[])
        .unwrap();
    let phi = graph.add_node(Operation::Phi, &[a, b]).unwrap();
    graph.run(&InferConfig::default()).unwrap();

    let merged = graph.stamp(phi).unwrap();
    let expected: Stamp = FloatStamp::new(32, 1.0, 3.0, false).unwrap().into();
    assert_eq!(merged, expected);
    assert!(merged.contains(&Constant::float(PrimitiveType::F32, 2.0)));
}

// ============================================================================
// Graph results checked by the oracle
// ============================================================================

#[test]
fn test_settled_graph_stamps_pass_oracle() {
    init_tracing();
    let mut graph = StampGraph::new();
    let x = graph
        .add_node(Operation::Parameter(FloatStamp::new(64, -10.0, 0.5, true).unwrap().into()), &[])
        .unwrap();
    let y = graph
        .add_node(Operation::Constant(Constant::float(PrimitiveType::F64, f64::INFINITY)), &[])
        .unwrap();
    let phi = graph.add_node(Operation::Phi, &[x, y]).unwrap();
    let bits = graph.add_node(Operation::Reinterpret(PrimitiveType::I64), &[phi]).unwrap();
    graph.run(&InferConfig::default()).unwrap();

    let merged = graph.stamp(phi).unwrap();
    let case = check_reinterpret(&merged, PrimitiveType::I64, &interesting_bits(64), ReinterpretPrecision::Partitioned)
        .unwrap();
    assert!(case.violations.is_empty());
    assert_eq!(case.result, graph.stamp(bits).unwrap());
}

#[test]
fn test_guarded_bits_narrow_float() {
    // Bits guarded to the positive normal range read back as positive floats
    let mut graph = StampGraph::new();
    let p = graph
        .add_node(Operation::Parameter(Stamp::unrestricted(PrimitiveType::I32).unwrap()), &[])
        .unwrap();
    let fact: Stamp = IntegerStamp::with_bounds(32, 0x0080_0000, 0x7F7F_FFFF).unwrap().into();
    let g = graph.add_node(Operation::Guard(fact), &[p]).unwrap();
    let f = graph.add_node(Operation::Reinterpret(PrimitiveType::F32), &[g]).unwrap();
    graph.run(&InferConfig::default()).unwrap();

    let f = *graph.stamp(f).unwrap().as_float().unwrap();
    assert!(!f.can_be_nan());
    assert_eq!(f.lower_bound(), f32::MIN_POSITIVE as f64);
    assert_eq!(f.upper_bound(), f32::MAX as f64);
    assert!(f.is_finite());
}

#[test]
fn test_conservative_graph_is_coarser() {
    let declared: Stamp = FloatStamp::new(32, -1.0, 1.0, false).unwrap().into();
    let mut graph = StampGraph::new();
    let p = graph.add_node(Operation::Parameter(declared), &[]).unwrap();
    let r = graph.add_node(Operation::Reinterpret(PrimitiveType::I32), &[p]).unwrap();

    graph.run(&InferConfig::default()).unwrap();
    let tight = graph.stamp(r).unwrap();
    graph.run(&InferConfig::conservative()).unwrap();
    let loose = graph.stamp(r).unwrap();

    assert!(loose.is_unrestricted());
    assert!(tight.is_subset_of(&loose));
    assert!(!tight.is_unrestricted());
}

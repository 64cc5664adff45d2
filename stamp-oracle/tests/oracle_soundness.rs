//! Oracle runs over every supported width and precision
//!
//! Any violation printed here is an unsound inferred stamp.

use stamp_infer::ReinterpretPrecision;
use stamp_lattice::{FloatStamp, IntegerStamp, PrimitiveType, Stamp};
use stamp_oracle::{
    check_reinterpret, float_candidates, integer_candidates, interesting_bits, verify_float_to_int,
    verify_int_to_float, OracleConfig,
};

const PRECISIONS: [ReinterpretPrecision; 2] = [ReinterpretPrecision::Partitioned, ReinterpretPrecision::Conservative];

// ============================================================================
// Full runs
// ============================================================================

#[test]
fn test_float_to_int_is_sound() {
    for bits in [32, 64] {
        for precision in PRECISIONS {
            let report = verify_float_to_int(bits, &OracleConfig::new(precision)).unwrap();
            assert!(report.is_sound(), "f{} {:?}: {}", bits, precision, report);
            assert_eq!(report.cases as usize, float_candidates(bits).unwrap().len());
            assert!(report.checked_values > report.cases);
        }
    }
}

#[test]
fn test_int_to_float_is_sound() {
    for bits in [32, 64] {
        for precision in PRECISIONS {
            let report = verify_int_to_float(bits, &OracleConfig::new(precision)).unwrap();
            assert!(report.is_sound(), "i{} {:?}: {}", bits, precision, report);
            assert_eq!(report.cases as usize, integer_candidates(bits).unwrap().len());
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_nan_only_candidate_checks_every_nan_value() {
    let values = interesting_bits(32);
    let nan_values = values
        .iter()
        .filter(|&&raw| f32::from_bits(raw as u32).is_nan())
        .count() as u64;

    let input: Stamp = FloatStamp::nan_only(32).unwrap().into();
    let case = check_reinterpret(&input, PrimitiveType::I32, &values, ReinterpretPrecision::Partitioned).unwrap();
    assert_eq!(case.checked, nan_values);
    assert!(case.violations.is_empty());
}

#[test]
fn test_zero_integer_candidate() {
    let input: Stamp = IntegerStamp::new(32, 0, 0, 0, 0).unwrap().into();
    let case = check_reinterpret(&input, PrimitiveType::F32, &interesting_bits(32), ReinterpretPrecision::Partitioned)
        .unwrap();
    assert_eq!(case.checked, 1);
    assert!(case.violations.is_empty());
    let result = case.result.as_float().unwrap();
    assert!(result.contains(0.0));
    assert!(!result.can_be_nan());
}

#[test]
fn test_partitioned_is_at_least_as_tight_as_conservative() {
    for candidate in float_candidates(32).unwrap() {
        let input: Stamp = candidate.into();
        let values = interesting_bits(32);
        let tight = check_reinterpret(&input, PrimitiveType::I32, &values, ReinterpretPrecision::Partitioned).unwrap();
        let loose = check_reinterpret(&input, PrimitiveType::I32, &values, ReinterpretPrecision::Conservative).unwrap();
        let tight = tight.result.as_integer().unwrap();
        let loose = loose.result.as_integer().unwrap();
        assert!(tight.is_subset_of(loose), "{} vs {}", tight, loose);
    }
}

//! # Containment Checker
//!
//! Runs reinterpret inference on every candidate stamp and reinterprets each
//! interesting value concretely. Any value inside the candidate whose raw
//! bits fall outside the inferred stamp is a soundness violation.

use crate::candidates::{float_candidates, integer_candidates};
use crate::config::OracleConfig;
use crate::error::Result;
use crate::interesting::interesting_bits;
use stamp_infer::{reinterpret, ReinterpretPrecision};
use stamp_lattice::{Constant, PrimitiveType, Stamp};
use std::fmt;
use tracing::{debug, warn};

/// A value the inferred stamp fails to cover
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Candidate source stamp
    pub input: Stamp,
    /// Value of the source type inside `input`
    pub value: Constant,
    /// Raw bit pattern shared by both interpretations
    pub raw: u64,
    /// Inferred stamp missing the reinterpreted value
    pub result: Stamp,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "value {} (0x{:x}) is in input stamp, but not in result stamp ({})",
            self.value, self.raw, self.result
        )
    }
}

/// Outcome of checking one candidate
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    /// Inferred stamp for the candidate
    pub result: Stamp,
    /// Values found inside the candidate
    pub checked: u64,
    pub violations: Vec<Violation>,
}

/// Totals over a verification run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OracleReport {
    /// Candidate stamps checked
    pub cases: u64,
    /// Candidate/value pairs where the value was inside the candidate
    pub checked_values: u64,
    pub violations: Vec<Violation>,
}

impl OracleReport {
    pub fn is_sound(&self) -> bool {
        self.violations.is_empty()
    }

    fn record(&mut self, case: CaseResult) {
        self.cases += 1;
        self.checked_values += case.checked;
        self.violations.extend(case.violations);
    }
}

impl fmt::Display for OracleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cases, {} values checked, {} violations",
            self.cases,
            self.checked_values,
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n  {}", violation)?;
        }
        Ok(())
    }
}

/// Reinterpret `input` to `target` and check every raw pattern in `values`
///
/// Each pattern is decoded as the source type; if that value is in `input`,
/// the same pattern decoded as `target` must be in the inferred stamp.
pub fn check_reinterpret(
    input: &Stamp,
    target: PrimitiveType,
    values: &[u64],
    precision: ReinterpretPrecision,
) -> Result<CaseResult> {
    let result = reinterpret(input, target, precision)?;
    let mut case = CaseResult {
        result,
        checked: 0,
        violations: Vec::new(),
    };

    let Some(source_type) = input.primitive_type() else {
        return Ok(case);
    };

    for &raw in values {
        let value = Constant::from_raw_bits(source_type, raw);
        if !input.contains(&value) {
            continue;
        }
        case.checked += 1;
        if !result.contains(&Constant::from_raw_bits(target, raw)) {
            let violation = Violation {
                input: *input,
                value,
                raw,
                result,
            };
            warn!(%input, %violation, "unsound reinterpret");
            case.violations.push(violation);
        }
    }
    Ok(case)
}

/// Check float -> integer inference over every float candidate of a width
pub fn verify_float_to_int(bits: u32, config: &OracleConfig) -> Result<OracleReport> {
    let target = PrimitiveType::integer(bits)?;
    let values = interesting_bits(bits);
    let mut report = OracleReport::default();

    for candidate in float_candidates(bits)? {
        report.record(check_reinterpret(&candidate.into(), target, &values, config.precision)?);
    }

    debug!(bits, precision = ?config.precision, %report, "float to int oracle run");
    Ok(report)
}

/// Check integer -> float inference over every integer candidate of a width
pub fn verify_int_to_float(bits: u32, config: &OracleConfig) -> Result<OracleReport> {
    let target = PrimitiveType::float(bits)?;
    let values = interesting_bits(bits);
    let mut report = OracleReport::default();

    for candidate in integer_candidates(bits)? {
        report.record(check_reinterpret(&candidate.into(), target, &values, config.precision)?);
    }

    debug!(bits, precision = ?config.precision, %report, "int to float oracle run");
    Ok(report)
}

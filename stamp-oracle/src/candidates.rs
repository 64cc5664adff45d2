//! Candidate source stamps built from the interesting values

use crate::error::Result;
use crate::interesting::interesting_bits;
use stamp_lattice::codec::{bits_to_f64, sign_extend, signed_max, signed_min, truncate, width_mask};
use stamp_lattice::{FloatLayout, FloatStamp, IntegerStamp, Kind, StampError};

/// Every ordered pair of non-NaN interesting floats, with and without NaN
///
/// Pairs are ordered by IEEE total order, so `[-0.0, +0.0]` is a candidate
/// but `[+0.0, -0.0]` is not. The NaN-only and empty stamps are included.
pub fn float_candidates(bits: u32) -> Result<Vec<FloatStamp>> {
    let layout = FloatLayout::for_bits(bits).ok_or(StampError::UnsupportedWidth {
        kind: Kind::Float,
        bits,
    })?;

    let mut values: Vec<f64> = interesting_bits(bits)
        .into_iter()
        .filter(|&raw| !layout.is_nan_bits(raw))
        .map(|raw| bits_to_f64(raw, layout))
        .collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let mut candidates = Vec::with_capacity(values.len() * (values.len() + 1) + 2);
    for (i, &lower) in values.iter().enumerate() {
        for &upper in &values[i..] {
            for can_be_nan in [false, true] {
                candidates.push(FloatStamp::new(bits, lower, upper, can_be_nan)?);
            }
        }
    }
    candidates.push(FloatStamp::empty(bits)?);
    candidates.push(FloatStamp::nan_only(bits)?);
    Ok(candidates)
}

/// Every signed-ordered pair of interesting integers, plus known-bit stamps
///
/// Pairs with equal endpoints are the exact constants. Each interesting
/// value also yields a full-range stamp using it as the may-be-set mask and
/// one using it as the must-be-set mask.
pub fn integer_candidates(bits: u32) -> Result<Vec<IntegerStamp>> {
    let mut values: Vec<i64> = interesting_bits(bits)
        .into_iter()
        .map(|raw| sign_extend(raw, bits))
        .collect();
    values.sort_unstable();

    let mut candidates = Vec::with_capacity(values.len() * (values.len() + 5) / 2 + 1);
    for (i, &lower) in values.iter().enumerate() {
        for &upper in &values[i..] {
            candidates.push(IntegerStamp::with_bounds(bits, lower, upper)?);
        }
    }

    let (min, max) = (signed_min(bits), signed_max(bits));
    for &value in &values {
        let raw = truncate(value, bits);
        candidates.push(IntegerStamp::new(bits, min, max, 0, raw)?);
        candidates.push(IntegerStamp::new(bits, min, max, raw, width_mask(bits))?);
    }
    candidates.push(IntegerStamp::empty(bits)?);
    Ok(candidates)
}

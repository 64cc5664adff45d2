//! # Bit Reinterpretation Inference
//!
//! Computes the stamp of a value whose raw bits are read as another kind of
//! the same width (float bits as an integer, or integer bits as a float).
//!
//! Float bit order is sign-magnitude, so numeric order and pattern order only
//! agree within one sign:
//!
//! ```text
//! value:    -Inf ... -1.0 ... -0.0 | +0.0 ... 1.0 ... +Inf   NaN
//! i32 bits: 0xFF800000 -> 0x80000000 | 0x0 -> 0x7F800000     0x7F800001..=0x7FFFFFFF
//!           (signed: rises as value falls)                     0xFF800001..=0xFFFFFFFF
//! ```
//!
//! The source is therefore split into sign, zero and NaN partitions. Each
//! partition maps monotonically through the codec and the per-partition
//! results are joined.

use crate::config::ReinterpretPrecision;
use crate::error::{InferError, Result};
use stamp_lattice::codec::{bits_to_f64, f64_to_bits, sign_extend, truncate};
use stamp_lattice::{FloatLayout, FloatStamp, IntegerStamp, Kind, PrimitiveType, Stamp, StampError};
use tracing::{debug, trace};

/// Stamp of `source` reinterpreted bit-for-bit as `target`
///
/// Source and target must have the same width. Reinterpreting to the same
/// kind returns the source unchanged; the unreachable stamp stays
/// unreachable.
pub fn reinterpret(source: &Stamp, target: PrimitiveType, precision: ReinterpretPrecision) -> Result<Stamp> {
    let source_type = match source.primitive_type() {
        Some(ty) => ty,
        None => return Ok(Stamp::Empty),
    };
    if source_type.bits() != target.bits() {
        return Err(InferError::UnsupportedReinterpret {
            input: source_type.to_string(),
            target,
        });
    }

    match (source, target.kind()) {
        (Stamp::Float(s), Kind::Integer) => Ok(Stamp::Integer(float_to_int(s, precision)?)),
        (Stamp::Integer(s), Kind::Float) => Ok(Stamp::Float(int_to_float(s, precision)?)),
        _ => Ok(*source),
    }
}

// ============================================================================
// Float -> Integer
// ============================================================================

/// Integer stamp covering the raw bits of every value in `source`
pub fn float_to_int(source: &FloatStamp, precision: ReinterpretPrecision) -> Result<IntegerStamp> {
    let bits = source.bits();
    let unrestricted = IntegerStamp::unrestricted(bits)?;
    if source.is_empty() {
        return Ok(unrestricted.to_empty());
    }

    if precision == ReinterpretPrecision::Conservative
        && (source.can_be_nan() || !source.is_finite() || source.contains_zero())
    {
        debug!(%source, "widening float reinterpret to unrestricted");
        return Ok(unrestricted);
    }

    let mut result = unrestricted.to_empty();
    for (first, last) in float_bit_ranges(source) {
        let a = sign_extend(first, bits);
        let b = sign_extend(last, bits);
        let part = IntegerStamp::with_bounds(bits, a.min(b), a.max(b))?;
        trace!(first = format_args!("{:#x}", first), last = format_args!("{:#x}", last), %part, "float bit partition");
        result = result.join(&part)?;
    }
    Ok(result)
}

/// Raw pattern ranges (inclusive, unordered endpoints) covering `source`
fn float_bit_ranges(source: &FloatStamp) -> Vec<(u64, u64)> {
    let layout = source.layout();
    let mut ranges = Vec::with_capacity(6);

    if source.has_numeric_range() {
        let lower = source.lower_bound();
        let upper = source.upper_bound();

        if upper > 0.0 {
            let first = if lower > 0.0 {
                f64_to_bits(lower, layout)
            } else {
                layout.min_subnormal()
            };
            ranges.push((first, f64_to_bits(upper, layout)));
        }

        if lower < 0.0 {
            let nearest_zero = if upper < 0.0 {
                f64_to_bits(upper, layout)
            } else {
                layout.sign_mask() | layout.min_subnormal()
            };
            ranges.push((nearest_zero, f64_to_bits(lower, layout)));
        }

        // Both encodings, whichever zero the bounds were written with
        if lower <= 0.0 && upper >= 0.0 {
            ranges.push((layout.positive_zero(), layout.positive_zero()));
            ranges.push((layout.negative_zero(), layout.negative_zero()));
        }
    }

    if source.can_be_nan() {
        let exp = layout.exponent_mask();
        let mantissa = layout.mantissa_mask();
        let sign = layout.sign_mask();
        ranges.push((exp | 1, exp | mantissa));
        ranges.push((sign | exp | 1, sign | exp | mantissa));
    }

    ranges
}

// ============================================================================
// Integer -> Float
// ============================================================================

/// Float stamp covering every value whose raw bits lie in `source`
///
/// Float bounds are numeric, so a result range `[0.0, 0.0]` also contains
/// `-0.0`: the all-zero pattern maps to exactly `+0.0` only up to numeric
/// equality.
pub fn int_to_float(source: &IntegerStamp, precision: ReinterpretPrecision) -> Result<FloatStamp> {
    let bits = source.bits();
    let layout = FloatLayout::for_bits(bits).ok_or(StampError::UnsupportedWidth {
        kind: Kind::Float,
        bits,
    })?;
    let empty = FloatStamp::empty(bits)?;
    if source.is_empty() {
        return Ok(empty);
    }

    if precision == ReinterpretPrecision::Conservative && !source.is_constant() {
        debug!(%source, "widening integer reinterpret to unrestricted");
        return FloatStamp::unrestricted(bits).map_err(Into::into);
    }

    let lower = source.lower_bound();
    let upper = source.upper_bound();
    let mut result = empty;

    // Non-negative patterns: +0.0 up to +Inf, then positive NaNs
    if upper >= 0 {
        let first = truncate(lower.max(0), bits);
        let last = truncate(upper, bits);
        let part = magnitude_stamp(layout, first, last, false)?;
        trace!(%part, "non-negative integer partition");
        result = result.join(&part)?;
    }

    // Negative patterns: -0.0 down to -Inf, then negative NaNs
    if lower < 0 {
        let first = layout.magnitude(truncate(lower, bits));
        let last = layout.magnitude(truncate(upper.min(-1), bits));
        let part = magnitude_stamp(layout, first, last, true)?;
        trace!(%part, "negative integer partition");
        result = result.join(&part)?;
    }

    Ok(result)
}

/// Floats whose magnitude patterns lie in `[first, last]`, with the given sign
fn magnitude_stamp(layout: FloatLayout, first: u64, last: u64, negative: bool) -> Result<FloatStamp> {
    let infinity = layout.positive_infinity();
    let can_be_nan = last > infinity;
    if first > infinity {
        return Ok(FloatStamp::new(layout.bits, f64::NAN, f64::NAN, can_be_nan)?);
    }

    let smallest = bits_to_f64(first, layout);
    let largest = bits_to_f64(last.min(infinity), layout);
    let (lower, upper) = if negative {
        (-largest, -smallest)
    } else {
        (smallest, largest)
    };
    Ok(FloatStamp::new(layout.bits, lower, upper, can_be_nan)?)
}

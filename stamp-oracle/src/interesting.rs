//! # Interesting Values
//!
//! A fixed table of raw bit patterns per width that sit on the boundaries
//! stamp inference has to get right: sign flips, width limits, single bits,
//! and for float widths the zero, infinity, subnormal and NaN encodings.

use stamp_lattice::codec::{signed_max, signed_min, truncate, width_mask};
use stamp_lattice::FloatLayout;
use std::collections::BTreeSet;

/// Sorted, deduplicated raw patterns for a width (zero-extended into `u64`)
pub fn interesting_bits(bits: u32) -> Vec<u64> {
    let mask = width_mask(bits);
    let mut set = BTreeSet::new();

    for value in [0, -1, 1, 2, signed_min(bits), signed_max(bits)] {
        set.insert(truncate(value, bits));
    }
    set.insert(truncate(signed_min(bits).wrapping_add(1), bits));
    set.insert(truncate(signed_max(bits).wrapping_sub(1), bits));

    for bit in 0..bits {
        set.insert(1u64 << bit);
    }

    if let Some(layout) = FloatLayout::for_bits(bits) {
        set.extend(float_patterns(layout));
    }

    set.into_iter().map(|raw| raw & mask).collect()
}

fn float_patterns(layout: FloatLayout) -> Vec<u64> {
    let sign = layout.sign_mask();
    let exponent = layout.exponent_mask();
    let quiet = layout.canonical_nan();

    let magnitudes = [
        layout.positive_zero(),
        layout.one(),
        layout.positive_infinity(),
        layout.min_subnormal(),
        layout.max_subnormal(),
        layout.min_normal(),
        layout.max_finite(),
        layout.next_up(layout.one()),
    ];

    let mut patterns: Vec<u64> = magnitudes.iter().flat_map(|&m| [m, m | sign]).collect();
    patterns.extend([
        quiet,
        quiet | sign,
        // signalling
        exponent | 1,
        exponent | 1 | sign,
        // max payload
        exponent | layout.mantissa_mask(),
        exponent | layout.mantissa_mask() | sign,
    ]);
    patterns
}

//! # IEEE-754 Bit-Pattern Codec
//!
//! Pure conversions between floating-point values and their raw bit patterns,
//! plus the field layout (sign, biased exponent, mantissa) the stamp code
//! needs to reason about bit-level reinterpretation.
//!
//! ## Layout (binary32)
//!
//! ```text
//! [sign:1][exponent:8][mantissa:23]
//! ```
//!
//! Raw patterns are carried as `u64` regardless of width; only the low
//! `bits` bits are meaningful. NaN round-trips are bit-exact: every NaN
//! encoding survives `from_raw_bits` followed by `to_raw_bits`.

// ============================================================================
// Width Helpers
// ============================================================================

/// All-ones mask for the low `bits` bits
#[inline]
pub const fn width_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Sign-extend the low `bits` bits of `raw` to a full `i64`
#[inline]
pub const fn sign_extend(raw: u64, bits: u32) -> i64 {
    if bits >= 64 {
        raw as i64
    } else {
        let shift = 64 - bits;
        ((raw << shift) as i64) >> shift
    }
}

/// Truncate a signed value to its low `bits` bits
#[inline]
pub const fn truncate(value: i64, bits: u32) -> u64 {
    (value as u64) & width_mask(bits)
}

/// Smallest signed value representable in `bits` bits
#[inline]
pub const fn signed_min(bits: u32) -> i64 {
    if bits >= 64 {
        i64::MIN
    } else {
        -(1i64 << (bits - 1))
    }
}

/// Largest signed value representable in `bits` bits
#[inline]
pub const fn signed_max(bits: u32) -> i64 {
    if bits >= 64 {
        i64::MAX
    } else {
        (1i64 << (bits - 1)) - 1
    }
}

// ============================================================================
// Field Layout
// ============================================================================

/// Field layout of an IEEE-754 binary format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatLayout {
    /// Total width in bits
    pub bits: u32,
    /// Biased exponent width
    pub exponent_bits: u32,
    /// Stored mantissa (fraction) width
    pub mantissa_bits: u32,
}

/// Decomposed fields of a raw float pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatFields {
    pub sign: bool,
    pub exponent: u64,
    pub mantissa: u64,
}

impl FloatLayout {
    /// binary32
    pub const SINGLE: Self = Self {
        bits: 32,
        exponent_bits: 8,
        mantissa_bits: 23,
    };

    /// binary64
    pub const DOUBLE: Self = Self {
        bits: 64,
        exponent_bits: 11,
        mantissa_bits: 52,
    };

    /// Layout for a float width, if the width is supported
    pub const fn for_bits(bits: u32) -> Option<Self> {
        match bits {
            32 => Some(Self::SINGLE),
            64 => Some(Self::DOUBLE),
            _ => None,
        }
    }

    #[inline]
    pub const fn width_mask(&self) -> u64 {
        width_mask(self.bits)
    }

    #[inline]
    pub const fn sign_mask(&self) -> u64 {
        1u64 << (self.bits - 1)
    }

    #[inline]
    pub const fn exponent_mask(&self) -> u64 {
        ((1u64 << self.exponent_bits) - 1) << self.mantissa_bits
    }

    #[inline]
    pub const fn mantissa_mask(&self) -> u64 {
        (1u64 << self.mantissa_bits) - 1
    }

    /// Exponent bias (127 for binary32, 1023 for binary64)
    #[inline]
    pub const fn exponent_bias(&self) -> u64 {
        (1u64 << (self.exponent_bits - 1)) - 1
    }

    // ========== Special Patterns ==========

    #[inline]
    pub const fn positive_zero(&self) -> u64 {
        0
    }

    #[inline]
    pub const fn negative_zero(&self) -> u64 {
        self.sign_mask()
    }

    #[inline]
    pub const fn positive_infinity(&self) -> u64 {
        self.exponent_mask()
    }

    #[inline]
    pub const fn negative_infinity(&self) -> u64 {
        self.sign_mask() | self.exponent_mask()
    }

    /// Quiet NaN with an empty payload
    #[inline]
    pub const fn canonical_nan(&self) -> u64 {
        self.exponent_mask() | (1u64 << (self.mantissa_bits - 1))
    }

    /// Pattern of `1.0`
    #[inline]
    pub const fn one(&self) -> u64 {
        self.exponent_bias() << self.mantissa_bits
    }

    #[inline]
    pub const fn min_subnormal(&self) -> u64 {
        1
    }

    #[inline]
    pub const fn max_subnormal(&self) -> u64 {
        self.mantissa_mask()
    }

    #[inline]
    pub const fn min_normal(&self) -> u64 {
        1u64 << self.mantissa_bits
    }

    #[inline]
    pub const fn max_finite(&self) -> u64 {
        self.exponent_mask() - 1
    }

    // ========== Classification ==========

    /// Exponent all ones and non-zero mantissa (either sign)
    #[inline]
    pub const fn is_nan_bits(&self, raw: u64) -> bool {
        let exp = self.exponent_mask();
        (raw & exp) == exp && (raw & self.mantissa_mask()) != 0
    }

    #[inline]
    pub const fn is_infinite_bits(&self, raw: u64) -> bool {
        (raw & !self.sign_mask() & self.width_mask()) == self.exponent_mask()
    }

    #[inline]
    pub const fn is_negative_bits(&self, raw: u64) -> bool {
        (raw & self.sign_mask()) != 0
    }

    /// Pattern with the sign bit cleared
    #[inline]
    pub const fn magnitude(&self, raw: u64) -> u64 {
        raw & !self.sign_mask() & self.width_mask()
    }

    pub const fn decompose(&self, raw: u64) -> FloatFields {
        FloatFields {
            sign: self.is_negative_bits(raw),
            exponent: (raw & self.exponent_mask()) >> self.mantissa_bits,
            mantissa: raw & self.mantissa_mask(),
        }
    }

    pub const fn compose(&self, fields: FloatFields) -> u64 {
        let sign = if fields.sign { self.sign_mask() } else { 0 };
        sign | ((fields.exponent << self.mantissa_bits) & self.exponent_mask())
            | (fields.mantissa & self.mantissa_mask())
    }

    // ========== Stepping ==========

    /// Next pattern toward positive infinity (NaN and +Inf are fixed points)
    pub const fn next_up(&self, raw: u64) -> u64 {
        if self.is_nan_bits(raw) || raw == self.positive_infinity() {
            return raw;
        }
        if self.magnitude(raw) == 0 {
            return self.min_subnormal();
        }
        if self.is_negative_bits(raw) {
            raw - 1
        } else {
            raw + 1
        }
    }

    /// Next pattern toward negative infinity (NaN and -Inf are fixed points)
    pub const fn next_down(&self, raw: u64) -> u64 {
        if self.is_nan_bits(raw) || raw == self.negative_infinity() {
            return raw;
        }
        if self.magnitude(raw) == 0 {
            return self.sign_mask() | self.min_subnormal();
        }
        if self.is_negative_bits(raw) {
            raw + 1
        } else {
            raw - 1
        }
    }
}

// ============================================================================
// Value <-> Bits
// ============================================================================

/// Native float types with a bit-exact raw encoding
pub trait FloatBits: Copy {
    const LAYOUT: FloatLayout;

    /// Raw bit pattern (zero-extended into a `u64`)
    fn to_raw_bits(self) -> u64;

    /// Value for a raw bit pattern; only the low `LAYOUT.bits` bits are read
    fn from_raw_bits(raw: u64) -> Self;

    /// Exact widening to `f64` (NaN payloads are not preserved)
    fn widen(self) -> f64;
}

impl FloatBits for f32 {
    const LAYOUT: FloatLayout = FloatLayout::SINGLE;

    #[inline]
    fn to_raw_bits(self) -> u64 {
        self.to_bits() as u64
    }

    #[inline]
    fn from_raw_bits(raw: u64) -> Self {
        f32::from_bits(raw as u32)
    }

    #[inline]
    fn widen(self) -> f64 {
        self as f64
    }
}

impl FloatBits for f64 {
    const LAYOUT: FloatLayout = FloatLayout::DOUBLE;

    #[inline]
    fn to_raw_bits(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_raw_bits(raw: u64) -> Self {
        f64::from_bits(raw)
    }

    #[inline]
    fn widen(self) -> f64 {
        self
    }
}

/// Decode a raw pattern of the given layout into an `f64`
///
/// Exact for every non-NaN pattern. NaN patterns decode to some NaN.
pub fn bits_to_f64(raw: u64, layout: FloatLayout) -> f64 {
    if layout.bits == 32 {
        f32::from_raw_bits(raw).widen()
    } else {
        f64::from_raw_bits(raw)
    }
}

/// Encode a value of the given layout into its raw pattern
///
/// For binary32 the value must be representable as `f32`; wider values are
/// rounded to nearest by the conversion.
pub fn f64_to_bits(value: f64, layout: FloatLayout) -> u64 {
    if layout.bits == 32 {
        (value as f32).to_raw_bits()
    } else {
        value.to_raw_bits()
    }
}

/// Largest `f32` value not above `value`
pub fn round_down_to_f32(value: f64) -> f64 {
    if value.is_nan() {
        return value;
    }
    let narrowed = value as f32;
    if (narrowed as f64) > value {
        let layout = FloatLayout::SINGLE;
        bits_to_f64(layout.next_down(narrowed.to_raw_bits()), layout)
    } else {
        narrowed as f64
    }
}

/// Smallest `f32` value not below `value`
pub fn round_up_to_f32(value: f64) -> f64 {
    if value.is_nan() {
        return value;
    }
    let narrowed = value as f32;
    if (narrowed as f64) < value {
        let layout = FloatLayout::SINGLE;
        bits_to_f64(layout.next_up(narrowed.to_raw_bits()), layout)
    } else {
        narrowed as f64
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_f32_bits_bijective(raw in any::<u32>()) {
            let raw = raw as u64;
            prop_assert_eq!(f32::from_raw_bits(raw).to_raw_bits(), raw);
        }

        #[test]
        fn test_f64_bits_bijective(raw in any::<u64>()) {
            prop_assert_eq!(f64::from_raw_bits(raw).to_raw_bits(), raw);
        }

        #[test]
        fn test_non_nan_widening_is_exact(raw in any::<u32>()) {
            let layout = FloatLayout::SINGLE;
            let raw = raw as u64;
            prop_assume!(!layout.is_nan_bits(raw));
            prop_assert_eq!(f64_to_bits(bits_to_f64(raw, layout), layout), raw);
        }

        #[test]
        fn test_next_up_is_strictly_greater(raw in any::<u32>()) {
            let layout = FloatLayout::SINGLE;
            let raw = raw as u64;
            prop_assume!(!layout.is_nan_bits(raw) && raw != layout.positive_infinity());
            let up = layout.next_up(raw);
            prop_assert!(bits_to_f64(up, layout) > bits_to_f64(raw, layout));
        }
    }
}

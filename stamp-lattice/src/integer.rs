//! # Integer Stamps
//!
//! An integer stamp is the reduced product of a signed interval and a
//! known-bits pair:
//!
//! ```text
//! { v | lower <= v <= upper, (v & must) == must, (v & !may) == 0 }
//! ```
//!
//! Construction and `meet` normalize the two components against each other
//! (known bits derived from the interval, interval tightened from the known
//! bits) until neither changes. `join` is the plain componentwise hull.

use crate::codec::{sign_extend, signed_max, signed_min, truncate, width_mask};
use crate::error::{Result, StampError};
use crate::types::Kind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIntegerStamp", into = "RawIntegerStamp")]
pub struct IntegerStamp {
    bits: u32,
    lower: i64,
    upper: i64,
    must_be_set: u64,
    may_be_set: u64,
}

#[derive(Serialize, Deserialize)]
struct RawIntegerStamp {
    bits: u32,
    lower: i64,
    upper: i64,
    must_be_set: u64,
    may_be_set: u64,
}

impl From<IntegerStamp> for RawIntegerStamp {
    fn from(stamp: IntegerStamp) -> Self {
        Self {
            bits: stamp.bits,
            lower: stamp.lower,
            upper: stamp.upper,
            must_be_set: stamp.must_be_set,
            may_be_set: stamp.may_be_set,
        }
    }
}

/// Deserialized stamps are validated and normalized like `IntegerStamp::new`;
/// the canonical empty stamp is the only accepted form with crossed bounds.
impl TryFrom<RawIntegerStamp> for IntegerStamp {
    type Error = StampError;

    fn try_from(raw: RawIntegerStamp) -> Result<Self> {
        check_width(raw.bits)?;
        let empty = Self::empty_of(raw.bits);
        let parts = (raw.lower, raw.upper, raw.must_be_set, raw.may_be_set);
        if parts == (empty.lower, empty.upper, empty.must_be_set, empty.may_be_set) {
            return Ok(empty);
        }
        Self::new(raw.bits, raw.lower, raw.upper, raw.must_be_set, raw.may_be_set)
    }
}

impl IntegerStamp {
    // ========== Construction ==========

    /// Create a stamp from explicit bounds and bit masks
    ///
    /// Bounds are signed values of the given width; masks cover the low
    /// `bits` bits. Fails on crossed bounds or on a must-mask that is not
    /// within the may-mask. Bounds and masks that are consistent on their
    /// own but admit no common value produce the empty stamp.
    pub fn new(bits: u32, lower: i64, upper: i64, must_be_set: u64, may_be_set: u64) -> Result<Self> {
        check_width(bits)?;
        for value in [lower, upper] {
            if value < signed_min(bits) || value > signed_max(bits) {
                return Err(StampError::BoundOutOfRange { value, bits });
            }
        }
        let mask = width_mask(bits);
        for m in [must_be_set, may_be_set] {
            if m & !mask != 0 {
                return Err(StampError::MaskOutOfRange { mask: m, bits });
            }
        }
        if lower > upper {
            return Err(StampError::InvalidBounds {
                lower: lower.to_string(),
                upper: upper.to_string(),
            });
        }
        if must_be_set & !may_be_set != 0 {
            return Err(StampError::ContradictoryMasks {
                must: must_be_set,
                may: may_be_set,
            });
        }
        Ok(Self::normalized(bits, lower, upper, must_be_set, may_be_set))
    }

    /// Stamp constrained by bounds only
    pub fn with_bounds(bits: u32, lower: i64, upper: i64) -> Result<Self> {
        Self::new(bits, lower, upper, 0, width_mask(bits))
    }

    /// Stamp of exactly one value (truncated to the width)
    pub fn constant(bits: u32, value: i64) -> Result<Self> {
        check_width(bits)?;
        let value = sign_extend(truncate(value, bits), bits);
        Ok(Self::normalized(bits, value, value, 0, width_mask(bits)))
    }

    /// Most general stamp of a width
    pub fn unrestricted(bits: u32) -> Result<Self> {
        check_width(bits)?;
        Ok(Self::unrestricted_of(bits))
    }

    /// Stamp with no values
    pub fn empty(bits: u32) -> Result<Self> {
        check_width(bits)?;
        Ok(Self::empty_of(bits))
    }

    const fn unrestricted_of(bits: u32) -> Self {
        Self {
            bits,
            lower: signed_min(bits),
            upper: signed_max(bits),
            must_be_set: 0,
            may_be_set: width_mask(bits),
        }
    }

    const fn empty_of(bits: u32) -> Self {
        Self {
            bits,
            lower: signed_max(bits),
            upper: signed_min(bits),
            must_be_set: width_mask(bits),
            may_be_set: 0,
        }
    }

    /// Empty stamp of the same width
    #[inline]
    pub const fn to_empty(&self) -> Self {
        Self::empty_of(self.bits)
    }

    /// Unrestricted stamp of the same width
    #[inline]
    pub const fn to_unrestricted(&self) -> Self {
        Self::unrestricted_of(self.bits)
    }

    /// Tighten bounds and masks against each other until stable
    fn normalized(bits: u32, lower: i64, upper: i64, must: u64, may: u64) -> Self {
        let mut current = (lower, upper, must, may);
        loop {
            let (lower, upper, must, may) = current;
            if lower > upper || must & !may != 0 {
                return Self::empty_of(bits);
            }

            let (bound_must, bound_may) = masks_for_bounds(bits, lower, upper);
            let must = must | bound_must;
            let may = may & bound_may;
            if must & !may != 0 {
                return Self::empty_of(bits);
            }

            let lower = lower.max(min_for_masks(bits, must, may));
            let upper = upper.min(max_for_masks(bits, must, may));

            let next = (lower, upper, must, may);
            if next == current {
                return Self {
                    bits,
                    lower,
                    upper,
                    must_be_set: must,
                    may_be_set: may,
                };
            }
            current = next;
        }
    }

    // ========== Accessors ==========

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    #[inline]
    pub const fn lower_bound(&self) -> i64 {
        self.lower
    }

    #[inline]
    pub const fn upper_bound(&self) -> i64 {
        self.upper
    }

    /// Bits set in every contained value
    #[inline]
    pub const fn must_be_set(&self) -> u64 {
        self.must_be_set
    }

    /// Bits set in at least one contained value (may be conservative)
    #[inline]
    pub const fn may_be_set(&self) -> u64 {
        self.may_be_set
    }

    #[inline]
    pub const fn mask(&self) -> u64 {
        width_mask(self.bits)
    }

    // ========== Lattice ==========

    pub fn contains(&self, value: i64) -> bool {
        if value < signed_min(self.bits) || value > signed_max(self.bits) {
            return false;
        }
        let raw = truncate(value, self.bits);
        self.lower <= value
            && value <= self.upper
            && raw & self.must_be_set == self.must_be_set
            && raw & !self.may_be_set == 0
    }

    pub const fn is_empty(&self) -> bool {
        self.lower > self.upper || self.must_be_set & !self.may_be_set != 0
    }

    pub fn is_unrestricted(&self) -> bool {
        *self == self.to_unrestricted()
    }

    /// Least upper bound: hull of the bounds, common must bits, any may bits
    pub fn join(&self, other: &Self) -> Result<Self> {
        self.check_same_width(other)?;
        Ok(Self {
            bits: self.bits,
            lower: self.lower.min(other.lower),
            upper: self.upper.max(other.upper),
            must_be_set: self.must_be_set & other.must_be_set,
            may_be_set: self.may_be_set | other.may_be_set,
        })
    }

    /// Greatest lower bound: intersection of bounds and known bits
    pub fn meet(&self, other: &Self) -> Result<Self> {
        self.check_same_width(other)?;
        Ok(Self::normalized(
            self.bits,
            self.lower.max(other.lower),
            self.upper.min(other.upper),
            self.must_be_set | other.must_be_set,
            self.may_be_set & other.may_be_set,
        ))
    }

    /// `self ⊑ other`, i.e. `join(self, other) == other`
    ///
    /// Stamps of different widths are never ordered.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.bits == other.bits
            && self.lower >= other.lower
            && self.upper <= other.upper
            && self.must_be_set & other.must_be_set == other.must_be_set
            && self.may_be_set & !other.may_be_set == 0
    }

    fn check_same_width(&self, other: &Self) -> Result<()> {
        if self.bits != other.bits {
            return Err(StampError::WidthMismatch {
                left: self.bits,
                right: other.bits,
            });
        }
        Ok(())
    }

    // ========== Queries ==========

    pub fn as_constant(&self) -> Option<i64> {
        if !self.is_empty() && self.lower == self.upper {
            Some(self.lower)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.as_constant().is_some()
    }

    #[inline]
    pub const fn is_non_negative(&self) -> bool {
        self.lower >= 0
    }

    #[inline]
    pub const fn is_strictly_positive(&self) -> bool {
        self.lower > 0
    }

    #[inline]
    pub const fn is_strictly_negative(&self) -> bool {
        self.upper < 0
    }

    #[inline]
    pub fn can_be_zero(&self) -> bool {
        self.contains(0)
    }
}

impl fmt::Display for IntegerStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}", self.bits)?;
        if self.is_empty() {
            return write!(f, " <empty>");
        }
        if self.lower == self.upper {
            write!(f, " [{}]", self.lower)?;
        } else {
            write!(f, " [{} - {}]", self.lower, self.upper)?;
        }
        if self.must_be_set != 0 {
            write!(f, " must={:#x}", self.must_be_set)?;
        }
        if self.may_be_set != self.mask() {
            write!(f, " may={:#x}", self.may_be_set)?;
        }
        Ok(())
    }
}

// ============================================================================
// Bound <-> Mask Derivation
// ============================================================================

fn check_width(bits: u32) -> Result<()> {
    if !Kind::Integer.supports_width(bits) {
        return Err(StampError::UnsupportedWidth {
            kind: Kind::Integer,
            bits,
        });
    }
    Ok(())
}

/// Known bits shared by every value in `[lower, upper]`
///
/// When both bounds have the same sign the range is contiguous in unsigned
/// order, so all values share the common high prefix of the two bounds.
fn masks_for_bounds(bits: u32, lower: i64, upper: i64) -> (u64, u64) {
    let mask = width_mask(bits);
    if (lower < 0) != (upper < 0) {
        return (0, mask);
    }
    let lo = truncate(lower, bits);
    let hi = truncate(upper, bits);
    let diff = lo ^ hi;
    if diff == 0 {
        return (lo, lo);
    }
    let varying = u64::MAX >> diff.leading_zeros();
    let prefix = lo & mask & !varying;
    (prefix, prefix | (varying & mask))
}

/// Smallest signed value compatible with the masks
fn min_for_masks(bits: u32, must: u64, may: u64) -> i64 {
    let sign = 1u64 << (bits - 1);
    if may & sign == 0 {
        must as i64
    } else {
        sign_extend(must | sign, bits)
    }
}

/// Largest signed value compatible with the masks
fn max_for_masks(bits: u32, must: u64, may: u64) -> i64 {
    let sign = 1u64 << (bits - 1);
    if must & sign != 0 {
        sign_extend(may, bits)
    } else {
        (may & !sign & width_mask(bits)) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_zero() {
        let s = IntegerStamp::new(32, 0, 0, 0, 0).unwrap();
        assert!(s.contains(0));
        assert!(!s.contains(1));
        assert!(!s.contains(-1));
        assert_eq!(s.as_constant(), Some(0));
        assert!(!s.is_empty());
    }

    #[test]
    fn test_constant_derives_masks() {
        let s = IntegerStamp::constant(8, 5).unwrap();
        assert_eq!(s.must_be_set(), 5);
        assert_eq!(s.may_be_set(), 5);
        assert_eq!(s, IntegerStamp::new(8, 5, 5, 0, 0xFF).unwrap());
    }

    #[test]
    fn test_constant_truncates() {
        let s = IntegerStamp::constant(8, 0x1FF).unwrap();
        assert_eq!(s.as_constant(), Some(-1));
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            IntegerStamp::new(32, 5, 3, 0, u32::MAX as u64),
            Err(StampError::InvalidBounds { .. })
        ));
        assert!(matches!(
            IntegerStamp::new(32, 0, 3, 0b11, 0b01),
            Err(StampError::ContradictoryMasks { must: 0b11, may: 0b01 })
        ));
        assert!(matches!(
            IntegerStamp::new(8, 0, 300, 0, 0xFF),
            Err(StampError::BoundOutOfRange { value: 300, bits: 8 })
        ));
        assert!(matches!(
            IntegerStamp::new(8, 0, 1, 0, 0x1FF),
            Err(StampError::MaskOutOfRange { .. })
        ));
        assert!(matches!(
            IntegerStamp::unrestricted(24),
            Err(StampError::UnsupportedWidth { bits: 24, .. })
        ));
    }

    #[test]
    fn test_unsatisfiable_masks_collapse_to_empty() {
        let s = IntegerStamp::new(32, 1, 1, 0, 0).unwrap();
        assert!(s.is_empty());
        assert_eq!(s, IntegerStamp::empty(32).unwrap());
    }

    #[test]
    fn test_same_sign_range_derives_prefix() {
        // 0x10..=0x1F share the prefix 0x10
        let s = IntegerStamp::with_bounds(32, 0x10, 0x1F).unwrap();
        assert_eq!(s.must_be_set(), 0x10);
        assert_eq!(s.may_be_set(), 0x1F);

        let neg = IntegerStamp::with_bounds(8, -4, -1).unwrap();
        assert_eq!(neg.must_be_set(), 0xFC);
        assert_eq!(neg.may_be_set(), 0xFF);
    }

    #[test]
    fn test_sign_crossing_range_keeps_all_bits() {
        let s = IntegerStamp::with_bounds(16, -1, 1).unwrap();
        assert_eq!(s.must_be_set(), 0);
        assert_eq!(s.may_be_set(), 0xFFFF);
    }

    #[test]
    fn test_masks_tighten_bounds() {
        // sign bit can never be set: lower bound lifts to 0
        let s = IntegerStamp::new(8, -100, 100, 0, 0x7F).unwrap();
        assert_eq!(s.lower_bound(), 0);
        assert_eq!(s.upper_bound(), 100);
    }

    #[test]
    fn test_contains_checks_masks() {
        let s = IntegerStamp::new(32, 0, 100, 1, 0xFF).unwrap();
        assert!(s.contains(1));
        assert!(s.contains(99));
        assert!(!s.contains(2)); // must-bit missing
        assert!(!s.contains(101));
        assert!(!s.contains(1 << 40)); // outside width
    }

    #[test]
    fn test_join() {
        let a = IntegerStamp::constant(32, 1).unwrap();
        let b = IntegerStamp::constant(32, 3).unwrap();
        let j = a.join(&b).unwrap();
        assert_eq!(j.lower_bound(), 1);
        assert_eq!(j.upper_bound(), 3);
        assert_eq!(j.must_be_set(), 1);
        assert!(j.contains(3));
        assert!(!j.contains(2));
    }

    #[test]
    fn test_meet_crossed_is_empty() {
        let a = IntegerStamp::with_bounds(32, 0, 10).unwrap();
        let b = IntegerStamp::with_bounds(32, 20, 30).unwrap();
        assert!(a.meet(&b).unwrap().is_empty());
    }

    #[test]
    fn test_empty_is_join_identity() {
        let a = IntegerStamp::with_bounds(64, -7, 42).unwrap();
        let e = IntegerStamp::empty(64).unwrap();
        assert_eq!(a.join(&e).unwrap(), a);
        assert_eq!(e.join(&a).unwrap(), a);
        assert_eq!(a.meet(&e).unwrap(), e);
    }

    #[test]
    fn test_width_mismatch() {
        let a = IntegerStamp::unrestricted(32).unwrap();
        let b = IntegerStamp::unrestricted(64).unwrap();
        assert!(matches!(
            a.join(&b),
            Err(StampError::WidthMismatch { left: 32, right: 64 })
        ));
        assert!(a.meet(&b).is_err());
        assert!(!a.is_subset_of(&b));
    }

    #[test]
    fn test_unrestricted() {
        let s = IntegerStamp::unrestricted(8).unwrap();
        assert!(s.is_unrestricted());
        assert_eq!(s.lower_bound(), -128);
        assert_eq!(s.upper_bound(), 127);
        assert!((-128..=127).all(|v| s.contains(v)));
    }

    #[test]
    fn test_queries() {
        let s = IntegerStamp::with_bounds(32, 1, 9).unwrap();
        assert!(s.is_strictly_positive());
        assert!(s.is_non_negative());
        assert!(!s.can_be_zero());
        assert!(IntegerStamp::with_bounds(32, -9, -1).unwrap().is_strictly_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(IntegerStamp::constant(32, 7).unwrap().to_string(), "i32 [7] must=0x7 may=0x7");
        assert_eq!(IntegerStamp::unrestricted(8).unwrap().to_string(), "i8 [-128 - 127]");
        assert_eq!(IntegerStamp::empty(16).unwrap().to_string(), "i16 <empty>");
    }
}

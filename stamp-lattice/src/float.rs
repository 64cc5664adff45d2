//! # Float Stamps
//!
//! A float stamp is a numeric interval plus a NaN flag:
//!
//! ```text
//! { v | lower <= v <= upper }  ∪  { NaN | can_be_nan }
//! ```
//!
//! Bounds compare numerically, so `-0.0` and `+0.0` are the same bound and a
//! range containing zero contains both zero encodings. NaN bounds mean the
//! numeric part is empty: `(NaN, NaN, true)` is "some NaN" and
//! `(NaN, NaN, false)` is the empty float stamp.

use crate::codec::{round_down_to_f32, round_up_to_f32, FloatLayout};
use crate::error::{Result, StampError};
use crate::types::Kind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawFloatStamp", into = "RawFloatStamp")]
pub struct FloatStamp {
    bits: u32,
    lower: f64,
    upper: f64,
    can_be_nan: bool,
}

/// Serialized form; an empty numeric part has no bounds
#[derive(Serialize, Deserialize)]
struct RawFloatStamp {
    bits: u32,
    lower: Option<f64>,
    upper: Option<f64>,
    can_be_nan: bool,
}

impl From<FloatStamp> for RawFloatStamp {
    fn from(stamp: FloatStamp) -> Self {
        let bound = |v: f64| (!v.is_nan()).then_some(v);
        Self {
            bits: stamp.bits,
            lower: bound(stamp.lower),
            upper: bound(stamp.upper),
            can_be_nan: stamp.can_be_nan,
        }
    }
}

impl TryFrom<RawFloatStamp> for FloatStamp {
    type Error = StampError;

    fn try_from(raw: RawFloatStamp) -> Result<Self> {
        let lower = raw.lower.unwrap_or(f64::NAN);
        let upper = raw.upper.unwrap_or(f64::NAN);
        Self::new(raw.bits, lower, upper, raw.can_be_nan)
    }
}

impl FloatStamp {
    // ========== Construction ==========

    /// Create a stamp from explicit bounds
    ///
    /// Both bounds must be numeric (and ordered) or both NaN. For 32-bit
    /// stamps the bounds are rounded outward to `f32` values.
    pub fn new(bits: u32, lower: f64, upper: f64, can_be_nan: bool) -> Result<Self> {
        check_width(bits)?;
        if lower.is_nan() != upper.is_nan() {
            return Err(StampError::NanBound { lower, upper });
        }
        if lower > upper {
            return Err(StampError::InvalidBounds {
                lower: format!("{:?}", lower),
                upper: format!("{:?}", upper),
            });
        }
        let (lower, upper) = if bits == 32 {
            (round_down_to_f32(lower), round_up_to_f32(upper))
        } else {
            (lower, upper)
        };
        Ok(Self::from_parts(bits, lower, upper, can_be_nan))
    }

    /// Stamp of exactly one value (NaN gives the NaN-only stamp)
    pub fn constant(bits: u32, value: f64) -> Result<Self> {
        if value.is_nan() {
            return Self::nan_only(bits);
        }
        Self::new(bits, value, value, false)
    }

    /// Every value including NaN
    pub fn unrestricted(bits: u32) -> Result<Self> {
        check_width(bits)?;
        Ok(Self::from_parts(bits, f64::NEG_INFINITY, f64::INFINITY, true))
    }

    /// No value at all
    pub fn empty(bits: u32) -> Result<Self> {
        check_width(bits)?;
        Ok(Self::from_parts(bits, f64::NAN, f64::NAN, false))
    }

    /// Definitely NaN, any encoding
    pub fn nan_only(bits: u32) -> Result<Self> {
        check_width(bits)?;
        Ok(Self::from_parts(bits, f64::NAN, f64::NAN, true))
    }

    #[inline]
    pub fn to_empty(&self) -> Self {
        Self::from_parts(self.bits, f64::NAN, f64::NAN, false)
    }

    #[inline]
    pub fn to_unrestricted(&self) -> Self {
        Self::from_parts(self.bits, f64::NEG_INFINITY, f64::INFINITY, true)
    }

    /// Canonical form: an empty numeric part is always `(NaN, NaN)`
    fn from_parts(bits: u32, lower: f64, upper: f64, can_be_nan: bool) -> Self {
        let (lower, upper) = if lower.is_nan() || upper.is_nan() || lower > upper {
            (f64::NAN, f64::NAN)
        } else {
            (lower, upper)
        };
        Self {
            bits,
            lower,
            upper,
            can_be_nan,
        }
    }

    // ========== Accessors ==========

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    #[inline]
    pub const fn lower_bound(&self) -> f64 {
        self.lower
    }

    #[inline]
    pub const fn upper_bound(&self) -> f64 {
        self.upper
    }

    #[inline]
    pub const fn can_be_nan(&self) -> bool {
        self.can_be_nan
    }

    pub fn layout(&self) -> FloatLayout {
        if self.bits == 32 {
            FloatLayout::SINGLE
        } else {
            FloatLayout::DOUBLE
        }
    }

    /// Whether any non-NaN value is contained
    #[inline]
    pub fn has_numeric_range(&self) -> bool {
        !self.lower.is_nan()
    }

    // ========== Lattice ==========

    pub fn contains(&self, value: f64) -> bool {
        if value.is_nan() {
            self.can_be_nan
        } else {
            self.lower <= value && value <= self.upper
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.has_numeric_range() && !self.can_be_nan
    }

    pub fn is_unrestricted(&self) -> bool {
        self.lower == f64::NEG_INFINITY && self.upper == f64::INFINITY && self.can_be_nan
    }

    pub fn join(&self, other: &Self) -> Result<Self> {
        self.check_same_width(other)?;
        let (lower, upper) = match (self.has_numeric_range(), other.has_numeric_range()) {
            (false, _) => (other.lower, other.upper),
            (_, false) => (self.lower, self.upper),
            _ => (self.lower.min(other.lower), self.upper.max(other.upper)),
        };
        Ok(Self::from_parts(
            self.bits,
            lower,
            upper,
            self.can_be_nan || other.can_be_nan,
        ))
    }

    pub fn meet(&self, other: &Self) -> Result<Self> {
        self.check_same_width(other)?;
        let (lower, upper) = if self.has_numeric_range() && other.has_numeric_range() {
            (self.lower.max(other.lower), self.upper.min(other.upper))
        } else {
            (f64::NAN, f64::NAN)
        };
        Ok(Self::from_parts(
            self.bits,
            lower,
            upper,
            self.can_be_nan && other.can_be_nan,
        ))
    }

    /// `self ⊑ other`; stamps of different widths are never ordered
    pub fn is_subset_of(&self, other: &Self) -> bool {
        if self.bits != other.bits || (self.can_be_nan && !other.can_be_nan) {
            return false;
        }
        if !self.has_numeric_range() {
            return true;
        }
        other.has_numeric_range() && self.lower >= other.lower && self.upper <= other.upper
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

    #[inline]
    pub fn is_non_nan(&self) -> bool {
        !self.can_be_nan
    }

    #[inline]
    pub fn is_nan_only(&self) -> bool {
        !self.has_numeric_range() && self.can_be_nan
    }

    #[inline]
    pub fn contains_zero(&self) -> bool {
        self.contains(0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.has_numeric_range() && self.lower.is_finite() && self.upper.is_finite()
    }

    /// The single value of this stamp
    ///
    /// A zero range carries no sign, so it is not a constant.
    pub fn as_constant(&self) -> Option<f64> {
        if self.has_numeric_range() && !self.can_be_nan && self.lower == self.upper && self.lower != 0.0 {
            Some(self.lower)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.as_constant().is_some()
    }
}

/// Bounds are equal when numerically equal or both NaN
fn same_bound(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

fn bound_key(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

impl PartialEq for FloatStamp {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
            && self.can_be_nan == other.can_be_nan
            && same_bound(self.lower, other.lower)
            && same_bound(self.upper, other.upper)
    }
}

impl Eq for FloatStamp {}

impl Hash for FloatStamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
        bound_key(self.lower).hash(state);
        bound_key(self.upper).hash(state);
        self.can_be_nan.hash(state);
    }
}

impl fmt::Display for FloatStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.bits)?;
        match (self.has_numeric_range(), self.can_be_nan) {
            (false, false) => write!(f, " <empty>"),
            (false, true) => write!(f, " <nan>"),
            (true, nan) => {
                write!(f, " [{:?} - {:?}]", self.lower, self.upper)?;
                if nan {
                    write!(f, " nan")?;
                }
                Ok(())
            }
        }
    }
}

fn check_width(bits: u32) -> Result<()> {
    if !Kind::Float.supports_width(bits) {
        return Err(StampError::UnsupportedWidth {
            kind: Kind::Float,
            bits,
        });
    }
    Ok(())
}

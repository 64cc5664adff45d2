//! # Primitive Types and Constants
//!
//! The numeric kinds a stamp can describe, and concrete runtime values of
//! those kinds.

use crate::codec::{self, FloatLayout};
use crate::error::{Result, StampError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric kind of a stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Integer,
    Float,
}

impl Kind {
    /// Bit widths this kind supports
    pub const fn supported_widths(self) -> &'static [u32] {
        match self {
            Kind::Integer => &[8, 16, 32, 64],
            Kind::Float => &[32, 64],
        }
    }

    #[inline]
    pub fn supports_width(self, bits: u32) -> bool {
        self.supported_widths().contains(&bits)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Integer => write!(f, "integer"),
            Kind::Float => write!(f, "float"),
        }
    }
}

/// A numeric kind at a fixed bit width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPrimitiveType", into = "RawPrimitiveType")]
pub struct PrimitiveType {
    kind: Kind,
    bits: u32,
}

#[derive(Serialize, Deserialize)]
struct RawPrimitiveType {
    kind: Kind,
    bits: u32,
}

impl From<PrimitiveType> for RawPrimitiveType {
    fn from(ty: PrimitiveType) -> Self {
        Self {
            kind: ty.kind,
            bits: ty.bits,
        }
    }
}

impl TryFrom<RawPrimitiveType> for PrimitiveType {
    type Error = StampError;

    fn try_from(raw: RawPrimitiveType) -> Result<Self> {
        Self::new(raw.kind, raw.bits)
    }
}

impl PrimitiveType {
    pub const I8: Self = Self { kind: Kind::Integer, bits: 8 };
    pub const I16: Self = Self { kind: Kind::Integer, bits: 16 };
    pub const I32: Self = Self { kind: Kind::Integer, bits: 32 };
    pub const I64: Self = Self { kind: Kind::Integer, bits: 64 };
    pub const F32: Self = Self { kind: Kind::Float, bits: 32 };
    pub const F64: Self = Self { kind: Kind::Float, bits: 64 };

    /// Create a type, rejecting widths the kind does not support
    pub fn new(kind: Kind, bits: u32) -> Result<Self> {
        if !kind.supports_width(bits) {
            return Err(StampError::UnsupportedWidth { kind, bits });
        }
        Ok(Self { kind, bits })
    }

    /// Integer type of the given width
    pub fn integer(bits: u32) -> Result<Self> {
        Self::new(Kind::Integer, bits)
    }

    /// Float type of the given width
    pub fn float(bits: u32) -> Result<Self> {
        Self::new(Kind::Float, bits)
    }

    #[inline]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Float layout of a float type
    pub fn float_layout(&self) -> Option<FloatLayout> {
        match self.kind {
            Kind::Float => FloatLayout::for_bits(self.bits),
            Kind::Integer => None,
        }
    }

    /// Same width, other kind (when that width is valid for the kind)
    pub fn with_kind(&self, kind: Kind) -> Result<Self> {
        Self::new(kind, self.bits)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Kind::Integer => write!(f, "i{}", self.bits),
            Kind::Float => write!(f, "f{}", self.bits),
        }
    }
}

/// A concrete runtime value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    /// Integer value, sign-extended from `bits`
    Int { bits: u32, value: i64 },
    /// Float value; 32-bit values are widened exactly
    Float { bits: u32, value: f64 },
}

impl Constant {
    pub fn int(ty: PrimitiveType, value: i64) -> Self {
        Constant::Int {
            bits: ty.bits(),
            value: codec::sign_extend(codec::truncate(value, ty.bits()), ty.bits()),
        }
    }

    pub fn float(ty: PrimitiveType, value: f64) -> Self {
        Constant::Float { bits: ty.bits(), value }
    }

    /// Decode a raw bit pattern as a value of `ty`
    pub fn from_raw_bits(ty: PrimitiveType, raw: u64) -> Self {
        match ty.kind() {
            Kind::Integer => Constant::Int {
                bits: ty.bits(),
                value: codec::sign_extend(raw, ty.bits()),
            },
            Kind::Float => {
                // float types only exist at 32 and 64 bits
                let layout = if ty.bits() == 32 {
                    FloatLayout::SINGLE
                } else {
                    FloatLayout::DOUBLE
                };
                Constant::Float {
                    bits: ty.bits(),
                    value: codec::bits_to_f64(raw & layout.width_mask(), layout),
                }
            }
        }
    }

    /// Raw bit pattern of this value
    ///
    /// NaN floats encode as the canonical quiet NaN since `f64` widening
    /// does not carry the original payload. Fails when `bits` is not a width
    /// of the constant's kind.
    pub fn raw_bits(&self) -> Result<u64> {
        let ty = PrimitiveType::new(self.kind(), self.bits())?;
        match (*self, ty.float_layout()) {
            (Constant::Float { value, .. }, Some(layout)) if value.is_nan() => {
                Ok(layout.canonical_nan())
            }
            (Constant::Float { value, .. }, Some(layout)) => Ok(codec::f64_to_bits(value, layout)),
            (Constant::Int { bits, value }, _) => Ok(codec::truncate(value, bits)),
            (Constant::Float { bits, .. }, None) => Err(StampError::UnsupportedWidth {
                kind: Kind::Float,
                bits,
            }),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Constant::Int { .. } => Kind::Integer,
            Constant::Float { .. } => Kind::Float,
        }
    }

    pub fn bits(&self) -> u32 {
        match *self {
            Constant::Int { bits, .. } | Constant::Float { bits, .. } => bits,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int { bits, value } => write!(f, "{}i{}", value, bits),
            Constant::Float { bits, value } => write!(f, "{:?}f{}", value, bits),
        }
    }
}

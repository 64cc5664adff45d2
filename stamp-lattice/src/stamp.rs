//! # Stamps
//!
//! The closed set of stamp variants and the lattice capability they share.

use crate::error::{Result, StampError};
use crate::float::FloatStamp;
use crate::integer::IntegerStamp;
use crate::types::{Constant, Kind, PrimitiveType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lattice operations shared by every stamp type
pub trait Lattice: Sized + PartialEq {
    /// Least upper bound
    fn join(&self, other: &Self) -> Result<Self>;

    /// Greatest lower bound
    fn meet(&self, other: &Self) -> Result<Self>;

    /// No value is contained
    fn is_empty(&self) -> bool;

    /// `self ⊑ other`
    fn is_subset_of(&self, other: &Self) -> bool;
}

impl Lattice for IntegerStamp {
    fn join(&self, other: &Self) -> Result<Self> {
        IntegerStamp::join(self, other)
    }

    fn meet(&self, other: &Self) -> Result<Self> {
        IntegerStamp::meet(self, other)
    }

    fn is_empty(&self) -> bool {
        IntegerStamp::is_empty(self)
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        IntegerStamp::is_subset_of(self, other)
    }
}

impl Lattice for FloatStamp {
    fn join(&self, other: &Self) -> Result<Self> {
        FloatStamp::join(self, other)
    }

    fn meet(&self, other: &Self) -> Result<Self> {
        FloatStamp::meet(self, other)
    }

    fn is_empty(&self) -> bool {
        FloatStamp::is_empty(self)
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        FloatStamp::is_subset_of(self, other)
    }
}

/// Abstract value of an IR node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stamp {
    Integer(IntegerStamp),
    Float(FloatStamp),
    /// Unreachable: no value of any kind
    Empty,
}

impl Stamp {
    /// Most general stamp of a type
    pub fn unrestricted(ty: PrimitiveType) -> Result<Self> {
        Ok(match ty.kind() {
            Kind::Integer => Stamp::Integer(IntegerStamp::unrestricted(ty.bits())?),
            Kind::Float => Stamp::Float(FloatStamp::unrestricted(ty.bits())?),
        })
    }

    /// Kind-specific empty stamp of a type
    pub fn empty_of(ty: PrimitiveType) -> Result<Self> {
        Ok(match ty.kind() {
            Kind::Integer => Stamp::Integer(IntegerStamp::empty(ty.bits())?),
            Kind::Float => Stamp::Float(FloatStamp::empty(ty.bits())?),
        })
    }

    /// Exact stamp of a constant
    pub fn for_constant(value: Constant) -> Result<Self> {
        Ok(match value {
            Constant::Int { bits, value } => Stamp::Integer(IntegerStamp::constant(bits, value)?),
            Constant::Float { bits, value } => Stamp::Float(FloatStamp::constant(bits, value)?),
        })
    }

    pub fn kind(&self) -> Option<Kind> {
        match self {
            Stamp::Integer(_) => Some(Kind::Integer),
            Stamp::Float(_) => Some(Kind::Float),
            Stamp::Empty => None,
        }
    }

    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self {
            Stamp::Integer(s) => PrimitiveType::integer(s.bits()).ok(),
            Stamp::Float(s) => PrimitiveType::float(s.bits()).ok(),
            Stamp::Empty => None,
        }
    }

    pub fn as_integer(&self) -> Option<&IntegerStamp> {
        match self {
            Stamp::Integer(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&FloatStamp> {
        match self {
            Stamp::Float(s) => Some(s),
            _ => None,
        }
    }

    /// Whether a concrete value of matching kind and width is contained
    pub fn contains(&self, value: &Constant) -> bool {
        match (self, *value) {
            (Stamp::Integer(s), Constant::Int { bits, value }) => s.bits() == bits && s.contains(value),
            (Stamp::Float(s), Constant::Float { bits, value }) => s.bits() == bits && s.contains(value),
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Stamp::Integer(s) => s.is_empty(),
            Stamp::Float(s) => s.is_empty(),
            Stamp::Empty => true,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        match self {
            Stamp::Integer(s) => s.is_unrestricted(),
            Stamp::Float(s) => s.is_unrestricted(),
            Stamp::Empty => false,
        }
    }

    fn incompatible(&self, other: &Self) -> StampError {
        StampError::IncompatibleKinds {
            left: self.to_string(),
            right: other.to_string(),
        }
    }
}

impl Lattice for Stamp {
    fn join(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Stamp::Empty, s) | (s, Stamp::Empty) => Ok(*s),
            (Stamp::Integer(a), Stamp::Integer(b)) => Ok(Stamp::Integer(a.join(b)?)),
            (Stamp::Float(a), Stamp::Float(b)) => Ok(Stamp::Float(a.join(b)?)),
            _ => Err(self.incompatible(other)),
        }
    }

    fn meet(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Stamp::Empty, _) | (_, Stamp::Empty) => Ok(Stamp::Empty),
            (Stamp::Integer(a), Stamp::Integer(b)) => Ok(Stamp::Integer(a.meet(b)?)),
            (Stamp::Float(a), Stamp::Float(b)) => Ok(Stamp::Float(a.meet(b)?)),
            _ => Err(self.incompatible(other)),
        }
    }

    fn is_empty(&self) -> bool {
        Stamp::is_empty(self)
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        match (self, other) {
            (Stamp::Empty, _) => true,
            (_, Stamp::Empty) => false,
            (Stamp::Integer(a), Stamp::Integer(b)) => a.is_subset_of(b),
            (Stamp::Float(a), Stamp::Float(b)) => a.is_subset_of(b),
            _ => false,
        }
    }
}

impl From<IntegerStamp> for Stamp {
    fn from(stamp: IntegerStamp) -> Self {
        Stamp::Integer(stamp)
    }
}

impl From<FloatStamp> for Stamp {
    fn from(stamp: FloatStamp) -> Self {
        Stamp::Float(stamp)
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stamp::Integer(s) => write!(f, "{}", s),
            Stamp::Float(s) => write!(f, "{}", s),
            Stamp::Empty => write!(f, "<unreachable>"),
        }
    }
}

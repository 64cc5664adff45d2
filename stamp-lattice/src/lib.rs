//! # Stamp Lattice
//!
//! Abstract values ("stamps") describing the set of runtime values an IR
//! computation may produce, for integer and IEEE-754 float kinds.
//!
//! ## Key Features
//! - `IntegerStamp`: signed bounds plus known-bits masks (8/16/32/64-bit)
//! - `FloatStamp`: numeric bounds plus NaN possibility (32/64-bit)
//! - `Stamp`: closed enum over both kinds plus the unreachable stamp
//! - Lattice operations: `contains`, `join`, `meet`, `is_empty`, `is_subset_of`
//! - Bit-exact IEEE-754 codec with field layout and special patterns
//!
//! ## Example
//!
//! ```rust
//! use stamp_lattice::{FloatStamp, Lattice, Stamp};
//!
//! let a = Stamp::from(FloatStamp::new(32, 1.0, 1.0, false).unwrap());
//! let b = Stamp::from(FloatStamp::new(32, 3.0, 3.0, false).unwrap());
//! let joined = a.join(&b).unwrap();
//! assert!(joined.as_float().unwrap().contains(2.0));
//! ```

pub mod codec;
pub mod error;
pub mod float;
pub mod integer;
pub mod stamp;
pub mod types;

pub use codec::{FloatBits, FloatFields, FloatLayout};
pub use error::{Result, StampError};
pub use float::FloatStamp;
pub use integer::IntegerStamp;
pub use stamp::{Lattice, Stamp};
pub use types::{Constant, Kind, PrimitiveType};

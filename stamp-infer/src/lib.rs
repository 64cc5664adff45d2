//! # Stamp Inference
//!
//! Recompute node stamps over an IR graph, including the bit-level
//! reinterpretation of floats as integers and back.
//!
//! ## Features
//!
//! - **Reinterpret inference**: sound integer bounds for float bit patterns
//!   and float bounds for integer bit patterns
//! - **Two precisions**: sign/zero/NaN partitioning, or conservative widening
//! - **Recompute hook**: `infer_stamp` for parameters, constants, phis,
//!   guards and reinterprets
//! - **Fixpoint driver**: iterate a graph until no stamp changes
//!
//! ## Example
//!
//! ```rust
//! use stamp_infer::{reinterpret, ReinterpretPrecision};
//! use stamp_lattice::{FloatStamp, PrimitiveType, Stamp};
//!
//! let source = Stamp::from(FloatStamp::new(32, 1.0, 2.0, false).unwrap());
//! let bits = reinterpret(&source, PrimitiveType::I32, ReinterpretPrecision::Partitioned).unwrap();
//! let bits = bits.as_integer().unwrap();
//! assert_eq!(bits.lower_bound(), 0x3F80_0000);
//! assert_eq!(bits.upper_bound(), 0x4000_0000);
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod node;
pub mod reinterpret;

pub use config::{InferConfig, ReinterpretPrecision};
pub use error::{InferError, Result};
pub use graph::{FixpointStats, NodeId, StampGraph};
pub use node::{infer_stamp, Operation};
pub use reinterpret::{float_to_int, int_to_float, reinterpret};

//! # rid
//!
//! Configuration-free, k-sortable, 15-byte identifiers with a compact
//! 24-character text form such as `9p4e2pv0yj3e8a215q4g0000`.
//!
//! An ID is made of:
//!
//! - a 6-byte timestamp: milliseconds since the Unix epoch
//! - a 1-byte process signature: the first byte of a SHA-256 of the machine
//!   id and process id
//! - an 8-byte random tail from a fast thread-local generator, whose leading
//!   48 bits are the value [`Rid::random`] returns
//!
//! 15 bytes (120 bits) land exactly on a base32 boundary, so the text form
//! needs no padding. The alphabet `0123456789abcdefghjkmnpqrstvwxyz` drops the
//! easily confused `i`, `l`, `o` and `u`.
//!
//! IDs order by their first five bytes only (see [`Rid::compare`]), which
//! sorts them chronologically at a 256 ms resolution without coordination
//! between processes.
//!
//! ```
//! use rid::Rid;
//!
//! let id = Rid::new();
//! let text = id.to_string();
//! assert_eq!(text.len(), 24);
//! assert_eq!(text.parse::<Rid>().unwrap(), id);
//! ```
//!
//! ## Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` for [`Rid`]
//! - `tracing`: debug events for process signature derivation

mod adapter;
mod base32;
mod error;
mod generator;
mod id;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod signature;
mod sort;
mod time;

pub use crate::adapter::*;
pub use crate::base32::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::signature::*;
pub use crate::sort::*;
pub use crate::time::*;

/// Length of the binary form, in bytes.
pub const RAW_LEN: usize = 15;

/// Length of the text form, in characters.
pub const ENCODED_LEN: usize = 24;

const _: () = assert!(RAW_LEN * 8 == ENCODED_LEN * 5);

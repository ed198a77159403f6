//! BACnet list-element services in pure Rust.
//!
//! `baclist-core` provides the context-tagged BACnet codec, the owned value
//! model used by list and array properties, the property type registry
//! contract, and the AddListElement / RemoveListElement request and error
//! codecs. It performs no I/O and can be used in `no_std` environments with
//! an allocator.
//!
//! # Feature flags
//!
//! - **`std`** (default): enables `std::error::Error` implementations.
//! - **`serde`**: derives `Serialize`/`Deserialize` on value and identifier types.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// APDU headers for confirmed requests and their responses.
pub mod apdu;
/// Binary encoding primitives, tag system, and zero-copy reader/writer.
pub mod encoding;
/// Error types for encoding and decoding operations.
pub mod error;
/// Property type registry: expected element type and shape per property.
pub mod registry;
/// List-element service codecs and the value codec.
pub mod services;
/// Core BACnet data types: identifiers, values, lists, and arrays.
pub mod types;

pub use error::{DecodeError, EncodeError};

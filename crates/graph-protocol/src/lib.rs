//! Graph Protocol Types
//!
//! Wire-level pieces of a graph request: the custom payload map, its
//! well-known keys, value encoders, and the consistency name registry.

pub mod consistency;
pub mod encode;
pub mod error;
pub mod keys;

use std::collections::BTreeMap;

use bytes::Bytes;

pub use consistency::{code_of, name_for, name_of, ConsistencyCode};
pub use encode::{decode_timeout, encode_str, encode_timeout};
pub use error::{ProtocolError, Result};

/// Out-of-band key/binary-value map attached to a query request.
///
/// Values are `Bytes` so copying an entry from a shared default payload
/// is a reference-count bump, not a buffer copy.
pub type CustomPayload = BTreeMap<String, Bytes>;

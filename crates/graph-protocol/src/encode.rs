//! Payload value encoders.

use bytes::Bytes;

use crate::error::{ProtocolError, Result};

/// Encode a string as its raw UTF-8 bytes.
pub fn encode_str(value: &str) -> Bytes {
    Bytes::copy_from_slice(value.as_bytes())
}

/// Encode a timeout in milliseconds as an 8-byte big-endian signed integer.
pub fn encode_timeout(millis: &i64) -> Bytes {
    Bytes::copy_from_slice(&millis.to_be_bytes())
}

/// Decode a `request-timeout` value back to milliseconds.
pub fn decode_timeout(value: &[u8]) -> Result<i64> {
    let raw: [u8; 8] = value
        .try_into()
        .map_err(|_| ProtocolError::InvalidTimeoutEncoding { len: value.len() })?;
    Ok(i64::from_be_bytes(raw))
}

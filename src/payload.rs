//! Per-key payload override policy.

use bytes::Bytes;
use graph_protocol::CustomPayload;

use crate::setting::Setting;

/// Apply one caller setting to `target`.
///
/// - `Suppressed`: leave the key out, whatever `defaults` holds.
/// - `Value(v)`: store `encode(v)`, even for empty or zero values.
/// - `Unset`: copy the default entry if there is one. Values are `Bytes`,
///   so this shares the default buffer.
pub fn set_key<T, F>(
    target: &mut CustomPayload,
    defaults: &CustomPayload,
    key: &str,
    value: Setting<&T>,
    encode: F,
) where
    T: ?Sized,
    F: FnOnce(&T) -> Bytes,
{
    match value {
        Setting::Suppressed => {}
        Setting::Value(v) => {
            target.insert(key.to_string(), encode(v));
        }
        Setting::Unset => {
            if let Some(default) = defaults.get(key) {
                target.insert(key.to_string(), default.clone());
            }
        }
    }
}

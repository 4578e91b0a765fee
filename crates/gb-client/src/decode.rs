//! Envelope decoding.
//!
//! GrowthBook wraps every payload in an object keyed by resource name:
//! `{"project": {...}}` for single resources, `{"projects": [...],
//! "hasMore": true, "nextOffset": 100}` for collections.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, ErrorKind, Result};

/// Envelope field signalling that more pages follow.
pub const HAS_MORE_KEY: &str = "hasMore";

/// Envelope field carrying the offset of the next page.
pub const NEXT_OFFSET_KEY: &str = "nextOffset";

/// Extract `key` from an envelope object and decode it into `T`.
pub fn decode_result_key<T: DeserializeOwned>(envelope: &Map<String, Value>, key: &str) -> Result<T> {
    let value = envelope
        .get(key)
        .ok_or_else(|| Error::new(ErrorKind::MissingKey(key.to_string())))?;

    T::deserialize(value).map_err(|e| {
        Error::with_source(
            ErrorKind::Json(format!("decoding '{key}': {e}")),
            e,
        )
    })
}

/// `hasMore` flag; false when absent or not a boolean.
pub fn has_more(envelope: &Map<String, Value>) -> bool {
    envelope
        .get(HAS_MORE_KEY)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// `nextOffset`; 0 when absent or not a number.
pub fn next_offset(envelope: &Map<String, Value>) -> u64 {
    match envelope.get(NEXT_OFFSET_KEY) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    }
}

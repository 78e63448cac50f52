//! Value codec for cached payloads.
//!
//! Values are stored as serde_json bytes. An absent entry decodes to
//! `Error::CacheMiss`, a present but unreadable one to `Error::Decode`;
//! an empty collection round-trips as `[]` and is a normal value.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::CacheKey;
use crate::Error;

/// Encode a value for storage.
pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(value).map_err(|e| Error::Encode(e.to_string()))
}

/// Decode a stored value looked up under `key`.
///
/// `bytes` is the raw lookup result; `None` means nothing was stored.
pub fn decode_value<T: DeserializeOwned>(bytes: Option<&[u8]>, key: &CacheKey) -> Result<T, Error> {
    let bytes = bytes.ok_or_else(|| Error::CacheMiss(key.to_string()))?;
    serde_json::from_slice(bytes).map_err(|e| Error::Decode(format!("{key}: {e}")))
}

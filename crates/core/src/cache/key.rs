//! Canonical cache key construction.
//!
//! Keys come in three shapes:
//!
//! - **scalar**: the textual form of a single value (`"131"`)
//! - **composite**: textual parts joined with `:` in a fixed order (`"0:2"`)
//! - **structured**: a serde_json blob of a whole argument struct
//!
//! Structured keys rely on struct fields serializing in declaration order, so
//! the same value always yields the same bytes. Callers must normalize any
//! order-insensitive collections (sort them) before building the key.

use std::fmt;

use serde::Serialize;

use crate::Error;

/// Separator between composite key parts.
const KEY_DELIMITER: &str = ":";

/// Canonical byte key for one cached call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(Vec<u8>);

impl CacheKey {
    /// Key made of a single value's textual form.
    pub fn scalar(value: impl fmt::Display) -> Self {
        Self(value.to_string().into_bytes())
    }

    /// Key made of several parts joined with `:`.
    ///
    /// Parts are used in the order given; empty parts are kept so that
    /// positions stay stable.
    pub fn composite<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = parts
            .into_iter()
            .map(|part| part.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(KEY_DELIMITER);
        Self(joined.into_bytes())
    }

    /// Key made of a structured serialization of `value`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidKey` if the value cannot be serialized.
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        serde_json::to_vec(value)
            .map(Self)
            .map_err(|e| Error::InvalidKey(e.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

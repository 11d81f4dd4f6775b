//! Serialization Module
//!
//! Pluggable value (de)serialization for decorators and backends that
//! need byte-level storage. The in-memory engine stores values directly
//! and never touches these.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CacheError, Result};

// == Serializer Trait ==
/// Converts values to and from bytes.
pub trait Serializer<V>: Send + Sync {
    /// Serializes a value to bytes.
    ///
    /// # Errors
    /// Returns `CacheError::Serialization` if the value cannot be encoded.
    fn serialize(&self, value: &V) -> Result<Vec<u8>>;

    /// Deserializes a value from bytes.
    ///
    /// # Errors
    /// Returns `CacheError::Deserialization` on malformed input.
    fn deserialize(&self, bytes: &[u8]) -> Result<V>;

    /// Estimates the serialized size in bytes, for statistics.
    fn estimate_size(&self, value: &V) -> usize {
        self.serialize(value).map(|b| b.len()).unwrap_or(0)
    }
}

// == JSON Serializer ==
/// Serializes any serde-compatible value as JSON.
#[derive(Debug, Default)]
pub struct JsonSerializer<V> {
    _marker: PhantomData<fn(V)>,
}

impl<V> JsonSerializer<V> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<V> Serializer<V> for JsonSerializer<V>
where
    V: Serialize + DeserializeOwned + Send + Sync,
{
    fn serialize(&self, value: &V) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| CacheError::serialization("value to JSON", e))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<V> {
        serde_json::from_slice(bytes).map_err(|e| CacheError::deserialization("JSON to value", e))
    }
}

// == String Serializer ==
/// Serializes strings as raw UTF-8 bytes.
#[derive(Debug, Default)]
pub struct StringSerializer;

impl StringSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Serializer<String> for StringSerializer {
    fn serialize(&self, value: &String) -> Result<Vec<u8>> {
        Ok(value.as_bytes().to_vec())
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| CacheError::deserialization("bytes are not valid UTF-8", e))
    }

    fn estimate_size(&self, value: &String) -> usize {
        value.len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        id: u64,
        name: String,
        tags: Vec<String>,
    }

    #[test]
    fn test_json_round_trip() {
        let serializer = JsonSerializer::<Payload>::new();
        let payload = Payload {
            id: 42,
            name: "article".to_string(),
            tags: vec!["cache".to_string(), "test".to_string()],
        };

        let bytes = serializer.serialize(&payload).unwrap();
        let decoded = serializer.deserialize(&bytes).unwrap();

        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_json_malformed_bytes_fail_deserialization() {
        let serializer = JsonSerializer::<Payload>::new();
        let err = serializer.deserialize(b"{not json").unwrap_err();
        assert!(matches!(err, CacheError::Deserialization { .. }));
    }

    #[test]
    fn test_json_estimate_size_matches_encoding() {
        let serializer = JsonSerializer::<u64>::new();
        let bytes = serializer.serialize(&12345).unwrap();
        assert_eq!(serializer.estimate_size(&12345), bytes.len());
    }

    #[test]
    fn test_string_round_trip() {
        let serializer = StringSerializer::new();
        let value = "héllo wörld".to_string();

        let bytes = serializer.serialize(&value).unwrap();
        assert_eq!(serializer.deserialize(&bytes).unwrap(), value);
        assert_eq!(serializer.estimate_size(&value), value.len());
    }

    #[test]
    fn test_string_invalid_utf8_fails() {
        let serializer = StringSerializer::new();
        let err = serializer.deserialize(&[0xff, 0xfe, 0xfd]).unwrap_err();
        assert!(matches!(err, CacheError::Deserialization { .. }));
    }
}

//! JSON encode/decode for request and response payloads.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// Encode `value` as a JSON byte sequence.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Bytes, ApiError> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(ApiError::EncodingError)
}

/// Decode a JSON byte sequence into `T`.
///
/// Malformed JSON and structural mismatches (missing field, wrong type) both
/// surface as `ApiError::DecodingError`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(ApiError::DecodingError)
}

//! Error types for the JSON HTTP client.
//!
//! # Design
//! Every failure is returned as an `ApiError`; nothing is retried or logged
//! away. The variants separate where a call stopped: before dispatch
//! (`InvalidUrl`, `InvalidHeader`, `EncodingError`), at the transport
//! (`RequestFailed`), while interpreting the response (`InvalidResponse`,
//! `HttpError`), or after a successful fetch (`EmptyResponse`,
//! `DecodingError`).

use crate::http::HttpResponse;

/// Error produced by a `Transport` implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `RequestBuilder`, `HttpClient` and the codec.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The URL was empty or could not be parsed. No request was sent.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A header name or value cannot be sent over HTTP. No request was sent.
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The transport answered with something that is not an HTTP response.
    #[error("invalid response: transport did not return an HTTP response")]
    InvalidResponse,

    /// The server answered with a status outside 200..=299.
    #[error("HTTP {status}")]
    HttpError { status: u16, response: HttpResponse },

    /// The transport failed before a response arrived.
    #[error("request failed: {0}")]
    RequestFailed(#[source] TransportError),

    /// The response body could not be decoded into the requested type.
    #[error("decoding failed: {0}")]
    DecodingError(#[source] serde_json::Error),

    /// The request payload could not be encoded to JSON.
    #[error("encoding failed: {0}")]
    EncodingError(#[source] serde_json::Error),

    /// The fetch succeeded but returned no bytes where a value was required.
    #[error("empty response: no data returned")]
    EmptyResponse,
}

impl ApiError {
    /// Status code of a rejected response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

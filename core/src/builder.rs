//! Construction of `RequestDescriptor` values.
//!
//! # Design
//! Default headers are a configuration value held by the builder rather than
//! a global, so tests and callers can swap them. The merge order is fixed:
//! defaults first, then caller headers, with the caller winning on a
//! case-insensitive name match.

use std::collections::HashMap;

use bytes::Bytes;

use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HeaderSet, HttpMethod, RequestDescriptor};

/// Headers applied to every request before caller headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultHeaders(HeaderSet);

impl DefaultHeaders {
    /// `Content-Type: application/json`.
    pub fn json() -> Self {
        let mut headers = HeaderSet::new();
        headers.insert("Content-Type", "application/json");
        Self(headers)
    }

    pub fn none() -> Self {
        Self(HeaderSet::new())
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name, value);
        self
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.0
    }
}

impl Default for DefaultHeaders {
    fn default() -> Self {
        Self::json()
    }
}

/// Stateless factory for request descriptors.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    defaults: DefaultHeaders,
}

impl RequestBuilder {
    pub fn new(defaults: DefaultHeaders) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &DefaultHeaders {
        &self.defaults
    }

    /// Build a descriptor without a body.
    ///
    /// Fails with `ApiError::InvalidUrl` when `url` is empty or malformed, and
    /// with `ApiError::InvalidHeader` when a merged header cannot be sent.
    pub fn build(
        &self,
        url: impl Endpoint,
        method: HttpMethod,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<RequestDescriptor, ApiError> {
        self.assemble(url, method, headers, None)
    }

    /// Build a descriptor carrying an already encoded body.
    pub fn build_with_body(
        &self,
        url: impl Endpoint,
        method: HttpMethod,
        headers: Option<&HashMap<String, String>>,
        body: Bytes,
    ) -> Result<RequestDescriptor, ApiError> {
        self.assemble(url, method, headers, Some(body))
    }

    fn assemble(
        &self,
        url: impl Endpoint,
        method: HttpMethod,
        headers: Option<&HashMap<String, String>>,
        body: Option<Bytes>,
    ) -> Result<RequestDescriptor, ApiError> {
        let url = url.to_url()?;

        let mut merged = self.defaults.headers().clone();
        if let Some(headers) = headers {
            // HashMap order is arbitrary; sort so the descriptor is stable.
            let mut extra: Vec<_> = headers.iter().collect();
            extra.sort();
            merged.extend(extra.into_iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        check_headers(&merged)?;

        Ok(RequestDescriptor {
            method,
            url,
            headers: merged,
            body,
        })
    }
}

/// Header names and values must be valid on the wire.
fn check_headers(headers: &HeaderSet) -> Result<(), ApiError> {
    for (name, value) in headers.iter() {
        let invalid = |reason: String| ApiError::InvalidHeader {
            name: name.to_string(),
            reason,
        };
        ::http::HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        ::http::HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
    }
    Ok(())
}

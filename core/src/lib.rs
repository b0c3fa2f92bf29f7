//! Minimal async JSON HTTP client.
//!
//! # Overview
//! Issues GET/POST/PUT/DELETE requests, validates status codes and converts
//! JSON payloads to and from typed values.
//!
//! # Design
//! - `RequestBuilder` turns a URL, a method and optional caller headers into
//!   an immutable `RequestDescriptor`, merging them over injected defaults
//!   (`Content-Type: application/json` unless configured otherwise).
//! - `HttpClient` hands the descriptor to a `Transport`, sends it exactly
//!   once and maps the outcome onto `ApiError`. It performs no I/O itself.
//! - `JsonApi` is the client-level seam for code that only needs to fetch,
//!   encode and decode; `HttpClient` implements it over any transport.
//! - `codec` encodes and decodes JSON with serde; decode failures stay
//!   distinct from transport failures.
//! - `ReqwestTransport` (feature `reqwest`, on by default) is the stock
//!   transport.

pub mod builder;
pub mod client;
pub mod codec;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;

pub use builder::{DefaultHeaders, RequestBuilder};
pub use client::{HttpClient, JsonApi};
pub use endpoint::Endpoint;
pub use error::{ApiError, TransportError};
pub use self::http::{HeaderSet, HttpMethod, HttpResponse, RequestDescriptor, TransportResponse};
pub use transport::Transport;
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;

pub use bytes::Bytes;
pub use url::Url;

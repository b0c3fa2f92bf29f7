//! Request execution, status validation and JSON decoding.
//!
//! # Design
//! `HttpClient` holds a transport and a `RequestBuilder` and nothing else, so
//! calls share no mutable state and can run concurrently. Every call sends
//! exactly once and ends in one of three ways: bytes from a 2xx response, a
//! rejected status, or a transport failure. There is no retry path.
//!
//! The client emits `tracing` events at debug level and installs no
//! subscriber; what gets logged is up to the host application.

use std::collections::HashMap;
use std::future::Future;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::builder::RequestBuilder;
use crate::codec;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, RequestDescriptor, TransportResponse};
use crate::transport::Transport;

/// Async JSON HTTP client over a pluggable `Transport`.
#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    transport: T,
    builder: RequestBuilder,
}

#[cfg(feature = "reqwest")]
impl Default for HttpClient<crate::transport::ReqwestTransport> {
    fn default() -> Self {
        Self::new(crate::transport::ReqwestTransport::new())
    }
}

impl<T: Transport> HttpClient<T> {
    /// Client with the JSON default headers.
    pub fn new(transport: T) -> Self {
        Self::with_builder(transport, RequestBuilder::default())
    }

    pub fn with_builder(transport: T, builder: RequestBuilder) -> Self {
        Self { transport, builder }
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` once and return the body of a 2xx response.
    ///
    /// The body is returned exactly as the transport delivered it and may be
    /// empty. Statuses outside 200..=299 become `ApiError::HttpError`.
    pub async fn fetch(&self, request: &RequestDescriptor) -> Result<Bytes, ApiError> {
        debug!(method = %request.method(), url = %request.url(), "dispatching request");

        let response = self
            .transport
            .send(request)
            .await
            .inspect_err(|e| debug!(url = %request.url(), error = %e, "transport failed"))
            .map_err(ApiError::RequestFailed)?;

        let response = match response {
            TransportResponse::Http(response) if (100..=999).contains(&response.status) => {
                response
            }
            TransportResponse::Http(response) => {
                debug!(url = %request.url(), status = response.status, "malformed status");
                return Err(ApiError::InvalidResponse);
            }
            TransportResponse::NonHttp { .. } => {
                debug!(url = %request.url(), "transport returned a non-HTTP response");
                return Err(ApiError::InvalidResponse);
            }
        };

        if !response.is_success() {
            debug!(url = %request.url(), status = response.status, "status rejected");
            return Err(ApiError::HttpError {
                status: response.status,
                response,
            });
        }

        debug!(
            url = %request.url(),
            status = response.status,
            bytes = response.body.len(),
            "request completed"
        );
        Ok(response.body)
    }

    /// `fetch`, then decode the body as JSON into `R`.
    ///
    /// An empty body is `ApiError::EmptyResponse`; decoding is only attempted
    /// after a successful, status-validated fetch.
    pub async fn fetch_and_decode<R: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<R, ApiError> {
        let bytes = self.fetch(request).await?;
        if bytes.is_empty() {
            return Err(ApiError::EmptyResponse);
        }
        codec::decode(&bytes)
    }

    /// GET `url` and return the raw body.
    pub async fn fetch_data(
        &self,
        url: impl Endpoint,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Bytes, ApiError> {
        let request = self.builder.build(url, HttpMethod::Get, headers)?;
        self.fetch(&request).await
    }

    /// GET `url` and decode the JSON body into `R`.
    pub async fn get<R: DeserializeOwned>(
        &self,
        url: impl Endpoint,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<R, ApiError> {
        let request = self.builder.build(url, HttpMethod::Get, headers)?;
        self.fetch_and_decode(&request).await
    }

    /// POST `body` as JSON and decode the JSON response into `R`.
    pub async fn post<B, R>(
        &self,
        url: impl Endpoint,
        body: &B,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(HttpMethod::Post, url, body, headers).await
    }

    /// PUT `body` as JSON and decode the JSON response into `R`.
    pub async fn put<B, R>(
        &self,
        url: impl Endpoint,
        body: &B,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(HttpMethod::Put, url, body, headers).await
    }

    /// DELETE `url` and return the raw body, which is often empty.
    pub async fn delete(
        &self,
        url: impl Endpoint,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Bytes, ApiError> {
        let request = self.builder.build(url, HttpMethod::Delete, headers)?;
        self.fetch(&request).await
    }

    async fn send_json<B, R>(
        &self,
        method: HttpMethod,
        url: impl Endpoint,
        body: &B,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = url.to_url()?;
        let body = codec::encode(body)?;
        let request = self.builder.build_with_body(url, method, headers, body)?;
        self.fetch_and_decode(&request).await
    }
}

/// What a caller needs from a JSON API client, independent of transport.
///
/// Lets application code take `&impl JsonApi` and swap in a canned
/// implementation in tests. `encode` and `decode` default to `codec`.
pub trait JsonApi: Send + Sync {
    /// GET `url` and return the raw body of a 2xx response.
    fn fetch_data(
        &self,
        url: impl Endpoint + Send,
        headers: Option<&HashMap<String, String>>,
    ) -> impl Future<Output = Result<Bytes, ApiError>> + Send;

    /// Send `request` once and decode the JSON body into `R`.
    fn fetch_and_decode<R: DeserializeOwned + Send>(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = Result<R, ApiError>> + Send;

    /// GET `url` and decode the JSON body into `R`.
    fn get<R: DeserializeOwned + Send>(
        &self,
        url: impl Endpoint + Send,
        headers: Option<&HashMap<String, String>>,
    ) -> impl Future<Output = Result<R, ApiError>> + Send;

    fn encode<B: Serialize + ?Sized>(&self, value: &B) -> Result<Bytes, ApiError> {
        codec::encode(value)
    }

    fn decode<R: DeserializeOwned>(&self, bytes: &[u8]) -> Result<R, ApiError> {
        codec::decode(bytes)
    }
}

impl<T: Transport> JsonApi for HttpClient<T> {
    fn fetch_data(
        &self,
        url: impl Endpoint + Send,
        headers: Option<&HashMap<String, String>>,
    ) -> impl Future<Output = Result<Bytes, ApiError>> + Send {
        HttpClient::fetch_data(self, url, headers)
    }

    fn fetch_and_decode<R: DeserializeOwned + Send>(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = Result<R, ApiError>> + Send {
        HttpClient::fetch_and_decode(self, request)
    }

    fn get<R: DeserializeOwned + Send>(
        &self,
        url: impl Endpoint + Send,
        headers: Option<&HashMap<String, String>>,
    ) -> impl Future<Output = Result<R, ApiError>> + Send {
        HttpClient::get(self, url, headers)
    }
}

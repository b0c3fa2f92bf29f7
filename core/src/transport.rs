//! The I/O boundary: executing a `RequestDescriptor` over the network.
//!
//! # Design
//! `HttpClient` never talks to a socket. It hands descriptors to a
//! `Transport` and interprets whatever comes back, so any HTTP stack (or a
//! scripted one in tests) can sit underneath. `ReqwestTransport` is the
//! default implementation.

use std::future::Future;

use crate::error::TransportError;
use crate::http::{RequestDescriptor, TransportResponse};

/// Executes one request and returns the raw response.
///
/// Implementations must resolve only once the whole response has arrived or
/// the exchange has failed. Timeouts, cancellation, DNS, TLS and connection
/// errors are all reported as `Err`.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use std::time::Duration;

    use super::Transport;
    use crate::error::TransportError;
    use crate::http::{HttpResponse, RequestDescriptor, TransportResponse};

    /// `Transport` backed by a `reqwest::Client`.
    ///
    /// Connection reuse is whatever the wrapped client does. Cloning is cheap
    /// and shares the client's pool.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
        timeout: Option<Duration>,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn from_client(client: reqwest::Client) -> Self {
            Self {
                client,
                timeout: None,
            }
        }

        /// Fail requests that have not completed within `timeout`.
        pub fn with_timeout(mut self, timeout: Duration) -> Self {
            self.timeout = Some(timeout);
            self
        }
    }

    impl Transport for ReqwestTransport {
        async fn send(
            &self,
            request: &RequestDescriptor,
        ) -> Result<TransportResponse, TransportError> {
            let mut builder = self
                .client
                .request(request.method().into(), request.url().clone());

            for (name, value) in request.headers().iter() {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body() {
                builder = builder.body(body.clone());
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }

            let response = builder.send().await?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response.bytes().await?;

            Ok(TransportResponse::Http(HttpResponse {
                status,
                headers,
                body,
            }))
        }
    }
}

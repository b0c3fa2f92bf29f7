//! HTTP data types shared by the builder, the client and transports.
//!
//! # Design
//! Requests and responses are described as plain data. `RequestBuilder`
//! produces a `RequestDescriptor`, a `Transport` turns it into a
//! `TransportResponse`, and `HttpClient` interprets that response. None of
//! these types perform I/O themselves.
//!
//! Header names are compared with ASCII case folding, as HTTP requires.
//! `HeaderSet` keeps insertion order so descriptors are stable to inspect
//! and to assert on in tests.

use std::fmt;

use bytes::Bytes;
use url::Url;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for ::http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => ::http::Method::GET,
            HttpMethod::Post => ::http::Method::POST,
            HttpMethod::Put => ::http::Method::PUT,
            HttpMethod::Delete => ::http::Method::DELETE,
        }
    }
}

/// Ordered header mapping with case-insensitive names.
///
/// Inserting a name that already exists (ignoring ASCII case) replaces the
/// stored entry in place, including its spelling. Last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a header. Returns the previous value, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => {
                let (_, old) = std::mem::replace(&mut self.entries[index], (name, value));
                Some(old)
            }
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|index| self.entries[index].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for HeaderSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        set.extend(iter);
        set
    }
}

/// A request described as plain data, ready for a `Transport`.
///
/// Only `RequestBuilder` creates descriptors, so the URL has always been
/// validated. There are no setters: once built, a descriptor does not change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub(crate) method: HttpMethod,
    pub(crate) url: Url,
    pub(crate) headers: HeaderSet,
    pub(crate) body: Option<Bytes>,
}

impl RequestDescriptor {
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

/// The raw response object handed back by a transport for an HTTP exchange.
///
/// `HttpClient` returns it inside `ApiError::HttpError` when the status is
/// rejected, so callers can inspect the body the server sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What a transport produced for a dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportResponse {
    /// An HTTP response with a status line.
    Http(HttpResponse),

    /// The transport answered, but not with an HTTP response (for instance a
    /// `file://` or `data:` URL served by a transport that supports them).
    NonHttp { body: Bytes },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display_is_upper_case_token() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(::http::Method::from(HttpMethod::Put), ::http::Method::PUT);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let mut headers = HeaderSet::new();
        headers.insert("Content-Type", "application/json");
        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert!(headers.contains("CONTENT-TYPE"));
        assert!(!headers.contains("accept"));
    }

    #[test]
    fn header_insert_overwrites_case_insensitively() {
        let mut headers = HeaderSet::new();
        headers.insert("Content-Type", "application/json");
        let old = headers.insert("content-type", "text/plain");
        assert_eq!(old.as_deref(), Some("application/json"));
        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![("content-type", "text/plain")]
        );
    }

    #[test]
    fn header_set_keeps_insertion_order() {
        let headers: HeaderSet = [("b", "2"), ("a", "1"), ("B", "3")].into_iter().collect();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec![("B", "3"), ("a", "1")]);
    }

    #[test]
    fn response_success_range_is_inclusive() {
        let response = |status| HttpResponse {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        };
        assert!(response(200).is_success());
        assert!(response(299).is_success());
        assert!(!response(199).is_success());
        assert!(!response(300).is_success());
    }

    #[test]
    fn response_header_lookup_ignores_case() {
        let response = HttpResponse {
            status: 200,
            headers: vec![("Content-Length".to_string(), "0".to_string())],
            body: Bytes::new(),
        };
        assert_eq!(response.header("content-length"), Some("0"));
        assert_eq!(response.header("etag"), None);
    }
}

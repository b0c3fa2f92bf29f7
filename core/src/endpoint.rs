//! URL inputs accepted by the builder and the client.
//!
//! A caller either already holds a parsed `Url` or has a string that still
//! needs converting. Both go through `Endpoint`, so validation happens in one
//! place instead of at every call site.

use url::Url;

use crate::error::ApiError;

/// Something that can be turned into a validated request URL.
pub trait Endpoint {
    /// The URL as the caller wrote it.
    fn as_str(&self) -> &str;

    /// Convert to a `Url`, failing with `ApiError::InvalidUrl` when the input
    /// is empty or malformed.
    fn to_url(&self) -> Result<Url, ApiError>;

    fn is_valid(&self) -> bool {
        self.to_url().is_ok()
    }
}

impl Endpoint for Url {
    fn as_str(&self) -> &str {
        Url::as_str(self)
    }

    fn to_url(&self) -> Result<Url, ApiError> {
        check_host(self)?;
        Ok(self.clone())
    }
}

impl Endpoint for str {
    fn as_str(&self) -> &str {
        self
    }

    fn to_url(&self) -> Result<Url, ApiError> {
        parse(self)
    }
}

impl Endpoint for String {
    fn as_str(&self) -> &str {
        String::as_str(self)
    }

    fn to_url(&self) -> Result<Url, ApiError> {
        parse(self)
    }
}

impl<E: Endpoint + ?Sized> Endpoint for &E {
    fn as_str(&self) -> &str {
        (**self).as_str()
    }

    fn to_url(&self) -> Result<Url, ApiError> {
        (**self).to_url()
    }
}

fn parse(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid(raw, "URL is empty"));
    }
    let url = Url::parse(trimmed).map_err(|e| invalid(raw, &e.to_string()))?;
    check_host(&url)?;
    Ok(url)
}

/// `http` and `https` URLs must name a host. Other schemes are left for the
/// transport to accept or refuse.
fn check_host(url: &Url) -> Result<(), ApiError> {
    let needs_host = matches!(url.scheme(), "http" | "https");
    if needs_host && url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(url.as_str(), "URL has no host"));
    }
    Ok(())
}

fn invalid(url: &str, reason: &str) -> ApiError {
    ApiError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_strings_are_invalid() {
        for raw in ["", "   "] {
            let err = raw.to_url().unwrap_err();
            assert!(matches!(err, ApiError::InvalidUrl { .. }), "{raw:?}");
            assert!(!raw.is_valid());
        }
    }

    #[test]
    fn relative_strings_are_invalid() {
        let err = "postman-echo.com/get".to_url().unwrap_err();
        match err {
            ApiError::InvalidUrl { url, reason } => {
                assert_eq!(url, "postman-echo.com/get");
                assert!(reason.contains("relative URL"), "{reason}");
            }
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn absolute_http_urls_are_valid() {
        let url = "https://example.test/get".to_url().unwrap();
        assert_eq!(url.host_str(), Some("example.test"));
        assert_eq!(url.path(), "/get");
        assert!(String::from("http://127.0.0.1:3000/post").is_valid());
    }

    #[test]
    fn parsed_url_passes_through_unchanged() {
        let url = Url::parse("https://example.test/get?x=1").unwrap();
        assert_eq!(url.to_url().unwrap(), url);
        assert_eq!(Endpoint::as_str(&url), "https://example.test/get?x=1");
    }

    #[test]
    fn non_http_schemes_are_left_to_the_transport() {
        assert!("file:///tmp/data.json".is_valid());
        assert!(Url::parse("data:application/json,{}").unwrap().is_valid());
    }
}

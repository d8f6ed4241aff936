//! HTTP response types for the ARM fluent SDK.
//!
//! This module provides the [`HttpResponse`] type: status, headers and the
//! raw body text. Decoding the body is left to the request pipeline, which
//! knows which status codes carry which payload.

use std::collections::HashMap;

/// Header carrying the service-assigned request id.
pub const REQUEST_ID_HEADER: &str = "x-ms-request-id";

/// Header carrying the correlation id shared by related requests.
pub const CORRELATION_ID_HEADER: &str = "x-ms-correlation-request-id";

/// An HTTP response from the management endpoint.
///
/// Header names are stored lower-cased; a header may have several values.
///
/// # Example
///
/// ```rust
/// use arm_fluent::clients::HttpResponse;
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-ms-request-id".to_string(), vec!["req-1".to_string()]);
///
/// let response = HttpResponse::new(200, headers, r#"{"name":"p1"}"#);
/// assert!(response.is_ok());
/// assert!(response.has_body());
/// assert_eq!(response.request_id(), Some("req-1"));
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body. Empty when the service sent none.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, normalizing header names to lower case.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, values)| (name.to_lowercase(), values))
            .collect();

        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the response carries a non-blank body.
    #[must_use]
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `x-ms-request-id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }

    /// Returns the `x-ms-correlation-request-id` header value, if present.
    #[must_use]
    pub fn correlation_request_id(&self) -> Option<&str> {
        self.header(CORRELATION_ID_HEADER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in pairs {
            map.entry((*name).to_string())
                .or_default()
                .push((*value).to_string());
        }
        map
    }

    #[test]
    fn test_is_ok_for_2xx_codes() {
        for code in [200, 201, 202, 204] {
            assert!(HttpResponse::new(code, HashMap::new(), "").is_ok());
        }
        for code in [199, 300, 404, 409, 500] {
            assert!(!HttpResponse::new(code, HashMap::new(), "").is_ok());
        }
    }

    #[test]
    fn test_header_names_are_normalized() {
        let response = HttpResponse::new(
            200,
            headers(&[
                ("X-Ms-Request-Id", "abc"),
                ("X-MS-Correlation-Request-Id", "corr"),
            ]),
            "",
        );

        assert_eq!(response.request_id(), Some("abc"));
        assert_eq!(response.correlation_request_id(), Some("corr"));
        assert_eq!(response.header("X-MS-REQUEST-ID"), Some("abc"));
    }

    #[test]
    fn test_blank_body_is_treated_as_absent() {
        assert!(!HttpResponse::new(204, HashMap::new(), "").has_body());
        assert!(!HttpResponse::new(200, HashMap::new(), " \n").has_body());
        assert!(HttpResponse::new(200, HashMap::new(), "{}").has_body());
    }

    #[test]
    fn test_missing_headers_return_none() {
        let response = HttpResponse::new(200, HashMap::new(), "{}");
        assert!(response.request_id().is_none());
        assert!(response.header("content-type").is_none());
    }
}

//! HTTP request types for the ARM fluent SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the management endpoint.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the management API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read a resource or a page of resources.
    Get,
    /// Create or replace a whole resource.
    Put,
    /// Partially update a resource with an explicit parameter object.
    Patch,
    /// Remove a resource.
    Delete,
    /// Invoke an action on a resource.
    Post,
}

impl HttpMethod {
    /// Returns the upper-case method name used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Post => "POST",
        }
    }

    /// Returns `true` for methods that must carry a request body.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(self, Self::Put | Self::Patch | Self::Post)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request to be sent to the management endpoint.
///
/// `path` is either relative to the configured base URL or an absolute URL.
/// Absolute URLs (pagination links) are used verbatim and receive no extra
/// query parameters beyond those already present.
///
/// # Example
///
/// ```rust
/// use arm_fluent::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get = HttpRequest::builder(HttpMethod::Get, "subscriptions/s/resourceGroups/rg")
///     .query_param("api-version", "2016-04-02")
///     .build()
///     .unwrap();
/// assert!(get.body.is_none());
///
/// let put = HttpRequest::builder(HttpMethod::Put, "subscriptions/s/resourceGroups/rg")
///     .body(json!({"location": "westus"}))
///     .build()
///     .unwrap();
/// assert!(put.body.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The relative path or absolute URL for this request.
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters appended to the URL, in order.
    pub query: Vec<(String, String)>,
    /// Additional headers to include in the request.
    pub extra_headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Returns `true` if `path` is an absolute URL.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("https://") || self.path.starts_with("http://")
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] if the method is PUT,
    /// PATCH or POST and `body` is `None`.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        if self.path.trim().is_empty() {
            return Err(InvalidHttpRequestError::InvalidUrl {
                url: self.path.clone(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    query: Vec<(String, String)>,
    extra_headers: Vec<(String, String)>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            extra_headers: Vec::new(),
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((key.into(), value.into()));
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "subscriptions/s")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "subscriptions/s");
        assert!(request.body.is_none());
        assert!(!request.is_absolute());
    }

    #[test]
    fn test_verify_requires_body_for_put_and_patch() {
        for method in [HttpMethod::Put, HttpMethod::Patch, HttpMethod::Post] {
            let result = HttpRequest::builder(method, "subscriptions/s").build();
            assert!(matches!(
                result,
                Err(InvalidHttpRequestError::MissingBody { method: m }) if m == method.as_str()
            ));
        }
    }

    #[test]
    fn test_delete_does_not_require_body() {
        assert!(HttpRequest::builder(HttpMethod::Delete, "subscriptions/s")
            .build()
            .is_ok());
    }

    #[test]
    fn test_verify_rejects_empty_path() {
        assert!(matches!(
            HttpRequest::builder(HttpMethod::Get, "  ").build(),
            Err(InvalidHttpRequestError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_builder_keeps_query_order() {
        let request = HttpRequest::builder(HttpMethod::Get, "x")
            .query_param("api-version", "2016-04-02")
            .query_param("$top", "5")
            .build()
            .unwrap();

        assert_eq!(
            request.query,
            vec![
                ("api-version".to_string(), "2016-04-02".to_string()),
                ("$top".to_string(), "5".to_string())
            ]
        );
    }

    #[test]
    fn test_absolute_paths_are_detected() {
        let request = HttpRequest::builder(
            HttpMethod::Get,
            "https://management.azure.com/subscriptions/s?$skiptoken=abc",
        )
        .build()
        .unwrap();
        assert!(request.is_absolute());
    }

    #[test]
    fn test_builder_with_body_and_headers() {
        let request = HttpRequest::builder(HttpMethod::Patch, "x")
            .body(json!({"tags": {}}))
            .header("If-Match", "*")
            .build()
            .unwrap();

        assert_eq!(request.extra_headers.len(), 1);
        assert_eq!(request.body, Some(json!({"tags": {}})));
    }
}

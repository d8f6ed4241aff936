//! Response wrapper carrying the decoded body plus response metadata.
//!
//! [`ServiceResponse<T>`] implements `Deref<Target = T>`, so it can be used
//! like the decoded body directly:
//!
//! ```rust,ignore
//! let response = client.send::<ProfileInner>(spec, TABLE).await?;
//! println!("status {} request {:?}", response.status(), response.request_id());
//! if let Some(profile) = response.as_ref() {
//!     println!("{:?}", profile.name);
//! }
//! ```

use std::ops::{Deref, DerefMut};

use crate::clients::HttpResponse;

/// A decoded response with its status code and request ids.
///
/// # Example
///
/// ```rust
/// use arm_fluent::rest::ServiceResponse;
///
/// let response = ServiceResponse::new(vec![1, 2, 3], 200, Some("req-1".to_string()));
/// assert_eq!(response.len(), 3);
/// assert_eq!(response.status(), 200);
/// assert_eq!(response.request_id(), Some("req-1"));
/// ```
#[derive(Debug, Clone)]
pub struct ServiceResponse<T> {
    body: T,
    status: u16,
    request_id: Option<String>,
    correlation_request_id: Option<String>,
}

impl<T> ServiceResponse<T> {
    /// Creates a new `ServiceResponse`.
    #[must_use]
    pub const fn new(body: T, status: u16, request_id: Option<String>) -> Self {
        Self {
            body,
            status,
            request_id,
            correlation_request_id: None,
        }
    }

    /// Creates a `ServiceResponse` taking metadata from an HTTP response.
    #[must_use]
    pub fn from_http(body: T, response: &HttpResponse) -> Self {
        Self {
            body,
            status: response.code,
            request_id: response.request_id().map(ToString::to_string),
            correlation_request_id: response.correlation_request_id().map(ToString::to_string),
        }
    }

    /// Consumes the response and returns the body.
    #[must_use]
    pub fn into_body(self) -> T {
        self.body
    }

    /// Returns a reference to the body.
    #[must_use]
    pub const fn body(&self) -> &T {
        &self.body
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the `x-ms-request-id` of the response.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the `x-ms-correlation-request-id` of the response.
    #[must_use]
    pub fn correlation_request_id(&self) -> Option<&str> {
        self.correlation_request_id.as_deref()
    }

    /// Maps the body to a new type, preserving metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ServiceResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ServiceResponse {
            body: f(self.body),
            status: self.status,
            request_id: self.request_id,
            correlation_request_id: self.correlation_request_id,
        }
    }
}

impl<T> Deref for ServiceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.body
    }
}

impl<T> DerefMut for ServiceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_http_copies_metadata() {
        let mut headers = HashMap::new();
        headers.insert("x-ms-request-id".to_string(), vec!["r1".to_string()]);
        headers.insert(
            "x-ms-correlation-request-id".to_string(),
            vec!["c1".to_string()],
        );
        let http = HttpResponse::new(201, headers, "{}");

        let response = ServiceResponse::from_http("body", &http);
        assert_eq!(response.status(), 201);
        assert_eq!(response.request_id(), Some("r1"));
        assert_eq!(response.correlation_request_id(), Some("c1"));
        assert_eq!(*response, "body");
    }

    #[test]
    fn test_map_preserves_metadata() {
        let response = ServiceResponse::new(2, 202, Some("r".to_string())).map(|n| n * 10);
        assert_eq!(response.status(), 202);
        assert_eq!(response.into_body(), 20);
    }

    #[test]
    fn test_deref_mut_allows_mutation() {
        let mut response = ServiceResponse::new(vec![1], 200, None);
        response.push(2);
        assert_eq!(response.body(), &vec![1, 2]);
    }
}

//! HTTP client for management API communication.
//!
//! This module provides the [`HttpClient`] type, which turns an
//! [`HttpRequest`] into a [`PreparedRequest`] and dispatches it through the
//! configured [`HttpTransport`].

use std::sync::Arc;

use crate::auth::TokenCredential;
use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{HttpTransport, PreparedRequest, ReqwestTransport};
use crate::config::ArmConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the management endpoint.
///
/// The client handles:
/// - URL construction from the configured base URL (absolute URLs pass through)
/// - Default headers: `User-Agent`, `accept-language`, `Accept`
/// - A bearer token from the [`TokenCredential`] on every request
///
/// It never retries and never interprets status codes.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    config: ArmConfig,
    credential: Arc<dyn TokenCredential>,
    transport: Arc<dyn HttpTransport>,
    default_headers: Vec<(String, String)>,
    token_scope: String,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client using the default [`ReqwestTransport`].
    #[must_use]
    pub fn new(config: ArmConfig, credential: Arc<dyn TokenCredential>) -> Self {
        Self::with_transport(config, credential, Arc::new(ReqwestTransport::new()))
    }

    /// Creates a client with an explicit transport.
    #[must_use]
    pub fn with_transport(
        config: ArmConfig,
        credential: Arc<dyn TokenCredential>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("{user_agent_prefix}arm-fluent/{SDK_VERSION} Rust {rust_version}");

        let default_headers = vec![
            ("User-Agent".to_string(), user_agent),
            (
                "accept-language".to_string(),
                config.accept_language().to_string(),
            ),
            ("Accept".to_string(), "application/json".to_string()),
        ];

        let token_scope = format!("{}/.default", config.base_url().as_ref());

        Self {
            config,
            credential,
            transport,
            default_headers,
            token_scope,
        }
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &ArmConfig {
        &self.config
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    /// Resolves a request path against the base URL and appends the query string.
    #[must_use]
    pub fn resolve_url(&self, request: &HttpRequest) -> String {
        let mut url = if request.is_absolute() {
            request.path.clone()
        } else {
            format!(
                "{}/{}",
                self.config.base_url().as_ref(),
                request.path.trim_start_matches('/')
            )
        };

        for (key, value) in &request.query {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        url
    }

    /// Sends an HTTP request and returns whatever response arrives.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - No token can be obtained (`Credential`)
    /// - The transport produces no response (`Transport`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.resolve_url(&request);

        let token = self.credential.get_token(&self.token_scope).await?;

        let mut headers = self.default_headers.clone();
        headers.push((
            "Authorization".to_string(),
            format!("Bearer {}", token.secret()),
        ));
        if request.body.is_some() {
            headers.push((
                "Content-Type".to_string(),
                "application/json; charset=utf-8".to_string(),
            ));
        }
        for (key, value) in &request.extra_headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(key));
            headers.push((key.clone(), value.clone()));
        }

        let prepared = PreparedRequest {
            method: request.http_method,
            url,
            headers,
            body: request.body.as_ref().map(ToString::to_string),
        };

        tracing::debug!("{} {}", prepared.method, prepared.url);
        let method = prepared.method;
        let response = self.transport.execute(prepared).await?;
        tracing::debug!(
            "{} {} completed with status {} (request id {:?})",
            method,
            request.path,
            response.code,
            response.request_id()
        );

        Ok(response)
    }
}

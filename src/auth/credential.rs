//! Bearer token provider trait and a static implementation.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Error returned when a credential cannot produce a token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Failed to acquire access token: {message}")]
pub struct CredentialError {
    /// Description of the failure.
    pub message: String,
}

impl CredentialError {
    /// Creates a new credential error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A bearer token.
///
/// The `Debug` implementation redacts the secret so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
}

impl AccessToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"*****")
            .finish()
    }
}

/// Provider of bearer tokens, consulted once per request.
///
/// Implementations are shared between concurrently running operations and
/// must therefore be `Send + Sync`.
#[async_trait]
pub trait TokenCredential: Send + Sync + fmt::Debug {
    /// Returns a token valid for `scope`.
    async fn get_token(&self, scope: &str) -> Result<AccessToken, CredentialError>;
}

/// A credential that hands out one fixed token.
///
/// Useful for tests and for tokens obtained out of band (e.g. `az account
/// get-access-token`).
#[derive(Clone, Debug)]
pub struct StaticTokenCredential {
    token: AccessToken,
}

impl StaticTokenCredential {
    /// Creates a credential returning `token` for every scope.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token),
        }
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(&self, _scope: &str) -> Result<AccessToken, CredentialError> {
        if self.token.secret().is_empty() {
            return Err(CredentialError::new("static token is empty"));
        }
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_credential_returns_token() {
        let credential = StaticTokenCredential::new("secret-token");
        let token = credential.get_token("scope").await.unwrap();
        assert_eq!(token.secret(), "secret-token");
    }

    #[tokio::test]
    async fn test_empty_static_token_is_rejected() {
        let credential = StaticTokenCredential::new("");
        let error = credential.get_token("scope").await.unwrap_err();
        assert!(error.to_string().contains("static token is empty"));
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("super-secret");
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("*****"));
    }
}

//! Credential management for PATS API authentication.

use secrecy::{ExposeSecret, SecretString};

/// Header carrying the access key on every outbound request.
pub const API_KEY_HEADER: &str = "X-MO-API-Key";

/// A PATS access key.
///
/// One key is supplied at client construction and attached to every request.
/// Buyer- and seller-side keys are issued separately; a key only works
/// against the API family it was scoped to.
#[derive(Clone)]
pub struct ApiKey {
    key: SecretString,
}

impl ApiKey {
    /// Create a new access key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: SecretString::from(key.into()),
        }
    }

    /// Create an access key from the `PATS_API_KEY` environment variable.
    ///
    /// # Panics
    ///
    /// Panics if the environment variable is not set.
    pub fn from_env() -> Self {
        Self::from_env_var("PATS_API_KEY")
    }

    /// Create an access key from a custom environment variable name.
    ///
    /// # Panics
    ///
    /// Panics if the environment variable is not set.
    pub fn from_env_var(var: &str) -> Self {
        let key = std::env::var(var)
            .unwrap_or_else(|_| panic!("Environment variable {var} not set"));
        Self::new(key)
    }

    /// Try to create an access key from the `PATS_API_KEY` environment
    /// variable.
    ///
    /// Returns `None` if the environment variable is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_var("PATS_API_KEY")
    }

    /// Try to create an access key from a custom environment variable name.
    ///
    /// Returns `None` if the environment variable is not set.
    pub fn try_from_env_var(var: &str) -> Option<Self> {
        std::env::var(var).ok().map(Self::new)
    }

    /// Get the key value for the request header.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.key.expose_secret()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_debug_redacted() {
        let key = ApiKey::new("super_secret_key");
        let debug_str = format!("{:?}", key);
        assert!(!debug_str.contains("super_secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_api_key_exposes_value() {
        let key = ApiKey::new("abc123");
        assert_eq!(key.expose_secret(), "abc123");
    }
}

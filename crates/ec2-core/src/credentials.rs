//! Access credentials used to sign EC2 requests.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Environment variable holding the access key id.
pub const ACCESS_KEY_ENV: &str = "AWS_ACCESS_KEY_ID";
/// Environment variable holding the secret access key.
pub const SECRET_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";
/// Environment variable holding an optional session token.
pub const SESSION_TOKEN_ENV: &str = "AWS_SESSION_TOKEN";

/// Access key pair plus an optional session token.
///
/// The secret parts are wrapped so they never show up in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    access_key: String,
    secret_key: SecretString,
    session_token: Option<SecretString>,
}

impl Credentials {
    /// Create credentials from an access key id and secret key.
    #[must_use]
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: SecretString::from(secret_key.into()),
            session_token: None,
        }
    }

    /// Attach a session token from temporary credentials.
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(SecretString::from(token.into()));
        self
    }

    /// Read credentials from the standard `AWS_*` environment variables.
    ///
    /// Returns `None` when either key is missing or empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let access_key = std::env::var(ACCESS_KEY_ENV).ok().filter(|v| !v.is_empty())?;
        let secret_key = std::env::var(SECRET_KEY_ENV).ok().filter(|v| !v.is_empty())?;
        let credentials = Self::new(access_key, secret_key);

        Some(match std::env::var(SESSION_TOKEN_ENV) {
            Ok(token) if !token.is_empty() => credentials.with_session_token(token),
            _ => credentials,
        })
    }

    /// The public access key id.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The secret key used as the HMAC key.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }

    /// The session token, if any.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_ref().map(|token| token.expose_secret())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .field("session_token", &self.session_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

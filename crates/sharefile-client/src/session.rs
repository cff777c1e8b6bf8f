//! Authenticated session and the OAuth password grant

use crate::config::API_DOMAIN;
use serde::Deserialize;
use std::fmt;

/// Path of the OAuth token endpoint, relative to the auth hostname
pub const TOKEN_PATH: &str = "/oauth/token";

/// Bearer token plus the account subdomain it was issued for.
///
/// Produced by [`ShareFileClient::authenticate`](crate::ShareFileClient::authenticate)
/// and never mutated afterwards.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    access_token: String,
    subdomain: String,
}

impl Session {
    /// Create a session from an already issued token
    pub fn new(access_token: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            subdomain: subdomain.into(),
        }
    }

    /// Raw access token
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Account subdomain
    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    /// `Authorization` header value
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// API hostname for this account
    pub fn hostname(&self) -> String {
        format!("{}.{}", self.subdomain, API_DOMAIN)
    }

    /// A session is usable only when it carries a token
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("subdomain", &self.subdomain)
            .finish()
    }
}

/// Inputs of the OAuth password grant
#[derive(Clone)]
pub struct Credentials {
    /// Auth endpoint base, e.g. `https://secure.sharefile.com`
    pub hostname: String,
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        hostname: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Absolute URL of the token endpoint
    pub fn token_url(&self) -> String {
        format!("{}{}", self.hostname.trim_end_matches('/'), TOKEN_PATH)
    }

    /// Form fields sent with the password grant
    pub(crate) fn form(&self) -> [(&'static str, &str); 5] {
        [
            ("grant_type", "password"),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("username", &self.username),
            ("password", &self.password),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("hostname", &self.hostname)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parse a token endpoint response body.
///
/// Extra fields (`refresh_token`, `expires_in`, `apicp`, ...) are ignored.
pub(crate) fn parse_token_response(body: &[u8]) -> Result<Session, String> {
    let session: Session =
        serde_json::from_slice(body).map_err(|e| format!("invalid token response: {e}"))?;
    if !session.is_valid() {
        return Err("token response carried an empty access_token".to_string());
    }
    if session.subdomain.is_empty() {
        return Err("token response carried an empty subdomain".to_string());
    }
    Ok(session)
}

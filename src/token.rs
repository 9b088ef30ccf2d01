use crate::client::{create_http_client, Config};
use crate::error::{Result, TwitterError};
use chrono::{DateTime, Duration, Utc};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Token represents an OAuth2 token as returned by the token endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Access token for API requests
    pub access_token: String,

    /// Token type (usually "bearer")
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// Refresh token, only issued with the `offline.access` scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Token lifetime in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    /// Space separated granted scopes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// When the token was received (not serialized)
    #[serde(skip)]
    pub obtained_at: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Token {
    /// Create a bearer token without expiry information
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Token {
            access_token: access_token.into(),
            token_type: default_token_type(),
            refresh_token: None,
            expires_in: None,
            scope: None,
            obtained_at: None,
        }
    }

    /// Check if we have a refresh token available
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Expiry instant, when both the lifetime and the receive time are known.
    /// A lifetime too large to represent means the token never expires.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let obtained_at = self.obtained_at?;
        let expires_in = Duration::try_seconds(self.expires_in?)?;
        obtained_at.checked_add_signed(expires_in)
    }

    /// True once the expiry instant has passed
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|at| at <= Utc::now())
    }
}

/// Error body of an OAuth2 token endpoint
#[derive(Debug, Deserialize)]
struct OAuth2ErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Decode a token endpoint response, mapping failures to errors
pub(crate) fn parse_token_response(status: u16, body: &[u8]) -> Result<Token> {
    if !(200..300).contains(&status) {
        if let Ok(err) = serde_json::from_slice::<OAuth2ErrorBody>(body) {
            return Err(TwitterError::OAuth2 {
                error: err.error,
                description: err.error_description,
            });
        }
        return Err(TwitterError::http(
            status,
            String::from_utf8_lossy(body).to_string(),
            None,
        ));
    }

    let mut token: Token = serde_json::from_slice(body)?;
    token.obtained_at = Some(Utc::now());
    Ok(token)
}

/// Supplies access tokens to the transport
pub trait TokenSource: Send + Sync {
    /// Obtain a fresh access token
    fn new_token(&self) -> Result<Token>;

    /// Whether calling `new_token` again can produce a different token
    fn can_renew(&self) -> bool {
        true
    }
}

/// Pre-issued bearer token (app-only bearer or user access token)
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: Token,
}

impl StaticTokenSource {
    pub fn new(access_token: impl Into<String>) -> Self {
        StaticTokenSource {
            token: Token::bearer(access_token),
        }
    }
}

impl From<Token> for StaticTokenSource {
    fn from(token: Token) -> Self {
        StaticTokenSource { token }
    }
}

impl TokenSource for StaticTokenSource {
    fn new_token(&self) -> Result<Token> {
        Ok(self.token.clone())
    }

    fn can_renew(&self) -> bool {
        false
    }
}

/// App-only token from the OAuth2 client credentials grant
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    client: Client,
    token_url: String,
    consumer_key: String,
    consumer_secret: String,
}

impl ClientCredentials {
    pub fn new(config: &Config, consumer_key: &str, consumer_secret: &str) -> Result<Self> {
        if consumer_key.is_empty() {
            return Err(TwitterError::config("consumer key not provided"));
        }
        if consumer_secret.is_empty() {
            return Err(TwitterError::config("consumer secret not provided"));
        }

        Ok(ClientCredentials {
            client: create_http_client(config)?,
            token_url: config.app_token_url.clone(),
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
        })
    }
}

impl TokenSource for ClientCredentials {
    fn new_token(&self) -> Result<Token> {
        debug!(url = %self.token_url, "requesting app-only token");

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .header("Accept", "application/json")
            .form(&[("grant_type", "client_credentials")])
            .send()?;

        let status = response.status().as_u16();
        let body = response.bytes()?;
        parse_token_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_deserialization() {
        let token = parse_token_response(
            200,
            br#"{
                "token_type": "bearer",
                "access_token": "AAAA",
                "expires_in": 7200,
                "refresh_token": "RRRR",
                "scope": "tweet.read users.read"
            }"#,
        )
        .unwrap();

        assert_eq!(token.access_token, "AAAA");
        assert_eq!(token.token_type, "bearer");
        assert!(token.has_refresh_token());
        assert!(token.expires_at().is_some());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_app_token_has_no_expiry() {
        let body = br#"{"token_type":"bearer","access_token":"AAAA"}"#;
        let token = parse_token_response(200, body).unwrap();
        assert!(!token.has_refresh_token());
        assert!(token.expires_at().is_none());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_token_error_response() {
        let err = parse_token_response(
            400,
            br#"{"error":"invalid_request","error_description":"Value passed was invalid."}"#,
        )
        .unwrap_err();

        match err {
            TwitterError::OAuth2 { error, description } => {
                assert_eq!(error, "invalid_request");
                assert!(description.unwrap().contains("invalid"));
            }
            other => panic!("expected OAuth2 error, got {:?}", other),
        }
    }

    #[test]
    fn test_token_error_without_oauth_body() {
        let err = parse_token_response(503, b"unavailable").unwrap_err();
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn test_expired_token() {
        let mut token = Token::bearer("AAAA");
        token.expires_in = Some(60);
        token.obtained_at = Some(Utc::now() - Duration::seconds(120));
        assert!(token.is_expired());
    }

    #[test]
    fn test_huge_lifetime_never_expires() {
        let mut token = Token::bearer("AAAA");
        token.obtained_at = Some(Utc::now());

        token.expires_in = Some(i64::MAX);
        assert_eq!(token.expires_at(), None);
        assert!(!token.is_expired());

        // representable as a duration, overflows the date range
        token.expires_in = Some(i64::MAX / 1000);
        assert_eq!(token.expires_at(), None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_client_credentials_requires_key() {
        let err = ClientCredentials::new(&Config::default(), "", "secret").unwrap_err();
        assert!(matches!(err, TwitterError::Configuration(_)));
    }
}

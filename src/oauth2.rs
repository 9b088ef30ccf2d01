//! OAuth2 authorization code flow with PKCE.
//!
//! Build an [`AuthorizationRequest`], send the user to its URL, then hand
//! the redirect URL back to [`AuthorizationCodeFlow::exchange_callback`] to
//! obtain a user [`Token`]. Tokens carrying a refresh token can be kept
//! alive with [`RefreshTokenSource`].

use crate::client::{create_http_client, Config};
use crate::error::{Result, TwitterError};
use crate::token::{parse_token_response, Token, TokenSource};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use std::sync::Mutex;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

/// PKCE verifier and its S256 challenge
#[derive(Debug, Clone)]
pub struct Pkce {
    /// Random secret, sent only with the token exchange
    pub code_verifier: String,
    /// BASE64URL(SHA256(code_verifier)), sent with the authorize request
    pub code_challenge: String,
}

impl Pkce {
    /// Generate a verifier from 32 random bytes (43 characters)
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
        Self::from_verifier(URL_SAFE_NO_PAD.encode(random_bytes))
    }

    pub fn from_verifier(code_verifier: String) -> Self {
        let hash = Sha256::digest(code_verifier.as_bytes());
        Pkce {
            code_challenge: URL_SAFE_NO_PAD.encode(hash),
            code_verifier,
        }
    }

    pub fn challenge_method(&self) -> &'static str {
        "S256"
    }
}

/// A pending authorization: the URL to visit plus what the exchange needs
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: Url,
    pub state: String,
    pub pkce: Pkce,
}

/// OAuth2 authorization code grant against the user token endpoint
#[derive(Debug, Clone)]
pub struct AuthorizationCodeFlow {
    client: Client,
    client_id: String,
    client_secret: Option<String>,
    authorize_url: String,
    token_url: String,
    redirect_url: String,
}

impl AuthorizationCodeFlow {
    /// `client_secret` is only set for confidential clients
    pub fn new(config: &Config, client_id: &str, client_secret: Option<&str>) -> Result<Self> {
        if client_id.is_empty() {
            return Err(TwitterError::config("client id not provided"));
        }

        Ok(AuthorizationCodeFlow {
            client: create_http_client(config)?,
            client_id: client_id.to_string(),
            client_secret: client_secret.filter(|s| !s.is_empty()).map(str::to_string),
            authorize_url: config.authorize_url.clone(),
            token_url: config.token_url.clone(),
            redirect_url: config.redirect_url.clone(),
        })
    }

    /// Build the authorize URL for the given scopes with a fresh state and PKCE pair
    pub fn authorize(&self, scopes: &[&str]) -> Result<AuthorizationRequest> {
        let state = Uuid::new_v4().simple().to_string();
        let pkce = Pkce::generate();

        let mut url = Url::parse(&self.authorize_url)?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", self.client_id.as_str())
            .append_pair("redirect_uri", self.redirect_url.as_str())
            .append_pair("scope", &scopes.join(" "))
            .append_pair("state", &state)
            .append_pair("code_challenge", &pkce.code_challenge)
            .append_pair("code_challenge_method", pkce.challenge_method());

        Ok(AuthorizationRequest { url, state, pkce })
    }

    /// Extract the authorization code from the redirect URL, checking the state
    pub fn parse_callback(callback_url: &str, expected_state: &str) -> Result<String> {
        let url = Url::parse(callback_url.trim())?;

        let mut code = None;
        let mut state = None;
        let mut error = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(error) = error {
            return Err(TwitterError::OAuth2 {
                error,
                description: None,
            });
        }
        if state.as_deref() != Some(expected_state) {
            return Err(TwitterError::config("OAuth state verification failed"));
        }
        code.ok_or_else(|| TwitterError::config("callback does not contain a code"))
    }

    /// Exchange an authorization code for a token
    pub fn exchange_code(&self, code: &str, pkce: &Pkce) -> Result<Token> {
        debug!(url = %self.token_url, "exchanging authorization code");
        self.token_request(&[
            ("code", code),
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_url.as_str()),
            ("code_verifier", pkce.code_verifier.as_str()),
        ])
    }

    /// Verify the redirect URL against `request` and exchange its code
    pub fn exchange_callback(
        &self,
        callback_url: &str,
        request: &AuthorizationRequest,
    ) -> Result<Token> {
        let code = Self::parse_callback(callback_url, &request.state)?;
        self.exchange_code(&code, &request.pkce)
    }

    /// Obtain a new token with a refresh token
    pub fn refresh(&self, refresh_token: &str) -> Result<Token> {
        debug!(url = %self.token_url, "refreshing access token");
        self.token_request(&[
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
        ])
    }

    fn token_request(&self, form: &[(&str, &str)]) -> Result<Token> {
        let mut request = self
            .client
            .post(&self.token_url)
            .header("Accept", "application/json")
            .form(form);
        if let Some(ref secret) = self.client_secret {
            request = request.basic_auth(&self.client_id, Some(secret));
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?;
        parse_token_response(status, &body)
    }
}

/// Keeps a user token alive through the refresh grant.
///
/// The API rotates refresh tokens, so each refresh replaces the stored token.
pub struct RefreshTokenSource {
    flow: AuthorizationCodeFlow,
    token: Mutex<Token>,
}

impl RefreshTokenSource {
    pub fn new(flow: AuthorizationCodeFlow, token: Token) -> Result<Self> {
        if !token.has_refresh_token() {
            return Err(TwitterError::config(
                "token has no refresh token, request the offline.access scope",
            ));
        }
        Ok(RefreshTokenSource {
            flow,
            token: Mutex::new(token),
        })
    }

    /// Latest token, for persisting between runs
    pub fn current(&self) -> Token {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl TokenSource for RefreshTokenSource {
    fn new_token(&self) -> Result<Token> {
        let mut current = self.token.lock().unwrap_or_else(|e| e.into_inner());
        let refresh_token = current
            .refresh_token
            .clone()
            .ok_or_else(|| TwitterError::config("no refresh token available"))?;

        let mut renewed = self.flow.refresh(&refresh_token)?;
        if !renewed.has_refresh_token() {
            warn!("refresh grant returned no new refresh token, keeping the previous one");
            renewed.refresh_token = Some(refresh_token);
        }
        *current = renewed.clone();
        Ok(renewed)
    }
}

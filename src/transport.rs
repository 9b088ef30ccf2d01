//! HTTP transport seam.
//!
//! The fetch loop only talks to a [`Transport`]: it hands over a fully built
//! [`HttpRequest`] and gets back status, headers and body. [`HttpTransport`]
//! is the `reqwest` implementation; it attaches credentials through an
//! [`Authorizer`] and renews OAuth2 tokens once when the API answers 401.

use crate::client::{create_http_client, Config};
use crate::error::Result;
use crate::token::{Token, TokenSource};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A request as the API sees it, before credentials are attached
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        HttpRequest {
            method,
            url: url.into(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }
}

/// Raw HTTP response. Header names are stored lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        HttpResponse {
            status,
            headers,
            body,
        }
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossy
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Performs one HTTP exchange
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Attaches credentials to outgoing requests
pub trait Authorizer: Send + Sync {
    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder>;

    /// Drop cached credentials after a 401. Returns true when a retry
    /// with fresh credentials is worth attempting.
    fn invalidate(&self) -> bool {
        false
    }
}

/// Sends requests without credentials
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAuth;

impl Authorizer for NoAuth {
    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(request)
    }
}

/// Bearer authorization backed by a [`TokenSource`].
///
/// The token is requested lazily on first use and cached until it expires
/// or the API rejects it.
pub struct BearerAuth<S: TokenSource> {
    source: S,
    cached: Mutex<Option<Token>>,
}

impl<S: TokenSource> BearerAuth<S> {
    pub fn new(source: S) -> Self {
        BearerAuth {
            source,
            cached: Mutex::new(None),
        }
    }

    /// Current token, fetching a new one when none is cached
    pub fn token(&self) -> Result<Token> {
        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() || !self.source.can_renew() {
                return Ok(token.clone());
            }
            debug!("cached access token expired");
        }
        let token = self.source.new_token()?;
        *cached = Some(token.clone());
        Ok(token)
    }
}

impl<S: TokenSource> Authorizer for BearerAuth<S> {
    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token()?;
        Ok(request.bearer_auth(token.access_token))
    }

    fn invalidate(&self) -> bool {
        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        cached.take();
        self.source.can_renew()
    }
}

/// `reqwest` blocking transport
pub struct HttpTransport {
    client: Client,
    authorizer: Box<dyn Authorizer>,
    debug: bool,
}

impl HttpTransport {
    pub fn new(config: &Config, authorizer: impl Authorizer + 'static) -> Result<Self> {
        Ok(HttpTransport {
            client: create_http_client(config)?,
            authorizer: Box::new(authorizer),
            debug: config.debug,
        })
    }

    /// Create a transport reusing an existing HTTP client
    pub fn with_client(client: Client, authorizer: impl Authorizer + 'static) -> Self {
        HttpTransport {
            client,
            authorizer: Box::new(authorizer),
            debug: false,
        }
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let builder = self.authorizer.authorize(builder)?;

        let start = Instant::now();
        let response = builder.send()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes()?.to_vec();

        let elapsed = start.elapsed();
        if self.debug {
            info!(
                method = %request.method,
                url = %request.url,
                status,
                ?elapsed,
                "request completed"
            );
        } else {
            debug!(
                method = %request.method,
                url = %request.url,
                status,
                ?elapsed,
                "request completed"
            );
        }

        Ok(HttpResponse::new(status, headers, body))
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let response = self.send(request)?;

        if response.status == 401 && self.authorizer.invalidate() {
            warn!(url = %request.url, "access token rejected, renewing");
            return self.send(request);
        }

        Ok(response)
    }
}

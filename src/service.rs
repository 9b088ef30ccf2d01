use crate::client::Config;
use crate::error::{Result, TwitterError};
use crate::models::{Account, ErrorResponse};
use crate::ratelimit::{duration_until, reset_timestamp, RateLimiter};
use crate::token::{ClientCredentials, StaticTokenSource, TokenSource};
use crate::transport::{BearerAuth, HttpRequest, HttpResponse, HttpTransport, Transport};
use serde::de::DeserializeOwned;
use std::time::SystemTime;
use tracing::info;

/// Number of times a request is repeated after a 429
pub const MAX_RATE_LIMIT_RETRIES: u32 = 1;

/// Twitter API client.
///
/// Owns the transport and the per-endpoint rate limit state. Resource calls
/// are created from it (`followers`, `user_tweets`, `lookup_users`, ...).
pub struct Service {
    transport: Box<dyn Transport>,
    config: Config,
    rate_limiter: RateLimiter,
}

impl Service {
    /// Create a service on top of any transport
    pub fn new(config: Config, transport: impl Transport + 'static) -> Self {
        Service {
            transport: Box::new(transport),
            config,
            rate_limiter: RateLimiter::new(),
        }
    }

    /// Authenticate every request with a pre-issued bearer token
    pub fn with_bearer_token(config: Config, bearer_token: &str) -> Result<Self> {
        if bearer_token.is_empty() {
            return Err(TwitterError::config("bearer token not provided"));
        }
        Self::with_token_source(config, StaticTokenSource::new(bearer_token))
    }

    /// App-only authentication through the client credentials grant
    pub fn with_client_credentials(
        config: Config,
        consumer_key: &str,
        consumer_secret: &str,
    ) -> Result<Self> {
        let source = ClientCredentials::new(&config, consumer_key, consumer_secret)?;
        Self::with_token_source(config, source)
    }

    /// Bearer authentication with tokens from `source`, requested lazily
    pub fn with_token_source(config: Config, source: impl TokenSource + 'static) -> Result<Self> {
        let transport = HttpTransport::new(&config, BearerAuth::new(source))?;
        Ok(Self::new(config, transport))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Perform a gated GET against `url`, accounting quota to `endpoint`.
    ///
    /// A 429 is retried once after sleeping until the reported reset. Any
    /// other non-2xx status is returned as [`TwitterError::Http`].
    pub fn get(&self, endpoint: &str, url: &str) -> Result<(HttpRequest, HttpResponse)> {
        let request = HttpRequest::get(url);
        let mut retries = 0;

        loop {
            self.rate_limiter.check(endpoint);
            let response = self.transport.execute(&request)?;
            self.rate_limiter.set(endpoint, &response);

            if response.status == 429 {
                let Some(reset_at) = reset_timestamp(&response) else {
                    return Err(http_error(&response));
                };
                if retries >= MAX_RATE_LIMIT_RETRIES {
                    return Err(TwitterError::RateLimited {
                        endpoint: endpoint.to_string(),
                        reset_at,
                    });
                }
                retries += 1;

                let wait = duration_until(reset_at, SystemTime::now());
                if !wait.is_zero() {
                    info!(
                        endpoint,
                        wait_ms = wait.as_millis() as u64,
                        "rate limit exceeded, waiting"
                    );
                    std::thread::sleep(wait);
                }
                continue;
            }

            if !response.is_success() {
                return Err(http_error(&response));
            }

            return Ok((request, response));
        }
    }

    /// GET `url` and decode the whole body as `T`
    pub fn get_json<T: DeserializeOwned>(&self, endpoint: &str, url: &str) -> Result<T> {
        let (_, response) = self.get(endpoint, url)?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Account the credentials belong to (v1.1 `account/verify_credentials`)
    pub fn get_account(&self) -> Result<Account> {
        let url = self.config.url_v1("account/verify_credentials.json");
        self.get_json("verify_credentials", &url)
    }
}

/// Build a transport error, using the `detail` of the error envelope when present
fn http_error(response: &HttpResponse) -> TwitterError {
    let detail = serde_json::from_slice::<ErrorResponse>(&response.body)
        .ok()
        .map(|e| e.detail)
        .filter(|d| !d.is_empty());
    TwitterError::http(response.status, response.text(), detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_uses_detail() {
        let response = HttpResponse::new(
            401,
            Vec::new(),
            br#"{"title":"Unauthorized","type":"about:blank","status":401,"detail":"Unauthorized"}"#
                .to_vec(),
        );
        match http_error(&response) {
            TwitterError::Http { status, detail, .. } => {
                assert_eq!(status, 401);
                assert_eq!(detail.as_deref(), Some("Unauthorized"));
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[test]
    fn test_http_error_plain_body() {
        let response = HttpResponse::new(502, Vec::new(), b"Bad Gateway".to_vec());
        let err = http_error(&response);
        assert_eq!(err.to_string(), "HTTP error 502: Bad Gateway");
    }

    #[test]
    fn test_empty_bearer_token_rejected() {
        assert!(matches!(
            Service::with_bearer_token(Config::default(), ""),
            Err(TwitterError::Configuration(_))
        ));
    }
}

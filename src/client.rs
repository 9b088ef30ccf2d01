use crate::error::Result;
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.twitter.com/2";
pub const DEFAULT_API_URL_V1: &str = "https://api.twitter.com/1.1";
pub const DEFAULT_TOKEN_URL: &str = "https://api.twitter.com/2/oauth2/token";
pub const DEFAULT_APP_TOKEN_URL: &str = "https://api.twitter.com/oauth2/token";
pub const DEFAULT_AUTHORIZE_URL: &str = "https://twitter.com/i/oauth2/authorize";
pub const DEFAULT_REDIRECT_URL: &str = "http://localhost:8080/oauth/redirect";

/// Create the HTTP client for API requests
/// with settings for connection pooling and timeouts taken from the config
pub fn create_http_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()?;
    Ok(client)
}

/// Configuration for the Twitter API client
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the v2 API
    pub api_url: String,
    /// Base URL of the v1.1 API
    pub api_url_v1: String,
    /// OAuth2 user token endpoint (authorization code and refresh grants)
    pub token_url: String,
    /// OAuth2 app-only token endpoint (client credentials grant)
    pub app_token_url: String,
    /// OAuth2 authorize page users are sent to
    pub authorize_url: String,
    /// Redirect URL registered for the app
    pub redirect_url: String,
    /// Total request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Log every request at info level instead of debug
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            api_url_v1: DEFAULT_API_URL_V1.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            app_token_url: DEFAULT_APP_TOKEN_URL.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            redirect_url: DEFAULT_REDIRECT_URL.to_string(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            debug: false,
        }
    }
}

impl Config {
    /// Create a configuration pointing both API versions at the given bases
    pub fn new(api_url: String, api_url_v1: String) -> Self {
        Config {
            api_url,
            api_url_v1,
            ..Config::default()
        }
    }

    /// Set the redirect URL used by the authorization code flow
    pub fn with_redirect_url(mut self, redirect_url: String) -> Self {
        self.redirect_url = redirect_url;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Full v2 URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }

    /// Full v1.1 URL for an endpoint path
    pub fn url_v1(&self, path: &str) -> String {
        format!("{}/{}", self.api_url_v1.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.url("users/1/followers"), "https://api.twitter.com/2/users/1/followers");
        assert_eq!(
            config.url_v1("account/verify_credentials.json"),
            "https://api.twitter.com/1.1/account/verify_credentials.json"
        );
        assert_eq!(config.redirect_url, DEFAULT_REDIRECT_URL);
    }

    #[test]
    fn test_custom_config() {
        let config = Config::new(
            "http://localhost:8080/2/".to_string(),
            "http://localhost:8080/1.1".to_string(),
        )
        .with_debug(true);
        assert!(config.debug);
        assert_eq!(config.url("tweets"), "http://localhost:8080/2/tweets");
    }
}

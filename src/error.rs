use crate::models::ApiError;
use crate::transport::{HttpRequest, HttpResponse};
use thiserror::Error;

/// Main error type for Twitter API operations
#[derive(Debug, Error)]
pub enum TwitterError {
    /// Missing credentials or a malformed request options object
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Per-item errors the endpoint treats as fatal
    #[error("Twitter API error: {message}")]
    Api {
        message: String,
        errors: Vec<ApiError>,
        request: Box<HttpRequest>,
        response: Box<HttpResponse>,
    },

    /// Non-2xx HTTP status
    #[error("HTTP error {status}: {}", detail.as_deref().unwrap_or(body.as_str()))]
    Http {
        status: u16,
        body: String,
        /// `detail` from the error envelope when the body carried one
        detail: Option<String>,
    },

    /// Still rate limited after waiting for the reset window
    #[error("rate limit exceeded on {endpoint}, resets at {reset_at}")]
    RateLimited { endpoint: String, reset_at: u64 },

    /// Token endpoint returned an OAuth2 error
    #[error(
        "OAuth2 error: {error}{}",
        description.as_deref().map(|d| format!(" ({})", d)).unwrap_or_default()
    )]
    OAuth2 {
        error: String,
        description: Option<String>,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl TwitterError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        TwitterError::Configuration(message.into())
    }

    /// Create a new HTTP error
    pub fn http(status: u16, body: String, detail: Option<String>) -> Self {
        TwitterError::Http {
            status,
            body,
            detail,
        }
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, TwitterError::Http { status: 404, .. })
    }

    /// Check if this error was caused by the API rate limit
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            TwitterError::RateLimited { .. } | TwitterError::Http { status: 429, .. }
        )
    }

    /// Get the HTTP status code if one is attached to this error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TwitterError::Http { status, .. } => Some(*status),
            TwitterError::Api { response, .. } => Some(response.status),
            TwitterError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Original request of a fatal per-item error
    pub fn request(&self) -> Option<&HttpRequest> {
        match self {
            TwitterError::Api { request, .. } => Some(&**request),
            _ => None,
        }
    }

    /// Original response of a fatal per-item error
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            TwitterError::Api { response, .. } => Some(&**response),
            _ => None,
        }
    }
}

/// Result type for Twitter API operations
pub type Result<T> = std::result::Result<T, TwitterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_not_found() {
        let error = TwitterError::http(404, "{}".to_string(), Some("missing".to_string()));
        assert!(error.is_not_found());
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.to_string(), "HTTP error 404: missing");
    }

    #[test]
    fn test_error_rate_limited() {
        let error = TwitterError::RateLimited {
            endpoint: "followers".to_string(),
            reset_at: 1_700_000_000,
        };
        assert!(error.is_rate_limited());
        assert_eq!(error.status_code(), Some(429));
    }

    #[test]
    fn test_api_error_context() {
        let request = HttpRequest::get("https://api.twitter.com/2/users/1/followers");
        let response = HttpResponse::new(200, Vec::new(), b"{}".to_vec());

        let error = TwitterError::Api {
            message: "1 errors found".to_string(),
            errors: Vec::new(),
            request: Box::new(request),
            response: Box::new(response),
        };

        assert_eq!(
            error.request().map(|r| r.url.as_str()),
            Some("https://api.twitter.com/2/users/1/followers")
        );
        assert_eq!(error.status_code(), Some(200));
    }

    #[test]
    fn test_oauth2_error_display() {
        let error = TwitterError::OAuth2 {
            error: "invalid_grant".to_string(),
            description: Some("code expired".to_string()),
        };
        assert_eq!(error.to_string(), "OAuth2 error: invalid_grant (code expired)");
    }
}

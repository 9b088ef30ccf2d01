//! Scripted transport shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use twitter_v2::{Config, HttpRequest, HttpResponse, Result, Service, Transport};

#[derive(Default)]
struct Script {
    responses: VecDeque<HttpResponse>,
    requests: Vec<HttpRequest>,
}

/// Answers requests with queued responses and records what was sent.
/// Clones share the same script.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: HttpResponse) -> &Self {
        self.script.lock().unwrap().responses.push_back(response);
        self
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push(HttpResponse::new(status, Vec::new(), body.to_string().into_bytes()))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    pub fn pending(&self) -> usize {
        self.script.lock().unwrap().responses.len()
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut script = self.script.lock().unwrap();
        script.requests.push(request.clone());
        let response = script
            .responses
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {}", request.url));
        Ok(response)
    }
}

/// Service on top of a fresh mock, with a handle to inspect it
pub fn service() -> (Service, MockTransport) {
    let transport = MockTransport::new();
    let service = Service::new(Config::default(), transport.clone());
    (service, transport)
}

pub fn now_secs() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs()
}

/// Response carrying rate limit headers
pub fn with_rate_limit(
    status: u16,
    remaining: u32,
    reset_at: u64,
    body: serde_json::Value,
) -> HttpResponse {
    HttpResponse::new(
        status,
        vec![
            ("x-rate-limit-remaining".to_string(), remaining.to_string()),
            ("x-rate-limit-reset".to_string(), reset_at.to_string()),
        ],
        body.to_string().into_bytes(),
    )
}

/// Value of `name` in the query string of `url`
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let url = url::Url::parse(url).unwrap();
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

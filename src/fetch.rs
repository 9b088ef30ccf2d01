//! Multi-request retrieval.
//!
//! [`fetch_pages`] follows `meta.next_token` until the API stops returning
//! one; [`fetch_by_ids`] splits an ID list into batches of
//! [`MAX_IDS_PER_REQUEST`] and sends every batch. Both accumulate data and
//! includes in arrival order and sort per-item errors into non-fatal ones
//! and ones the endpoint's [`ErrorPolicy`] decides about.

use crate::error::{Result, TwitterError};
use crate::models::{ApiError, Includes, Meta};
use crate::params::{encode_query, QueryEncoder, QueryParams};
use crate::service::Service;
use crate::transport::{HttpRequest, HttpResponse};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

/// Most IDs the lookup endpoints accept per request
pub const MAX_IDS_PER_REQUEST: usize = 100;

/// What to do with per-item errors other than "Not Found"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the fetch with [`TwitterError::Api`]
    Fatal,
    /// Log a warning and keep them with the non-fatal errors
    LogOnly,
}

/// Standard v2 response envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<D> {
    pub data: Option<D>,
    #[serde(default)]
    pub includes: Option<Includes>,
    #[serde(default)]
    pub meta: Option<Meta>,
    #[serde(default)]
    pub errors: Option<Vec<ApiError>>,
}

/// Accumulated outcome of a fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult<T> {
    pub data: Vec<T>,
    pub includes: Includes,
    /// Per-item errors that did not abort the fetch
    pub non_fatal_errors: Vec<ApiError>,
}

impl<T> Default for FetchResult<T> {
    fn default() -> Self {
        FetchResult {
            data: Vec::new(),
            includes: Includes::default(),
            non_fatal_errors: Vec::new(),
        }
    }
}

impl<T> FetchResult<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Values of the non-fatal errors, usually the IDs that were not found
    pub fn missing_ids(&self) -> impl Iterator<Item = &str> {
        self.non_fatal_errors
            .iter()
            .filter(|e| e.is_not_found())
            .filter_map(|e| e.value.as_deref())
    }
}

/// An endpoint listed page by page through `pagination_token`
pub trait Paginated: QueryParams {
    type Item: DeserializeOwned;

    /// Rate limit bucket
    const ENDPOINT: &'static str;
    const ERROR_POLICY: ErrorPolicy;

    /// Path below the v2 base URL, without query string
    fn path(&self) -> String;

    /// Token of the page to request next
    fn set_page_token(&mut self, token: String);
}

/// An endpoint resolving a list of IDs through the `ids` parameter
pub trait BulkLookup: QueryParams {
    type Item: DeserializeOwned;

    const ENDPOINT: &'static str;
    const ERROR_POLICY: ErrorPolicy;

    fn path(&self) -> String;

    fn ids(&self) -> &[String];
}

/// Decode a response body as an envelope holding `D`
pub fn decode<D: DeserializeOwned>(response: &HttpResponse) -> Result<Envelope<D>> {
    Ok(serde_json::from_slice(&response.body)?)
}

/// Move "Not Found" errors into `result`; apply `policy` to the rest
pub fn partition_errors<T>(
    endpoint: &str,
    policy: ErrorPolicy,
    errors: Vec<ApiError>,
    request: &HttpRequest,
    response: &HttpResponse,
    result: &mut FetchResult<T>,
) -> Result<()> {
    let (not_found, other): (Vec<ApiError>, Vec<ApiError>) =
        errors.into_iter().partition(ApiError::is_not_found);
    result.non_fatal_errors.extend(not_found);

    let Some(first) = other.first() else {
        return Ok(());
    };

    match policy {
        ErrorPolicy::Fatal => Err(TwitterError::Api {
            message: format!("{} errors found: {}", other.len(), first.detail),
            errors: other,
            request: Box::new(request.clone()),
            response: Box::new(response.clone()),
        }),
        ErrorPolicy::LogOnly => {
            warn!(
                endpoint,
                url = %request.url,
                count = other.len(),
                first = %first.detail,
                "errors found in response"
            );
            result.non_fatal_errors.extend(other);
            Ok(())
        }
    }
}

/// Request every page of `call` and accumulate the results.
///
/// Stops when a page has no `data` or no continuation token. Any transport
/// or decoding failure aborts the fetch and drops what was gathered so far.
pub fn fetch_pages<C: Paginated>(service: &Service, mut call: C) -> Result<FetchResult<C::Item>> {
    let mut result = FetchResult::default();
    let mut pages = 0usize;

    loop {
        let query = encode_query(&call)?;
        let url = service.config().url(&format!("{}{}", call.path(), query));

        let (request, response) = service.get(C::ENDPOINT, &url)?;
        let envelope: Envelope<Vec<C::Item>> = decode(&response)?;
        pages += 1;

        if let Some(errors) = envelope.errors {
            partition_errors(
                C::ENDPOINT,
                C::ERROR_POLICY,
                errors,
                &request,
                &response,
                &mut result,
            )?;
        }

        let Some(data) = envelope.data else {
            break;
        };
        result.data.extend(data);
        if let Some(includes) = envelope.includes {
            result.includes.merge(includes);
        }

        match envelope.meta.as_ref().and_then(Meta::next_page) {
            Some(token) => call.set_page_token(token.to_string()),
            None => break,
        }
    }

    debug!(endpoint = C::ENDPOINT, pages, records = result.data.len(), "fetch complete");
    Ok(result)
}

/// Resolve every ID of `call`, one request per batch of
/// [`MAX_IDS_PER_REQUEST`], in input order.
pub fn fetch_by_ids<C: BulkLookup>(service: &Service, call: &C) -> Result<FetchResult<C::Item>> {
    let mut result = FetchResult::default();

    for chunk in call.ids().chunks(MAX_IDS_PER_REQUEST) {
        let mut encoder = QueryEncoder::new();
        call.encode_params(&mut encoder)?;
        encoder.list("ids", Some(chunk))?;
        let url = service.config().url(&format!("{}{}", call.path(), encoder.query()));

        let (request, response) = service.get(C::ENDPOINT, &url)?;
        let envelope: Envelope<Vec<C::Item>> = decode(&response)?;

        if let Some(errors) = envelope.errors {
            partition_errors(
                C::ENDPOINT,
                C::ERROR_POLICY,
                errors,
                &request,
                &response,
                &mut result,
            )?;
        }

        if let Some(data) = envelope.data {
            result.data.extend(data);
        }
        if let Some(includes) = envelope.includes {
            result.includes.merge(includes);
        }
    }

    debug!(
        endpoint = C::ENDPOINT,
        ids = call.ids().len(),
        records = result.data.len(),
        missing = result.non_fatal_errors.len(),
        "lookup complete"
    );
    Ok(result)
}

/// Request a single object; the result holds at most one record
pub fn fetch_one<T: DeserializeOwned>(
    service: &Service,
    endpoint: &str,
    policy: ErrorPolicy,
    path: &str,
    params: &dyn QueryParams,
) -> Result<FetchResult<T>> {
    let query = encode_query(params)?;
    let url = service.config().url(&format!("{}{}", path, query));

    let (request, response) = service.get(endpoint, &url)?;
    let envelope: Envelope<T> = decode(&response)?;

    let mut result = FetchResult::default();
    if let Some(errors) = envelope.errors {
        partition_errors(endpoint, policy, errors, &request, &response, &mut result)?;
    }
    result.data.extend(envelope.data);
    if let Some(includes) = envelope.includes {
        result.includes.merge(includes);
    }
    Ok(result)
}

use serde::{Deserialize, Serialize};

/// Title the API uses for per-item "not found" errors
pub const NOT_FOUND_TITLE: &str = "Not Found Error";

/// One entry of the `errors` array of a v2 response.
///
/// These are per-item problems (one ID among many could not be resolved);
/// the rest of the response is still valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub title: String,

    #[serde(default)]
    pub detail: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ApiError {
    /// Missing resources do not invalidate the rest of a batch
    pub fn is_not_found(&self) -> bool {
        self.title == NOT_FOUND_TITLE
    }
}

/// Body of a non-2xx response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub detail: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

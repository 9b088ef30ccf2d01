use serde::{Deserialize, Serialize};

/// `meta` object of a listing response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub result_count: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newest_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_id: Option<String>,

    /// Continuation token for the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_token: Option<String>,
}

impl Meta {
    /// Next page token, ignoring empty strings
    pub fn next_page(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|t| !t.is_empty())
    }
}

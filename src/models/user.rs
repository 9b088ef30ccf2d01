use crate::time::Time;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Withheld;

/// A user as returned by the v2 API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,

    #[serde(default)]
    pub created_at: Option<Time>,
    #[serde(default)]
    pub description: Option<String>,
    /// URL and description entities, passed through untouched
    #[serde(default)]
    pub entities: Option<Value>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub pinned_tweet_id: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub protected: Option<bool>,
    #[serde(default)]
    pub public_metrics: Option<UserPublicMetrics>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub withheld: Option<Withheld>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPublicMetrics {
    pub followers_count: i64,
    pub following_count: i64,
    pub tweet_count: i64,
    pub listed_count: i64,
}

/// Authenticated account from the v1.1 `verify_credentials` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub id_str: Option<String>,
    pub name: String,
    pub screen_name: String,
}

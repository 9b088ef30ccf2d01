use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub full_name: String,

    #[serde(default)]
    pub contained_within: Option<Vec<String>>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    /// GeoJSON, passed through untouched
    #[serde(default)]
    pub geo: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub place_type: Option<String>,
}

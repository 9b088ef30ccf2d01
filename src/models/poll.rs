use crate::time::Time;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,

    #[serde(default)]
    pub options: Vec<PollOption>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub end_datetime: Option<Time>,
    #[serde(default)]
    pub voting_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub position: i64,
    pub label: String,
    #[serde(default)]
    pub votes: i64,
}

use crate::time::Time;
use serde::{Deserialize, Serialize};

/// A tweet as returned by the v2 API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,

    #[serde(default)]
    pub created_at: Option<Time>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub in_reply_to_user_id: Option<String>,
    #[serde(default)]
    pub referenced_tweets: Option<Vec<ReferencedTweet>>,
    #[serde(default)]
    pub attachments: Option<Attachments>,
    #[serde(default)]
    pub geo: Option<Geo>,
    #[serde(default)]
    pub entities: Option<TweetEntities>,
    #[serde(default)]
    pub withheld: Option<Withheld>,
    #[serde(default)]
    pub public_metrics: Option<TweetPublicMetrics>,
    #[serde(default)]
    pub possibly_sensitive: Option<bool>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub reply_settings: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl Tweet {
    /// IDs of the tweets this one retweets, quotes or replies to
    pub fn referenced_ids(&self) -> impl Iterator<Item = &str> {
        self.referenced_tweets
            .iter()
            .flatten()
            .map(|r| r.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencedTweet {
    /// `retweeted`, `quoted` or `replied_to`
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachments {
    #[serde(default)]
    pub media_keys: Vec<String>,
    #[serde(default)]
    pub poll_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TweetEntities {
    #[serde(default)]
    pub annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    pub urls: Vec<EntityUrl>,
    #[serde(default)]
    pub hashtags: Vec<EntityTag>,
    #[serde(default)]
    pub mentions: Vec<EntityMention>,
    #[serde(default)]
    pub cashtags: Vec<EntityTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAnnotation {
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub probability: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub normalized_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityUrl {
    pub start: i64,
    pub end: i64,
    pub url: String,
    #[serde(default)]
    pub expanded_url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
    #[serde(default)]
    pub unwound_url: Option<String>,
}

/// Hashtag or cashtag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTag {
    pub start: i64,
    pub end: i64,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    pub start: i64,
    pub end: i64,
    pub username: String,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Withheld {
    #[serde(default)]
    pub copyright: bool,
    #[serde(default)]
    pub country_codes: Vec<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TweetPublicMetrics {
    pub retweet_count: i64,
    pub reply_count: i64,
    pub like_count: i64,
    pub quote_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tweet_deserialization() {
        let json = r#"{
            "id": "1212092628029698048",
            "text": "We believe the best future version of our API will come from you.",
            "created_at": "2019-12-31T19:26:16.000Z",
            "author_id": "2244994945",
            "lang": "en",
            "possibly_sensitive": false,
            "referenced_tweets": [{"type": "replied_to", "id": "1212092627178287104"}],
            "attachments": {"media_keys": ["3_1212092626999898112"]},
            "entities": {"hashtags": [{"start": 0, "end": 4, "tag": "api"}]},
            "public_metrics": {
                "retweet_count": 7, "reply_count": 3, "like_count": 38, "quote_count": 1
            }
        }"#;

        let tweet: Tweet = serde_json::from_str(json).unwrap();
        assert_eq!(tweet.author_id.as_deref(), Some("2244994945"));
        assert_eq!(tweet.created_at.unwrap().unix(), 1577820376);
        assert_eq!(tweet.referenced_ids().collect::<Vec<_>>(), vec!["1212092627178287104"]);
        assert_eq!(tweet.attachments.unwrap().media_keys.len(), 1);
        assert_eq!(tweet.entities.unwrap().hashtags[0].tag, "api");
        assert_eq!(tweet.public_metrics.unwrap().like_count, 38);
    }

    #[test]
    fn test_minimal_tweet() {
        let tweet: Tweet = serde_json::from_str(r#"{"id": "1", "text": "hi"}"#).unwrap();
        assert!(tweet.created_at.is_none());
        assert_eq!(tweet.referenced_ids().count(), 0);
    }
}

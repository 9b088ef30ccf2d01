use serde::{Deserialize, Serialize};

use super::{Media, Place, Poll, Tweet, User};

/// Side-loaded objects requested through `expansions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Includes {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tweets: Vec<Tweet>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub places: Vec<Place>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<Media>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub polls: Vec<Poll>,
}

impl Includes {
    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
            && self.users.is_empty()
            && self.places.is_empty()
            && self.media.is_empty()
            && self.polls.is_empty()
    }

    /// Append every kind of `other` after the entries already held
    pub fn merge(&mut self, other: Includes) {
        self.tweets.extend(other.tweets);
        self.users.extend(other.users);
        self.places.extend(other.places);
        self.media.extend(other.media);
        self.polls.extend(other.polls);
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn tweet(&self, id: &str) -> Option<&Tweet> {
        self.tweets.iter().find(|t| t.id == id)
    }

    pub fn media(&self, media_key: &str) -> Option<&Media> {
        self.media.iter().find(|m| m.media_key == media_key)
    }

    pub fn place(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    pub fn poll(&self, id: &str) -> Option<&Poll> {
        self.polls.iter().find(|p| p.id == id)
    }
}

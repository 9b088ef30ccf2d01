use crate::error::Result;
use crate::fetch::{fetch_by_ids, fetch_pages, BulkLookup, ErrorPolicy, FetchResult, Paginated};
use crate::models::{
    Exclude, MediaField, PlaceField, PollField, Tweet, TweetExpansion, TweetField, UserField,
};
use crate::params::{set_list, QueryEncoder, QueryParams};
use crate::service::Service;
use crate::time::Time;

/// Field selectors shared by the tweet endpoints
#[derive(Debug, Clone, Default)]
struct TweetSelection {
    expansions: Option<Vec<String>>,
    media_fields: Option<Vec<String>>,
    place_fields: Option<Vec<String>>,
    poll_fields: Option<Vec<String>>,
    tweet_fields: Option<Vec<String>>,
    user_fields: Option<Vec<String>>,
}

macro_rules! tweet_selection_setters {
    () => {
        pub fn expansions(mut self, expansions: &[TweetExpansion]) -> Self {
            set_list(&mut self.selection.expansions, false, expansions);
            self
        }

        pub fn media_fields(mut self, fields: &[MediaField]) -> Self {
            set_list(&mut self.selection.media_fields, false, fields);
            self
        }

        pub fn place_fields(mut self, fields: &[PlaceField]) -> Self {
            set_list(&mut self.selection.place_fields, false, fields);
            self
        }

        pub fn poll_fields(mut self, fields: &[PollField]) -> Self {
            set_list(&mut self.selection.poll_fields, false, fields);
            self
        }

        pub fn tweet_fields(mut self, fields: &[TweetField]) -> Self {
            set_list(&mut self.selection.tweet_fields, false, fields);
            self
        }

        pub fn add_tweet_fields(mut self, fields: &[TweetField]) -> Self {
            set_list(&mut self.selection.tweet_fields, true, fields);
            self
        }

        pub fn user_fields(mut self, fields: &[UserField]) -> Self {
            set_list(&mut self.selection.user_fields, false, fields);
            self
        }

        pub fn add_user_fields(mut self, fields: &[UserField]) -> Self {
            set_list(&mut self.selection.user_fields, true, fields);
            self
        }
    };
}

/// Tweets authored by a user (`GET /2/users/:id/tweets`), all pages
pub struct GetTweetsCall<'a> {
    service: &'a Service,
    user_id: String,
    end_time: Option<Time>,
    exclude: Option<Vec<String>>,
    max_results: Option<i64>,
    pagination_token: Option<String>,
    since_id: Option<String>,
    start_time: Option<Time>,
    until_id: Option<String>,
    selection: TweetSelection,
}

/// Tweets by ID (`GET /2/tweets?ids=`), in batches of 100
pub struct LookupTweetsCall<'a> {
    service: &'a Service,
    ids: Vec<String>,
    selection: TweetSelection,
}

impl Service {
    pub fn user_tweets(&self, user_id: impl Into<String>) -> GetTweetsCall<'_> {
        GetTweetsCall {
            service: self,
            user_id: user_id.into(),
            end_time: None,
            exclude: None,
            max_results: None,
            pagination_token: None,
            since_id: None,
            start_time: None,
            until_id: None,
            selection: TweetSelection::default(),
        }
    }

    pub fn lookup_tweets<I, S>(&self, ids: I) -> LookupTweetsCall<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LookupTweetsCall {
            service: self,
            ids: ids.into_iter().map(Into::into).collect(),
            selection: TweetSelection::default(),
        }
    }
}

impl<'a> GetTweetsCall<'a> {
    tweet_selection_setters!();

    /// Newest creation time to return
    pub fn end_time(mut self, end_time: impl Into<Time>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    pub fn exclude(mut self, exclude: &[Exclude]) -> Self {
        set_list(&mut self.exclude, false, exclude);
        self
    }

    /// Page size, 5 to 100
    pub fn max_results(mut self, max_results: i64) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn pagination_token(mut self, token: impl Into<String>) -> Self {
        self.pagination_token = Some(token.into());
        self
    }

    pub fn since_id(mut self, since_id: impl Into<String>) -> Self {
        self.since_id = Some(since_id.into());
        self
    }

    /// Oldest creation time to return
    pub fn start_time(mut self, start_time: impl Into<Time>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    pub fn until_id(mut self, until_id: impl Into<String>) -> Self {
        self.until_id = Some(until_id.into());
        self
    }

    pub fn send(self) -> Result<FetchResult<Tweet>> {
        let service = self.service;
        fetch_pages(service, self)
    }
}

impl QueryParams for GetTweetsCall<'_> {
    fn encode_params(&self, encoder: &mut QueryEncoder) -> Result<()> {
        let s = &self.selection;
        encoder
            .time("end_time", self.end_time.as_ref())?
            .list("exclude", self.exclude.as_deref())?
            .list("expansions", s.expansions.as_deref())?
            .int("max_results", self.max_results)?
            .list("media.fields", s.media_fields.as_deref())?
            .string("pagination_token", self.pagination_token.as_deref())?
            .list("place.fields", s.place_fields.as_deref())?
            .list("poll.fields", s.poll_fields.as_deref())?
            .string("since_id", self.since_id.as_deref())?
            .time("start_time", self.start_time.as_ref())?
            .list("tweet.fields", s.tweet_fields.as_deref())?
            .string("until_id", self.until_id.as_deref())?
            .list("user.fields", s.user_fields.as_deref())?;
        Ok(())
    }
}

impl Paginated for GetTweetsCall<'_> {
    type Item = Tweet;

    const ENDPOINT: &'static str = "user_tweets";
    const ERROR_POLICY: ErrorPolicy = ErrorPolicy::Fatal;

    fn path(&self) -> String {
        format!("users/{}/tweets", self.user_id)
    }

    fn set_page_token(&mut self, token: String) {
        self.pagination_token = Some(token);
    }
}

impl<'a> LookupTweetsCall<'a> {
    tweet_selection_setters!();

    pub fn send(self) -> Result<FetchResult<Tweet>> {
        fetch_by_ids(self.service, &self)
    }
}

impl QueryParams for LookupTweetsCall<'_> {
    fn encode_params(&self, encoder: &mut QueryEncoder) -> Result<()> {
        let s = &self.selection;
        encoder
            .list("expansions", s.expansions.as_deref())?
            .list("media.fields", s.media_fields.as_deref())?
            .list("place.fields", s.place_fields.as_deref())?
            .list("poll.fields", s.poll_fields.as_deref())?
            .list("tweet.fields", s.tweet_fields.as_deref())?
            .list("user.fields", s.user_fields.as_deref())?;
        Ok(())
    }
}

impl BulkLookup for LookupTweetsCall<'_> {
    type Item = Tweet;

    const ENDPOINT: &'static str = "tweets";
    const ERROR_POLICY: ErrorPolicy = ErrorPolicy::Fatal;

    fn path(&self) -> String {
        "tweets".to_string()
    }

    fn ids(&self) -> &[String] {
        &self.ids
    }
}

use crate::error::Result;
use crate::fetch::{fetch_pages, ErrorPolicy, FetchResult, Paginated};
use crate::models::{TweetField, User, UserExpansion, UserField};
use crate::params::{set_list, QueryEncoder, QueryParams};
use crate::service::Service;

/// Followers of a user (`GET /2/users/:id/followers`), all pages
pub struct GetFollowersCall<'a> {
    service: &'a Service,
    user_id: String,
    expansions: Option<Vec<String>>,
    max_results: Option<i64>,
    pagination_token: Option<String>,
    tweet_fields: Option<Vec<String>>,
    user_fields: Option<Vec<String>>,
}

impl Service {
    pub fn followers(&self, user_id: impl Into<String>) -> GetFollowersCall<'_> {
        GetFollowersCall {
            service: self,
            user_id: user_id.into(),
            expansions: None,
            max_results: None,
            pagination_token: None,
            tweet_fields: None,
            user_fields: None,
        }
    }
}

impl<'a> GetFollowersCall<'a> {
    pub fn expansions(mut self, expansions: &[UserExpansion]) -> Self {
        set_list(&mut self.expansions, false, expansions);
        self
    }

    /// Page size, 1 to 1000
    pub fn max_results(mut self, max_results: i64) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Start from a page returned by an earlier listing
    pub fn pagination_token(mut self, token: impl Into<String>) -> Self {
        self.pagination_token = Some(token.into());
        self
    }

    pub fn tweet_fields(mut self, fields: &[TweetField]) -> Self {
        set_list(&mut self.tweet_fields, false, fields);
        self
    }

    pub fn add_tweet_fields(mut self, fields: &[TweetField]) -> Self {
        set_list(&mut self.tweet_fields, true, fields);
        self
    }

    pub fn user_fields(mut self, fields: &[UserField]) -> Self {
        set_list(&mut self.user_fields, false, fields);
        self
    }

    pub fn add_user_fields(mut self, fields: &[UserField]) -> Self {
        set_list(&mut self.user_fields, true, fields);
        self
    }

    pub fn send(self) -> Result<FetchResult<User>> {
        let service = self.service;
        fetch_pages(service, self)
    }
}

impl QueryParams for GetFollowersCall<'_> {
    fn encode_params(&self, encoder: &mut QueryEncoder) -> Result<()> {
        encoder
            .list("expansions", self.expansions.as_deref())?
            .int("max_results", self.max_results)?
            .string("pagination_token", self.pagination_token.as_deref())?
            .list("tweet.fields", self.tweet_fields.as_deref())?
            .list("user.fields", self.user_fields.as_deref())?;
        Ok(())
    }
}

impl Paginated for GetFollowersCall<'_> {
    type Item = User;

    const ENDPOINT: &'static str = "followers";
    const ERROR_POLICY: ErrorPolicy = ErrorPolicy::Fatal;

    fn path(&self) -> String {
        format!("users/{}/followers", self.user_id)
    }

    fn set_page_token(&mut self, token: String) {
        self.pagination_token = Some(token);
    }
}

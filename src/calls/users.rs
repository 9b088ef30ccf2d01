use crate::error::Result;
use crate::fetch::{fetch_by_ids, fetch_one, BulkLookup, ErrorPolicy, FetchResult};
use crate::models::{TweetField, User, UserExpansion, UserField};
use crate::params::{set_list, QueryEncoder, QueryParams};
use crate::service::Service;

/// Field selectors accepted by the user endpoints
#[derive(Debug, Clone, Default)]
struct UserSelection {
    expansions: Option<Vec<String>>,
    tweet_fields: Option<Vec<String>>,
    user_fields: Option<Vec<String>>,
}

impl QueryParams for UserSelection {
    fn encode_params(&self, encoder: &mut QueryEncoder) -> Result<()> {
        encoder
            .list("expansions", self.expansions.as_deref())?
            .list("tweet.fields", self.tweet_fields.as_deref())?
            .list("user.fields", self.user_fields.as_deref())?;
        Ok(())
    }
}

macro_rules! user_selection_setters {
    () => {
        pub fn expansions(mut self, expansions: &[UserExpansion]) -> Self {
            set_list(&mut self.selection.expansions, false, expansions);
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

/// A single user (`GET /2/users/:id`)
pub struct GetUserCall<'a> {
    service: &'a Service,
    user_id: String,
    selection: UserSelection,
}

/// Users by ID (`GET /2/users?ids=`), in batches of 100
pub struct LookupUsersCall<'a> {
    service: &'a Service,
    ids: Vec<String>,
    selection: UserSelection,
}

impl Service {
    pub fn user(&self, user_id: impl Into<String>) -> GetUserCall<'_> {
        GetUserCall {
            service: self,
            user_id: user_id.into(),
            selection: UserSelection::default(),
        }
    }

    pub fn lookup_users<I, S>(&self, ids: I) -> LookupUsersCall<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LookupUsersCall {
            service: self,
            ids: ids.into_iter().map(Into::into).collect(),
            selection: UserSelection::default(),
        }
    }
}

impl<'a> GetUserCall<'a> {
    user_selection_setters!();

    /// Per-item errors in the response are logged and kept in
    /// `non_fatal_errors`; `data` is empty when the user was not returned.
    pub fn send(self) -> Result<FetchResult<User>> {
        fetch_one(
            self.service,
            "users",
            ErrorPolicy::LogOnly,
            &format!("users/{}", self.user_id),
            &self.selection,
        )
    }
}

impl<'a> LookupUsersCall<'a> {
    user_selection_setters!();

    pub fn send(self) -> Result<FetchResult<User>> {
        fetch_by_ids(self.service, &self)
    }
}

impl QueryParams for LookupUsersCall<'_> {
    fn encode_params(&self, encoder: &mut QueryEncoder) -> Result<()> {
        self.selection.encode_params(encoder)
    }
}

impl BulkLookup for LookupUsersCall<'_> {
    type Item = User;

    const ENDPOINT: &'static str = "users_lookup";
    const ERROR_POLICY: ErrorPolicy = ErrorPolicy::Fatal;

    fn path(&self) -> String {
        "users".to_string()
    }

    fn ids(&self) -> &[String] {
        &self.ids
    }
}

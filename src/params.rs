//! Query string encoding of request options.
//!
//! Each call type implements [`QueryParams`] by visiting its optional fields
//! in declaration order. Absent fields are skipped, present ones are rendered
//! by type and the pairs are emitted sorted by key.

use crate::error::{Result, TwitterError};
use crate::models::WireName;
use crate::time::Time;
use std::collections::{BTreeMap, BTreeSet};
use url::form_urlencoded;

/// Request options that can be rendered as query parameters
pub trait QueryParams {
    fn encode_params(&self, encoder: &mut QueryEncoder) -> Result<()>;
}

/// Collects `name=value` pairs for one options object
#[derive(Debug, Default)]
pub struct QueryEncoder {
    seen: BTreeSet<&'static str>,
    values: BTreeMap<&'static str, String>,
}

impl QueryEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(&mut self, name: &'static str, value: Option<&str>) -> Result<&mut Self> {
        self.field(name, value.map(str::to_string))
    }

    pub fn int(&mut self, name: &'static str, value: Option<i64>) -> Result<&mut Self> {
        self.field(name, value.map(|v| v.to_string()))
    }

    pub fn bool(&mut self, name: &'static str, value: Option<bool>) -> Result<&mut Self> {
        self.field(name, value.map(|v| v.to_string()))
    }

    /// Comma separated, in list order, duplicates kept
    pub fn list(&mut self, name: &'static str, value: Option<&[String]>) -> Result<&mut Self> {
        self.field(name, value.map(|v| v.join(",")))
    }

    pub fn time(&mut self, name: &'static str, value: Option<&Time>) -> Result<&mut Self> {
        self.field(name, value.map(Time::param))
    }

    fn field(&mut self, name: &'static str, value: Option<String>) -> Result<&mut Self> {
        if name.is_empty() {
            return Err(TwitterError::config("query parameter without a name"));
        }
        if !self.seen.insert(name) {
            return Err(TwitterError::config(format!(
                "query parameter '{}' declared twice",
                name
            )));
        }
        if let Some(value) = value {
            self.values.insert(name, value);
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rendered value of a present parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Percent-encoded pairs joined by `&`, keys in alphabetical order
    pub fn finish(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.values.iter())
            .finish()
    }

    /// `?` followed by [`finish`](Self::finish), or an empty string when nothing is set
    pub fn query(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("?{}", self.finish())
    }
}

/// Render `params` as `?k=v&...`, or an empty string when nothing is set
pub fn encode_query<P: QueryParams + ?Sized>(params: &P) -> Result<String> {
    let mut encoder = QueryEncoder::new();
    params.encode_params(&mut encoder)?;
    Ok(encoder.query())
}

/// Replace or extend a list option with field selectors.
///
/// When `add` is set the existing entries are kept; values already present
/// are not repeated.
pub fn set_list<F: WireName>(target: &mut Option<Vec<String>>, add: bool, fields: &[F]) {
    let mut elems = match target.take() {
        Some(existing) if add => existing,
        _ => Vec::new(),
    };

    for field in fields {
        let name = field.wire_name();
        if !elems.iter().any(|e| e == name) {
            elems.push(name.to_string());
        }
    }

    *target = Some(elems);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TweetField, UserField};
    use chrono::{TimeZone, Utc};

    #[derive(Default)]
    struct Options {
        max_results: Option<i64>,
        pagination_token: Option<String>,
        exclude_replies: Option<bool>,
        tweet_fields: Option<Vec<String>>,
        start_time: Option<Time>,
        // not a query parameter
        user_id: String,
    }

    impl QueryParams for Options {
        fn encode_params(&self, encoder: &mut QueryEncoder) -> Result<()> {
            encoder
                .int("max_results", self.max_results)?
                .string("pagination_token", self.pagination_token.as_deref())?
                .bool("exclude_replies", self.exclude_replies)?
                .list("tweet.fields", self.tweet_fields.as_deref())?
                .time("start_time", self.start_time.as_ref())?;
            Ok(())
        }
    }

    #[test]
    fn test_empty_options_encode_to_nothing() {
        let options = Options {
            user_id: "12".to_string(),
            ..Options::default()
        };
        assert_eq!(encode_query(&options).unwrap(), "");
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let options = Options {
            max_results: Some(100),
            ..Options::default()
        };
        assert_eq!(encode_query(&options).unwrap(), "?max_results=100");
    }

    #[test]
    fn test_false_is_present() {
        let options = Options {
            exclude_replies: Some(false),
            ..Options::default()
        };
        assert_eq!(encode_query(&options).unwrap(), "?exclude_replies=false");
    }

    #[test]
    fn test_list_is_comma_joined_then_escaped() {
        let options = Options {
            tweet_fields: Some(vec!["a".to_string(), "b".to_string()]),
            ..Options::default()
        };
        assert_eq!(encode_query(&options).unwrap(), "?tweet.fields=a%2Cb");
    }

    #[test]
    fn test_list_keeps_duplicates() {
        let options = Options {
            tweet_fields: Some(vec!["a".to_string(), "a".to_string()]),
            ..Options::default()
        };
        assert_eq!(encode_query(&options).unwrap(), "?tweet.fields=a%2Ca");
    }

    #[test]
    fn test_keys_sorted_and_idempotent() {
        let options = Options {
            max_results: Some(5),
            pagination_token: Some("7140dibdnow9c7btw3w29grvxfcgvpb9n9coehpk7xz5i".to_string()),
            exclude_replies: Some(true),
            tweet_fields: Some(vec!["created_at".to_string(), "lang".to_string()]),
            start_time: Some(Time(Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap())),
            user_id: String::new(),
        };

        let first = encode_query(&options).unwrap();
        assert_eq!(
            first,
            "?exclude_replies=true&max_results=5\
             &pagination_token=7140dibdnow9c7btw3w29grvxfcgvpb9n9coehpk7xz5i\
             &start_time=2023-01-02T03%3A04%3A05Z&tweet.fields=created_at%2Clang"
        );
        assert_eq!(encode_query(&options).unwrap(), first);
    }

    #[test]
    fn test_values_are_escaped() {
        let options = Options {
            pagination_token: Some("a b&c=d".to_string()),
            ..Options::default()
        };
        assert_eq!(encode_query(&options).unwrap(), "?pagination_token=a+b%26c%3Dd");
    }

    #[test]
    fn test_duplicate_name_is_configuration_error() {
        struct Broken;
        impl QueryParams for Broken {
            fn encode_params(&self, encoder: &mut QueryEncoder) -> Result<()> {
                encoder.int("max_results", Some(1))?.int("max_results", None)?;
                Ok(())
            }
        }

        let err = encode_query(&Broken).unwrap_err();
        assert!(matches!(err, TwitterError::Configuration(_)));
    }

    #[test]
    fn test_empty_name_is_configuration_error() {
        struct Unnamed;
        impl QueryParams for Unnamed {
            fn encode_params(&self, encoder: &mut QueryEncoder) -> Result<()> {
                encoder.string("", Some("x"))?;
                Ok(())
            }
        }

        assert!(matches!(
            encode_query(&Unnamed).unwrap_err(),
            TwitterError::Configuration(_)
        ));
    }

    #[test]
    fn test_set_list_replace_and_add() {
        let mut fields = None;
        set_list(&mut fields, false, &[TweetField::CreatedAt, TweetField::Lang]);
        set_list(&mut fields, true, &[TweetField::Lang, TweetField::AuthorId]);
        assert_eq!(
            fields.as_deref(),
            Some(&["created_at".to_string(), "lang".to_string(), "author_id".to_string()][..])
        );

        set_list(&mut fields, false, &[UserField::Username]);
        assert_eq!(fields, Some(vec!["username".to_string()]));
    }
}

//! Tests against the real API. They need a bearer token in
//! `TWITTER_BEARER_TOKEN` and are skipped by default.
//!
//! Run with: cargo test --test live_tests -- --ignored

mod support;

use twitter_v2::{Config, Service, TweetExpansion, TweetField, UserField};

const TWITTER_DEV_ID: &str = "2244994945";

fn live_service() -> Service {
    support::init_tracing();
    let token = std::env::var("TWITTER_BEARER_TOKEN").expect("TWITTER_BEARER_TOKEN not set");
    Service::with_bearer_token(Config::default().with_debug(true), &token)
        .expect("failed to create service")
}

#[test]
#[ignore]
fn test_live_user() {
    let service = live_service();

    let result = service
        .user(TWITTER_DEV_ID)
        .user_fields(&[UserField::CreatedAt, UserField::PublicMetrics])
        .send()
        .expect("failed to get user");

    let user = result.data.first().expect("expected one user");
    assert_eq!(user.id, TWITTER_DEV_ID);
    assert!(user.public_metrics.is_some());
}

#[test]
#[ignore]
fn test_live_lookup_users_reports_missing() {
    let service = live_service();

    // 1 is not a valid account
    let result = service
        .lookup_users([TWITTER_DEV_ID, "1"])
        .send()
        .expect("failed to look up users");

    assert_eq!(result.data.len(), 1);
    assert_eq!(result.missing_ids().collect::<Vec<_>>(), vec!["1"]);
}

#[test]
#[ignore]
fn test_live_user_tweets() {
    let service = live_service();

    let result = service
        .user_tweets(TWITTER_DEV_ID)
        .max_results(100)
        .tweet_fields(&[TweetField::CreatedAt, TweetField::AuthorId])
        .expansions(&[TweetExpansion::AuthorId])
        .send()
        .expect("failed to list tweets");

    assert!(!result.data.is_empty(), "expected tweets, got none");
    for tweet in &result.data {
        assert_eq!(tweet.author_id.as_deref(), Some(TWITTER_DEV_ID));
    }
    assert!(result.includes.user(TWITTER_DEV_ID).is_some());
}

#[test]
#[ignore]
fn test_live_rate_limit_state_tracked() {
    let service = live_service();

    service.user(TWITTER_DEV_ID).send().expect("failed to get user");

    let state = service.rate_limiter().state("users").expect("expected rate limit headers");
    assert!(state.reset_at > 0);
}

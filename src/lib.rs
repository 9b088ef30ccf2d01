//! # twitter-v2 - Blocking client for the Twitter REST API
//!
//! A Rust client for the Twitter v2 REST API (plus the v1.1 account
//! endpoint). Calls are built from a [`Service`], configured with typed
//! options and executed synchronously.
//!
//! ## Features
//!
//! - Typed request options encoded into sorted, percent-escaped query strings
//! - Per-endpoint rate limit tracking; calls wait for the window to reset
//!   instead of failing
//! - Automatic pagination through `next_token` and bulk ID lookups in
//!   batches of 100
//! - Authentication:
//!   - Pre-issued bearer tokens
//!   - App-only tokens through the client credentials grant
//!   - OAuth2 authorization code flow with PKCE and refresh tokens
//! - Per-item API errors separated into "not found" and fatal ones
//!
//! ## Basic Usage
//!
//! ```no_run
//! use twitter_v2::{Config, Service, TweetField, UserField};
//!
//! fn main() -> twitter_v2::Result<()> {
//!     let service = Service::with_bearer_token(Config::default(), "AAAA...")?;
//!
//!     let followers = service
//!         .followers("2244994945")
//!         .max_results(1000)
//!         .user_fields(&[UserField::CreatedAt, UserField::PublicMetrics])
//!         .send()?;
//!     println!("{} followers", followers.data.len());
//!
//!     let tweets = service
//!         .lookup_tweets(["1228393702244134912", "1227640996038684673"])
//!         .tweet_fields(&[TweetField::CreatedAt, TweetField::AuthorId])
//!         .send()?;
//!     for id in tweets.missing_ids() {
//!         println!("not found: {}", id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Authentication
//!
//! ### Client credentials
//!
//! ```no_run
//! use twitter_v2::{Config, Service};
//!
//! let service =
//!     Service::with_client_credentials(Config::default(), "consumer_key", "consumer_secret")?;
//! # Ok::<(), twitter_v2::TwitterError>(())
//! ```
//!
//! ### Authorization code with PKCE
//!
//! ```no_run
//! use twitter_v2::{AuthorizationCodeFlow, Config, RefreshTokenSource, Service};
//!
//! let config = Config::default();
//! let flow = AuthorizationCodeFlow::new(&config, "client_id", None)?;
//! let request = flow.authorize(&["tweet.read", "users.read", "offline.access"])?;
//! println!("open {}", request.url);
//!
//! // after the user was redirected back
//! let callback = "http://localhost:8080/oauth/redirect?state=...&code=...";
//! let token = flow.exchange_callback(callback, &request)?;
//!
//! let service = Service::with_token_source(config, RefreshTokenSource::new(flow, token)?)?;
//! # Ok::<(), twitter_v2::TwitterError>(())
//! ```

pub mod calls;
pub mod client;
pub mod error;
pub mod fetch;
pub mod models;
pub mod oauth2;
pub mod params;
pub mod ratelimit;
pub mod service;
pub mod time;
pub mod token;
pub mod transport;

// Re-export main types for convenience
pub use calls::{GetFollowersCall, GetTweetsCall, GetUserCall, LookupTweetsCall, LookupUsersCall};
pub use client::Config;
pub use error::{Result, TwitterError};
pub use fetch::{ErrorPolicy, FetchResult, MAX_IDS_PER_REQUEST};
pub use models::{
    Exclude, Includes, MediaField, PlaceField, PollField, Tweet, TweetExpansion, TweetField, User,
    UserExpansion, UserField,
};
pub use oauth2::{AuthorizationCodeFlow, AuthorizationRequest, Pkce, RefreshTokenSource};
pub use ratelimit::RateLimiter;
pub use service::Service;
pub use time::Time;
pub use token::{ClientCredentials, StaticTokenSource, Token, TokenSource};
pub use transport::{HttpRequest, HttpResponse, Transport};

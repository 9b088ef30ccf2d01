//! Response models for the v2 API.
//!
//! Only the commonly requested fields are modelled; everything is optional
//! unless the API always returns it.

mod error;
mod fields;
mod includes;
mod media;
mod meta;
mod place;
mod poll;
mod tweet;
mod user;

pub use error::{ApiError, ErrorResponse, NOT_FOUND_TITLE};
pub use fields::{
    Exclude, MediaField, PlaceField, PollField, TweetExpansion, TweetField, UserExpansion,
    UserField, WireName,
};
pub use includes::Includes;
pub use media::{Media, MediaPublicMetrics};
pub use meta::Meta;
pub use place::Place;
pub use poll::{Poll, PollOption};
pub use tweet::{
    Attachments, EntityAnnotation, EntityMention, EntityTag, EntityUrl, Geo, ReferencedTweet,
    Tweet, TweetEntities, TweetPublicMetrics, Withheld,
};
pub use user::{Account, User, UserPublicMetrics};

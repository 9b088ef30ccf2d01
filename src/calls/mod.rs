//! Resource calls.
//!
//! Each call is created from a [`Service`](crate::Service) method, configured
//! through builder methods and executed with `send()`.

mod followers;
mod tweets;
mod users;

pub use followers::GetFollowersCall;
pub use tweets::{GetTweetsCall, LookupTweetsCall};
pub use users::{GetUserCall, LookupUsersCall};

//! Endpoint facades.
//!
//! Each facade borrows the [`Client`](crate::Client) and groups the
//! operations of one API area. None of them hold state: the token cache
//! and connection pool live on the client.

pub mod push;
pub mod stats;
pub mod user;

pub use push::PushApi;
pub use stats::StatsApi;
pub use user::UserApi;

//! Authentication: request signing and token lifecycle management.

pub mod token;

pub(crate) use token::JSON_CONTENT_TYPE;
pub use token::{sign, Clock, Credential, SystemClock, TokenManager};

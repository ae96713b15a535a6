//! Authentication primitives.
//!
//! [`Credentials`] are what the client logs in with; [`AccessToken`] is what
//! a successful login hands back and what every protected request carries.

mod credentials;
mod tokens;

pub use credentials::Credentials;
pub use tokens::AccessToken;

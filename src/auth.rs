//! Bearer-credential lifecycle: redacted secrets, the cached token value, and the
//! single-flight [`TokenManager`] that refreshes it.

pub mod manager;
pub mod secret;
pub mod token;

pub use manager::*;
pub use secret::*;
pub use token::*;

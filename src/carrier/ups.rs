//! UPS Rating API support.
//!
//! [`UpsProvider`] authenticates through the OAuth client-credentials grant, posts the
//! payload built by [`mapper::to_wire_request`] to the `Shop` endpoint, and maps the
//! rated shipments back into [`RateQuote`](crate::domain::RateQuote) values. UPS field
//! names never leave this module.

pub mod mapper;
pub mod service_codes;
pub mod wire;

mod provider;
pub use provider::*;

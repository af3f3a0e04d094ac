//! Carrier-agnostic value objects and the single validation entry point.
//!
//! Callers describe a shipment with a [`RateRequestDraft`], a loosely typed mirror of the
//! JSON a client would send. [`RateRequestDraft::validate`] checks every field, accumulates
//! every violation, and on success returns an immutable [`RateRequest`]: the only input the
//! carrier layer accepts. Nothing in this module knows about any carrier's wire format.

pub mod address;
pub mod money;
pub mod parcel;
pub mod quote;
pub mod request;
pub mod validation;

pub use address::*;
pub use money::*;
pub use parcel::*;
pub use quote::*;
pub use request::*;
pub use validation::*;

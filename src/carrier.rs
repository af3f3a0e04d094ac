//! Carrier-abstraction contract and the bundled carrier implementations.
//!
//! A carrier plugs in by implementing [`CarrierProvider`]; the quoting service only ever
//! talks to that trait. Each implementation owns its credentials, its wire format, and
//! the classification of its transport failures into the crate's error taxonomy.

pub mod ups;

// self
use crate::{
	_prelude::*,
	domain::{RateQuote, RateRequest},
};

/// Boxed future returned by [`CarrierProvider::get_rates`].
pub type RatesFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<RateQuote>>> + 'a + Send>>;

/// Contract every carrier backend implements.
///
/// Implementations may fail with any [`ErrorKind`] except
/// [`ErrorKind::ValidationFailed`]: requests reaching a provider are already validated.
pub trait CarrierProvider
where
	Self: Send + Sync,
{
	/// Carrier name stamped on every quote (e.g. `UPS`).
	fn name(&self) -> &str;

	/// Quotes every service the carrier offers for `request`.
	fn get_rates<'a>(&'a self, request: &'a RateRequest) -> RatesFuture<'a>;
}
impl<P> CarrierProvider for Arc<P>
where
	P: ?Sized + CarrierProvider,
{
	fn name(&self) -> &str {
		(**self).name()
	}

	fn get_rates<'a>(&'a self, request: &'a RateRequest) -> RatesFuture<'a> {
		(**self).get_rates(request)
	}
}

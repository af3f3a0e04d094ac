//! The crate's entry point for quoting.

// self
use crate::{
	_prelude::*,
	carrier::CarrierProvider,
	domain::{RateQuote, RateRequestDraft},
	obs::{self, Stage, StageOutcome},
};

/// Validates rate requests and delegates them to one injected [`CarrierProvider`].
///
/// The service holds no per-request state, so a single instance can be shared (or
/// cloned) across tasks.
#[derive(Clone)]
pub struct QuotingService {
	provider: Arc<dyn CarrierProvider>,
}
impl QuotingService {
	/// Wraps `provider`.
	pub fn new(provider: impl 'static + CarrierProvider) -> Self {
		Self { provider: Arc::new(provider) }
	}

	/// Wraps an already shared provider.
	pub fn with_provider(provider: Arc<dyn CarrierProvider>) -> Self {
		Self { provider }
	}

	/// Name of the injected carrier.
	pub fn provider_name(&self) -> &str {
		self.provider.name()
	}

	/// Quotes `draft` with the injected carrier.
	///
	/// Validation runs first; a draft with any violation fails with
	/// [`ErrorKind::ValidationFailed`] carrying every issue, and the provider is never
	/// called. Provider errors are returned unchanged.
	pub async fn get_rates(&self, draft: &RateRequestDraft) -> Result<Vec<RateQuote>> {
		obs::record_stage_outcome(Stage::Validation, self.provider.name(), StageOutcome::Attempt);

		let validated = draft.validate().map_err(Error::validation_failed);

		obs::record_result(Stage::Validation, self.provider.name(), &validated);

		self.provider.get_rates(&validated?).await
	}

	/// Decodes a JSON request body and quotes it.
	///
	/// Structurally invalid JSON fails with [`ErrorKind::ValidationFailed`] before any
	/// network activity, exactly like a draft that fails validation.
	pub async fn get_rates_json(&self, body: &str) -> Result<Vec<RateQuote>> {
		let draft = match RateRequestDraft::from_json(body) {
			Ok(draft) => draft,
			Err(err) => {
				obs::record_stage_outcome(
					Stage::Validation,
					self.provider.name(),
					StageOutcome::Failure,
				);
				obs::log_failure(Stage::Validation, self.provider.name(), &err);

				return Err(err);
			},
		};

		self.get_rates(&draft).await
	}
}
impl Debug for QuotingService {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("QuotingService").field("provider", &self.provider.name()).finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;
	use crate::{
		carrier::RatesFuture,
		domain::{Money, RateRequest},
	};

	#[derive(Default)]
	struct CountingProvider {
		calls: AtomicUsize,
	}
	impl CarrierProvider for CountingProvider {
		fn name(&self) -> &str {
			"Fake"
		}

		fn get_rates<'a>(&'a self, request: &'a RateRequest) -> RatesFuture<'a> {
			self.calls.fetch_add(1, Ordering::SeqCst);

			let postal_code = request.destination().postal_code.clone();

			Box::pin(async move {
				Ok(vec![RateQuote {
					carrier: "Fake".into(),
					service_name: format!("To {postal_code}"),
					service_code: "X".into(),
					total_charge: Money::new(Decimal::ONE, "USD").expect("Money should build."),
					transit_days: None,
					guaranteed_delivery: None,
				}])
			})
		}
	}

	const VALID: &str = r#"{
		"origin": {"addressLine1": "1 Main St", "city": "New York", "stateOrProvince": "NY", "postalCode": "10001", "countryCode": "US"},
		"destination": {"addressLine1": "2 Side St", "city": "Los Angeles", "stateOrProvince": "CA", "postalCode": "90001", "countryCode": "US"},
		"parcels": [{"weight": {"value": 5, "unit": "LBS"}}]
	}"#;

	#[tokio::test]
	async fn valid_requests_reach_the_provider() {
		let provider = Arc::new(CountingProvider::default());
		let service = QuotingService::new(provider.clone());
		let quotes = service.get_rates_json(VALID).await.expect("Valid request should quote.");

		assert_eq!(quotes[0].service_name, "To 90001");
		assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
		assert_eq!(service.provider_name(), "Fake");
	}

	#[tokio::test]
	async fn invalid_requests_never_reach_the_provider() {
		let provider = Arc::new(CountingProvider::default());
		let service = QuotingService::new(provider.clone());
		let err = service
			.get_rates(&RateRequestDraft::default())
			.await
			.expect_err("Empty draft must fail.");

		assert!(err.is(ErrorKind::ValidationFailed));
		assert_eq!(err.context.issues.len(), 3);

		let err = service
			.get_rates_json(r#"{"parcels": "many"}"#)
			.await
			.expect_err("Mistyped JSON must fail.");

		assert!(err.is(ErrorKind::ValidationFailed));
		assert_eq!(err.context.issues[0].path, "parcels");
		assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
	}
}

// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;
use crate::{
	_prelude::*,
	auth::{Secret, TokenManager},
	carrier::{CarrierProvider, RatesFuture, ups::mapper},
	config::CarrierConfig,
	domain::{RateQuote, RateRequest},
	error::ConfigError,
	http::{HttpRequest, HttpResponse, HttpTransport, TransportError},
	obs::{self, Stage, StageOutcome, StageSpan},
};

const CARRIER: &str = "UPS";

/// [`UpsProvider`] wired to the default reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestUpsProvider = UpsProvider<ReqwestTransport>;

/// [`CarrierProvider`] for the UPS Rating API.
pub struct UpsProvider<T>
where
	T: ?Sized + HttpTransport,
{
	tokens: TokenManager<T>,
	transport: Arc<T>,
	rating_url: Url,
	rating_timeout: StdDuration,
}
impl<T> UpsProvider<T>
where
	T: ?Sized + HttpTransport,
{
	/// Name stamped on every UPS quote.
	pub const NAME: &'static str = CARRIER;
	/// Rating endpoint path appended to the configured base URL.
	pub const RATING_PATH: &'static str = "/api/rating/v2403/Shop";

	/// Creates a provider that sends both token and rating calls through `transport`.
	pub fn with_transport(config: &CarrierConfig, transport: Arc<T>) -> Result<Self, ConfigError> {
		let rating_url = Url::parse(&format!(
			"{}{}",
			config.base_url.as_str().trim_end_matches('/'),
			Self::RATING_PATH
		))
		.map_err(|source| ConfigError::InvalidUrl { field: "base_url", source })?;

		Ok(Self {
			tokens: TokenManager::new(transport.clone(), config.client_credentials(), Self::NAME),
			transport,
			rating_url,
			rating_timeout: config.rating_timeout,
		})
	}

	/// Overrides how long before its stated expiry a token is refreshed.
	pub fn with_token_safety_margin(mut self, margin: Duration) -> Self {
		self.tokens = self.tokens.with_safety_margin(margin);

		self
	}

	/// Token manager owned by this provider.
	pub fn tokens(&self) -> &TokenManager<T> {
		&self.tokens
	}

	/// Fully resolved rating endpoint.
	pub fn rating_url(&self) -> &Url {
		&self.rating_url
	}

	async fn rate(&self, request: &RateRequest, token: &Secret) -> Result<Vec<RateQuote>> {
		let body = serde_json::to_string(&mapper::to_wire_request(request)).map_err(|err| {
			Error::carrier_api(format!("Failed to encode {} rate request: {err}.", Self::NAME))
		})?;
		let request = HttpRequest::post(self.rating_url.clone())
			.header("Content-Type", "application/json")
			.header("Accept", "application/json")
			.header("Authorization", token.bearer_authorization())
			.body(body)
			.timeout(self.rating_timeout);
		let response = self.transport.send(request).await.map_err(network_error)?;

		if !response.is_success() {
			return Err(self.classify(response, token));
		}

		obs::log_step(Stage::Rating, Self::NAME, "Rating response received.");

		mapper::from_wire_body(&response.body, Self::NAME)
	}

	fn classify(&self, response: HttpResponse, token: &Secret) -> Error {
		let summary = mapper::error_summary(&response.body);
		let detail = summary.as_ref().map(|(_, message)| format!(": {message}")).unwrap_or_default();
		let err = match response.status {
			401 => {
				// The next call must fetch a new token unless one was refreshed meanwhile.
				self.tokens.invalidate_rejected(token);

				Error::auth_failed(format!("{} rejected the access token{detail}.", Self::NAME))
			},
			429 => Error::rate_limited(format!("{} rate limit exceeded{detail}.", Self::NAME)),
			status => Error::carrier_api(format!(
				"{} Rating API returned HTTP {status}{detail}.",
				Self::NAME
			)),
		};
		let err = match summary.and_then(|(code, _)| code) {
			Some(code) => err.with_code(code),
			None => err,
		};

		err.with_status(response.status).with_body(response.body)
	}
}
impl<T> CarrierProvider for UpsProvider<T>
where
	T: ?Sized + HttpTransport,
{
	fn name(&self) -> &str {
		Self::NAME
	}

	fn get_rates<'a>(&'a self, request: &'a RateRequest) -> RatesFuture<'a> {
		Box::pin(async move {
			const STAGE: Stage = Stage::Rating;

			let token = self.tokens.acquire().await?;

			obs::record_stage_outcome(STAGE, Self::NAME, StageOutcome::Attempt);

			let outcome =
				StageSpan::new(STAGE, Self::NAME).instrument(self.rate(request, &token)).await;

			obs::record_result(STAGE, Self::NAME, &outcome);

			outcome
		})
	}
}
#[cfg(feature = "reqwest")]
impl UpsProvider<ReqwestTransport> {
	/// Creates a provider backed by a fresh redirect-free reqwest client.
	pub fn new(config: &CarrierConfig) -> Result<Self, ConfigError> {
		Self::with_transport(config, Arc::new(ReqwestTransport::new()?))
	}
}
impl<T> Debug for UpsProvider<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UpsProvider")
			.field("rating_url", &self.rating_url.as_str())
			.field("rating_timeout", &self.rating_timeout)
			.field("tokens", &self.tokens)
			.finish()
	}
}

fn network_error(err: TransportError) -> Error {
	let message = if err.is_timeout() {
		format!("{CARRIER} Rating API request timed out: {}", err.detail())
	} else {
		format!("Could not reach the {CARRIER} Rating API: {}", err.detail())
	};

	Error::network(message).with_code(err.code())
}

#[cfg(test)]
mod tests {
	// std
	use std::{
		io,
		sync::atomic::{AtomicUsize, Ordering},
	};
	// self
	use super::*;
	use crate::{
		domain::{AddressDraft, ParcelDraft, RateRequestDraft, WeightDraft},
		http::TransportFuture,
	};

	type Reply = std::result::Result<HttpResponse, TransportError>;

	struct ScriptedTransport {
		calls: AtomicUsize,
		replies: Mutex<Vec<Reply>>,
		seen: Mutex<Vec<HttpRequest>>,
	}
	impl ScriptedTransport {
		fn new(replies: Vec<Reply>) -> Arc<Self> {
			Arc::new(Self {
				calls: AtomicUsize::new(0),
				replies: Mutex::new(replies),
				seen: Default::default(),
			})
		}
	}
	impl HttpTransport for ScriptedTransport {
		fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			self.seen.lock().push(request);

			let reply = self.replies.lock().remove(0);

			Box::pin(async move { reply })
		}
	}

	fn token() -> Reply {
		Ok(HttpResponse::new(200, r#"{"access_token":"tok","expires_in":"3600"}"#))
	}

	fn config() -> CarrierConfig {
		CarrierConfig::builder()
			.client_id("id")
			.client_secret("secret")
			.base_url("https://ups.example.com/")
			.token_url("https://ups.example.com/security/v1/oauth/token")
			.build()
			.expect("Test config should build.")
	}

	fn request() -> RateRequest {
		let address = |postal_code: &str| AddressDraft {
			address_line1: Some("1 Main St".into()),
			city: Some("Town".into()),
			state_or_province: Some("NY".into()),
			postal_code: Some(postal_code.into()),
			country_code: Some("US".into()),
			..Default::default()
		};

		RateRequestDraft {
			origin: Some(address("10001")),
			destination: Some(address("90001")),
			parcels: Some(vec![ParcelDraft {
				weight: Some(WeightDraft { value: Some(2.5), unit: Some("KGS".into()) }),
				dimensions: None,
			}]),
		}
		.validate()
		.expect("Test request should validate.")
	}

	#[test]
	fn rating_url_joins_base_without_double_slash() {
		let provider = UpsProvider::with_transport(&config(), ScriptedTransport::new(Vec::new()))
			.expect("Provider should build.");

		assert_eq!(provider.rating_url().as_str(), "https://ups.example.com/api/rating/v2403/Shop");
		assert_eq!(provider.name(), "UPS");
	}

	#[tokio::test]
	async fn posts_bearer_authorized_json() {
		let transport = ScriptedTransport::new(vec![
			token(),
			Ok(HttpResponse::new(
				200,
				r#"{"RateResponse":{"RatedShipment":{"Service":{"Code":"03"},"TotalCharges":{"CurrencyCode":"USD","MonetaryValue":"9.10"}}}}"#,
			)),
		]);
		let provider =
			UpsProvider::with_transport(&config(), transport.clone()).expect("Provider should build.");
		let quotes = provider.get_rates(&request()).await.expect("Rating should succeed.");
		let seen = transport.seen.lock();
		let body: JsonValue =
			serde_json::from_str(&seen[1].body).expect("Rating body should be JSON.");

		assert_eq!(quotes[0].service_name, "Ground");
		assert_eq!(seen[1].header_value("authorization"), Some("Bearer tok"));
		assert_eq!(seen[1].timeout, CarrierConfig::DEFAULT_RATING_TIMEOUT);
		assert_eq!(
			body["RateRequest"]["Shipment"]["Package"][0]["PackageWeight"]["Weight"],
			"2.5"
		);
	}

	#[tokio::test]
	async fn unauthorized_rating_invalidates_the_token() {
		let transport = ScriptedTransport::new(vec![
			token(),
			Ok(HttpResponse::new(
				401,
				r#"{"response":{"errors":[{"code":"250002","message":"Invalid Authentication Information."}]}}"#,
			)),
		]);
		let provider =
			UpsProvider::with_transport(&config(), transport).expect("Provider should build.");
		let err = provider.get_rates(&request()).await.expect_err("401 must fail.");

		assert!(err.is(ErrorKind::AuthFailed));
		assert_eq!(err.context.status, Some(401));
		assert_eq!(err.context.code.as_deref(), Some("250002"));
		assert!(err.message.contains("Invalid Authentication Information."));
		assert!(provider.tokens().cached().is_none());
	}

	#[tokio::test]
	async fn statuses_and_transport_failures_are_classified() {
		let transport = ScriptedTransport::new(vec![
			token(),
			Ok(HttpResponse::new(429, "slow down")),
			Ok(HttpResponse::new(503, "maintenance")),
			Err(TransportError::no_response(io::Error::new(
				io::ErrorKind::ConnectionRefused,
				"connection refused",
			))),
		]);
		let provider =
			UpsProvider::with_transport(&config(), transport.clone()).expect("Provider should build.");
		let request = request();
		let limited = provider.get_rates(&request).await.expect_err("429 must fail.");
		let upstream = provider.get_rates(&request).await.expect_err("503 must fail.");
		let refused = provider.get_rates(&request).await.expect_err("Refused must fail.");

		assert!(limited.is(ErrorKind::RateLimited));
		assert!(upstream.is(ErrorKind::CarrierApiError));
		assert_eq!(upstream.context.status, Some(503));
		assert_eq!(upstream.context.body.as_deref(), Some("maintenance"));
		assert!(refused.is(ErrorKind::NetworkError));
		assert_eq!(refused.context.code.as_deref(), Some("NO_RESPONSE"));
		// Only one token fetch: non-401 failures keep the cached token.
		assert_eq!(transport.calls.load(Ordering::SeqCst), 4);
	}
}

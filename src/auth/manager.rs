//! Single-flight bearer token manager for the client-credentials grant.
//!
//! [`TokenManager::acquire`] serves the cached token while it is fresh and otherwise
//! refreshes it. Concurrent callers that find no fresh token attach to one shared
//! [`OnceCell`] so exactly one request reaches the token endpoint and every caller
//! observes the same outcome. If the caller driving the refresh is cancelled, the next
//! waiter takes over the initialization, so nobody is left waiting on an orphaned refresh.
//!
//! State machine: `Empty -> Refreshing -> Valid -> (expiry) -> Refreshing -> ...`; a failed
//! refresh always lands in `Empty` so a stale credential is never served afterwards.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
// self
use crate::{
	_prelude::*,
	auth::{CachedToken, Secret, token::TokenResponse},
	http::{HttpRequest, HttpTransport},
	obs::{self, Stage, StageOutcome, StageSpan},
};

type RefreshCell = Arc<OnceCell<Result<CachedToken>>>;

// Keeps expiry arithmetic far away from the representable date range.
const MAX_TTL_SECS: i64 = i32::MAX as i64;

/// Token endpoint coordinates and client credentials.
#[derive(Clone, Debug)]
pub struct ClientCredentials {
	/// Token endpoint URL.
	pub token_url: Url,
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: Secret,
	/// Upper bound for one token request.
	pub timeout: StdDuration,
}
impl ClientCredentials {
	/// Default bound for a token request.
	pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(10);

	/// Creates credentials with the default timeout.
	pub fn new(token_url: Url, client_id: impl Into<String>, client_secret: Secret) -> Self {
		Self {
			token_url,
			client_id: client_id.into(),
			client_secret,
			timeout: Self::DEFAULT_TIMEOUT,
		}
	}

	/// Overrides the token request timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	fn basic_authorization(&self) -> String {
		let pair = format!("{}:{}", self.client_id, self.client_secret.expose());

		format!("Basic {}", BASE64.encode(pair))
	}
}

enum TokenState {
	Empty,
	Refreshing(RefreshCell),
	Valid(CachedToken),
}

/// Caches one bearer token per configured provider and refreshes it on demand.
pub struct TokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	transport: Arc<T>,
	credentials: ClientCredentials,
	carrier: String,
	safety_margin: Duration,
	state: Mutex<TokenState>,
}
impl<T> TokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	/// Tokens are treated as expired this long before the endpoint says they are.
	pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::seconds(60);

	/// Creates a manager with no cached token.
	pub fn new(
		transport: impl Into<Arc<T>>,
		credentials: ClientCredentials,
		carrier: impl Into<String>,
	) -> Self {
		Self {
			transport: transport.into(),
			credentials,
			carrier: carrier.into(),
			safety_margin: Self::DEFAULT_SAFETY_MARGIN,
			state: Mutex::new(TokenState::Empty),
		}
	}

	/// Overrides the safety margin subtracted from every token's lifetime.
	pub fn with_safety_margin(mut self, margin: Duration) -> Self {
		self.safety_margin = if margin.is_negative() { Duration::ZERO } else { margin };

		self
	}

	/// Returns a fresh bearer token, refreshing it at most once for all concurrent callers.
	pub async fn acquire(&self) -> Result<Secret> {
		let cell = {
			let mut state = self.state.lock();

			match &*state {
				TokenState::Valid(token) if token.is_fresh_at(OffsetDateTime::now_utc()) =>
					return Ok(token.secret.clone()),
				TokenState::Refreshing(cell) => cell.clone(),
				TokenState::Valid(_) | TokenState::Empty => {
					let cell: RefreshCell = Arc::new(OnceCell::new());

					*state = TokenState::Refreshing(cell.clone());

					cell
				},
			}
		};
		let outcome = cell.get_or_init(|| self.refresh(&cell)).await;

		match outcome {
			Ok(token) => Ok(token.secret.clone()),
			Err(err) => Err(err.clone()),
		}
	}

	/// Drops the cached token so the next [`acquire`](Self::acquire) fetches a new one.
	pub fn invalidate(&self) {
		let mut state = self.state.lock();

		if matches!(&*state, TokenState::Valid(_)) {
			*state = TokenState::Empty;
		}
	}

	/// Drops the cached token only if it is still `rejected`.
	///
	/// A token refreshed by another caller after `rejected` was handed out is kept.
	pub fn invalidate_rejected(&self, rejected: &Secret) {
		let mut state = self.state.lock();

		if matches!(&*state, TokenState::Valid(token) if token.secret == *rejected) {
			*state = TokenState::Empty;
		}
	}

	/// Returns the cached token when one is stored, fresh or not.
	pub fn cached(&self) -> Option<CachedToken> {
		match &*self.state.lock() {
			TokenState::Valid(token) => Some(token.clone()),
			TokenState::Empty | TokenState::Refreshing(_) => None,
		}
	}

	async fn refresh(&self, cell: &RefreshCell) -> Result<CachedToken> {
		const STAGE: Stage = Stage::TokenRefresh;

		obs::record_stage_outcome(STAGE, &self.carrier, StageOutcome::Attempt);

		let outcome = StageSpan::new(STAGE, &self.carrier).instrument(self.fetch()).await;

		obs::record_result(STAGE, &self.carrier, &outcome);

		let mut state = self.state.lock();

		// A newer refresh or an explicit invalidation may have replaced the state meanwhile.
		if matches!(&*state, TokenState::Refreshing(current) if Arc::ptr_eq(current, cell)) {
			*state = match &outcome {
				Ok(token) => TokenState::Valid(token.clone()),
				Err(_) => TokenState::Empty,
			};
		}

		outcome
	}

	async fn fetch(&self) -> Result<CachedToken> {
		let request = HttpRequest::post(self.credentials.token_url.clone())
			.header("Content-Type", "application/x-www-form-urlencoded")
			.header("Accept", "application/json")
			.header("Authorization", self.credentials.basic_authorization())
			.body("grant_type=client_credentials")
			.timeout(self.credentials.timeout);
		let response = self.transport.send(request).await.map_err(|err| {
			Error::auth_failed(format!(
				"Failed to obtain {} access token: {}",
				self.carrier,
				err.detail()
			))
			.with_code(err.code())
		})?;

		if !response.is_success() {
			return Err(Error::auth_failed(format!(
				"{} token endpoint rejected the client credentials.",
				self.carrier
			))
			.with_status(response.status)
			.with_body(response.body));
		}

		self.parse(response.status, &response.body)
	}

	fn parse(&self, status: u16, body: &str) -> Result<CachedToken> {
		let malformed = |reason: String| {
			Error::auth_failed(format!(
				"{} token endpoint returned a malformed response: {reason}.",
				self.carrier
			))
			.with_status(status)
			.with_body(body)
		};
		let mut de = serde_json::Deserializer::from_str(body);
		let parsed: TokenResponse =
			serde_path_to_error::deserialize(&mut de).map_err(|err| malformed(err.to_string()))?;

		if parsed.access_token.trim().is_empty() {
			return Err(malformed("access_token is empty".into()));
		}

		let ttl = match parsed.expires_in.seconds() {
			Some(secs) if secs > 0 && secs <= MAX_TTL_SECS => secs,
			_ => return Err(malformed("expires_in must be a positive number of seconds".into())),
		};

		Ok(CachedToken::new(
			Secret::new(parsed.access_token),
			OffsetDateTime::now_utc(),
			Duration::seconds(ttl),
			self.safety_margin,
		))
	}
}
impl<T> Debug for TokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let state = match &*self.state.lock() {
			TokenState::Empty => "empty",
			TokenState::Refreshing(_) => "refreshing",
			TokenState::Valid(_) => "valid",
		};

		f.debug_struct("TokenManager")
			.field("carrier", &self.carrier)
			.field("token_url", &self.credentials.token_url.as_str())
			.field("client_id", &self.credentials.client_id)
			.field("state", &state)
			.finish()
	}
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
	use crate::http::{HttpResponse, TransportError, TransportFuture};

	struct ScriptedTransport {
		calls: AtomicUsize,
		replies: Mutex<Vec<std::result::Result<HttpResponse, TransportError>>>,
		seen: Mutex<Vec<HttpRequest>>,
	}
	impl ScriptedTransport {
		fn new(replies: Vec<std::result::Result<HttpResponse, TransportError>>) -> Self {
			Self { calls: AtomicUsize::new(0), replies: Mutex::new(replies), seen: Default::default() }
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

	fn token_body(token: &str, expires_in: i64) -> std::result::Result<HttpResponse, TransportError> {
		Ok(HttpResponse::new(
			200,
			format!(r#"{{"access_token":"{token}","token_type":"Bearer","expires_in":{expires_in}}}"#),
		))
	}

	fn manager(transport: Arc<ScriptedTransport>) -> TokenManager<ScriptedTransport> {
		let url = Url::parse("https://auth.example.com/oauth/token").expect("Test URL should parse.");

		TokenManager::new(transport, ClientCredentials::new(url, "id", Secret::new("secret")), "UPS")
	}

	#[tokio::test]
	async fn sends_basic_auth_form_request() {
		let transport = Arc::new(ScriptedTransport::new(vec![token_body("abc", 3600)]));
		let tokens = manager(transport.clone());
		let token = tokens.acquire().await.expect("Token fetch should succeed.");
		let seen = transport.seen.lock();

		assert_eq!(token.expose(), "abc");
		assert_eq!(seen[0].body, "grant_type=client_credentials");
		assert_eq!(seen[0].header_value("authorization"), Some("Basic aWQ6c2VjcmV0"));
		assert_eq!(seen[0].timeout, ClientCredentials::DEFAULT_TIMEOUT);
	}

	#[tokio::test]
	async fn non_positive_ttl_is_malformed() {
		let transport = Arc::new(ScriptedTransport::new(vec![token_body("abc", 0)]));
		let err = manager(transport).acquire().await.expect_err("Zero TTL should be rejected.");

		assert!(err.is(ErrorKind::AuthFailed));
		assert_eq!(err.context.status, Some(200));
	}

	#[tokio::test]
	async fn timeouts_are_auth_failures() {
		let transport = Arc::new(ScriptedTransport::new(vec![Err(TransportError::timed_out(
			io::Error::new(io::ErrorKind::TimedOut, "deadline elapsed"),
		))]));
		let tokens = manager(transport);
		let err = tokens.acquire().await.expect_err("Timed-out refresh should fail.");

		assert!(err.is(ErrorKind::AuthFailed));
		assert_eq!(err.context.code.as_deref(), Some("TIMED_OUT"));
		assert!(tokens.cached().is_none());
	}

	#[tokio::test]
	async fn invalidate_forces_a_new_fetch() {
		let transport =
			Arc::new(ScriptedTransport::new(vec![token_body("first", 3600), token_body("second", 3600)]));
		let tokens = manager(transport.clone());

		assert_eq!(tokens.acquire().await.expect("First fetch should succeed.").expose(), "first");
		assert_eq!(tokens.acquire().await.expect("Cached token should be served.").expose(), "first");

		tokens.invalidate();

		assert_eq!(tokens.acquire().await.expect("Second fetch should succeed.").expose(), "second");
		assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn rejecting_a_superseded_token_keeps_the_newer_one() {
		let transport =
			Arc::new(ScriptedTransport::new(vec![token_body("first", 3600), token_body("second", 3600)]));
		let tokens = manager(transport.clone());
		let stale = tokens.acquire().await.expect("First fetch should succeed.");

		tokens.invalidate();

		let fresh = tokens.acquire().await.expect("Second fetch should succeed.");

		tokens.invalidate_rejected(&stale);

		assert_eq!(tokens.cached().map(|token| token.secret), Some(fresh.clone()));

		tokens.invalidate_rejected(&fresh);

		assert!(tokens.cached().is_none());
		assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
	}
}

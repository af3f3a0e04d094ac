// std
use std::{
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration as StdDuration,
};
// crates.io
use url::Url;
// self
use carrier_rates::{
	ErrorKind,
	auth::{ClientCredentials, Secret, TokenManager},
	http::{HttpRequest, HttpResponse, HttpTransport, TransportError, TransportFuture},
};

type Reply = Result<HttpResponse, TransportError>;

/// Token endpoint double that counts calls and answers after a delay.
struct SlowTokenEndpoint {
	calls: AtomicUsize,
	delay: StdDuration,
	reply: Box<dyn Fn(usize) -> Reply + Send + Sync>,
}
impl SlowTokenEndpoint {
	fn new(delay: StdDuration, reply: impl 'static + Fn(usize) -> Reply + Send + Sync) -> Arc<Self> {
		Arc::new(Self { calls: AtomicUsize::new(0), delay, reply: Box::new(reply) })
	}

	fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl HttpTransport for SlowTokenEndpoint {
	fn send(&self, _request: HttpRequest) -> TransportFuture<'_> {
		let call = self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			tokio::time::sleep(self.delay).await;

			(self.reply)(call)
		})
	}
}

fn token(call: usize, expires_in: u64) -> Reply {
	Ok(HttpResponse::new(
		200,
		format!(r#"{{"access_token":"token-{call}","token_type":"Bearer","expires_in":{expires_in}}}"#),
	))
}

fn manager(endpoint: Arc<SlowTokenEndpoint>) -> Arc<TokenManager<SlowTokenEndpoint>> {
	let credentials = ClientCredentials::new(
		Url::parse("https://auth.example.com/oauth/token").expect("Token URL should parse."),
		"client",
		Secret::new("secret"),
	);

	Arc::new(TokenManager::new(endpoint, credentials, "UPS"))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_one_refresh() {
	let endpoint = SlowTokenEndpoint::new(StdDuration::from_millis(100), |call| token(call, 3600));
	let tokens = manager(endpoint.clone());
	let handles = (0..16)
		.map(|_| {
			let tokens = tokens.clone();

			tokio::spawn(async move { tokens.acquire().await })
		})
		.collect::<Vec<_>>();

	for handle in handles {
		let secret = handle
			.await
			.expect("Acquire task should not panic.")
			.expect("Concurrent acquire should succeed.");

		assert_eq!(secret.expose(), "token-0");
	}

	assert_eq!(endpoint.calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_one_failure() {
	let endpoint = SlowTokenEndpoint::new(StdDuration::from_millis(100), |call| match call {
		0 => Ok(HttpResponse::new(503, "unavailable")),
		call => token(call, 3600),
	});
	let tokens = manager(endpoint.clone());
	let (first, second, third) = tokio::join!(tokens.acquire(), tokens.acquire(), tokens.acquire());

	for outcome in [first, second, third] {
		let err = outcome.expect_err("Every waiter should observe the failed refresh.");

		assert!(err.is(ErrorKind::AuthFailed));
		assert_eq!(err.context.status, Some(503));
	}

	assert_eq!(endpoint.calls(), 1);
	assert_eq!(
		tokens.acquire().await.expect("The next acquire should retry.").expose(),
		"token-1"
	);
	assert_eq!(endpoint.calls(), 2);
}

#[tokio::test]
async fn tokens_inside_the_safety_margin_are_refreshed() {
	// A 60 second lifetime minus the default 60 second margin is stale on arrival.
	let endpoint = SlowTokenEndpoint::new(StdDuration::ZERO, |call| token(call, 60));
	let tokens = manager(endpoint.clone());

	assert_eq!(tokens.acquire().await.expect("First fetch should succeed.").expose(), "token-0");
	assert_eq!(tokens.acquire().await.expect("Refetch should succeed.").expose(), "token-1");
	assert_eq!(endpoint.calls(), 2);

	let endpoint = SlowTokenEndpoint::new(StdDuration::ZERO, |call| token(call, 3600));
	let tokens = manager(endpoint.clone());

	tokens.acquire().await.expect("First fetch should succeed.");
	tokens.acquire().await.expect("Cached token should be served.");

	assert_eq!(endpoint.calls(), 1);
}

#[tokio::test]
async fn failed_refresh_drops_the_stale_token() {
	let endpoint = SlowTokenEndpoint::new(StdDuration::ZERO, |call| match call {
		0 => token(call, 60),
		_ => Ok(HttpResponse::new(500, "boom")),
	});
	let tokens = manager(endpoint.clone());

	tokens.acquire().await.expect("First fetch should succeed.");

	assert!(tokens.cached().is_some());

	let err = tokens.acquire().await.expect_err("Failed refresh should surface.");

	assert!(err.is(ErrorKind::AuthFailed));
	assert!(tokens.cached().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancelled_refresh_is_taken_over() {
	let endpoint = SlowTokenEndpoint::new(StdDuration::from_millis(200), |call| token(call, 3600));
	let tokens = manager(endpoint.clone());
	let abandoned = {
		let tokens = tokens.clone();

		tokio::spawn(async move { tokens.acquire().await })
	};

	tokio::time::sleep(StdDuration::from_millis(50)).await;
	abandoned.abort();

	let secret = tokens.acquire().await.expect("A new caller should drive the refresh.");

	assert_eq!(secret.expose(), "token-1");
	assert_eq!(endpoint.calls(), 2);
}

//! Outbound HTTP capability consumed by the token manager and carrier providers.
//!
//! [`HttpTransport`] is the crate's only dependency on an HTTP stack. It sends one
//! [`HttpRequest`] and resolves either to an [`HttpResponse`] for *any* received status
//! (classification of non-2xx codes belongs to the caller) or to a [`TransportError`]
//! that distinguishes "timed out / aborted" from "no response at all". Every request
//! carries its own timeout so callers never hang on a stalled peer.

// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Capability to issue one HTTP request with a bounded timeout.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared
/// (behind `Arc`) by the token manager and the provider that owns it.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and returns the status + body of whatever response arrives.
	fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Outbound `POST` request description. Token and rating calls are both `POST`s.
#[derive(Clone, Debug)]
pub struct HttpRequest {
	/// Absolute target URL.
	pub url: Url,
	/// Header name/value pairs in insertion order.
	pub headers: Vec<(String, String)>,
	/// Request body (JSON or form-encoded text).
	pub body: String,
	/// Upper bound for the whole exchange, body included.
	pub timeout: StdDuration,
}
impl HttpRequest {
	const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

	/// Starts a `POST` request to `url`.
	pub fn post(url: Url) -> Self {
		Self {
			url,
			headers: Vec::new(),
			body: String::new(),
			timeout: Self::DEFAULT_TIMEOUT,
		}
	}

	/// Appends a header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Replaces the body.
	pub fn body(mut self, body: impl Into<String>) -> Self {
		self.body = body.into();

		self
	}

	/// Overrides the timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Looks up a header value by case-insensitive name.
	pub fn header_value(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Response received from the peer, successful or not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as text.
	pub body: String,
}
impl HttpResponse {
	/// Creates a response value.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Transport failures where no usable response was obtained.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The exchange exceeded its timeout or was aborted midway.
	#[error("Request timed out or was aborted.")]
	TimedOut {
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// Nothing came back: connection refused, DNS failure, TLS failure, malformed request.
	#[error("No response was received.")]
	NoResponse {
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a timeout/abort failure.
	pub fn timed_out(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::TimedOut { source: Box::new(src) }
	}

	/// Wraps a failure where no response was received.
	pub fn no_response(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::NoResponse { source: Box::new(src) }
	}

	/// Stable code attached to classified errors.
	pub fn code(&self) -> &'static str {
		match self {
			Self::TimedOut { .. } => "TIMED_OUT",
			Self::NoResponse { .. } => "NO_RESPONSE",
		}
	}

	/// Returns `true` for timeouts and aborts.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::TimedOut { .. })
	}

	/// Renders the underlying cause for human-readable messages.
	pub fn detail(&self) -> String {
		match self {
			Self::TimedOut { source } | Self::NoResponse { source } => source.to_string(),
		}
	}
}

/// [`HttpTransport`] backed by a shared [`ReqwestClient`].
///
/// Carrier endpoints answer directly, so the client built by [`ReqwestTransport::new`]
/// does not follow redirects. Pass a custom client through
/// [`with_client`](ReqwestTransport::with_client) to tune pools, proxies, or TLS.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport with a redirect-free client.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest client.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = client.post(request.url).timeout(request.timeout).body(request.body);

			for (name, value) in request.headers {
				builder = builder.header(name, value);
			}

			let response = builder.send().await.map_err(map_reqwest_error)?;
			let status = response.status().as_u16();
			let body = response.text().await.map_err(map_reqwest_error)?;

			Ok(HttpResponse { status, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> TransportError {
	if err.is_timeout() { TransportError::timed_out(err) } else { TransportError::no_response(err) }
}

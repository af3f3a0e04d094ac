//! Closed error taxonomy shared by every stage of the quoting pipeline.
//!
//! Every failure raised by the pipeline is an [`Error`] whose [`ErrorKind`] is drawn from a
//! fixed set. Callers branch on [`Error::kind`]; the message is for humans and the
//! [`ErrorContext`] carries whatever structured evidence the failing stage had at hand
//! (HTTP status, raw body, offending value, validation issues).

// self
use crate::{_prelude::*, domain::ValidationIssue};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Failure classes a caller can branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
	/// Credentials were rejected or a bearer token could not be obtained.
	AuthFailed,
	/// The rate request failed domain validation; nothing was sent upstream.
	ValidationFailed,
	/// The carrier could not be reached or the call timed out.
	NetworkError,
	/// The carrier throttled the caller.
	RateLimited,
	/// The carrier answered with an error status or a response that could not be mapped.
	CarrierApiError,
}
impl ErrorKind {
	/// Returns the stable label used in logs and serialized errors.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::AuthFailed => "AUTH_FAILED",
			ErrorKind::ValidationFailed => "VALIDATION_FAILED",
			ErrorKind::NetworkError => "NETWORK_ERROR",
			ErrorKind::RateLimited => "RATE_LIMITED",
			ErrorKind::CarrierApiError => "CARRIER_API_ERROR",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Structured evidence attached to an [`Error`].
///
/// Additional fields may be added in future releases, so downstream code should read
/// fields by name instead of destructuring exhaustively.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
	/// HTTP status returned by the carrier, when one was received.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<u16>,
	/// Raw response body, when one was received.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub body: Option<String>,
	/// Transport-level failure code (e.g. `TIMED_OUT`, `NO_RESPONSE`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	/// Offending raw value that could not be interpreted.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	/// Raw upstream document (or fragment) that failed shape checks.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub raw: Option<JsonValue>,
	/// Field-level validation issues.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub issues: Vec<ValidationIssue>,
}
impl ErrorContext {
	/// Returns `true` when no evidence was attached.
	pub fn is_empty(&self) -> bool {
		self.status.is_none()
			&& self.body.is_none()
			&& self.code.is_none()
			&& self.value.is_none()
			&& self.raw.is_none()
			&& self.issues.is_empty()
	}
}

/// Canonical pipeline error: one value type tagged with an [`ErrorKind`].
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("{kind}: {message}")]
pub struct Error {
	/// Failure class.
	pub kind: ErrorKind,
	/// Human-readable summary. Do not parse it; branch on `kind`.
	pub message: String,
	/// Structured evidence.
	pub context: ErrorContext,
}
impl Error {
	/// Builds an error of the given kind with an empty context.
	pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
		Self { kind, message: message.into(), context: ErrorContext::default() }
	}

	/// Shorthand for [`ErrorKind::AuthFailed`].
	pub fn auth_failed(message: impl Into<String>) -> Self {
		Self::new(ErrorKind::AuthFailed, message)
	}

	/// Shorthand for [`ErrorKind::ValidationFailed`] carrying every accumulated issue.
	pub fn validation_failed(issues: Vec<ValidationIssue>) -> Self {
		let details = issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
		let mut err =
			Self::new(ErrorKind::ValidationFailed, format!("Invalid rate request: {details}."));

		err.context.issues = issues;

		err
	}

	/// Shorthand for [`ErrorKind::NetworkError`].
	pub fn network(message: impl Into<String>) -> Self {
		Self::new(ErrorKind::NetworkError, message)
	}

	/// Shorthand for [`ErrorKind::RateLimited`].
	pub fn rate_limited(message: impl Into<String>) -> Self {
		Self::new(ErrorKind::RateLimited, message)
	}

	/// Shorthand for [`ErrorKind::CarrierApiError`].
	pub fn carrier_api(message: impl Into<String>) -> Self {
		Self::new(ErrorKind::CarrierApiError, message)
	}

	/// Returns the failure class.
	pub fn kind(&self) -> ErrorKind {
		self.kind
	}

	/// Checks the failure class.
	pub fn is(&self, kind: ErrorKind) -> bool {
		self.kind == kind
	}

	/// Attaches an HTTP status.
	pub fn with_status(mut self, status: u16) -> Self {
		self.context.status = Some(status);

		self
	}

	/// Attaches a raw response body.
	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.context.body = Some(body.into());

		self
	}

	/// Attaches a transport failure code.
	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.context.code = Some(code.into());

		self
	}

	/// Attaches the raw value that could not be interpreted.
	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.context.value = Some(value.into());

		self
	}

	/// Attaches a raw upstream document.
	pub fn with_raw(mut self, raw: JsonValue) -> Self {
		self.context.raw = Some(raw);

		self
	}
}

/// Configuration failures raised while constructing a provider, before any request runs.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required setting was absent or blank.
	#[error("Configuration field `{field}` is required.")]
	Missing {
		/// Setting name.
		field: &'static str,
	},
	/// A URL-shaped setting could not be parsed.
	#[error("Configuration field `{field}` is not a valid URL.")]
	InvalidUrl {
		/// Setting name.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A URL-shaped setting used a scheme other than HTTP(S) or had no host.
	#[error("Configuration field `{field}` must be an http(s) URL with a host: {url}.")]
	UnsupportedUrl {
		/// Setting name.
		field: &'static str,
		/// URL that failed validation.
		url: String,
	},
	/// A numeric setting could not be parsed.
	#[error("Configuration field `{field}` must be a positive integer, got `{value}`.")]
	InvalidNumber {
		/// Setting name.
		field: &'static str,
		/// Raw value that failed to parse.
		value: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn kinds_render_stable_labels() {
		assert_eq!(ErrorKind::AuthFailed.to_string(), "AUTH_FAILED");
		assert_eq!(ErrorKind::CarrierApiError.as_str(), "CARRIER_API_ERROR");
		assert_eq!(
			serde_json::to_string(&ErrorKind::RateLimited).expect("Kind should serialize."),
			"\"RATE_LIMITED\""
		);
	}

	#[test]
	fn validation_failed_keeps_every_issue() {
		let err = Error::validation_failed(vec![
			ValidationIssue::new("origin.city", "is required"),
			ValidationIssue::new("parcels", "must contain at least one parcel"),
		]);

		assert!(err.is(ErrorKind::ValidationFailed));
		assert_eq!(err.context.issues.len(), 2);
		assert!(err.message.contains("origin.city: is required"));
		assert!(err.message.contains("parcels: must contain at least one parcel"));
	}

	#[test]
	fn context_builders_attach_evidence() {
		let err = Error::carrier_api("Upstream failed.").with_status(500).with_body("{}");

		assert_eq!(err.kind(), ErrorKind::CarrierApiError);
		assert_eq!(err.context.status, Some(500));
		assert_eq!(err.context.body.as_deref(), Some("{}"));
		assert!(!err.context.is_empty());
		assert!(Error::network("Down.").context.is_empty());
		assert_eq!(err.to_string(), "CARRIER_API_ERROR: Upstream failed.");
	}
}

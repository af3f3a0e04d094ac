//! Cached bearer token value and the token-endpoint response it is built from.

// self
use crate::{_prelude::*, auth::Secret};

/// Bearer token plus the absolute instant after which it must not be served.
///
/// The expiry already includes the safety margin, so a token is usable strictly before
/// `expires_at`. Values are replaced wholesale on refresh and never mutated in place.
#[derive(Clone)]
pub struct CachedToken {
	/// Bearer credential.
	pub secret: Secret,
	/// Instant the token was obtained.
	pub issued_at: OffsetDateTime,
	/// Instant (margin applied) after which the token is stale.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Builds a cached token from a time-to-live, subtracting `margin` from the expiry.
	pub fn new(secret: Secret, issued_at: OffsetDateTime, ttl: Duration, margin: Duration) -> Self {
		Self { secret, issued_at, expires_at: issued_at + ttl - margin }
	}

	/// Returns `true` while the token may still be served at `instant`.
	pub fn is_fresh_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}
}
impl Debug for CachedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedToken")
			.field("secret", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Client-credentials token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
	pub(crate) access_token: String,
	pub(crate) expires_in: ExpiresIn,
}

/// Some token endpoints send `expires_in` as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ExpiresIn {
	Seconds(i64),
	Text(String),
}
impl ExpiresIn {
	pub(crate) fn seconds(&self) -> Option<i64> {
		match self {
			ExpiresIn::Seconds(secs) => Some(*secs),
			ExpiresIn::Text(raw) => raw.trim().parse().ok(),
		}
	}
}

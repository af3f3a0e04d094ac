//! Client secrets and bearer tokens, kept out of logs.

// self
use crate::_prelude::*;

/// Credential string whose `Debug` and `Display` output is redacted.
///
/// Equality compares the raw value, which lets the token manager tell whether a rejected
/// bearer token is still the one it has cached.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the secret is empty or whitespace.
	pub fn is_blank(&self) -> bool {
		self.0.trim().is_empty()
	}

	/// Renders an `Authorization` header value carrying this secret as a bearer token.
	pub fn bearer_authorization(&self) -> String {
		format!("Bearer {}", self.0)
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

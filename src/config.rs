//! Carrier connection settings, validated once at startup.
//!
//! [`CarrierConfig`] holds the client credentials and endpoint URLs a provider needs.
//! Build it explicitly with [`CarrierConfig::builder`] or read it from the process
//! environment with [`CarrierConfig::from_env`]; either path fails fast with a
//! [`ConfigError`] before any quote is requested.

// std
use std::env;
// self
use crate::{
	_prelude::*,
	auth::{ClientCredentials, Secret},
	error::ConfigError,
};

/// Validated carrier connection settings.
#[derive(Clone, Debug)]
pub struct CarrierConfig {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: Secret,
	/// Base URL of the carrier API (rating paths are appended to it).
	pub base_url: Url,
	/// Token endpoint URL.
	pub token_url: Url,
	/// Upper bound for one token request.
	pub token_timeout: StdDuration,
	/// Upper bound for one rating request.
	pub rating_timeout: StdDuration,
}
impl CarrierConfig {
	/// Default bound for a token request.
	pub const DEFAULT_TOKEN_TIMEOUT: StdDuration = ClientCredentials::DEFAULT_TIMEOUT;
	/// Default bound for a rating request.
	pub const DEFAULT_RATING_TIMEOUT: StdDuration = StdDuration::from_secs(15);

	/// Creates an empty builder.
	pub fn builder() -> CarrierConfigBuilder {
		CarrierConfigBuilder::default()
	}

	/// Reads `<PREFIX>_CLIENT_ID`, `<PREFIX>_CLIENT_SECRET`, `<PREFIX>_BASE_URL`,
	/// `<PREFIX>_TOKEN_URL`, and the optional `<PREFIX>_TOKEN_TIMEOUT_SECS` /
	/// `<PREFIX>_RATING_TIMEOUT_SECS` from the environment.
	pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
		Self::from_lookup(|suffix| env::var(format!("{prefix}_{suffix}")).ok())
	}

	/// Same as [`from_env`](Self::from_env) but reads values through `lookup`, keyed by
	/// the variable suffix (e.g. `CLIENT_ID`).
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut builder = Self::builder();

		if let Some(value) = lookup("CLIENT_ID") {
			builder = builder.client_id(value);
		}
		if let Some(value) = lookup("CLIENT_SECRET") {
			builder = builder.client_secret(value);
		}
		if let Some(value) = lookup("BASE_URL") {
			builder = builder.base_url(value);
		}
		if let Some(value) = lookup("TOKEN_URL") {
			builder = builder.token_url(value);
		}
		if let Some(value) = lookup("TOKEN_TIMEOUT_SECS") {
			builder = builder.token_timeout(parse_secs("token_timeout", &value)?);
		}
		if let Some(value) = lookup("RATING_TIMEOUT_SECS") {
			builder = builder.rating_timeout(parse_secs("rating_timeout", &value)?);
		}

		builder.build()
	}

	/// Token endpoint settings handed to the token manager.
	pub fn client_credentials(&self) -> ClientCredentials {
		ClientCredentials::new(
			self.token_url.clone(),
			self.client_id.clone(),
			self.client_secret.clone(),
		)
		.with_timeout(self.token_timeout)
	}
}

/// Builder for [`CarrierConfig`] values.
#[derive(Debug, Default)]
pub struct CarrierConfigBuilder {
	client_id: Option<String>,
	client_secret: Option<Secret>,
	base_url: Option<String>,
	token_url: Option<String>,
	token_timeout: Option<StdDuration>,
	rating_timeout: Option<StdDuration>,
}
impl CarrierConfigBuilder {
	/// Sets the OAuth client identifier.
	pub fn client_id(mut self, value: impl Into<String>) -> Self {
		self.client_id = Some(value.into());

		self
	}

	/// Sets the OAuth client secret.
	pub fn client_secret(mut self, value: impl Into<String>) -> Self {
		self.client_secret = Some(Secret::new(value));

		self
	}

	/// Sets the carrier API base URL.
	pub fn base_url(mut self, value: impl Into<String>) -> Self {
		self.base_url = Some(value.into());

		self
	}

	/// Sets the token endpoint URL.
	pub fn token_url(mut self, value: impl Into<String>) -> Self {
		self.token_url = Some(value.into());

		self
	}

	/// Overrides the token request timeout.
	pub fn token_timeout(mut self, timeout: StdDuration) -> Self {
		self.token_timeout = Some(timeout);

		self
	}

	/// Overrides the rating request timeout.
	pub fn rating_timeout(mut self, timeout: StdDuration) -> Self {
		self.rating_timeout = Some(timeout);

		self
	}

	/// Consumes the builder and validates every field.
	pub fn build(self) -> Result<CarrierConfig, ConfigError> {
		let client_id = self
			.client_id
			.map(|value| value.trim().to_owned())
			.filter(|value| !value.is_empty())
			.ok_or(ConfigError::Missing { field: "client_id" })?;
		let client_secret = self
			.client_secret
			.filter(|secret| !secret.is_blank())
			.ok_or(ConfigError::Missing { field: "client_secret" })?;
		let base_url = parse_url("base_url", self.base_url)?;
		let token_url = parse_url("token_url", self.token_url)?;

		Ok(CarrierConfig {
			client_id,
			client_secret,
			base_url,
			token_url,
			token_timeout: self.token_timeout.unwrap_or(CarrierConfig::DEFAULT_TOKEN_TIMEOUT),
			rating_timeout: self.rating_timeout.unwrap_or(CarrierConfig::DEFAULT_RATING_TIMEOUT),
		})
	}
}

fn parse_url(field: &'static str, raw: Option<String>) -> Result<Url, ConfigError> {
	let raw = raw
		.map(|value| value.trim().to_owned())
		.filter(|value| !value.is_empty())
		.ok_or(ConfigError::Missing { field })?;
	let url = Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { field, source })?;

	if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
		return Err(ConfigError::UnsupportedUrl { field, url: url.to_string() });
	}

	Ok(url)
}

fn parse_secs(field: &'static str, raw: &str) -> Result<StdDuration, ConfigError> {
	match raw.trim().parse::<u64>() {
		Ok(secs) if secs > 0 => Ok(StdDuration::from_secs(secs)),
		_ => Err(ConfigError::InvalidNumber { field, value: raw.to_owned() }),
	}
}

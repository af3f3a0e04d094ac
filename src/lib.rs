//! Carrier-agnostic shipping rate quotes: validate a request once, hand it to a pluggable
//! carrier backend, and get back priced service offers or a classified error.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod carrier;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod obs;
pub mod service;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::OnceCell;
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use rust_decimal::Decimal;
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value as JsonValue;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, ErrorContext, ErrorKind, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use rust_decimal;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};

pub use carrier::CarrierProvider;
pub use domain::{RateQuote, RateRequest, RateRequestDraft};
pub use error::{Error, ErrorKind, Result};
pub use service::QuotingService;

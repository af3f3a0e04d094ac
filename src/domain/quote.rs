//! Priced service offers returned by carrier providers.

// self
use crate::{_prelude::*, domain::Money};

/// One priced shipping-service offer produced by a carrier provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
	/// Name of the carrier that produced the quote.
	pub carrier: String,
	/// Human-readable service name (e.g. `Ground`).
	pub service_name: String,
	/// Carrier-specific service code (e.g. `03`).
	pub service_code: String,
	/// Total charge for the shipment.
	pub total_charge: Money,
	/// Business days in transit, when the carrier supplied them.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transit_days: Option<u32>,
	/// Whether delivery is guaranteed, when the carrier said so.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub guaranteed_delivery: Option<bool>,
}

//! UPS Rating API JSON shapes. Nothing outside `carrier::ups` touches these types.

// self
use crate::_prelude::*;

/// Top-level rating request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsRateRequestBody {
	/// Request payload.
	pub rate_request: UpsRateRequest,
}

/// `RateRequest` node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsRateRequest {
	/// Request metadata.
	pub request: UpsRequestInfo,
	/// Shipment description.
	pub shipment: UpsShipment,
}

/// `Request` node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsRequestInfo {
	/// Echoed back by UPS for correlation.
	pub transaction_reference: UpsTransactionReference,
}

/// `TransactionReference` node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsTransactionReference {
	/// Free-form caller context.
	pub customer_context: String,
}

/// `Shipment` node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsShipment {
	/// Shipper (origin).
	pub shipper: UpsParty,
	/// Recipient (destination).
	pub ship_to: UpsParty,
	/// Physical pickup location (origin).
	pub ship_from: UpsParty,
	/// Pickup arrangement code.
	pub pickup_type: UpsCode,
	/// Packages, one per parcel.
	pub package: Vec<UpsPackage>,
}

/// Party (shipper, ship-to, ship-from).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsParty {
	/// Contact or company name; UPS rejects empty names.
	pub name: String,
	/// Postal address.
	pub address: UpsAddress,
}

/// Address node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsAddress {
	/// Street lines.
	pub address_line: Vec<String>,
	/// City.
	pub city: String,
	/// State or province code.
	pub state_province_code: String,
	/// Postal code.
	pub postal_code: String,
	/// ISO country code.
	pub country_code: String,
}

/// `{ "Code": ... }` wrapper used throughout the UPS schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsCode {
	/// Code value.
	pub code: String,
}
impl UpsCode {
	/// Wraps a code value.
	pub fn new(code: impl Into<String>) -> Self {
		Self { code: code.into() }
	}
}

/// `Package` node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsPackage {
	/// Packaging type code.
	pub packaging_type: UpsCode,
	/// Weight with unit.
	pub package_weight: UpsPackageWeight,
	/// Outer dimensions, only when known.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dimensions: Option<UpsDimensions>,
}

/// `PackageWeight` node. Numbers travel as strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsPackageWeight {
	/// `LBS` or `KGS`.
	pub unit_of_measurement: UpsCode,
	/// Weight value.
	pub weight: String,
}

/// `Dimensions` node. Numbers travel as strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsDimensions {
	/// `IN` or `CM`.
	pub unit_of_measurement: UpsCode,
	/// Length.
	pub length: String,
	/// Width.
	pub width: String,
	/// Height.
	pub height: String,
}

/// Top-level rating response body. Every level is optional so shape checks can report
/// exactly what is missing instead of failing inside the deserializer.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsRateResponseBody {
	/// Response payload.
	#[serde(default)]
	pub rate_response: Option<UpsRateResponse>,
}

/// `RateResponse` node.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsRateResponse {
	/// Rated shipments, kept raw so each entry can be reported verbatim on failure.
	#[serde(default)]
	pub rated_shipment: Option<OneOrMany<JsonValue>>,
}

/// UPS collapses one-element arrays into a bare object.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
	/// Array form.
	Many(Vec<T>),
	/// Bare object form.
	One(T),
}
impl<T> OneOrMany<T> {
	/// Flattens both forms into a vector.
	pub fn into_vec(self) -> Vec<T> {
		match self {
			OneOrMany::Many(items) => items,
			OneOrMany::One(item) => vec![item],
		}
	}
}

/// One `RatedShipment` entry.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsRatedShipment {
	/// Service descriptor.
	#[serde(default)]
	pub service: Option<UpsServiceCode>,
	/// Total charges.
	#[serde(default)]
	pub total_charges: Option<UpsCharges>,
	/// Guaranteed delivery block, present only for guaranteed services.
	#[serde(default)]
	pub guaranteed_delivery: Option<UpsGuaranteedDelivery>,
}

/// `Service` node.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsServiceCode {
	/// Service code.
	#[serde(default)]
	pub code: Option<UpsScalar>,
}

/// `TotalCharges` node.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsCharges {
	/// ISO-4217 currency.
	#[serde(default)]
	pub currency_code: Option<UpsScalar>,
	/// Decimal amount.
	#[serde(default)]
	pub monetary_value: Option<UpsScalar>,
}

/// `GuaranteedDelivery` node.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsGuaranteedDelivery {
	/// Business days in transit.
	#[serde(default)]
	pub business_days_in_transit: Option<UpsScalar>,
}

/// UPS documents string scalars, but mocks and sandboxes sometimes send numbers.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UpsScalar {
	/// String form.
	Text(String),
	/// Numeric form.
	Number(serde_json::Number),
}
impl UpsScalar {
	/// Returns the raw textual form.
	pub fn raw(&self) -> String {
		match self {
			UpsScalar::Text(text) => text.clone(),
			UpsScalar::Number(number) => number.to_string(),
		}
	}
}

/// Error body returned with non-2xx statuses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpsErrorBody {
	/// Error envelope.
	#[serde(default)]
	pub response: Option<UpsErrorResponse>,
}

/// `response` node of an error body.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpsErrorResponse {
	/// Upstream errors, most relevant first.
	#[serde(default)]
	pub errors: Vec<UpsErrorEntry>,
}

/// One upstream error.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpsErrorEntry {
	/// UPS error code.
	#[serde(default)]
	pub code: Option<String>,
	/// Human-readable message.
	#[serde(default)]
	pub message: Option<String>,
}

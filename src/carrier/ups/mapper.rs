//! Pure translation between domain types and UPS Rating API payloads.
//!
//! Outbound, [`to_wire_request`] fills in the protocol constants (pickup type, packaging
//! type, placeholder party name) and renders every number as a string. Inbound,
//! [`from_wire_response`] checks the envelope before mapping and rejects any entry it
//! cannot price with `CARRIER_API_ERROR`, carrying the raw JSON as context.

// self
use crate::{
	_prelude::*,
	carrier::ups::{service_codes, wire::*},
	domain::{Address, Money, Parcel, RateQuote, RateRequest},
};

/// `CustomerContext` echoed back by UPS.
pub const CUSTOMER_CONTEXT: &str = "Rating";
/// Placeholder used when a party has no name; UPS rejects empty names.
pub const PLACEHOLDER_NAME: &str = "N/A";
/// Pickup type `01`: daily pickup.
pub const PICKUP_TYPE_DAILY: &str = "01";
/// Packaging type `02`: customer-supplied package.
pub const PACKAGING_CUSTOMER_SUPPLIED: &str = "02";

/// Maps a validated request onto the UPS rating payload.
pub fn to_wire_request(request: &RateRequest) -> UpsRateRequestBody {
	UpsRateRequestBody {
		rate_request: UpsRateRequest {
			request: UpsRequestInfo {
				transaction_reference: UpsTransactionReference {
					customer_context: CUSTOMER_CONTEXT.into(),
				},
			},
			shipment: UpsShipment {
				shipper: to_party(request.origin()),
				ship_to: to_party(request.destination()),
				ship_from: to_party(request.origin()),
				pickup_type: UpsCode::new(PICKUP_TYPE_DAILY),
				package: request.parcels().iter().map(to_package).collect(),
			},
		},
	}
}

/// Parses a raw response body and maps it into quotes.
pub fn from_wire_body(body: &str, carrier: &str) -> Result<Vec<RateQuote>> {
	let value = serde_json::from_str::<JsonValue>(body).map_err(|err| {
		Error::carrier_api(format!("{carrier} returned a non-JSON rate response: {err}."))
			.with_body(body)
	})?;

	from_wire_response(&value, carrier)
}

/// Maps a decoded rating response into quotes, one per rated shipment.
pub fn from_wire_response(response: &JsonValue, carrier: &str) -> Result<Vec<RateQuote>> {
	let invalid = || {
		Error::carrier_api(format!("{carrier} returned an invalid rate response."))
			.with_raw(response.clone())
	};
	let envelope =
		serde_json::from_value::<UpsRateResponseBody>(response.clone()).map_err(|_| invalid())?;
	let shipments = envelope
		.rate_response
		.and_then(|rate_response| rate_response.rated_shipment)
		.ok_or_else(invalid)?;

	shipments.into_vec().iter().map(|shipment| to_quote(shipment, carrier)).collect()
}

/// Extracts the first `(code, message)` pair from a UPS error body, if it has one.
pub fn error_summary(body: &str) -> Option<(Option<String>, String)> {
	let parsed = serde_json::from_str::<UpsErrorBody>(body).ok()?;
	let first = parsed.response?.errors.into_iter().next()?;
	let message = first.message.filter(|message| !message.trim().is_empty())?;

	Some((first.code, message))
}

fn to_party(address: &Address) -> UpsParty {
	let mut address_line = vec![address.address_line1.clone()];

	if let Some(line2) = &address.address_line2 {
		address_line.push(line2.clone());
	}

	UpsParty {
		name: address.name.clone().unwrap_or_else(|| PLACEHOLDER_NAME.into()),
		address: UpsAddress {
			address_line,
			city: address.city.clone(),
			state_province_code: address.state_or_province.clone(),
			postal_code: address.postal_code.clone(),
			country_code: address.country_code.clone(),
		},
	}
}

fn to_package(parcel: &Parcel) -> UpsPackage {
	UpsPackage {
		packaging_type: UpsCode::new(PACKAGING_CUSTOMER_SUPPLIED),
		package_weight: UpsPackageWeight {
			unit_of_measurement: UpsCode::new(parcel.weight.unit.as_str()),
			weight: parcel.weight.value.to_string(),
		},
		dimensions: parcel.dimensions.map(|dims| UpsDimensions {
			unit_of_measurement: UpsCode::new(dims.unit.as_str()),
			length: dims.length.to_string(),
			width: dims.width.to_string(),
			height: dims.height.to_string(),
		}),
	}
}

fn to_quote(raw: &JsonValue, carrier: &str) -> Result<RateQuote> {
	let malformed =
		|what: &str| Error::carrier_api(format!("{carrier} {what}.")).with_raw(raw.clone());
	let shipment = serde_json::from_value::<UpsRatedShipment>(raw.clone())
		.map_err(|_| malformed("returned a malformed rated shipment"))?;
	let service_code = shipment
		.service
		.and_then(|service| service.code)
		.map(|code| code.raw())
		.filter(|code| !code.trim().is_empty())
		.ok_or_else(|| malformed("shipment is missing a service code"))?;
	let charges =
		shipment.total_charges.ok_or_else(|| malformed("shipment is missing total charges"))?;
	let raw_amount = charges
		.monetary_value
		.map(|value| value.raw())
		.ok_or_else(|| malformed("shipment is missing a monetary value"))?;
	let currency = charges
		.currency_code
		.map(|value| value.raw())
		.ok_or_else(|| malformed("shipment is missing a currency code"))?;
	let total_charge = Decimal::from_str(raw_amount.trim())
		.ok()
		.and_then(|amount| Money::new(amount, &currency).ok())
		.ok_or_else(|| {
			malformed("returned an invalid monetary value").with_value(raw_amount.clone())
		})?;
	let (transit_days, guaranteed_delivery) = match shipment.guaranteed_delivery {
		Some(guaranteed) => {
			let days = guaranteed
				.business_days_in_transit
				.map(|value| {
					let raw_days = value.raw();

					match raw_days.trim().parse::<u32>() {
						Ok(days) if days > 0 => Ok(days),
						_ => Err(malformed("returned an invalid transit-day count")
							.with_value(raw_days)),
					}
				})
				.transpose()?;

			(days, Some(true))
		},
		None => (None, None),
	};

	Ok(RateQuote {
		carrier: carrier.to_owned(),
		service_name: service_codes::service_name(carrier, &service_code),
		service_code,
		total_charge,
		transit_days,
		guaranteed_delivery,
	})
}

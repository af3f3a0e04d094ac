//! Quotes a shipment against a mocked UPS sandbox using the default reqwest transport,
//! then shows how validation failures and upstream errors surface to the caller.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use carrier_rates::{
	QuotingService, RateRequestDraft, carrier::ups::UpsProvider, config::CarrierConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/security/v1/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":14400}",
			);
		})
		.await;
	let rating_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/rating/v2403/Shop");
			then.status(200).json_body(json!({
				"RateResponse": {
					"RatedShipment": [
						{
							"Service": { "Code": "03" },
							"TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "12.50" },
							"GuaranteedDelivery": { "BusinessDaysInTransit": "5" }
						},
						{
							"Service": { "Code": "01" },
							"TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "45.00" },
							"GuaranteedDelivery": { "BusinessDaysInTransit": "1" }
						}
					]
				}
			}));
		})
		.await;
	let config = CarrierConfig::builder()
		.client_id("demo-client")
		.client_secret("demo-secret")
		.base_url(server.base_url())
		.token_url(server.url("/security/v1/oauth/token"))
		.build()?;
	let service = QuotingService::new(UpsProvider::new(&config)?);
	let draft: RateRequestDraft = serde_json::from_value(json!({
		"origin": {
			"addressLine1": "123 Main St",
			"city": "New York",
			"stateOrProvince": "NY",
			"postalCode": "10001",
			"countryCode": "US"
		},
		"destination": {
			"addressLine1": "456 Sunset Blvd",
			"city": "Los Angeles",
			"stateOrProvince": "CA",
			"postalCode": "90001",
			"countryCode": "US"
		},
		"parcels": [{ "weight": { "value": 5, "unit": "LBS" } }]
	}))?;

	for quote in service.get_rates(&draft).await? {
		println!(
			"{} {} ({}): {} in {} day(s)",
			quote.carrier,
			quote.service_name,
			quote.service_code,
			quote.total_charge,
			quote.transit_days.map_or_else(|| "?".to_owned(), |days| days.to_string()),
		);
	}

	// The second call reuses the cached token.
	service.get_rates(&draft).await?;

	token_mock.assert_calls_async(1).await;
	rating_mock.assert_calls_async(2).await;

	let err = service
		.get_rates_json(r#"{"origin":{"countryCode":"USA"},"parcels":[]}"#)
		.await
		.expect_err("Invalid requests never reach the carrier.");

	println!("{err}");

	for issue in &err.context.issues {
		println!("  - {issue}");
	}

	Ok(())
}

//! Postal addresses used for both ends of a shipment.

// self
use crate::{
	_prelude::*,
	domain::validation::{Issues, join, optional_text},
};

/// Validated, normalized postal address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
	/// Optional contact or company name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// First street line.
	pub address_line1: String,
	/// Optional second street line.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address_line2: Option<String>,
	/// City or locality.
	pub city: String,
	/// State or province code, 2-3 characters (e.g. `NY`, `ON`, `NSW`).
	pub state_or_province: String,
	/// Postal or ZIP code.
	pub postal_code: String,
	/// ISO-3166 alpha-2 country code.
	pub country_code: String,
}

/// Unvalidated address as supplied by a caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressDraft {
	/// Optional contact or company name.
	pub name: Option<String>,
	/// First street line.
	pub address_line1: Option<String>,
	/// Optional second street line.
	pub address_line2: Option<String>,
	/// City or locality.
	pub city: Option<String>,
	/// State or province code.
	pub state_or_province: Option<String>,
	/// Postal or ZIP code.
	pub postal_code: Option<String>,
	/// Country code.
	pub country_code: Option<String>,
}
impl AddressDraft {
	pub(crate) fn check(&self, path: &str, issues: &mut Issues) -> Option<Address> {
		let name = optional_text(self.name.as_deref());
		let address_line1 =
			issues.required_text(&join(path, "addressLine1"), self.address_line1.as_deref());
		let address_line2 = optional_text(self.address_line2.as_deref());
		let city = issues.required_text(&join(path, "city"), self.city.as_deref());
		let state_or_province = self.check_state(path, issues);
		let postal_code =
			issues.required_text(&join(path, "postalCode"), self.postal_code.as_deref());
		let country_code = self.check_country(path, issues);

		Some(Address {
			name,
			address_line1: address_line1?,
			address_line2,
			city: city?,
			state_or_province: state_or_province?,
			postal_code: postal_code?,
			country_code: country_code?,
		})
	}

	fn check_state(&self, path: &str, issues: &mut Issues) -> Option<String> {
		let field = join(path, "stateOrProvince");
		let state = issues.required_text(&field, self.state_or_province.as_deref())?;
		let len = state.chars().count();

		if !(2..=3).contains(&len) {
			issues.push(field, "must be 2-3 characters");

			return None;
		}

		Some(state.to_uppercase())
	}

	fn check_country(&self, path: &str, issues: &mut Issues) -> Option<String> {
		let field = join(path, "countryCode");
		let country = issues.required_text(&field, self.country_code.as_deref())?;

		if country.len() != 2 || !country.bytes().all(|b| b.is_ascii_alphabetic()) {
			issues.push(field, "must be an ISO-3166 alpha-2 code");

			return None;
		}

		Some(country.to_ascii_uppercase())
	}
}
impl From<&Address> for AddressDraft {
	fn from(address: &Address) -> Self {
		Self {
			name: address.name.clone(),
			address_line1: Some(address.address_line1.clone()),
			address_line2: address.address_line2.clone(),
			city: Some(address.city.clone()),
			state_or_province: Some(address.state_or_province.clone()),
			postal_code: Some(address.postal_code.clone()),
			country_code: Some(address.country_code.clone()),
		}
	}
}

//! Rate requests: the caller-facing draft and its validated, immutable counterpart.

// self
use crate::{
	_prelude::*,
	domain::{
		Address, AddressDraft, Parcel, ParcelDraft, ValidationIssue, validation::Issues,
	},
};

/// Unvalidated rate request, shaped like the JSON a client would send.
///
/// Every field is optional so that malformed input still deserializes and
/// [`validate`](Self::validate) can report every problem at once.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateRequestDraft {
	/// Ship-from address.
	pub origin: Option<AddressDraft>,
	/// Ship-to address.
	pub destination: Option<AddressDraft>,
	/// Packages in the shipment, in order.
	pub parcels: Option<Vec<ParcelDraft>>,
}
impl RateRequestDraft {
	/// Decodes a JSON body, reporting type mismatches as validation issues at their path.
	pub fn from_json(body: &str) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_str(body);

		serde_path_to_error::deserialize(&mut de).map_err(|err| {
			let inner = err.inner();
			let path = match err.path().to_string() {
				_ if inner.is_syntax() || inner.is_eof() => "body".to_owned(),
				path if path == "." || path == "?" => "body".to_owned(),
				path => path,
			};

			Error::validation_failed(vec![ValidationIssue::new(path, err.inner().to_string())])
		})
	}

	/// Validates every field and returns a normalized [`RateRequest`], or all violations.
	///
	/// Performs no I/O and leaves `self` untouched.
	pub fn validate(&self) -> Result<RateRequest, Vec<ValidationIssue>> {
		let mut issues = Issues::default();
		let origin = check_address(self.origin.as_ref(), "origin", &mut issues);
		let destination = check_address(self.destination.as_ref(), "destination", &mut issues);
		let parcels = match self.parcels.as_deref() {
			Some([]) => {
				issues.push("parcels", "must contain at least one parcel");

				None
			},
			Some(drafts) => drafts
				.iter()
				.enumerate()
				.map(|(idx, draft)| draft.check(&format!("parcels[{idx}]"), &mut issues))
				// Keep visiting every parcel so each one reports its issues.
				.fold(Some(Vec::with_capacity(drafts.len())), |acc, parcel| {
					match (acc, parcel) {
						(Some(mut parcels), Some(parcel)) => {
							parcels.push(parcel);

							Some(parcels)
						},
						_ => None,
					}
				}),
			None => {
				issues.push("parcels", "is required");

				None
			},
		};
		let request = match (origin, destination, parcels) {
			(Some(origin), Some(destination), Some(parcels)) =>
				Some(RateRequest { origin, destination, parcels }),
			_ => None,
		};

		issues.finish(request)
	}
}
impl From<&RateRequest> for RateRequestDraft {
	fn from(request: &RateRequest) -> Self {
		Self {
			origin: Some(AddressDraft::from(&request.origin)),
			destination: Some(AddressDraft::from(&request.destination)),
			parcels: Some(request.parcels.iter().map(ParcelDraft::from).collect()),
		}
	}
}

/// Validated rate request; the sole input accepted by carrier providers.
///
/// Only [`RateRequestDraft::validate`] constructs it, and it exposes no mutation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RateRequest {
	origin: Address,
	destination: Address,
	parcels: Vec<Parcel>,
}
impl RateRequest {
	/// Ship-from address.
	pub fn origin(&self) -> &Address {
		&self.origin
	}

	/// Ship-to address.
	pub fn destination(&self) -> &Address {
		&self.destination
	}

	/// Packages in the shipment; never empty.
	pub fn parcels(&self) -> &[Parcel] {
		&self.parcels
	}
}
impl TryFrom<&RateRequestDraft> for RateRequest {
	type Error = Error;

	fn try_from(draft: &RateRequestDraft) -> Result<Self> {
		draft.validate().map_err(Error::validation_failed)
	}
}

fn check_address(
	draft: Option<&AddressDraft>,
	path: &str,
	issues: &mut Issues,
) -> Option<Address> {
	match draft {
		Some(draft) => draft.check(path, issues),
		None => {
			issues.push(path, "is required");

			None
		},
	}
}

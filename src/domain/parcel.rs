//! Parcels: a weight plus optional outer dimensions.

// self
use crate::{
	_prelude::*,
	domain::validation::{Issues, join},
};

/// Mass unit for a parcel weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightUnit {
	/// Pounds.
	#[serde(rename = "LBS")]
	Pounds,
	/// Kilograms.
	#[serde(rename = "KGS")]
	Kilograms,
}
impl WeightUnit {
	/// Returns the domain label (`LBS` or `KGS`).
	pub const fn as_str(self) -> &'static str {
		match self {
			WeightUnit::Pounds => "LBS",
			WeightUnit::Kilograms => "KGS",
		}
	}

	/// Parses a domain label, ignoring ASCII case.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.to_ascii_uppercase().as_str() {
			"LBS" => Some(WeightUnit::Pounds),
			"KGS" => Some(WeightUnit::Kilograms),
			_ => None,
		}
	}
}
impl Display for WeightUnit {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Length unit for parcel dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionUnit {
	/// Inches.
	#[serde(rename = "IN")]
	Inches,
	/// Centimeters.
	#[serde(rename = "CM")]
	Centimeters,
}
impl DimensionUnit {
	/// Returns the domain label (`IN` or `CM`).
	pub const fn as_str(self) -> &'static str {
		match self {
			DimensionUnit::Inches => "IN",
			DimensionUnit::Centimeters => "CM",
		}
	}

	/// Parses a domain label, ignoring ASCII case.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.to_ascii_uppercase().as_str() {
			"IN" => Some(DimensionUnit::Inches),
			"CM" => Some(DimensionUnit::Centimeters),
			_ => None,
		}
	}
}
impl Display for DimensionUnit {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Strictly positive weight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weight {
	/// Magnitude.
	pub value: f64,
	/// Unit of `value`.
	pub unit: WeightUnit,
}

/// Strictly positive outer dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
	/// Longest side.
	pub length: f64,
	/// Width.
	pub width: f64,
	/// Height.
	pub height: f64,
	/// Unit shared by all three lengths.
	pub unit: DimensionUnit,
}

/// One package in a shipment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
	/// Package weight.
	pub weight: Weight,
	/// Outer dimensions, when known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dimensions: Option<Dimensions>,
}

/// Unvalidated weight.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightDraft {
	/// Magnitude.
	pub value: Option<f64>,
	/// Unit label (`LBS` or `KGS`).
	pub unit: Option<String>,
}

/// Unvalidated dimensions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionsDraft {
	/// Longest side.
	pub length: Option<f64>,
	/// Width.
	pub width: Option<f64>,
	/// Height.
	pub height: Option<f64>,
	/// Unit label (`IN` or `CM`).
	pub unit: Option<String>,
}

/// Unvalidated parcel.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParcelDraft {
	/// Package weight.
	pub weight: Option<WeightDraft>,
	/// Outer dimensions.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dimensions: Option<DimensionsDraft>,
}
impl ParcelDraft {
	pub(crate) fn check(&self, path: &str, issues: &mut Issues) -> Option<Parcel> {
		let weight = match &self.weight {
			Some(draft) => check_weight(draft, &join(path, "weight"), issues),
			None => {
				issues.push(join(path, "weight"), "is required");

				None
			},
		};
		let dimensions = match &self.dimensions {
			Some(draft) => Some(check_dimensions(draft, &join(path, "dimensions"), issues)?),
			None => None,
		};

		Some(Parcel { weight: weight?, dimensions })
	}
}
impl From<&Parcel> for ParcelDraft {
	fn from(parcel: &Parcel) -> Self {
		Self {
			weight: Some(WeightDraft {
				value: Some(parcel.weight.value),
				unit: Some(parcel.weight.unit.as_str().into()),
			}),
			dimensions: parcel.dimensions.map(|dims| DimensionsDraft {
				length: Some(dims.length),
				width: Some(dims.width),
				height: Some(dims.height),
				unit: Some(dims.unit.as_str().into()),
			}),
		}
	}
}

fn check_weight(draft: &WeightDraft, path: &str, issues: &mut Issues) -> Option<Weight> {
	let value = issues.positive_number(&join(path, "value"), draft.value);
	let unit =
		issues.unit(&join(path, "unit"), draft.unit.as_deref(), "LBS, KGS", WeightUnit::parse);

	Some(Weight { value: value?, unit: unit? })
}

fn check_dimensions(
	draft: &DimensionsDraft,
	path: &str,
	issues: &mut Issues,
) -> Option<Dimensions> {
	let length = issues.positive_number(&join(path, "length"), draft.length);
	let width = issues.positive_number(&join(path, "width"), draft.width);
	let height = issues.positive_number(&join(path, "height"), draft.height);
	let unit =
		issues.unit(&join(path, "unit"), draft.unit.as_deref(), "IN, CM", DimensionUnit::parse);

	Some(Dimensions { length: length?, width: width?, height: height?, unit: unit? })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn units_parse_case_insensitively() {
		assert_eq!(WeightUnit::parse("lbs"), Some(WeightUnit::Pounds));
		assert_eq!(WeightUnit::parse("KGS"), Some(WeightUnit::Kilograms));
		assert_eq!(WeightUnit::parse("oz"), None);
		assert_eq!(DimensionUnit::parse("cm"), Some(DimensionUnit::Centimeters));
		assert_eq!(DimensionUnit::parse("ft"), None);
	}

	#[test]
	fn dimensions_are_optional_but_checked_when_present() {
		let mut issues = Issues::default();
		let draft = ParcelDraft {
			weight: Some(WeightDraft { value: Some(2.5), unit: Some("kgs".into()) }),
			dimensions: None,
		};
		let parcel = draft.check("parcels[0]", &mut issues).expect("Parcel should validate.");

		assert_eq!(parcel.weight.unit, WeightUnit::Kilograms);
		assert!(parcel.dimensions.is_none());

		let broken = ParcelDraft {
			dimensions: Some(DimensionsDraft {
				length: Some(10.0),
				width: Some(0.0),
				height: None,
				unit: Some("FT".into()),
			}),
			..draft
		};

		assert!(broken.check("parcels[1]", &mut issues).is_none());

		let paths = issues
			.finish(Some(()))
			.expect_err("Broken dimensions should fail.")
			.into_iter()
			.map(|issue| issue.path)
			.collect::<Vec<_>>();

		assert_eq!(
			paths,
			[
				"parcels[1].dimensions.width",
				"parcels[1].dimensions.height",
				"parcels[1].dimensions.unit"
			]
		);
	}
}

//! Field-level validation issues and the accumulator shared by the domain drafts.

// self
use crate::_prelude::*;

/// A single field-level violation: JSON-style path plus a human message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationIssue {
	/// Path of the offending field, e.g. `parcels[0].weight.value`.
	pub path: String,
	/// What is wrong with it.
	pub message: String,
}
impl ValidationIssue {
	/// Creates a new issue.
	pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
		Self { path: path.into(), message: message.into() }
	}
}
impl Display for ValidationIssue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}: {}", self.path, self.message)
	}
}

/// Collects issues without stopping at the first one.
#[derive(Debug, Default)]
pub(crate) struct Issues(Vec<ValidationIssue>);
impl Issues {
	pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
		self.0.push(ValidationIssue::new(path, message));
	}

	/// Resolves to `value` when nothing was recorded.
	pub(crate) fn finish<T>(self, value: Option<T>) -> Result<T, Vec<ValidationIssue>> {
		match value {
			Some(value) if self.0.is_empty() => Ok(value),
			_ => Err(self.0),
		}
	}

	/// Trims a required string; records an issue when it is absent or blank.
	pub(crate) fn required_text(&mut self, path: &str, raw: Option<&str>) -> Option<String> {
		match raw.map(str::trim) {
			Some(value) if !value.is_empty() => Some(value.to_owned()),
			_ => {
				self.push(path, "is required");

				None
			},
		}
	}

	/// Requires a finite, strictly positive number.
	pub(crate) fn positive_number(&mut self, path: &str, raw: Option<f64>) -> Option<f64> {
		match raw {
			Some(value) if value.is_finite() && value > 0.0 => Some(value),
			Some(_) => {
				self.push(path, "must be a positive number");

				None
			},
			None => {
				self.push(path, "is required");

				None
			},
		}
	}

	/// Parses a unit code with the provided parser.
	pub(crate) fn unit<U>(
		&mut self,
		path: &str,
		raw: Option<&str>,
		expected: &str,
		parse: impl FnOnce(&str) -> Option<U>,
	) -> Option<U> {
		let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
			self.push(path, "is required");

			return None;
		};
		let unit = parse(raw);

		if unit.is_none() {
			self.push(path, format!("must be one of {expected}, got `{raw}`"));
		}

		unit
	}
}

/// Trims an optional string and folds blank values into `None`.
pub(crate) fn optional_text(raw: Option<&str>) -> Option<String> {
	raw.map(str::trim).filter(|value| !value.is_empty()).map(ToOwned::to_owned)
}

/// Joins a parent path and a child field.
pub(crate) fn join(parent: &str, child: &str) -> String {
	if parent.is_empty() { child.to_owned() } else { format!("{parent}.{child}") }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn issues_accumulate_instead_of_failing_fast() {
		let mut issues = Issues::default();

		assert_eq!(issues.required_text("a", Some("  ")), None);
		assert_eq!(issues.positive_number("b", Some(-1.0)), None);
		assert_eq!(issues.positive_number("c", Some(f64::NAN)), None);

		let err = issues.finish(Some(())).expect_err("Recorded issues should fail the draft.");

		assert_eq!(err.iter().map(|issue| issue.path.as_str()).collect::<Vec<_>>(), ["a", "b", "c"]);
	}

	#[test]
	fn optional_text_drops_blank_values() {
		assert_eq!(optional_text(Some("  Suite 5 ")), Some("Suite 5".into()));
		assert_eq!(optional_text(Some("   ")), None);
		assert_eq!(join("", "parcels"), "parcels");
		assert_eq!(join("origin", "city"), "origin.city");
	}
}

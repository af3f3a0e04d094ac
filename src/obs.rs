//! Optional observability helpers for pipeline stages.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `carrier_rates.stage` with the `stage`
//!   and `carrier` fields, plus `warn`-level events whenever a stage fails.
//! - Enable `metrics` to increment the `carrier_rates_stage_total` counter for every
//!   attempt/success/failure, labeled by `stage`, `carrier`, and `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Pipeline stages observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
	/// Domain validation inside the quoting service.
	Validation,
	/// Bearer token refresh against the carrier's token endpoint.
	TokenRefresh,
	/// Rating call against the carrier API.
	Rating,
}
impl Stage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Stage::Validation => "validation",
			Stage::TokenRefresh => "token_refresh",
			Stage::Rating => "rating",
		}
	}
}
impl Display for Stage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageOutcome {
	/// Entry to a stage.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl StageOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StageOutcome::Attempt => "attempt",
			StageOutcome::Success => "success",
			StageOutcome::Failure => "failure",
		}
	}
}
impl Display for StageOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the terminal outcome of a stage and logs failures.
pub fn record_result<T>(stage: Stage, carrier: &str, result: &Result<T>) {
	match result {
		Ok(_) => record_stage_outcome(stage, carrier, StageOutcome::Success),
		Err(err) => {
			record_stage_outcome(stage, carrier, StageOutcome::Failure);
			log_failure(stage, carrier, err);
		},
	}
}

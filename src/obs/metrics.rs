// self
use crate::obs::{Stage, StageOutcome};

/// Counter incremented once per stage outcome.
pub const STAGE_COUNTER: &str = "carrier_rates_stage_total";

/// Bumps [`STAGE_COUNTER`] for `carrier` (when the `metrics` feature is enabled).
pub fn record_stage_outcome(stage: Stage, carrier: &str, outcome: StageOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			STAGE_COUNTER,
			"stage" => stage.as_str(),
			"carrier" => carrier.to_owned(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (stage, carrier, outcome);
	}
}

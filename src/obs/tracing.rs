// self
use crate::{_prelude::*, obs::Stage};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedStage<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedStage<F> = F;

/// A span builder used by pipeline stages.
#[derive(Clone, Debug)]
pub struct StageSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl StageSpan {
	/// Creates a new span tagged with the provided stage + carrier name.
	pub fn new(stage: Stage, carrier: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("carrier_rates.stage", stage = stage.as_str(), carrier);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, carrier);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedStage<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `warn` event describing a failed stage (when tracing is enabled).
pub fn log_failure(stage: Stage, carrier: &str, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			stage = stage.as_str(),
			carrier,
			kind = err.kind.as_str(),
			status = err.context.status,
			code = err.context.code.as_deref(),
			"{}",
			err.message
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (stage, carrier, err);
	}
}

/// Emits a `debug` event for a notable, non-failing step (when tracing is enabled).
pub fn log_step(stage: Stage, carrier: &str, message: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(stage = stage.as_str(), carrier, "{message}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (stage, carrier, message);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn failure_logging_is_safe_without_subscriber() {
		log_failure(Stage::TokenRefresh, "UPS", &Error::auth_failed("Token endpoint refused."));
		log_step(Stage::Rating, "UPS", "Rating call dispatched.");
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = StageSpan::new(Stage::Rating, "UPS");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}

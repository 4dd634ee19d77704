//! CEP to temperature resolution service.
//!
//! Implements [`WeatherResolver`] as four sequential stages. Each stage runs
//! inside its own child span of the `resolve_weather` pipeline span, and the
//! first failing stage ends the run.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Instrument, Span, debug, warn};

use crate::domain::ports::{
    PostalLookup, ResolutionResult, SpanFactory, WeatherLookup, WeatherResolver, attr,
};
use crate::domain::{CityName, PipelineStage, PostalCode, ResolutionError, TemperatureReading};

/// Span wrapping one whole resolution run.
pub const PIPELINE_SPAN: &str = "resolve_weather";

/// Resolution service implementing the [`WeatherResolver`] driving port.
#[derive(Clone)]
pub struct WeatherResolutionService<P, W> {
    postal: Arc<P>,
    weather: Arc<W>,
    spans: Arc<dyn SpanFactory>,
}

impl<P, W> WeatherResolutionService<P, W> {
    /// Create a new service over the given provider ports.
    pub fn new(postal: Arc<P>, weather: Arc<W>, spans: Arc<dyn SpanFactory>) -> Self {
        Self {
            postal,
            weather,
            spans,
        }
    }
}

impl<P, W> WeatherResolutionService<P, W>
where
    P: PostalLookup,
    W: WeatherLookup,
{
    fn validate(&self, raw_code: &str) -> Result<PostalCode, ResolutionError> {
        let span = self.spans.span(PipelineStage::Validate.span_name());
        span.record(attr::CEP, raw_code);
        span.in_scope(|| PostalCode::parse(raw_code))
            .map_err(|err| fail(&span, ResolutionError::invalid_input(err.to_string())))
    }

    async fn resolve_city(&self, code: &PostalCode) -> Result<CityName, ResolutionError> {
        let span = self.spans.span(PipelineStage::ResolveCity.span_name());
        span.record(attr::CEP, code.as_str());
        match self.postal.lookup_city(code).instrument(span.clone()).await {
            Ok(city) => {
                span.record(attr::CITY, city.as_str());
                Ok(city)
            }
            Err(err) => Err(fail(
                &span,
                ResolutionError::new(err.kind(), PipelineStage::ResolveCity, err.to_string()),
            )),
        }
    }

    async fn resolve_temperature(
        &self,
        city: &CityName,
    ) -> Result<TemperatureReading, ResolutionError> {
        let span = self.spans.span(PipelineStage::ResolveTemperature.span_name());
        span.record(attr::CITY, city.as_str());
        match self.weather.lookup_temperature(city).instrument(span.clone()).await {
            Ok(reading) => {
                span.record(attr::TEMP_C, reading.celsius());
                Ok(reading)
            }
            Err(err) => Err(fail(
                &span,
                ResolutionError::new(
                    err.kind(),
                    PipelineStage::ResolveTemperature,
                    err.to_string(),
                ),
            )),
        }
    }

    fn assemble(&self, city: CityName, temperature: TemperatureReading) -> ResolutionResult {
        let span = self.spans.span(PipelineStage::Assemble.span_name());
        span.record(attr::CITY, city.as_str());
        span.record(attr::TEMP_C, temperature.celsius());
        span.record(attr::TEMP_F, temperature.fahrenheit());
        span.record(attr::TEMP_K, temperature.kelvin());
        ResolutionResult { city, temperature }
    }

    async fn run(&self, raw_code: &str) -> Result<ResolutionResult, ResolutionError> {
        let code = self.validate(raw_code)?;
        let city = self.resolve_city(&code).await?;
        let temperature = self.resolve_temperature(&city).await?;
        Ok(self.assemble(city, temperature))
    }
}

#[async_trait]
impl<P, W> WeatherResolver for WeatherResolutionService<P, W>
where
    P: PostalLookup,
    W: WeatherLookup,
{
    async fn resolve(&self, raw_code: &str) -> Result<ResolutionResult, ResolutionError> {
        let pipeline = self.spans.span(PIPELINE_SPAN);
        pipeline.record(attr::CEP, raw_code);
        let outcome = self.run(raw_code).instrument(pipeline.clone()).await;
        if let Err(err) = &outcome {
            pipeline.record(attr::ERROR_KIND, err.kind().as_str());
            log_failure(err);
        }
        outcome
    }
}

fn fail(span: &Span, err: ResolutionError) -> ResolutionError {
    span.record(attr::ERROR_KIND, err.kind().as_str());
    err
}

fn log_failure(err: &ResolutionError) {
    if err.kind().is_caller_visible() {
        debug!(stage = %err.stage(), kind = %err.kind(), detail = err.detail(), "weather resolution rejected");
    } else {
        warn!(stage = %err.stage(), kind = %err.kind(), detail = err.detail(), "weather resolution failed");
    }
}

use crate::pipeline::{Envelope, PipelineError, Transform};
use energy_model::{DailyWeather, HourlyWeather, UsageReading};
use time::macros::datetime;

/// Pure validation of a `UsageReading`.
///
/// Rules:
/// - quantity must be a finite number (its sign is not checked).
/// - ts must be within a broad sanity window [2000-01-01, 2100-01-01).
pub fn validate_usage_reading(env: Envelope<UsageReading>) -> Result<Envelope<UsageReading>, PipelineError> {
    let r = &env.payload;

    if !r.quantity.is_finite() {
        return Err(PipelineError::Transform("quantity must be finite".to_string()));
    }

    let min_ts = datetime!(2000-01-01 00:00:00 UTC);
    let max_ts = datetime!(2100-01-01 00:00:00 UTC);

    if r.ts < min_ts || r.ts >= max_ts {
        return Err(PipelineError::Transform("timestamp out of allowed range".to_string()));
    }

    Ok(env)
}

/// Pure validation of a `DailyWeather` row.
///
/// Rules:
/// - all three temperatures must be finite.
/// - min must not exceed max.
pub fn validate_daily_weather(env: Envelope<DailyWeather>) -> Result<Envelope<DailyWeather>, PipelineError> {
    let w = &env.payload;

    if !(w.mean_temp_f.is_finite() && w.min_temp_f.is_finite() && w.max_temp_f.is_finite()) {
        return Err(PipelineError::Transform(format!("non-finite temperature on {}", w.date)));
    }

    if w.min_temp_f > w.max_temp_f {
        return Err(PipelineError::Transform(format!(
            "min temperature above max on {}",
            w.date
        )));
    }

    Ok(env)
}

#[derive(Clone, Default)]
pub struct UsageReadingValidation;

#[async_trait::async_trait]
impl Transform<UsageReading, UsageReading> for UsageReadingValidation {
    async fn apply(&self, input: Envelope<UsageReading>) -> Result<Envelope<UsageReading>, PipelineError> {
        match validate_usage_reading(input) {
            Ok(env) => Ok(env),
            Err(e) => {
                metrics::counter!("validation_usage_reading_rejected_total").increment(1);
                Err(e)
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct DailyWeatherValidation;

#[async_trait::async_trait]
impl Transform<DailyWeather, DailyWeather> for DailyWeatherValidation {
    async fn apply(&self, input: Envelope<DailyWeather>) -> Result<Envelope<DailyWeather>, PipelineError> {
        match validate_daily_weather(input) {
            Ok(env) => Ok(env),
            Err(e) => {
                metrics::counter!("validation_daily_weather_rejected_total").increment(1);
                Err(e)
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct HourlyWeatherValidation;

#[async_trait::async_trait]
impl Transform<HourlyWeather, HourlyWeather> for HourlyWeatherValidation {
    async fn apply(&self, input: Envelope<HourlyWeather>) -> Result<Envelope<HourlyWeather>, PipelineError> {
        if input.payload.temp_f.is_finite() {
            Ok(input)
        } else {
            metrics::counter!("validation_hourly_weather_rejected_total").increment(1);
            Err(PipelineError::Transform("non-finite hourly temperature".to_string()))
        }
    }
}

use std::path::PathBuf;

use energy_model::{DailyWeather, HourlyWeather};
use time::{macros::format_description, PrimitiveDateTime};

use super::columns::parse_date;
use crate::pipeline::PipelineError;

/// A saved response from the Open-Meteo historical archive API, requested with
/// `temperature_unit=fahrenheit` and `timezone=auto` so that `daily.time` is
/// already in the site's local calendar.
///
/// One file carries both the daily and the hourly series, so it is read once
/// and each series is fed through its own pipeline via [`MemorySource`].
///
/// [`MemorySource`]: crate::pipeline::MemorySource
pub struct OpenMeteoArchiveFile {
    path: PathBuf,
}

impl OpenMeteoArchiveFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Result<WeatherArchive, PipelineError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PipelineError::Source(format!("failed to read weather archive {}: {e}", self.path.display()))
        })?;
        parse_archive(&contents)
    }
}

#[derive(serde::Deserialize)]
struct ArchiveResponse {
    daily: Option<DailySeries>,
    hourly: Option<HourlySeries>,
}

#[derive(serde::Deserialize)]
struct DailySeries {
    time: Vec<String>,
    temperature_2m_mean: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    temperature_2m_max: Vec<Option<f64>>,
}

#[derive(serde::Deserialize)]
struct HourlySeries {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherArchive {
    pub daily: Vec<DailyWeather>,
    pub hourly: Vec<HourlyWeather>,
}

pub fn parse_archive(json: &str) -> Result<WeatherArchive, PipelineError> {
    let resp: ArchiveResponse = serde_json::from_str(json)
        .map_err(|e| PipelineError::Source(format!("failed to parse weather archive: {e}")))?;

    let daily = resp
        .daily
        .ok_or_else(|| PipelineError::Source("no daily data received".to_string()))?;

    let mut out = WeatherArchive::default();
    for (i, day) in daily.time.iter().enumerate() {
        let mean = daily.temperature_2m_mean.get(i).copied().flatten();
        let min = daily.temperature_2m_min.get(i).copied().flatten();
        let max = daily.temperature_2m_max.get(i).copied().flatten();
        match (parse_date(day), mean, min, max) {
            (Some(date), Some(mean_temp_f), Some(min_temp_f), Some(max_temp_f)) => {
                out.daily.push(DailyWeather {
                    date,
                    mean_temp_f,
                    min_temp_f,
                    max_temp_f,
                })
            }
            _ => {
                metrics::counter!("weather_archive_days_skipped_total").increment(1);
                tracing::debug!(date = %day, "skipping archive day with missing values");
            }
        }
    }

    if let Some(hourly) = resp.hourly {
        let format = format_description!("[year]-[month]-[day]T[hour]:[minute]");
        for (t, temp) in hourly.time.iter().zip(hourly.temperature_2m) {
            let (Ok(time), Some(temp_f)) = (PrimitiveDateTime::parse(t, &format), temp) else {
                continue;
            };
            out.hourly.push(HourlyWeather { time, temp_f });
        }
    }

    Ok(out)
}

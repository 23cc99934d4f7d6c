use std::{fs::File, io::Read, path::PathBuf};

use energy_model::DailyWeather;

use super::columns::{parse_date, IngestError};
use crate::pipeline::{Envelope, PipelineError, RecordStream, Source};

/// Daily temperature table with columns `date, mean_temp_f, min_temp_f, max_temp_f`.
pub struct DailyWeatherCsvFileSource {
    path: PathBuf,
}

impl DailyWeatherCsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[derive(serde::Deserialize)]
struct WeatherRow {
    date: String,
    #[serde(alias = "avg_temp_f")]
    mean_temp_f: f64,
    min_temp_f: f64,
    max_temp_f: f64,
}

pub fn parse_daily_weather_csv<R: Read>(reader: R) -> Result<Vec<DailyWeather>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for (line, result) in rdr.deserialize::<WeatherRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                metrics::counter!("weather_csv_rows_skipped_total").increment(1);
                tracing::warn!(row = line + 2, error = %e, "skipping weather row");
                continue;
            }
        };
        let Some(date) = parse_date(&row.date) else {
            metrics::counter!("weather_csv_rows_skipped_total").increment(1);
            tracing::warn!(row = line + 2, date = %row.date, "skipping weather row with invalid date");
            continue;
        };
        out.push(DailyWeather {
            date,
            mean_temp_f: row.mean_temp_f,
            min_temp_f: row.min_temp_f,
            max_temp_f: row.max_temp_f,
        });
    }

    Ok(out)
}

#[async_trait::async_trait]
impl Source<DailyWeather> for DailyWeatherCsvFileSource {
    async fn stream(&self) -> RecordStream<DailyWeather> {
        let path = self.path.clone();
        let s = async_stream::try_stream! {
            let file = File::open(&path)
                .map_err(|e| PipelineError::Source(format!("failed to open weather CSV {}: {e}", path.display())))?;
            let days = parse_daily_weather_csv(file).map_err(PipelineError::from)?;
            tracing::info!(path = %path.display(), days = days.len(), "loaded daily weather CSV");

            for day in days {
                yield Envelope::new(day);
            }
        };

        Box::pin(s)
    }
}

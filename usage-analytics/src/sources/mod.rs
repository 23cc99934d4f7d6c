pub mod columns;
pub mod open_meteo_file;
pub mod usage_csv_file;
pub mod weather_csv_file;

pub use columns::{ColumnLayout, IngestError};
pub use open_meteo_file::{OpenMeteoArchiveFile, WeatherArchive};
pub use usage_csv_file::UsageCsvFileSource;
pub use weather_csv_file::DailyWeatherCsvFileSource;

use std::{path::Path, sync::Arc};

use energy_model::{DailyWeather, HourlyWeather, UsageReading, UtilityType};
use time::UtcOffset;

use crate::{
    config::InputsConfig,
    pipeline::{MemorySource, Pipeline, PipelineError},
    transform,
};

/// Everything the engine needs, already validated.
#[derive(Debug, Clone, Default)]
pub struct LoadedInputs {
    pub electric: Vec<UsageReading>,
    pub gas: Vec<UsageReading>,
    pub weather: Vec<DailyWeather>,
    pub hourly_weather: Vec<HourlyWeather>,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

async fn load_usage(
    path: Option<&Path>,
    utility: UtilityType,
    local_offset: UtcOffset,
) -> Result<Vec<UsageReading>, PipelineError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    Pipeline::<_, UsageReading>::new(UsageCsvFileSource::new(path, utility, local_offset))
        .with_transform(Arc::new(transform::UsageReadingValidation))
        .collect()
        .await
}

/// Load every configured input. Missing inputs load as empty sequences; the
/// engine copes with any of them being empty.
pub async fn load_inputs(inputs: &InputsConfig, local_offset: UtcOffset) -> Result<LoadedInputs, PipelineError> {
    let electric = load_usage(inputs.electric_csv.as_deref(), UtilityType::Electric, local_offset).await?;
    let gas = load_usage(inputs.gas_csv.as_deref(), UtilityType::Gas, local_offset).await?;

    let (weather, hourly_weather) = match inputs.weather_file.as_deref() {
        None => (Vec::new(), Vec::new()),
        Some(path) if is_json(path) => {
            let archive = OpenMeteoArchiveFile::new(path).load().await?;
            let daily = Pipeline::<_, DailyWeather>::new(MemorySource::new(archive.daily))
                .with_transform(Arc::new(transform::DailyWeatherValidation))
                .collect()
                .await?;
            let hourly = Pipeline::<_, HourlyWeather>::new(MemorySource::new(archive.hourly))
                .with_transform(Arc::new(transform::HourlyWeatherValidation))
                .collect()
                .await?;
            (daily, hourly)
        }
        Some(path) => {
            let daily = Pipeline::<_, DailyWeather>::new(DailyWeatherCsvFileSource::new(path))
                .with_transform(Arc::new(transform::DailyWeatherValidation))
                .collect()
                .await?;
            (daily, Vec::new())
        }
    };

    tracing::info!(
        electric = electric.len(),
        gas = gas.len(),
        weather_days = weather.len(),
        hourly_samples = hourly_weather.len(),
        "inputs loaded"
    );

    Ok(LoadedInputs {
        electric,
        gas,
        weather,
        hourly_weather,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("usage-analytics-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn loads_all_configured_inputs() {
        let electric = scratch("load-electric.csv", "Date,Usage (kWh)\n2024-01-01,12.0\n2024-01-02,n/a\n");
        let gas = scratch("load-gas.csv", "Date,Therms\n2024-01-01,2.5\n");
        let weather = scratch(
            "load-weather.csv",
            "date,mean_temp_f,min_temp_f,max_temp_f\n2024-01-01,30,20,40\n2024-01-02,35,40,30\n",
        );

        let inputs = InputsConfig {
            electric_csv: Some(electric.clone()),
            gas_csv: Some(gas.clone()),
            weather_file: Some(weather.clone()),
        };
        let loaded = load_inputs(&inputs, UtcOffset::UTC).await;
        for p in [&electric, &gas, &weather] {
            std::fs::remove_file(p).ok();
        }
        let loaded = loaded.unwrap();

        assert_eq!(loaded.electric.len(), 1);
        assert_eq!(loaded.gas.len(), 1);
        assert_eq!(loaded.gas[0].quantity, 2.5);
        // second weather row has min above max and is rejected by validation
        assert_eq!(loaded.weather.len(), 1);
        assert!(loaded.hourly_weather.is_empty());
    }

    #[tokio::test]
    async fn json_weather_yields_daily_and_hourly_series() {
        let weather = scratch(
            "load-weather.json",
            r#"{
                "daily": {
                    "time": ["2024-01-01", "2024-01-02"],
                    "temperature_2m_mean": [30.0, 35.0],
                    "temperature_2m_min": [20.0, 40.0],
                    "temperature_2m_max": [40.0, 30.0]
                },
                "hourly": {
                    "time": ["2024-01-01T00:00", "2024-01-01T01:00"],
                    "temperature_2m": [25.0, 24.5]
                }
            }"#,
        );

        let inputs = InputsConfig {
            weather_file: Some(weather.clone()),
            ..InputsConfig::default()
        };
        let loaded = load_inputs(&inputs, UtcOffset::UTC).await;
        std::fs::remove_file(&weather).ok();
        let loaded = loaded.unwrap();

        // second day has min above max and is rejected by validation
        assert_eq!(loaded.weather.len(), 1);
        assert_eq!(loaded.hourly_weather.len(), 2);
        assert!(loaded.electric.is_empty());
    }

    #[tokio::test]
    async fn nothing_configured_loads_nothing() {
        let loaded = load_inputs(&InputsConfig::default(), UtcOffset::UTC).await.unwrap();
        assert!(loaded.electric.is_empty());
        assert!(loaded.gas.is_empty());
        assert!(loaded.weather.is_empty());
    }
}

use time::{Date, PrimitiveDateTime};

/// One calendar day of outdoor temperature, in degrees Fahrenheit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyWeather {
    pub date: Date,
    pub mean_temp_f: f64,
    pub min_temp_f: f64,
    pub max_temp_f: f64,
}

/// A single hourly temperature sample. `time` is local wall-clock time as
/// reported by the weather provider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourlyWeather {
    pub time: PrimitiveDateTime,
    pub temp_f: f64,
}

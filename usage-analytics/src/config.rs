use serde::{Deserialize, Deserializer};
use std::{fmt, fs, io, path::PathBuf, str::FromStr};
use time::{macros::format_description, UtcOffset};

pub const DEFAULT_BALANCE_POINT_F: f64 = 65.0;
pub const DEFAULT_HEATING_THRESHOLD_F: f64 = 60.0;
pub const DEFAULT_COOLING_THRESHOLD_F: f64 = 70.0;
pub const DEFAULT_THERM_TO_KWH: f64 = 29.3001;
pub const DEFAULT_MIN_REGRESSION_POINTS: usize = 3;

/// Constants used by the unifier and the regime analyzer.
///
/// Days with mean temperature below `heating_threshold_f` are heating days,
/// above `cooling_threshold_f` cooling days, and anything in between
/// (inclusive) is shoulder season. Degree days are measured from
/// `balance_point_f` in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub balance_point_f: f64,
    pub heating_threshold_f: f64,
    pub cooling_threshold_f: f64,
    pub therm_to_kwh: f64,
    pub min_regression_points: usize,
    /// Offset used to turn reading timestamps into calendar-day keys.
    #[serde(deserialize_with = "deserialize_utc_offset")]
    pub utc_offset: UtcOffset,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            balance_point_f: DEFAULT_BALANCE_POINT_F,
            heating_threshold_f: DEFAULT_HEATING_THRESHOLD_F,
            cooling_threshold_f: DEFAULT_COOLING_THRESHOLD_F,
            therm_to_kwh: DEFAULT_THERM_TO_KWH,
            min_regression_points: DEFAULT_MIN_REGRESSION_POINTS,
            utc_offset: UtcOffset::UTC,
        }
    }
}

/// Parse `+HH:MM` / `-HH:MM` (or `Z`) into a fixed offset.
pub fn parse_utc_offset(s: &str) -> Result<UtcOffset, time::error::Parse> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return Ok(UtcOffset::UTC);
    }
    let format = format_description!("[offset_hour sign:mandatory]:[offset_minute]");
    UtcOffset::parse(s, &format)
}

fn deserialize_utc_offset<'de, D>(deserializer: D) -> Result<UtcOffset, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_utc_offset(&raw).map_err(|e| serde::de::Error::custom(format!("invalid utc_offset '{raw}': {e}")))
}

/// Trigger levels for the recommendation rules.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    pub insulation_slope: f64,
    pub draft_sealing_slope: f64,
    pub smart_thermostat_r_squared: f64,
    pub vampire_load_kwh: f64,
    pub led_lighting_kwh: f64,
    pub ac_maintenance_slope: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            insulation_slope: 3.0,
            draft_sealing_slope: 1.5,
            smart_thermostat_r_squared: 0.8,
            vampire_load_kwh: 15.0,
            led_lighting_kwh: 8.0,
            ac_maintenance_slope: 4.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    pub electric_csv: Option<PathBuf>,
    pub gas_csv: Option<PathBuf>,
    /// Daily weather as CSV, or an Open-Meteo archive response when the
    /// extension is `.json`.
    pub weather_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown report format '{other}', expected json or text")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Text => f.write_str("text"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub inputs: InputsConfig,
    pub analysis: AnalysisConfig,
    pub recommendations: RecommendationThresholds,
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load from the TOML file named by `ANALYTICS_CONFIG`, falling back to
    /// `analytics-config.toml`. When the variable is unset and the default file
    /// does not exist, built-in defaults are used.
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let explicit = env::var("ANALYTICS_CONFIG").ok();
        let path = explicit
            .clone()
            .unwrap_or_else(|| "analytics-config.toml".to_string());

        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
                tracing::debug!(path = %path, "no config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(anyhow::anyhow!("failed to read config '{path}': {e}")),
        };

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        Ok(cfg)
    }
}

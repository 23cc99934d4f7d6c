pub mod analysis;
pub mod daily_aggregate;
pub mod recommendation;
pub mod usage_reading;
pub mod weather;

pub use analysis::{AnalysisResult, RegressionFit};
pub use daily_aggregate::DailyAggregate;
pub use recommendation::{Category, Impact, Recommendation};
pub use usage_reading::{UsageReading, UtilityType};
pub use weather::{DailyWeather, HourlyWeather};

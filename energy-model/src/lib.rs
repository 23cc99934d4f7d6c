pub mod domain;

pub use domain::{
    AnalysisResult, Category, DailyAggregate, DailyWeather, HourlyWeather, Impact, Recommendation,
    RegressionFit, UsageReading, UtilityType,
};

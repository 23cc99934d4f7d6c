/// Weather-normalized load model for one household.
///
/// All fields are zero when there was not enough data to estimate them; a zero
/// slope does not by itself mean the home is insensitive to temperature.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    /// Daily kWh that does not depend on weather.
    pub base_load_kwh: f64,
    /// kWh per heating degree day, never negative.
    pub heating_slope: f64,
    /// kWh per cooling degree day, never negative.
    pub cooling_slope: f64,
    /// Goodness of fit of the heating regression only.
    pub r_squared: f64,
}

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    /// `None` when the response had no variance to explain.
    pub r_squared: Option<f64>,
}

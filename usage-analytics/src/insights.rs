use energy_model::AnalysisResult;
use serde::Serialize;

/// Days in the month used for the thermostat setback estimate.
pub const SETBACK_MONTH_DAYS: f64 = 30.0;
/// R² above which the heating fit is called out as a strong correlation.
pub const HIGH_CORRELATION_R_SQUARED: f64 = 0.5;

/// Headline figures for a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Insights {
    pub base_load_kwh: f64,
    pub heating_slope: f64,
    /// `None` when no cooling sensitivity was detected.
    pub cooling_slope: Option<f64>,
    pub high_correlation: bool,
    /// kWh saved per winter month by lowering the thermostat 1°F. Each degree of
    /// setback removes roughly one HDD per day.
    pub thermostat_savings_kwh_per_month: f64,
}

pub fn insights(analysis: &AnalysisResult) -> Insights {
    Insights {
        base_load_kwh: analysis.base_load_kwh,
        heating_slope: analysis.heating_slope,
        cooling_slope: (analysis.cooling_slope > 0.0).then_some(analysis.cooling_slope),
        high_correlation: analysis.r_squared > HIGH_CORRELATION_R_SQUARED,
        thermostat_savings_kwh_per_month: analysis.heating_slope * SETBACK_MONTH_DAYS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_dashboard_figures() {
        let i = insights(&AnalysisResult {
            base_load_kwh: 11.0,
            heating_slope: 2.5,
            cooling_slope: 0.0,
            r_squared: 0.6,
        });
        assert_eq!(i.base_load_kwh, 11.0);
        assert_eq!(i.cooling_slope, None);
        assert!(i.high_correlation);
        assert_eq!(i.thermostat_savings_kwh_per_month, 75.0);
    }

    #[test]
    fn weak_fit_is_not_highlighted() {
        let i = insights(&AnalysisResult {
            r_squared: 0.5,
            cooling_slope: 1.2,
            ..AnalysisResult::default()
        });
        assert!(!i.high_correlation);
        assert_eq!(i.cooling_slope, Some(1.2));
        assert_eq!(i.thermostat_savings_kwh_per_month, 0.0);
    }
}

use std::fmt;

use crate::config::AnalysisConfig;

/// Heating degree days for one day's mean temperature.
pub fn heating_degree_days(mean_temp_f: f64, balance_point_f: f64) -> f64 {
    (balance_point_f - mean_temp_f).max(0.0)
}

/// Cooling degree days for one day's mean temperature.
pub fn cooling_degree_days(mean_temp_f: f64, balance_point_f: f64) -> f64 {
    (mean_temp_f - balance_point_f).max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    Heating,
    Cooling,
    Shoulder,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heating => f.write_str("heating"),
            Self::Cooling => f.write_str("cooling"),
            Self::Shoulder => f.write_str("shoulder"),
        }
    }
}

/// Which regression a day feeds. The thresholds, not the degree-day balance
/// point, decide membership: with the defaults a 62°F day has 3 HDD but is
/// still a shoulder day.
pub fn classify(mean_temp_f: f64, cfg: &AnalysisConfig) -> Regime {
    if mean_temp_f < cfg.heating_threshold_f {
        Regime::Heating
    } else if mean_temp_f > cfg.cooling_threshold_f {
        Regime::Cooling
    } else {
        Regime::Shoulder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_days_are_never_negative_and_never_both_positive() {
        let mut t = -40.0;
        while t <= 120.0 {
            let hdd = heating_degree_days(t, 65.0);
            let cdd = cooling_degree_days(t, 65.0);
            assert!(hdd >= 0.0, "hdd({t}) = {hdd}");
            assert!(cdd >= 0.0, "cdd({t}) = {cdd}");
            assert!(hdd == 0.0 || cdd == 0.0, "both nonzero at {t}");
            t += 0.5;
        }
    }

    #[test]
    fn degree_days_measure_distance_from_balance_point() {
        assert_eq!(heating_degree_days(40.0, 65.0), 25.0);
        assert_eq!(cooling_degree_days(40.0, 65.0), 0.0);
        assert_eq!(cooling_degree_days(85.5, 65.0), 20.5);
        assert_eq!(heating_degree_days(65.0, 65.0), 0.0);
        assert_eq!(cooling_degree_days(65.0, 65.0), 0.0);
    }

    #[test]
    fn regime_boundaries_are_inclusive_for_shoulder() {
        let cfg = AnalysisConfig::default();
        assert_eq!(classify(59.9, &cfg), Regime::Heating);
        assert_eq!(classify(60.0, &cfg), Regime::Shoulder);
        assert_eq!(classify(65.0, &cfg), Regime::Shoulder);
        assert_eq!(classify(70.0, &cfg), Regime::Shoulder);
        assert_eq!(classify(70.1, &cfg), Regime::Cooling);
    }

    #[test]
    fn thresholds_are_configurable() {
        let cfg = AnalysisConfig {
            heating_threshold_f: 55.0,
            cooling_threshold_f: 75.0,
            ..AnalysisConfig::default()
        };
        assert_eq!(classify(58.0, &cfg), Regime::Shoulder);
        assert_eq!(classify(74.0, &cfg), Regime::Shoulder);
        assert_eq!(classify(54.0, &cfg), Regime::Heating);
    }
}

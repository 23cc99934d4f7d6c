use energy_model::{AnalysisResult, DailyAggregate, RegressionFit};
use serde::Serialize;

use crate::{
    config::AnalysisConfig,
    degree_days::{classify, cooling_degree_days, heating_degree_days, Regime},
    regression::linear_fit,
};

/// How many days landed in each regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegimeCounts {
    pub heating: usize,
    pub cooling: usize,
    pub shoulder: usize,
    /// Days with usage but no temperature; they feed no regime.
    pub without_weather: usize,
}

/// Everything the regime analyzer computed, including what
/// [`AnalysisResult`] leaves out.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeAnalysis {
    pub result: AnalysisResult,
    /// `None` when the regime had fewer than `min_regression_points` days.
    pub heating_fit: Option<RegressionFit>,
    pub cooling_fit: Option<RegressionFit>,
    pub counts: RegimeCounts,
}

pub fn analyze(days: &[DailyAggregate]) -> AnalysisResult {
    analyze_with(&AnalysisConfig::default(), days)
}

pub fn analyze_with(cfg: &AnalysisConfig, days: &[DailyAggregate]) -> AnalysisResult {
    analyze_detailed(cfg, days).result
}

fn fit_regime(points: &[(f64, f64)], min_points: usize) -> Option<RegressionFit> {
    if points.len() < min_points {
        return None;
    }
    linear_fit(points)
}

/// Split days into heating, cooling and shoulder regimes and fit each.
///
/// Heating days regress total kWh on HDD, cooling days on CDD. Base load is
/// the mean total of shoulder days, or the smallest total among days with a
/// temperature when there are no shoulder days. Slopes and base load are
/// clamped at zero. Never fails: missing data yields zeros.
pub fn analyze_detailed(cfg: &AnalysisConfig, days: &[DailyAggregate]) -> RegimeAnalysis {
    let mut heating: Vec<(f64, f64)> = Vec::new();
    let mut cooling: Vec<(f64, f64)> = Vec::new();
    let mut shoulder: Vec<f64> = Vec::new();
    let mut floor: Option<f64> = None;
    let mut without_weather = 0usize;

    for day in days {
        let Some(t) = day.mean_temp_f else {
            without_weather += 1;
            continue;
        };
        let total = day.total_kwh(cfg.therm_to_kwh);
        floor = Some(floor.map_or(total, |f| f.min(total)));

        match classify(t, cfg) {
            Regime::Heating => heating.push((heating_degree_days(t, cfg.balance_point_f), total)),
            Regime::Cooling => cooling.push((cooling_degree_days(t, cfg.balance_point_f), total)),
            Regime::Shoulder => shoulder.push(total),
        }
    }

    let heating_fit = fit_regime(&heating, cfg.min_regression_points);
    let cooling_fit = fit_regime(&cooling, cfg.min_regression_points);

    let base_load = if shoulder.is_empty() {
        floor.unwrap_or(0.0)
    } else {
        shoulder.iter().sum::<f64>() / shoulder.len() as f64
    };

    let result = AnalysisResult {
        base_load_kwh: base_load.max(0.0),
        heating_slope: heating_fit.map_or(0.0, |f| f.slope).max(0.0),
        cooling_slope: cooling_fit.map_or(0.0, |f| f.slope).max(0.0),
        r_squared: heating_fit.and_then(|f| f.r_squared).unwrap_or(0.0),
    };

    let counts = RegimeCounts {
        heating: heating.len(),
        cooling: cooling.len(),
        shoulder: shoulder.len(),
        without_weather,
    };

    tracing::debug!(
        heating = counts.heating,
        cooling = counts.cooling,
        shoulder = counts.shoulder,
        without_weather = counts.without_weather,
        base_load_kwh = result.base_load_kwh,
        heating_slope = result.heating_slope,
        cooling_slope = result.cooling_slope,
        "regime analysis complete"
    );

    RegimeAnalysis {
        result,
        heating_fit,
        cooling_fit,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{macros::date, Date, Duration};

    const EPS: f64 = 1e-9;

    /// One aggregate per `(mean_temp_f, electric_kwh)` pair on consecutive days.
    fn days(samples: &[(Option<f64>, f64)]) -> Vec<DailyAggregate> {
        let start: Date = date!(2024 - 01 - 01);
        samples
            .iter()
            .enumerate()
            .map(|(i, &(temp, kwh))| DailyAggregate {
                date: start + Duration::days(i as i64),
                electric_kwh: kwh,
                gas_therms: 0.0,
                mean_temp_f: temp,
            })
            .collect()
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(
            analyze(&[]),
            AnalysisResult {
                base_load_kwh: 0.0,
                heating_slope: 0.0,
                cooling_slope: 0.0,
                r_squared: 0.0,
            }
        );
    }

    #[test]
    fn pure_shoulder_season_is_all_base_load() {
        let input = days(&[(Some(65.0), 10.0); 5]);
        let result = analyze(&input);
        assert!((result.base_load_kwh - 10.0).abs() < EPS);
        assert_eq!(result.heating_slope, 0.0);
        assert_eq!(result.cooling_slope, 0.0);
        assert_eq!(result.r_squared, 0.0);
    }

    #[test]
    fn strong_heating_correlation() {
        // HDD 10, 20, 30, 40
        let input = days(&[
            (Some(55.0), 20.0),
            (Some(45.0), 30.0),
            (Some(35.0), 40.0),
            (Some(25.0), 50.0),
        ]);
        let detailed = analyze_detailed(&AnalysisConfig::default(), &input);
        assert!((detailed.result.heating_slope - 1.0).abs() < EPS);
        assert!((detailed.result.r_squared - 1.0).abs() < EPS);
        assert!((detailed.heating_fit.unwrap().intercept - 10.0).abs() < EPS);
        assert_eq!(detailed.counts.heating, 4);
    }

    #[test]
    fn cooling_slope_is_fit_on_cdd() {
        // CDD 10, 15, 20, 25
        let input = days(&[
            (Some(75.0), 30.0),
            (Some(80.0), 40.0),
            (Some(85.0), 50.0),
            (Some(90.0), 60.0),
        ]);
        let detailed = analyze_detailed(&AnalysisConfig::default(), &input);
        assert!((detailed.result.cooling_slope - 2.0).abs() < EPS);
        // cooling goodness-of-fit is kept out of the summary
        assert_eq!(detailed.result.r_squared, 0.0);
        assert!((detailed.cooling_fit.unwrap().r_squared.unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn sparse_heating_data_falls_back_to_zero() {
        let input = days(&[(Some(30.0), 80.0), (Some(50.0), 20.0), (Some(65.0), 10.0)]);
        let detailed = analyze_detailed(&AnalysisConfig::default(), &input);
        assert_eq!(detailed.result.heating_slope, 0.0);
        assert_eq!(detailed.result.r_squared, 0.0);
        assert!(detailed.heating_fit.is_none());
        assert_eq!(detailed.counts.heating, 2);
    }

    #[test]
    fn negative_slopes_are_clamped() {
        let input = days(&[
            (Some(55.0), 50.0),
            (Some(45.0), 40.0),
            (Some(35.0), 30.0),
            (Some(80.0), 60.0),
            (Some(85.0), 50.0),
            (Some(90.0), 40.0),
        ]);
        let detailed = analyze_detailed(&AnalysisConfig::default(), &input);
        assert!(detailed.heating_fit.unwrap().slope < 0.0);
        assert!(detailed.cooling_fit.unwrap().slope < 0.0);
        assert_eq!(detailed.result.heating_slope, 0.0);
        assert_eq!(detailed.result.cooling_slope, 0.0);
    }

    #[test]
    fn base_load_falls_back_to_smallest_day_with_weather() {
        let input = days(&[
            (Some(20.0), 60.0),
            (Some(90.0), 35.0),
            (Some(40.0), 45.0),
            // no weather: ignored even though it is the smallest
            (None, 1.0),
        ]);
        let detailed = analyze_detailed(&AnalysisConfig::default(), &input);
        assert!((detailed.result.base_load_kwh - 35.0).abs() < EPS);
        assert_eq!(detailed.counts.shoulder, 0);
        assert_eq!(detailed.counts.without_weather, 1);
    }

    #[test]
    fn days_without_weather_only_is_all_zero() {
        let input = days(&[(None, 12.0), (None, 14.0)]);
        assert_eq!(analyze(&input), AnalysisResult::default());
    }

    #[test]
    fn regime_gate_beats_degree_day_sign() {
        // 62°F has 3 HDD but sits in the shoulder window.
        let input = days(&[(Some(62.0), 12.0), (Some(68.0), 8.0)]);
        let detailed = analyze_detailed(&AnalysisConfig::default(), &input);
        assert_eq!(detailed.counts.heating, 0);
        assert_eq!(detailed.counts.shoulder, 2);
        assert!((detailed.result.base_load_kwh - 10.0).abs() < EPS);
    }

    #[test]
    fn gas_is_converted_to_kwh() {
        let input = vec![DailyAggregate {
            date: date!(2024 - 04 - 01),
            electric_kwh: 5.0,
            gas_therms: 1.0,
            mean_temp_f: Some(64.0),
        }];
        let result = analyze(&input);
        assert!((result.base_load_kwh - 34.3001).abs() < EPS);
    }

    #[test]
    fn net_export_base_load_is_clamped() {
        let input = days(&[(Some(65.0), -4.0), (Some(66.0), -2.0)]);
        assert_eq!(analyze(&input).base_load_kwh, 0.0);
    }

    #[test]
    fn minimum_sample_size_is_configurable() {
        let input = days(&[(Some(50.0), 25.0), (Some(40.0), 35.0)]);
        let cfg = AnalysisConfig {
            min_regression_points: 2,
            ..AnalysisConfig::default()
        };
        let result = analyze_with(&cfg, &input);
        assert!((result.heating_slope - 1.0).abs() < EPS);
    }
}

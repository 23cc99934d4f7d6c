use energy_model::{AnalysisResult, Category, Impact, Recommendation};

use crate::config::RecommendationThresholds;

fn recommendation(
    id: &str,
    title: &str,
    description: String,
    impact: Impact,
    category: Category,
) -> Recommendation {
    Recommendation {
        id: id.to_string(),
        title: title.to_string(),
        description,
        impact,
        category,
    }
}

pub fn recommend(analysis: &AnalysisResult) -> Vec<Recommendation> {
    recommend_with(&RecommendationThresholds::default(), analysis)
}

/// Turn a fitted load model into efficiency tips.
///
/// Rules are checked independently in a fixed order (heating, base load,
/// cooling), so the output order is stable. The insulation and draft-sealing
/// rules cover disjoint slope bands, as do vampire-load and LED lighting.
pub fn recommend_with(t: &RecommendationThresholds, analysis: &AnalysisResult) -> Vec<Recommendation> {
    let AnalysisResult {
        base_load_kwh,
        heating_slope,
        cooling_slope,
        r_squared,
    } = *analysis;

    let mut list = Vec::new();

    if heating_slope > t.insulation_slope {
        list.push(recommendation(
            "insulation",
            "Improve Insulation",
            format!(
                "Your home uses {heating_slope:.1} kWh per degree of cold. This is relatively high \
                 sensitivity, suggesting poor insulation or drafty windows."
            ),
            Impact::High,
            Category::Heating,
        ));
    } else if heating_slope > t.draft_sealing_slope {
        list.push(recommendation(
            "draft-sealing",
            "Seal Drafts",
            format!(
                "Your home uses {heating_slope:.1} kWh per heating degree day. Check windows and \
                 doors for drafts; small gaps can significantly increase heating costs."
            ),
            Impact::Medium,
            Category::Heating,
        ));
    }

    if r_squared > t.smart_thermostat_r_squared {
        list.push(recommendation(
            "smart-thermostat",
            "Smart Thermostat Optimization",
            format!(
                "Your usage tracks outdoor temperature very closely (R² {r_squared:.1}). A smart \
                 thermostat with setbacks could be very effective."
            ),
            Impact::Medium,
            Category::Heating,
        ));
    }

    if base_load_kwh > t.vampire_load_kwh {
        list.push(recommendation(
            "vampire-load",
            "Check \"Vampire\" Loads",
            format!(
                "Your constant daily usage is high (~{base_load_kwh:.1} kWh). Check for old \
                 refrigerators, dehumidifiers, or always-on electronics."
            ),
            Impact::High,
            Category::Baseload,
        ));
    } else if base_load_kwh > t.led_lighting_kwh {
        list.push(recommendation(
            "led-lighting",
            "Switch to LED",
            format!(
                "Your base load is about {base_load_kwh:.1} kWh per day. If you haven't already, \
                 switching all lights to LED can bring it down."
            ),
            Impact::Low,
            Category::Baseload,
        ));
    }

    if cooling_slope > t.ac_maintenance_slope {
        list.push(recommendation(
            "ac-maintenance",
            "AC Maintenance",
            format!(
                "Your cooling sensitivity is very high ({cooling_slope:.1} kWh per cooling degree \
                 day). Ensure your AC filter is clean and the unit is serviced."
            ),
            Impact::High,
            Category::Cooling,
        ));
    }

    tracing::debug!(
        fired = ?list.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        "recommendations evaluated"
    );

    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.id.as_str()).collect()
    }

    fn result(base_load_kwh: f64, heating_slope: f64, cooling_slope: f64, r_squared: f64) -> AnalysisResult {
        AnalysisResult {
            base_load_kwh,
            heating_slope,
            cooling_slope,
            r_squared,
        }
    }

    #[test]
    fn zero_result_recommends_nothing() {
        assert!(recommend(&AnalysisResult::default()).is_empty());
    }

    #[test]
    fn strong_correlation_with_gentle_slope() {
        let recs = recommend(&result(0.0, 1.0, 0.0, 1.0));
        assert_eq!(ids(&recs), vec!["smart-thermostat"]);
        assert_eq!(recs[0].impact, Impact::Medium);
        assert_eq!(recs[0].category, Category::Heating);
    }

    #[test]
    fn heating_slope_bands() {
        assert_eq!(ids(&recommend(&result(0.0, 1.5, 0.0, 0.0))), Vec::<&str>::new());
        assert_eq!(ids(&recommend(&result(0.0, 1.6, 0.0, 0.0))), vec!["draft-sealing"]);
        assert_eq!(ids(&recommend(&result(0.0, 3.0, 0.0, 0.0))), vec!["draft-sealing"]);
        assert_eq!(ids(&recommend(&result(0.0, 3.2, 0.0, 0.0))), vec!["insulation"]);
    }

    #[test]
    fn insulation_and_thermostat_fire_together() {
        let recs = recommend(&result(0.0, 4.0, 0.0, 0.9));
        assert_eq!(ids(&recs), vec!["insulation", "smart-thermostat"]);
        assert_eq!(recs[0].impact, Impact::High);
        assert!(recs[0].description.contains("4.0 kWh per degree"));
    }

    #[test]
    fn high_base_load_is_a_vampire_load() {
        let recs = recommend(&result(20.0, 0.0, 0.0, 0.0));
        assert_eq!(ids(&recs), vec!["vampire-load"]);
        assert_eq!(recs[0].impact, Impact::High);
        assert_eq!(recs[0].category, Category::Baseload);
        assert!(recs[0].description.contains("~20.0 kWh"));
    }

    #[test]
    fn base_load_bands() {
        assert!(recommend(&result(8.0, 0.0, 0.0, 0.0)).is_empty());
        assert_eq!(ids(&recommend(&result(8.5, 0.0, 0.0, 0.0))), vec!["led-lighting"]);
        assert_eq!(ids(&recommend(&result(15.0, 0.0, 0.0, 0.0))), vec!["led-lighting"]);
        let recs = recommend(&result(12.34, 0.0, 0.0, 0.0));
        assert_eq!(recs[0].impact, Impact::Low);
        assert!(recs[0].description.contains("12.3 kWh"));
    }

    #[test]
    fn steep_cooling_needs_ac_maintenance() {
        assert!(recommend(&result(0.0, 0.0, 4.0, 0.0)).is_empty());
        let recs = recommend(&result(0.0, 0.0, 4.5, 0.0));
        assert_eq!(ids(&recs), vec!["ac-maintenance"]);
        assert_eq!(recs[0].category, Category::Cooling);
    }

    #[test]
    fn everything_fires_in_rule_order() {
        let recs = recommend(&result(16.0, 3.5, 5.0, 0.95));
        assert_eq!(
            ids(&recs),
            vec!["insulation", "smart-thermostat", "vampire-load", "ac-maintenance"]
        );
    }

    #[test]
    fn custom_thresholds_shift_the_bands() {
        let t = RecommendationThresholds {
            vampire_load_kwh: 25.0,
            ..RecommendationThresholds::default()
        };
        assert_eq!(ids(&recommend_with(&t, &result(20.0, 0.0, 0.0, 0.0))), vec!["led-lighting"]);
    }
}

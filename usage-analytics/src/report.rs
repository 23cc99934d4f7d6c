use std::fmt::Write as _;

use energy_model::{AnalysisResult, Recommendation};
use serde::Serialize;
use time::Date;

use crate::{
    analysis::{analyze_detailed, RegimeCounts},
    config::{AnalysisConfig, RecommendationThresholds, ReportFormat},
    hourly::{hourly_profile, HourlyBucket},
    insights::{insights, Insights},
    recommend::recommend_with,
    sources::LoadedInputs,
    unify::{unify_with, usage_date_range},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

/// Full output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub usage_range: Option<DateRange>,
    pub days: usize,
    pub days_with_weather: usize,
    pub regimes: RegimeCounts,
    pub result: AnalysisResult,
    pub insights: Insights,
    pub recommendations: Vec<Recommendation>,
}

/// Run unify, analyze and recommend over already-loaded inputs.
pub fn build_report(
    cfg: &AnalysisConfig,
    thresholds: &RecommendationThresholds,
    inputs: &LoadedInputs,
) -> AnalysisReport {
    let days = unify_with(cfg, &inputs.electric, &inputs.gas, &inputs.weather);
    let detailed = analyze_detailed(cfg, &days);
    let recommendations = recommend_with(thresholds, &detailed.result);

    AnalysisReport {
        usage_range: usage_date_range(&inputs.electric, &inputs.gas, cfg.utc_offset)
            .map(|(start, end)| DateRange { start, end }),
        days: days.len(),
        days_with_weather: days.iter().filter(|d| d.mean_temp_f.is_some()).count(),
        regimes: detailed.counts,
        result: detailed.result,
        insights: insights(&detailed.result),
        recommendations,
    }
}

/// Hour-by-hour breakdown of a single local day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyDetail {
    pub date: Date,
    pub hours: Vec<HourlyBucket>,
}

pub fn build_hourly_detail(cfg: &AnalysisConfig, inputs: &LoadedInputs, date: Date) -> HourlyDetail {
    let hours = hourly_profile(
        date,
        &inputs.electric,
        &inputs.gas,
        &inputs.hourly_weather,
        cfg.utc_offset,
    );
    HourlyDetail {
        date,
        hours: hours.to_vec(),
    }
}

pub fn render(report: &AnalysisReport, format: ReportFormat) -> anyhow::Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Text => render_text(report),
    }
}

fn render_text(report: &AnalysisReport) -> anyhow::Result<String> {
    let mut out = String::new();

    match report.usage_range {
        Some(range) => writeln!(out, "Usage analysis {} .. {}", range.start, range.end)?,
        None => writeln!(out, "Usage analysis (no usage data)")?,
    }
    let r = &report.regimes;
    writeln!(
        out,
        "Days: {} ({} with weather; heating {}, cooling {}, shoulder {})",
        report.days, report.days_with_weather, r.heating, r.cooling, r.shoulder
    )?;
    writeln!(out)?;

    let i = &report.insights;
    writeln!(out, "{:<18} {:.1} kWh/day", "Base load", i.base_load_kwh)?;
    writeln!(
        out,
        "{:<18} {:.2} kWh/HDD (R² {:.2})",
        "Heating slope", i.heating_slope, report.result.r_squared
    )?;
    match i.cooling_slope {
        Some(slope) => writeln!(out, "{:<18} {:.2} kWh/CDD", "Cooling slope", slope)?,
        None => writeln!(out, "{:<18} --", "Cooling slope")?,
    }
    if i.high_correlation {
        writeln!(out, "{:<18} heating use tracks temperature closely", "")?;
    }
    writeln!(
        out,
        "Lowering the thermostat 1°F saves about {:.0} kWh per winter month.",
        i.thermostat_savings_kwh_per_month
    )?;

    writeln!(out)?;
    if report.recommendations.is_empty() {
        writeln!(out, "No recommendations.")?;
    } else {
        writeln!(out, "Recommendations")?;
        for rec in &report.recommendations {
            writeln!(
                out,
                "  [{}] {} ({})",
                rec.impact.to_string().to_uppercase(),
                rec.title,
                rec.category
            )?;
            writeln!(out, "    {}", rec.description)?;
        }
    }

    Ok(out)
}

pub fn render_hourly(detail: &HourlyDetail, format: ReportFormat) -> anyhow::Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(detail)?),
        ReportFormat::Text => {
            let mut out = String::new();
            writeln!(out, "Hourly usage {}", detail.date)?;
            writeln!(out, "{:<6} {:>10} {:>10} {:>8}", "Hour", "kWh", "Therms", "Temp °F")?;
            for h in &detail.hours {
                let temp = h.temp_f.map_or_else(|| "--".to_string(), |t| format!("{t:.1}"));
                writeln!(
                    out,
                    "{:<6} {:>10.2} {:>10.2} {:>8}",
                    format!("{:02}:00", h.hour),
                    h.electric_kwh,
                    h.gas_therms,
                    temp
                )?;
            }
            Ok(out)
        }
    }
}

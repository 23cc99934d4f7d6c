use anyhow::{bail, Result};
use std::{env, path::PathBuf};
use time::Date;
use usage_analytics::{
    config::{AppConfig, ReportFormat},
    observability,
    report::{build_hourly_detail, build_report, render, render_hourly},
    sources::{columns::parse_date, load_inputs},
};

const USAGE: &str = "usage: usage-analytics [--electric <csv>] [--gas <csv>] [--weather <csv|json>] \
[--format json|text] [--day YYYY-MM-DD]";

/// Options that only make sense per invocation and have no config-file form.
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    /// Print the hourly profile of this day instead of the full report.
    day: Option<Date>,
}

/// Command-line values override the config file.
fn apply_args(cfg: &mut AppConfig, args: impl IntoIterator<Item = String>) -> Result<CliOptions> {
    let mut opts = CliOptions::default();
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        let Some(value) = args.next() else {
            bail!("missing value for {flag}\n{USAGE}");
        };
        match flag.as_str() {
            "--electric" => cfg.inputs.electric_csv = Some(PathBuf::from(value)),
            "--gas" => cfg.inputs.gas_csv = Some(PathBuf::from(value)),
            "--weather" => cfg.inputs.weather_file = Some(PathBuf::from(value)),
            "--format" => {
                cfg.report.format = value.parse::<ReportFormat>().map_err(anyhow::Error::msg)?
            }
            "--day" => match parse_date(&value) {
                Some(day) => opts.day = Some(day),
                None => bail!("invalid date {value}\n{USAGE}"),
            },
            other => bail!("unknown argument {other}\n{USAGE}"),
        }
    }
    Ok(opts)
}

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration, then let arguments override inputs and format.
    let mut cfg = AppConfig::load()?;
    let opts = apply_args(&mut cfg, env::args().skip(1))?;

    if cfg.inputs.electric_csv.is_none() && cfg.inputs.gas_csv.is_none() {
        bail!("no usage data configured\n{USAGE}");
    }

    let inputs = load_inputs(&cfg.inputs, cfg.analysis.utc_offset).await?;

    if let Some(day) = opts.day {
        let detail = build_hourly_detail(&cfg.analysis, &inputs, day);
        if inputs.hourly_weather.is_empty() {
            tracing::warn!("no hourly weather loaded; temperatures are blank");
        }
        println!("{}", render_hourly(&detail, cfg.report.format)?);
        return Ok(());
    }

    let report = build_report(&cfg.analysis, &cfg.recommendations, &inputs);

    tracing::info!(
        days = report.days,
        days_with_weather = report.days_with_weather,
        recommendations = report.recommendations.len(),
        "analysis complete"
    );
    if report.days > 0 && report.days_with_weather == 0 {
        tracing::warn!("no usage day matched a weather date; slopes and base load are zero");
    }

    println!("{}", render(&report, cfg.report.format)?);

    Ok(())
}

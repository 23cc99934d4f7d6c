use anyhow::{bail, Result};
use std::{env, io, path::PathBuf};
use usage_analytics::{config::AppConfig, observability, sources::load_inputs, unify::unify_with};

#[derive(serde::Serialize)]
struct DailyRow {
    date: String,
    electric_kwh: f64,
    gas_therms: f64,
    mean_temp_f: Option<f64>,
    total_kwh: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: unify_daily <electric_csv|-> [gas_csv|-] [weather_file]");
    }
    let path_arg = |idx: usize| {
        args.get(idx)
            .filter(|a| a.as_str() != "-")
            .map(PathBuf::from)
    };

    // Config still supplies the offset and conversion factor.
    let mut cfg = AppConfig::load()?;
    cfg.inputs.electric_csv = path_arg(1);
    cfg.inputs.gas_csv = path_arg(2);
    cfg.inputs.weather_file = path_arg(3);

    let inputs = load_inputs(&cfg.inputs, cfg.analysis.utc_offset).await?;
    let days = unify_with(&cfg.analysis, &inputs.electric, &inputs.gas, &inputs.weather);

    let mut wtr = csv::Writer::from_writer(io::stdout().lock());
    for day in &days {
        wtr.serialize(DailyRow {
            date: day.date.to_string(),
            electric_kwh: day.electric_kwh,
            gas_therms: day.gas_therms,
            mean_temp_f: day.mean_temp_f,
            total_kwh: day.total_kwh(cfg.analysis.therm_to_kwh),
        })?;
    }
    wtr.flush()?;

    tracing::info!(days = days.len(), "unified daily table written");

    Ok(())
}

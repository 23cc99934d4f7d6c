use std::collections::{BTreeMap, HashMap};

use energy_model::{DailyAggregate, DailyWeather, UsageReading};
use time::{Date, OffsetDateTime, UtcOffset};

use crate::config::AnalysisConfig;

/// Calendar day a reading belongs to, read in `local_offset`.
pub fn date_key(ts: OffsetDateTime, local_offset: UtcOffset) -> Date {
    ts.to_offset(local_offset).date()
}

/// Merge electric and gas readings into one aggregate per day, keyed in UTC.
pub fn unify(
    electric: &[UsageReading],
    gas: &[UsageReading],
    weather: &[DailyWeather],
) -> Vec<DailyAggregate> {
    unify_with(&AnalysisConfig::default(), electric, gas, weather)
}

/// Merge electric and gas readings into one aggregate per day.
///
/// Readings on the same day are summed. Only days with at least one reading
/// are produced; a day's `mean_temp_f` is set when `weather` has an entry for
/// that exact date. Output is ascending by date with no duplicates, whatever
/// the input order.
pub fn unify_with(
    cfg: &AnalysisConfig,
    electric: &[UsageReading],
    gas: &[UsageReading],
    weather: &[DailyWeather],
) -> Vec<DailyAggregate> {
    let mut days: BTreeMap<Date, DailyAggregate> = BTreeMap::new();

    for r in electric {
        let key = date_key(r.ts, cfg.utc_offset);
        days.entry(key)
            .or_insert_with(|| DailyAggregate::empty(key))
            .electric_kwh += r.quantity;
    }

    for r in gas {
        let key = date_key(r.ts, cfg.utc_offset);
        days.entry(key)
            .or_insert_with(|| DailyAggregate::empty(key))
            .gas_therms += r.quantity;
    }

    // Later entries win when the weather feed repeats a date.
    let temps: HashMap<Date, f64> = weather.iter().map(|w| (w.date, w.mean_temp_f)).collect();

    let unified: Vec<DailyAggregate> = days
        .into_values()
        .map(|mut day| {
            day.mean_temp_f = temps.get(&day.date).copied();
            day
        })
        .collect();

    tracing::debug!(
        days = unified.len(),
        with_weather = unified.iter().filter(|d| d.mean_temp_f.is_some()).count(),
        "unified daily usage"
    );

    unified
}

/// First and last local day covered by any reading, for sizing a weather request.
pub fn usage_date_range(
    electric: &[UsageReading],
    gas: &[UsageReading],
    local_offset: UtcOffset,
) -> Option<(Date, Date)> {
    let mut keys = electric
        .iter()
        .chain(gas)
        .map(|r| date_key(r.ts, local_offset));

    let first = keys.next()?;
    Some(keys.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

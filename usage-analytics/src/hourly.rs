use energy_model::{HourlyWeather, UsageReading};
use serde::Serialize;
use time::{Date, UtcOffset};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HourlyBucket {
    pub hour: u8,
    pub electric_kwh: f64,
    pub gas_therms: f64,
    pub temp_f: Option<f64>,
}

fn add_readings(
    buckets: &mut [HourlyBucket; 24],
    readings: &[UsageReading],
    date: Date,
    local_offset: UtcOffset,
    field: fn(&mut HourlyBucket) -> &mut f64,
) {
    for r in readings {
        let local = r.ts.to_offset(local_offset);
        if local.date() == date {
            *field(&mut buckets[local.hour() as usize]) += r.quantity;
        }
    }
}

/// Hour-by-hour usage and temperature for one local day.
///
/// Readings are binned by the hour they start in (a 00:15 reading lands in
/// hour 0) and summed. Each hour takes the first weather sample reported for
/// it; hours without one have no temperature.
pub fn hourly_profile(
    date: Date,
    electric: &[UsageReading],
    gas: &[UsageReading],
    hourly_weather: &[HourlyWeather],
    local_offset: UtcOffset,
) -> [HourlyBucket; 24] {
    let mut buckets = [HourlyBucket::default(); 24];
    for (hour, bucket) in buckets.iter_mut().enumerate() {
        bucket.hour = hour as u8;
    }

    add_readings(&mut buckets, electric, date, local_offset, |b| &mut b.electric_kwh);
    add_readings(&mut buckets, gas, date, local_offset, |b| &mut b.gas_therms);

    for sample in hourly_weather.iter().filter(|w| w.time.date() == date) {
        let bucket = &mut buckets[sample.time.hour() as usize];
        if bucket.temp_f.is_none() {
            bucket.temp_f = Some(sample.temp_f);
        }
    }

    buckets
}

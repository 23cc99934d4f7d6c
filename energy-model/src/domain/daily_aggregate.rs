use time::Date;

/// Usage summed over one calendar day, with the day's mean temperature when
/// weather data covered it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyAggregate {
    pub date: Date,
    pub electric_kwh: f64,
    pub gas_therms: f64,
    pub mean_temp_f: Option<f64>,
}

impl DailyAggregate {
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            electric_kwh: 0.0,
            gas_therms: 0.0,
            mean_temp_f: None,
        }
    }

    /// Electric plus gas, with gas converted to kWh at `therm_to_kwh`.
    pub fn total_kwh(&self, therm_to_kwh: f64) -> f64 {
        self.electric_kwh + self.gas_therms * therm_to_kwh
    }
}

use std::fmt;

use time::OffsetDateTime;

/// Which meter a reading came from. Electric quantities are kWh, gas quantities are Therms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum UtilityType {
    Electric,
    Gas,
}

impl fmt::Display for UtilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Electric => f.write_str("electric"),
            Self::Gas => f.write_str("gas"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageReading {
    pub ts: OffsetDateTime,
    pub quantity: f64,
    pub is_estimated: bool,
}

impl UsageReading {
    pub fn new(ts: OffsetDateTime, quantity: f64) -> Self {
        Self {
            ts,
            quantity,
            is_estimated: false,
        }
    }
}

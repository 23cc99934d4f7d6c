use csv::StringRecord;
use energy_model::UtilityType;
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset,
};

use crate::pipeline::PipelineError;

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("file is empty")]
    EmptyFile,
    #[error("could not identify date or usage columns; found: {found}")]
    MissingColumns { found: String },
    #[error("this looks like a {detected} file, but it was supplied as {expected} data")]
    UtilityMismatch {
        detected: UtilityType,
        expected: UtilityType,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IngestError> for PipelineError {
    fn from(e: IngestError) -> Self {
        PipelineError::Source(e.to_string())
    }
}

/// Where the interesting fields live in a utility export, worked out from
/// header names alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub utility: UtilityType,
    pub date: usize,
    pub time: Option<usize>,
    pub usage: usize,
}

/// Guess the utility from header names. Gas wins if any header mentions
/// therms, CCF or gas; a `kWh` header marks electric. Anything else is
/// inconclusive.
pub fn detect_utility(headers: &StringRecord) -> Option<UtilityType> {
    let lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

    if lower
        .iter()
        .any(|k| k.contains("therm") || k.contains("ccf") || k.contains("gas"))
    {
        Some(UtilityType::Gas)
    } else if lower.iter().any(|k| k.contains("kwh")) {
        Some(UtilityType::Electric)
    } else {
        None
    }
}

impl ColumnLayout {
    pub fn detect(headers: &StringRecord, expected: Option<UtilityType>) -> Result<Self, IngestError> {
        let detected = detect_utility(headers);
        if let (Some(detected), Some(expected)) = (detected, expected) {
            if detected != expected {
                return Err(IngestError::UtilityMismatch { detected, expected });
            }
        }
        let utility = expected.or(detected).unwrap_or(UtilityType::Electric);

        let date = find_column(headers, |k: &str| {
            k == "date" || k.contains("bill start") || k.contains("reading date")
        });
        let time = find_column(headers, |k: &str| k.contains("start time"));
        let usage = find_column(headers, |k: &str| {
            k.contains("usage")
                || k.contains("kwh")
                || k.contains("consumption")
                || (utility == UtilityType::Gas && k.contains("therm"))
        });

        match (date, usage) {
            (Some(date), Some(usage)) => Ok(Self {
                utility,
                date,
                time,
                usage,
            }),
            _ => Err(IngestError::MissingColumns {
                found: headers.iter().collect::<Vec<_>>().join(", "),
            }),
        }
    }
}

fn find_column(headers: &StringRecord, pred: impl Fn(&str) -> bool) -> Option<usize> {
    headers
        .iter()
        .position(|h| pred(h.trim().to_lowercase().as_str()))
}

/// Strip currency symbols, units and thousands separators, then parse.
pub fn parse_usage_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok().filter(|v: &f64| v.is_finite())
}

const DATE_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]"),
    format_description!("[month padding:none]/[day padding:none]/[year]"),
];

const TIME_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[hour padding:none]:[minute]:[second]"),
    format_description!("[hour padding:none]:[minute]"),
    format_description!("[hour repr:12 padding:none]:[minute] [period]"),
];

pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    DATE_FORMATS.iter().find_map(|f| Date::parse(raw, f).ok())
}

pub fn parse_time(raw: &str) -> Option<Time> {
    let raw = raw.trim();
    TIME_FORMATS.iter().find_map(|f| Time::parse(raw, f).ok())
}

/// Build a timestamp from a date cell and an optional start-time cell.
///
/// RFC 3339 values carry their own offset. Naive local values are read in
/// `local`, the same offset the unifier uses to key days. A date cell may
/// also carry its time after a single space.
pub fn parse_timestamp(date: &str, time: Option<&str>, local: UtcOffset) -> Option<OffsetDateTime> {
    let date = date.trim();
    if let Ok(ts) = OffsetDateTime::parse(date, &Rfc3339) {
        return Some(ts);
    }

    let (date_part, inline_time) = match date.split_once(' ') {
        Some((d, t)) => (d, Some(t)),
        None => (date, None),
    };
    let day = parse_date(date_part)?;

    let time_str = time
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .or(inline_time);
    let clock = match time_str {
        Some(t) => parse_time(t)?,
        None => Time::MIDNIGHT,
    };

    Some(PrimitiveDateTime::new(day, clock).assume_offset(local))
}

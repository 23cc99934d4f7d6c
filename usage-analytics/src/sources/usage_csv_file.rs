use std::{fs::File, io::Read, path::PathBuf};

use csv::{ByteRecord, StringRecord};
use energy_model::{UsageReading, UtilityType};
use time::UtcOffset;

use super::columns::{parse_timestamp, parse_usage_value, ColumnLayout, IngestError};
use crate::pipeline::{Envelope, PipelineError, RecordStream, Source};

/// Utility usage export (electric or gas) with free-form headers.
///
/// Column roles are found by name: a date column (`Date`, `Bill Start ...`,
/// `Reading Date`), an optional `Start Time` column and a usage column
/// (`Usage`, `kWh`, `Consumption`, or `Therms` for gas). Rows with a blank or
/// unreadable usage or date are skipped.
pub struct UsageCsvFileSource {
    path: PathBuf,
    utility: UtilityType,
    local_offset: UtcOffset,
}

impl UsageCsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P, utility: UtilityType, local_offset: UtcOffset) -> Self {
        Self {
            path: path.into(),
            utility,
            local_offset,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UsageCsv {
    pub utility: UtilityType,
    pub readings: Vec<UsageReading>,
    pub skipped: usize,
}

fn field<'a>(record: &'a ByteRecord, idx: usize) -> Result<&'a str, String> {
    let raw = record.get(idx).unwrap_or_default();
    std::str::from_utf8(raw).map_err(|e| format!("column {} is not valid UTF-8: {e}", idx + 1))
}

fn record_to_reading(
    record: &ByteRecord,
    layout: &ColumnLayout,
    local_offset: UtcOffset,
) -> Result<UsageReading, String> {
    let usage_str = field(record, layout.usage)?;
    let quantity = parse_usage_value(usage_str).ok_or_else(|| format!("invalid usage '{usage_str}'"))?;

    let date_str = field(record, layout.date)?;
    let time_str = layout.time.map(|idx| field(record, idx)).transpose()?;
    let ts = parse_timestamp(date_str, time_str, local_offset)
        .ok_or_else(|| format!("invalid date '{date_str}'"))?;

    Ok(UsageReading::new(ts, quantity))
}

/// Parse a whole usage export. Header problems are errors; bad rows are not.
///
/// Only the date, time and usage cells are decoded, so stray bytes in other
/// columns never cost a reading.
pub fn parse_usage_csv<R: Read>(
    reader: R,
    expected: Option<UtilityType>,
    local_offset: UtcOffset,
) -> Result<UsageCsv, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers: StringRecord = rdr
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::EmptyFile);
    }
    let layout = ColumnLayout::detect(&headers, expected)?;

    let mut readings = Vec::new();
    let mut rows = 0usize;
    let mut skipped = 0usize;

    for (line, result) in rdr.byte_records().enumerate() {
        rows += 1;
        let parsed = match result {
            Ok(record) => record_to_reading(&record, &layout, local_offset),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => Err(e.to_string()),
        };
        match parsed {
            Ok(r) => readings.push(r),
            Err(reason) => {
                skipped += 1;
                metrics::counter!("usage_csv_rows_skipped_total").increment(1);
                tracing::warn!(row = line + 2, %reason, "skipping usage row");
            }
        }
    }

    if rows == 0 {
        return Err(IngestError::EmptyFile);
    }

    Ok(UsageCsv {
        utility: layout.utility,
        readings,
        skipped,
    })
}

#[async_trait::async_trait]
impl Source<UsageReading> for UsageCsvFileSource {
    async fn stream(&self) -> RecordStream<UsageReading> {
        // Blocking CSV reader inside a single async task; utility exports are small.
        let path = self.path.clone();
        let utility = self.utility;
        let local_offset = self.local_offset;
        let s = async_stream::try_stream! {
            let file = File::open(&path)
                .map_err(|e| PipelineError::Source(format!("failed to open usage CSV {}: {e}", path.display())))?;
            let parsed = parse_usage_csv(file, Some(utility), local_offset)
                .map_err(PipelineError::from)?;

            tracing::info!(
                path = %path.display(),
                utility = %parsed.utility,
                readings = parsed.readings.len(),
                skipped = parsed.skipped,
                "loaded usage CSV"
            );

            for reading in parsed.readings {
                yield Envelope::new(reading);
            }
        };

        Box::pin(s)
    }
}

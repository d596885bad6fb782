use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use etl_core::Launch;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvColumn {
    Id,
    Name,
    DateUtc,
    Success,
    Upcoming,
    Rocket,
    Launchpad,
}

/// Column projection used by the CSV export.
pub const EXPORT_COLUMNS: [CsvColumn; 7] = [
    CsvColumn::Id,
    CsvColumn::Name,
    CsvColumn::DateUtc,
    CsvColumn::Success,
    CsvColumn::Upcoming,
    CsvColumn::Rocket,
    CsvColumn::Launchpad,
];

impl CsvColumn {
    pub fn header(self) -> &'static str {
        match self {
            CsvColumn::Id => "id",
            CsvColumn::Name => "name",
            CsvColumn::DateUtc => "date_utc",
            CsvColumn::Success => "success",
            CsvColumn::Upcoming => "upcoming",
            CsvColumn::Rocket => "rocket",
            CsvColumn::Launchpad => "launchpad",
        }
    }

    fn value(self, launch: &Launch) -> Option<String> {
        match self {
            CsvColumn::Id => Some(launch.id.clone()),
            CsvColumn::Name => Some(launch.name.clone()),
            CsvColumn::DateUtc => launch.date_utc.as_deref().map(normalize_timestamp),
            CsvColumn::Success => launch.success.map(|flag| flag.to_string()),
            CsvColumn::Upcoming => Some(launch.upcoming.to_string()),
            CsvColumn::Rocket => launch.rocket.clone(),
            CsvColumn::Launchpad => launch.launchpad.clone(),
        }
    }
}

/// Canonical `YYYY-MM-DDTHH:MM:SS.sssZ`.
///
/// Accepts RFC 3339, a date-time without offset (read as UTC) or a bare date
/// (midnight UTC). Anything else passes through unchanged.
pub fn normalize_timestamp(raw: &str) -> String {
    parse_timestamp(raw.trim())
        .map(|parsed| parsed.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn quote(value: Option<&str>) -> String {
    format!("\"{}\"", value.unwrap_or_default().replace('"', "\"\""))
}

/// Header line plus one fully quoted row per launch, joined by `\n`.
pub fn to_delimited_text(launches: &[Launch], columns: &[CsvColumn]) -> String {
    let header = columns
        .iter()
        .map(|column| column.header())
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = Vec::with_capacity(launches.len() + 1);
    lines.push(header);
    for launch in launches {
        let row = columns
            .iter()
            .map(|column| quote(column.value(launch).as_deref()))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }
    lines.join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows: usize,
    pub path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("export task aborted: {0}")]
    Aborted(String),
}

pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("mini-etl-{}.csv", now.timestamp_millis())
}

/// Writes `launches` as `mini-etl-{millis}.csv` inside `export_dir`.
pub fn write_csv_export(
    export_dir: &Path,
    launches: &[Launch],
    now: DateTime<Utc>,
) -> Result<ExportSummary, ExportError> {
    let content = to_delimited_text(launches, &EXPORT_COLUMNS);
    let writer = AtomicFileWriter::new(export_dir.to_path_buf());
    let path = writer.write(&export_filename(now), &content)?;
    Ok(ExportSummary {
        rows: launches.len(),
        path,
    })
}

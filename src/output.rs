//! Output formatting and export of pipeline results.
//!
//! Supports pretty-printing, JSON, and semicolon-separated CSV exports that
//! follow the input table's conventions (day-first dates).

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::{DailyAggregate, TransmissionRow};
use crate::pipeline::Dashboard;

const EXPORT_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Serialize)]
struct DailyRow {
    date: String,
    positive: u64,
    negative: u64,
    deceased: u64,
    recovered: u64,
    active: i64,
    tests: u64,
}

#[derive(Serialize)]
struct TransmissionCsvRow {
    date: String,
    imported: u64,
    contact: u64,
    community: u64,
}

/// Logs the whole dashboard using Rust's debug pretty-print format.
pub fn print_pretty(dashboard: &Dashboard) {
    debug!("{:#?}", dashboard);
}

/// Prints any serializable value as pretty JSON on stdout.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes the cumulative series to `path`, replacing any existing file.
pub fn write_daily_csv(path: &Path, rows: &[DailyAggregate]) -> Result<()> {
    let rows = rows.iter().map(|r| DailyRow {
        date: r.date.format(EXPORT_DATE_FORMAT).to_string(),
        positive: r.cumulative.positive,
        negative: r.cumulative.negative,
        deceased: r.cumulative.deceased,
        recovered: r.cumulative.recovered,
        active: r.active(),
        tests: r.tests(),
    });
    write_rows(path, rows)
}

/// Writes the merged transmission series to `path`, replacing any existing
/// file.
pub fn write_transmission_csv(path: &Path, rows: &[TransmissionRow]) -> Result<()> {
    let rows = rows.iter().map(|r| TransmissionCsvRow {
        date: r.date.format(EXPORT_DATE_FORMAT).to_string(),
        imported: r.imported,
        contact: r.contact,
        community: r.community,
    });
    write_rows(path, rows)
}

fn write_rows<T: Serialize>(path: &Path, rows: impl Iterator<Item = T>) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(b';').from_path(path)?;

    let mut written = 0usize;
    for row in rows {
        writer.serialize(row)?;
        written += 1;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = written, "CSV written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::OutcomeTotals;
    use chrono::NaiveDate;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&OutcomeTotals::default()).unwrap();
    }

    #[test]
    fn test_write_daily_csv() {
        let path = temp_path("covid_senegal_test_daily.csv");
        let _ = fs::remove_file(&path);

        let rows = vec![
            DailyAggregate {
                date: day(2),
                cumulative: OutcomeTotals {
                    positive: 2,
                    negative: 0,
                    deceased: 0,
                    recovered: 0,
                },
            },
            DailyAggregate {
                date: day(3),
                cumulative: OutcomeTotals {
                    positive: 2,
                    negative: 1,
                    deceased: 0,
                    recovered: 1,
                },
            },
        ];
        write_daily_csv(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "date;positive;negative;deceased;recovered;active;tests");
        assert_eq!(lines[2], "03/03/2020;2;1;0;1;1;3");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let path = temp_path("covid_senegal_test_transmission.csv");
        let _ = fs::remove_file(&path);

        let rows = vec![TransmissionRow {
            date: day(4),
            imported: 1,
            contact: 2,
            community: 0,
        }];
        write_transmission_csv(&path, &rows).unwrap();
        write_transmission_csv(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.starts_with("date")).count();
        assert_eq!(header_count, 1);
        assert!(content.contains("04/03/2020;1;2;0"));

        fs::remove_file(&path).unwrap();
    }
}

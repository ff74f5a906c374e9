//! Loader for the semicolon-separated case table.
//!
//! Dates are day-first. Empty cells stay `None` all the way through the
//! pipeline so they never deflate sums or ratios.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::records::{
    CaseRecord, Outcome, OutcomeCounts, Residency, Sex, TransmissionFactor,
};

pub const DATE_COLUMN: &str = "Date";
pub const CITY_COLUMN: &str = "Ville";
pub const FACTOR_COLUMN: &str = "Facteur";
pub const AGE_COLUMN: &str = "Age";
pub const MALE_COLUMN: &str = "Homme";
pub const FEMALE_COLUMN: &str = "Femme";
pub const RESIDENCY_COLUMN: &str = "Resident Senegal";
pub const HOSPITALIZATION_COLUMN: &str = "Temps Hospitalisation (j)";
pub const ORIGIN_COLUMN: &str = "Source/Voyage";

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: &[&str] = &[
    DATE_COLUMN,
    "Positif",
    "Negatif",
    "Décédé",
    "Guéri",
    CITY_COLUMN,
    FACTOR_COLUMN,
    AGE_COLUMN,
    MALE_COLUMN,
    FEMALE_COLUMN,
    RESIDENCY_COLUMN,
    HOSPITALIZATION_COLUMN,
    ORIGIN_COLUMN,
];

/// Accepted date layouts, tried in order. All are day-first except ISO.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// `%Y` takes a year of any width; anything shorter than four digits is
/// rejected rather than read as the first millennium.
const MIN_YEAR: i32 = 1000;

/// Largest count a single cell may carry. Keeps every per-category sum
/// and the signed `active` figure far from integer overflow.
pub const MAX_COUNT: u64 = u32::MAX as u64;

/// Header positions resolved once per load.
struct Columns {
    date: usize,
    outcomes: [(Outcome, usize); 4],
    city: usize,
    factor: usize,
    age: usize,
    male: usize,
    female: usize,
    residency: usize,
    hospitalization: usize,
    origin: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();

        let find = |name: &str| -> Result<usize> {
            names
                .iter()
                .position(|h| *h == name)
                .ok_or_else(|| PipelineError::MissingCategory(name.to_string()))
        };

        // Field order follows REQUIRED_COLUMNS so the first missing one is reported.
        Ok(Columns {
            date: find(DATE_COLUMN)?,
            outcomes: [
                (Outcome::Positive, find(Outcome::Positive.column())?),
                (Outcome::Negative, find(Outcome::Negative.column())?),
                (Outcome::Deceased, find(Outcome::Deceased.column())?),
                (Outcome::Recovered, find(Outcome::Recovered.column())?),
            ],
            city: find(CITY_COLUMN)?,
            factor: find(FACTOR_COLUMN)?,
            age: find(AGE_COLUMN)?,
            male: find(MALE_COLUMN)?,
            female: find(FEMALE_COLUMN)?,
            residency: find(RESIDENCY_COLUMN)?,
            hospitalization: find(HOSPITALIZATION_COLUMN)?,
            origin: find(ORIGIN_COLUMN)?,
        })
    }
}

/// Reads case records from any semicolon-delimited source.
///
/// # Errors
///
/// Fails on the first missing header column, unparseable date, or
/// non-numeric count. Nothing is returned for a partially valid table.
pub fn load_records<R: Read>(reader: R) -> Result<Vec<CaseRecord>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut records = Vec::new();

    for result in rdr.records() {
        let row = result?;
        if row.iter().all(str::is_empty) {
            continue;
        }
        records.push(parse_row(&columns, &row)?);
    }

    debug!(rows = records.len(), "Loaded case records");
    Ok(records)
}

/// Opens `path` and loads it with [`load_records`].
///
/// # Errors
///
/// A missing or unreadable file is [`PipelineError::Io`].
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_records_from_path(path: &Path) -> Result<Vec<CaseRecord>> {
    let file = File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_records(file)
}

/// Parses a day-first date such as `02/03/2020` (2 March 2020). The year
/// must have four digits.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .find(|date| date.year() >= MIN_YEAR)
}

fn parse_row(columns: &Columns, row: &StringRecord) -> Result<CaseRecord> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();

    let raw_date = cell(row, columns.date).unwrap_or_default();
    let date = parse_date(raw_date).ok_or_else(|| {
        PipelineError::malformed(line, DATE_COLUMN, raw_date, "expected a DD/MM/YYYY date")
    })?;

    let mut outcomes = OutcomeCounts::default();
    for (outcome, idx) in columns.outcomes {
        let value = cell(row, idx)
            .map(|raw| parse_count(line, outcome.column(), raw))
            .transpose()?;
        outcomes.set(outcome, value);
    }

    let male = cell(row, columns.male)
        .map(|raw| parse_count(line, MALE_COLUMN, raw))
        .transpose()?;
    let female = cell(row, columns.female)
        .map(|raw| parse_count(line, FEMALE_COLUMN, raw))
        .transpose()?;
    let sex = match (male.unwrap_or(0) > 0, female.unwrap_or(0) > 0) {
        (true, false) => Some(Sex::Male),
        (false, true) => Some(Sex::Female),
        (false, false) => None,
        (true, true) => {
            return Err(PipelineError::malformed(
                line,
                MALE_COLUMN,
                &format!("{}/{}", male.unwrap_or(0), female.unwrap_or(0)),
                "both Homme and Femme are set",
            ));
        }
    };

    let residency = cell(row, columns.residency).and_then(|raw| {
        let parsed = Residency::from_label(raw);
        if parsed.is_none() {
            warn!(
                line,
                column = RESIDENCY_COLUMN,
                value = raw,
                "Unrecognised residency, ignoring"
            );
        }
        parsed
    });

    let transmission_factor = cell(row, columns.factor).and_then(|raw| {
        let parsed = TransmissionFactor::from_label(raw);
        if parsed.is_none() {
            warn!(
                line,
                column = FACTOR_COLUMN,
                value = raw,
                "Unrecognised transmission factor, ignoring"
            );
        }
        parsed
    });

    Ok(CaseRecord {
        date,
        outcomes,
        city: cell(row, columns.city).map(str::to_string),
        age: cell(row, columns.age)
            .map(|raw| parse_measure(line, AGE_COLUMN, raw))
            .transpose()?,
        sex,
        residency,
        hospitalization_days: cell(row, columns.hospitalization)
            .map(|raw| parse_measure(line, HOSPITALIZATION_COLUMN, raw))
            .transpose()?,
        transmission_factor,
        origin_country: cell(row, columns.origin).map(str::to_string),
    })
}

fn cell(row: &StringRecord, idx: usize) -> Option<&str> {
    row.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Parses a non-negative count up to [`MAX_COUNT`]; integral floats such as
/// `2.0` are accepted.
fn parse_count(line: u64, column: &str, raw: &str) -> Result<u64> {
    let value = match raw.parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => parse_decimal(raw)
            .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= MAX_COUNT as f64)
            .map(|v| v as u64),
    };

    match value {
        Some(n) if n <= MAX_COUNT => Ok(n),
        Some(_) => Err(PipelineError::malformed(
            line,
            column,
            raw,
            "count exceeds the largest accepted value",
        )),
        None => Err(PipelineError::malformed(
            line,
            column,
            raw,
            "expected a non-negative integer count",
        )),
    }
}

fn parse_measure(line: u64, column: &str, raw: &str) -> Result<f64> {
    match parse_decimal(raw) {
        Some(v) if v >= 0.0 => Ok(v),
        _ => Err(PipelineError::malformed(
            line,
            column,
            raw,
            "expected a non-negative number",
        )),
    }
}

/// Accepts both `12.5` and the French `12,5`.
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

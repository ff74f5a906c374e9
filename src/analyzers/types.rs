//! Data types produced by the aggregation pipeline.

use chrono::NaiveDate;
use serde::Serialize;

use crate::records::{Outcome, OutcomeTotals};

/// Cumulative totals for every category up to and including `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub cumulative: OutcomeTotals,
}

impl DailyAggregate {
    pub fn get(&self, outcome: Outcome) -> u64 {
        self.cumulative.get(outcome)
    }

    /// Positive cases not yet recovered. Not clamped: a negative value
    /// points at inconsistent source data.
    pub fn active(&self) -> i64 {
        let signed = |n: u64| i64::try_from(n).unwrap_or(i64::MAX);
        signed(self.cumulative.positive).saturating_sub(signed(self.cumulative.recovered))
    }

    /// Total administered tests.
    pub fn tests(&self) -> u64 {
        self.cumulative.positive.saturating_add(self.cumulative.negative)
    }
}

/// Headline figures for the most recent date. `None` marks a value with no
/// meaningful definition (zero denominator or too little history).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub as_of: NaiveDate,
    pub total_positive: u64,
    pub total_negative: u64,
    pub total_tests: u64,
    pub total_deceased: u64,
    pub total_recovered: u64,
    pub active: i64,
    pub recovery_pct: Option<f64>,
    pub positivity_pct: Option<f64>,
    pub growth_rate_pct: Option<f64>,
}

/// A cumulative count series keyed by date.
pub type Series = Vec<(NaiveDate, u64)>;

/// One row of the merged, forward-filled transmission series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransmissionRow {
    pub date: NaiveDate,
    pub imported: u64,
    pub contact: u64,
    pub community: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransmissionTotals {
    pub imported: u64,
    pub contact: u64,
    pub community: u64,
}

/// A label and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: u64,
}

/// Breakdown of the affected population over the non-null cells only.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct PopulationSummary {
    pub mean_age: Option<f64>,
    pub male: u64,
    pub female: u64,
    pub resident: u64,
    pub non_resident: u64,
    pub mean_hospitalization_days: Option<f64>,
    pub cases_by_city: Vec<CountEntry>,
    pub positives_by_city: Vec<CountEntry>,
    pub origin_countries: Vec<CountEntry>,
    /// Patients per stated age; rows without an age are left out.
    pub ages: Vec<CountEntry>,
}

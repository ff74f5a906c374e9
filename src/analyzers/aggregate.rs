use crate::analyzers::types::DailyAggregate;
use crate::records::{CaseRecord, OutcomeTotals};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Groups `(date, value)` pairs by date and sums the values of each day.
///
/// Output is ordered by date ascending. Only dates that occur in the input
/// get a row.
pub fn group_by_date<T, I>(items: I) -> Vec<(NaiveDate, T)>
where
    T: Default + AddAssign,
    I: IntoIterator<Item = (NaiveDate, T)>,
{
    let mut days: BTreeMap<NaiveDate, T> = BTreeMap::new();
    for (date, value) in items {
        *days.entry(date).or_default() += value;
    }
    days.into_iter().collect()
}

/// Running sum over an already date-ordered series.
pub fn running_sum<T>(daily: Vec<(NaiveDate, T)>) -> Vec<(NaiveDate, T)>
where
    T: Default + AddAssign + Copy,
{
    let mut total = T::default();
    daily
        .into_iter()
        .map(|(date, value)| {
            total += value;
            (date, total)
        })
        .collect()
}

/// Group-then-accumulate: the cumulative value of each observed date.
pub fn cumulative_by_date<T, I>(items: I) -> Vec<(NaiveDate, T)>
where
    T: Default + AddAssign + Copy,
    I: IntoIterator<Item = (NaiveDate, T)>,
{
    running_sum(group_by_date(items))
}

/// Per-day (non-cumulative) sums of each outcome category.
pub fn daily_totals(records: &[CaseRecord]) -> Vec<(NaiveDate, OutcomeTotals)> {
    group_by_date(records.iter().map(|r| (r.date, r.outcomes.totals())))
}

/// Aggregates case records into one cumulative row per distinct date.
///
/// Records sharing a date are summed, so the result does not depend on
/// row order. Empty cells contribute nothing.
pub fn aggregate(records: &[CaseRecord]) -> Vec<DailyAggregate> {
    cumulative_by_date(records.iter().map(|r| (r.date, r.outcomes.totals())))
        .into_iter()
        .map(|(date, cumulative)| DailyAggregate { date, cumulative })
        .collect()
}

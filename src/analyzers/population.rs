use crate::analyzers::types::{CountEntry, PopulationSummary};
use crate::analyzers::utility::mean;
use crate::records::{CaseRecord, Residency, Sex};
use std::collections::HashMap;
use std::hash::Hash;

/// Summarises who was affected, using only the cells that are filled in.
pub fn summarize_population(records: &[CaseRecord]) -> PopulationSummary {
    let ages: Vec<f64> = records.iter().filter_map(|r| r.age).collect();
    let stays: Vec<f64> = records.iter().filter_map(|r| r.hospitalization_days).collect();

    let mut summary = PopulationSummary {
        mean_age: mean(&ages),
        mean_hospitalization_days: mean(&stays),
        ..Default::default()
    };

    for record in records {
        match record.sex {
            Some(Sex::Male) => summary.male += 1,
            Some(Sex::Female) => summary.female += 1,
            None => {}
        }
        match record.residency {
            Some(Residency::Resident) => summary.resident += 1,
            Some(Residency::NonResident) => summary.non_resident += 1,
            None => {}
        }
    }

    summary.cases_by_city = count_by(records.iter().filter_map(|r| Some((r.city.as_deref()?, 1))));
    summary.positives_by_city = count_by(records.iter().filter_map(|r| {
        Some((r.city.as_deref()?, r.outcomes.positive.unwrap_or_default()))
    }));
    summary.origin_countries =
        count_by(records.iter().filter_map(|r| Some((r.origin_country.as_deref()?, 1))));
    summary.ages = count_by(records.iter().filter_map(|r| Some((age_label(r.age?), 1))));

    summary
}

/// `33` for whole years, `41.5` otherwise.
fn age_label(age: f64) -> String {
    format!("{age}")
}

/// Sums weights per label, most frequent first, ties by label.
fn count_by<L, I>(items: I) -> Vec<CountEntry>
where
    L: Into<String> + Eq + Hash,
    I: IntoIterator<Item = (L, u64)>,
{
    let mut counts: HashMap<L, u64> = HashMap::new();
    for (label, weight) in items {
        let count = counts.entry(label).or_insert(0);
        *count = count.saturating_add(weight);
    }

    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry {
            label: label.into(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}

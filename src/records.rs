//! Case records as loaded from the curated table.

use std::ops::AddAssign;

use chrono::NaiveDate;
use serde::Serialize;

/// Outcome categories tracked per record, each bound to its source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Positive,
    Negative,
    Deceased,
    Recovered,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [
        Outcome::Positive,
        Outcome::Negative,
        Outcome::Deceased,
        Outcome::Recovered,
    ];

    /// Header name of the column carrying this category.
    pub fn column(self) -> &'static str {
        match self {
            Outcome::Positive => "Positif",
            Outcome::Negative => "Negatif",
            Outcome::Deceased => "Décédé",
            Outcome::Recovered => "Guéri",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Residency {
    Resident,
    NonResident,
}

impl Residency {
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "oui" | "yes" | "1" => Some(Residency::Resident),
            "non" | "no" | "0" => Some(Residency::NonResident),
            _ => None,
        }
    }
}

/// How a case acquired the infection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransmissionFactor {
    Imported,
    Contact,
    Community,
}

impl TransmissionFactor {
    pub const ALL: [TransmissionFactor; 3] = [
        TransmissionFactor::Imported,
        TransmissionFactor::Contact,
        TransmissionFactor::Community,
    ];

    /// Parses the French label used in the `Facteur` column, ignoring case
    /// and accents (`Importé`, `Contact`, `Communauté`).
    pub fn from_label(raw: &str) -> Option<Self> {
        let folded: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == 'é' || c == 'è' { 'e' } else { c })
            .collect();

        match folded.as_str() {
            "importe" => Some(TransmissionFactor::Imported),
            "contact" => Some(TransmissionFactor::Contact),
            "communaute" => Some(TransmissionFactor::Community),
            _ => None,
        }
    }
}

/// Per-record outcome counts. `None` means the cell was empty and must be
/// left out of sums rather than treated as zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub positive: Option<u64>,
    pub negative: Option<u64>,
    pub deceased: Option<u64>,
    pub recovered: Option<u64>,
}

impl OutcomeCounts {
    pub fn get(&self, outcome: Outcome) -> Option<u64> {
        match outcome {
            Outcome::Positive => self.positive,
            Outcome::Negative => self.negative,
            Outcome::Deceased => self.deceased,
            Outcome::Recovered => self.recovered,
        }
    }

    pub(crate) fn set(&mut self, outcome: Outcome, value: Option<u64>) {
        match outcome {
            Outcome::Positive => self.positive = value,
            Outcome::Negative => self.negative = value,
            Outcome::Deceased => self.deceased = value,
            Outcome::Recovered => self.recovered = value,
        }
    }

    /// Collapses the counts into totals, skipping empty cells.
    pub fn totals(&self) -> OutcomeTotals {
        OutcomeTotals {
            positive: self.positive.unwrap_or_default(),
            negative: self.negative.unwrap_or_default(),
            deceased: self.deceased.unwrap_or_default(),
            recovered: self.recovered.unwrap_or_default(),
        }
    }
}

/// One counter per outcome category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeTotals {
    pub positive: u64,
    pub negative: u64,
    pub deceased: u64,
    pub recovered: u64,
}

impl OutcomeTotals {
    pub fn get(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Positive => self.positive,
            Outcome::Negative => self.negative,
            Outcome::Deceased => self.deceased,
            Outcome::Recovered => self.recovered,
        }
    }
}

/// Saturates instead of wrapping; loaded counts are bounded well below the
/// point where this matters.
impl AddAssign for OutcomeTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.positive = self.positive.saturating_add(rhs.positive);
        self.negative = self.negative.saturating_add(rhs.negative);
        self.deceased = self.deceased.saturating_add(rhs.deceased);
        self.recovered = self.recovered.saturating_add(rhs.recovered);
    }
}

/// One observed row of the case table. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRecord {
    pub date: NaiveDate,
    pub outcomes: OutcomeCounts,
    pub city: Option<String>,
    pub age: Option<f64>,
    pub sex: Option<Sex>,
    pub residency: Option<Residency>,
    pub hospitalization_days: Option<f64>,
    pub transmission_factor: Option<TransmissionFactor>,
    pub origin_country: Option<String>,
}

impl CaseRecord {
    /// A record carrying only a date and outcome counts.
    pub fn new(date: NaiveDate, outcomes: OutcomeCounts) -> Self {
        CaseRecord {
            date,
            outcomes,
            city: None,
            age: None,
            sex: None,
            residency: None,
            hospitalization_days: None,
            transmission_factor: None,
            origin_country: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_labels_ignore_case_and_accents() {
        assert_eq!(
            TransmissionFactor::from_label("Importé"),
            Some(TransmissionFactor::Imported)
        );
        assert_eq!(
            TransmissionFactor::from_label("importe"),
            Some(TransmissionFactor::Imported)
        );
        assert_eq!(
            TransmissionFactor::from_label(" CONTACT "),
            Some(TransmissionFactor::Contact)
        );
        assert_eq!(
            TransmissionFactor::from_label("Communauté"),
            Some(TransmissionFactor::Community)
        );
        assert_eq!(TransmissionFactor::from_label("Inconnu"), None);
    }

    #[test]
    fn test_residency_labels() {
        assert_eq!(Residency::from_label("Oui"), Some(Residency::Resident));
        assert_eq!(Residency::from_label("non"), Some(Residency::NonResident));
        assert_eq!(Residency::from_label("peut-être"), None);
    }

    #[test]
    fn test_totals_skip_empty_cells() {
        let counts = OutcomeCounts {
            positive: Some(3),
            negative: None,
            deceased: None,
            recovered: Some(1),
        };
        let totals = counts.totals();

        assert_eq!(totals.positive, 3);
        assert_eq!(totals.negative, 0);
        assert_eq!(totals.recovered, 1);
    }

    #[test]
    fn test_totals_add_assign() {
        let mut a = OutcomeTotals {
            positive: 1,
            negative: 2,
            deceased: 0,
            recovered: 0,
        };
        a += OutcomeTotals {
            positive: 4,
            negative: 0,
            deceased: 1,
            recovered: 2,
        };

        assert_eq!(a.get(Outcome::Positive), 5);
        assert_eq!(a.get(Outcome::Negative), 2);
        assert_eq!(a.get(Outcome::Deceased), 1);
        assert_eq!(a.get(Outcome::Recovered), 2);
    }

    #[test]
    fn test_totals_add_assign_saturates() {
        let mut a = OutcomeTotals {
            positive: u64::MAX - 1,
            ..OutcomeTotals::default()
        };
        a += OutcomeTotals {
            positive: 5,
            negative: 3,
            ..OutcomeTotals::default()
        };

        assert_eq!(a.positive, u64::MAX);
        assert_eq!(a.negative, 3);
    }
}

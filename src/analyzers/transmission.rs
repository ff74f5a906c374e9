use crate::analyzers::aggregate::cumulative_by_date;
use crate::analyzers::types::{Series, TransmissionRow, TransmissionTotals};
use crate::records::{CaseRecord, TransmissionFactor};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Cumulative number of records with `factor`, one point per date on which
/// such a record occurs.
pub fn factor_series(records: &[CaseRecord], factor: TransmissionFactor) -> Series {
    cumulative_by_date(
        records
            .iter()
            .filter(|r| r.transmission_factor == Some(factor))
            .map(|r| (r.date, 1u64)),
    )
}

/// Total number of records per transmission factor. Records without a
/// factor are not counted anywhere.
pub fn factor_totals(records: &[CaseRecord]) -> TransmissionTotals {
    let mut totals = TransmissionTotals::default();
    for factor in records.iter().filter_map(|r| r.transmission_factor) {
        match factor {
            TransmissionFactor::Imported => totals.imported += 1,
            TransmissionFactor::Contact => totals.contact += 1,
            TransmissionFactor::Community => totals.community += 1,
        }
    }
    totals
}

/// Outer-merges `N` date-ordered series on date.
///
/// A series with no point on a merged date carries its last known value
/// forward; before its first point it reads 0.
pub fn merge_forward_fill<const N: usize>(
    series: [&[(NaiveDate, u64)]; N],
) -> Vec<(NaiveDate, [u64; N])> {
    let dates: BTreeSet<NaiveDate> = series
        .iter()
        .flat_map(|s| s.iter().map(|(date, _)| *date))
        .collect();

    let mut cursors = [0usize; N];
    let mut current = [0u64; N];

    dates
        .into_iter()
        .map(|date| {
            for (i, s) in series.iter().enumerate() {
                while cursors[i] < s.len() && s[cursors[i]].0 <= date {
                    current[i] = s[cursors[i]].1;
                    cursors[i] += 1;
                }
            }
            (date, current)
        })
        .collect()
}

/// Cumulative imported / contact / community counts on every date any of
/// them changes.
pub fn transmission_series(records: &[CaseRecord]) -> Vec<TransmissionRow> {
    let [imported, contact, community] =
        TransmissionFactor::ALL.map(|f| factor_series(records, f));

    merge_forward_fill([&imported[..], &contact[..], &community[..]])
        .into_iter()
        .map(|(date, [imported, contact, community])| TransmissionRow {
            date,
            imported,
            contact,
            community,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::OutcomeCounts;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    fn case(d: u32, factor: Option<TransmissionFactor>) -> CaseRecord {
        let mut r = CaseRecord::new(day(d), OutcomeCounts::default());
        r.transmission_factor = factor;
        r
    }

    #[test]
    fn test_factor_series_is_cumulative() {
        let records = vec![
            case(2, Some(TransmissionFactor::Imported)),
            case(4, Some(TransmissionFactor::Imported)),
            case(4, Some(TransmissionFactor::Imported)),
            case(4, Some(TransmissionFactor::Contact)),
            case(5, None),
        ];

        assert_eq!(
            factor_series(&records, TransmissionFactor::Imported),
            vec![(day(2), 1), (day(4), 3)]
        );
        assert_eq!(
            factor_series(&records, TransmissionFactor::Contact),
            vec![(day(4), 1)]
        );
        assert!(factor_series(&records, TransmissionFactor::Community).is_empty());
    }

    #[test]
    fn test_factor_totals_skip_unknown() {
        let records = vec![
            case(2, Some(TransmissionFactor::Imported)),
            case(3, Some(TransmissionFactor::Community)),
            case(3, Some(TransmissionFactor::Imported)),
            case(3, None),
        ];
        let totals = factor_totals(&records);

        assert_eq!(totals.imported, 2);
        assert_eq!(totals.contact, 0);
        assert_eq!(totals.community, 1);
    }

    #[test]
    fn test_merge_forward_fills_disjoint_dates() {
        let a = vec![(day(1), 1), (day(4), 3)];
        let b = vec![(day(2), 2)];
        let c = vec![(day(3), 5), (day(5), 6)];

        let merged = merge_forward_fill([&a[..], &b[..], &c[..]]);

        assert_eq!(
            merged,
            vec![
                (day(1), [1, 0, 0]),
                (day(2), [1, 2, 0]),
                (day(3), [1, 2, 5]),
                (day(4), [3, 2, 5]),
                (day(5), [3, 2, 6]),
            ]
        );
    }

    #[test]
    fn test_merge_empty_series() {
        let empty: Vec<(NaiveDate, u64)> = Vec::new();
        assert!(merge_forward_fill([&empty[..], &empty[..]]).is_empty());
    }

    #[test]
    fn test_transmission_series_rows() {
        let records = vec![
            case(6, Some(TransmissionFactor::Community)),
            case(2, Some(TransmissionFactor::Imported)),
            case(4, Some(TransmissionFactor::Contact)),
            case(4, Some(TransmissionFactor::Contact)),
        ];
        let rows = transmission_series(&records);

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[1],
            TransmissionRow {
                date: day(4),
                imported: 1,
                contact: 2,
                community: 0,
            }
        );
        assert_eq!(rows[2].imported, 1);
        assert_eq!(rows[2].contact, 2);
        assert_eq!(rows[2].community, 1);
    }
}

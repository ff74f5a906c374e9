use crate::analyzers::types::{DailyAggregate, SummaryMetrics};
use crate::analyzers::utility::{pct, round_to};
use crate::error::{PipelineError, Result};

/// Number of periods the growth rate is smoothed over.
pub const GROWTH_WINDOW: usize = 2;

/// Derives the headline figures from a date-ordered aggregate sequence.
///
/// Uses the last row, plus the row [`GROWTH_WINDOW`] periods earlier for the
/// growth rate. Ratios with a zero denominator come back as `None`.
///
/// # Errors
///
/// [`PipelineError::EmptyTable`] when there is no row to summarise.
pub fn compute(aggregates: &[DailyAggregate]) -> Result<SummaryMetrics> {
    let latest = aggregates.last().ok_or(PipelineError::EmptyTable)?;
    let totals = latest.cumulative;

    Ok(SummaryMetrics {
        as_of: latest.date,
        total_positive: totals.positive,
        total_negative: totals.negative,
        total_tests: latest.tests(),
        total_deceased: totals.deceased,
        total_recovered: totals.recovered,
        active: latest.active(),
        recovery_pct: pct(totals.recovered, totals.positive, 1),
        positivity_pct: pct(totals.positive, latest.tests(), 1),
        growth_rate_pct: growth_rate(aggregates),
    })
}

/// Geometric-mean daily growth of positive cases over the last
/// [`GROWTH_WINDOW`] periods, in percent rounded to 2 places.
///
/// `None` when there is not enough history or the earlier count is zero.
pub fn growth_rate(aggregates: &[DailyAggregate]) -> Option<f64> {
    let n = aggregates.len();
    if n <= GROWTH_WINDOW {
        return None;
    }

    let latest = aggregates[n - 1].cumulative.positive;
    let earlier = aggregates[n - 1 - GROWTH_WINDOW].cumulative.positive;
    if earlier == 0 {
        return None;
    }

    let ratio = latest as f64 / earlier as f64;
    Some(round_to((ratio.sqrt() - 1.0) * 100.0, 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::OutcomeTotals;
    use chrono::NaiveDate;

    fn row(d: u32, positive: u64, negative: u64, recovered: u64) -> DailyAggregate {
        DailyAggregate {
            date: NaiveDate::from_ymd_opt(2020, 3, d).unwrap(),
            cumulative: OutcomeTotals {
                positive,
                negative,
                deceased: 0,
                recovered,
            },
        }
    }

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(compute(&[]), Err(PipelineError::EmptyTable)));
    }

    #[test]
    fn test_growth_uses_square_root() {
        let rows = [row(1, 10, 0, 0), row(2, 25, 0, 0), row(3, 40, 0, 0)];
        assert_eq!(growth_rate(&rows), Some(100.0));
    }

    #[test]
    fn test_growth_ignores_middle_period() {
        let a = [row(1, 10, 0, 0), row(2, 11, 0, 0), row(3, 40, 0, 0)];
        let b = [row(1, 10, 0, 0), row(2, 39, 0, 0), row(3, 40, 0, 0)];
        assert_eq!(growth_rate(&a), growth_rate(&b));
    }

    #[test]
    fn test_growth_rounds_to_two_places() {
        let rows = [row(1, 10, 0, 0), row(2, 12, 0, 0), row(3, 20, 0, 0)];
        // sqrt(2) - 1
        assert_eq!(growth_rate(&rows), Some(41.42));
    }

    #[test]
    fn test_growth_needs_two_prior_periods() {
        assert_eq!(growth_rate(&[row(1, 10, 0, 0)]), None);
        assert_eq!(growth_rate(&[row(1, 10, 0, 0), row(2, 40, 0, 0)]), None);
    }

    #[test]
    fn test_growth_undefined_from_zero() {
        let rows = [row(1, 0, 3, 0), row(2, 1, 3, 0), row(3, 4, 3, 0)];
        assert_eq!(growth_rate(&rows), None);
    }

    #[test]
    fn test_zero_positive_leaves_recovery_undefined() {
        let metrics = compute(&[row(1, 0, 5, 0)]).unwrap();

        assert_eq!(metrics.recovery_pct, None);
        assert_eq!(metrics.positivity_pct, Some(0.0));
        assert_eq!(metrics.growth_rate_pct, None);
    }

    #[test]
    fn test_zero_tests_leaves_positivity_undefined() {
        let metrics = compute(&[row(1, 0, 0, 0)]).unwrap();
        assert_eq!(metrics.positivity_pct, None);
    }

    #[test]
    fn test_summary_from_latest_row() {
        let rows = [row(1, 4, 10, 0), row(2, 8, 20, 1), row(3, 16, 32, 4)];
        let metrics = compute(&rows).unwrap();

        assert_eq!(metrics.as_of, NaiveDate::from_ymd_opt(2020, 3, 3).unwrap());
        assert_eq!(metrics.total_positive, 16);
        assert_eq!(metrics.total_tests, 48);
        assert_eq!(metrics.active, 12);
        assert_eq!(metrics.recovery_pct, Some(25.0));
        assert_eq!(metrics.positivity_pct, Some(33.3));
        assert_eq!(metrics.growth_rate_pct, Some(100.0));
    }

    #[test]
    fn test_active_may_go_negative() {
        let metrics = compute(&[row(1, 1, 0, 3)]).unwrap();
        assert_eq!(metrics.active, -2);
    }
}

//! The load → aggregate → compute chain, rebuilt from scratch on every call.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::analyzers::aggregate::aggregate;
use crate::analyzers::metrics::compute;
use crate::analyzers::population::summarize_population;
use crate::analyzers::transmission::{factor_totals, transmission_series};
use crate::analyzers::types::{
    DailyAggregate, PopulationSummary, SummaryMetrics, TransmissionRow, TransmissionTotals,
};
use crate::error::Result;
use crate::loader::load_records_from_path;
use crate::records::CaseRecord;

/// Everything the presentation layer draws from.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub daily: Vec<DailyAggregate>,
    pub summary: SummaryMetrics,
    pub transmission: Vec<TransmissionRow>,
    pub transmission_totals: TransmissionTotals,
    pub population: PopulationSummary,
}

/// Builds the dashboard from already loaded records.
///
/// # Errors
///
/// [`crate::PipelineError::EmptyTable`] if `records` is empty.
pub fn build_dashboard(records: &[CaseRecord]) -> Result<Dashboard> {
    let daily = aggregate(records);
    let summary = compute(&daily)?;

    Ok(Dashboard {
        summary,
        transmission: transmission_series(records),
        transmission_totals: factor_totals(records),
        population: summarize_population(records),
        daily,
    })
}

/// Loads the case table at `path` and builds the dashboard.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn run(path: &Path) -> Result<Dashboard> {
    let records = load_records_from_path(path)?;
    let dashboard = build_dashboard(&records)?;

    info!(
        records = records.len(),
        days = dashboard.daily.len(),
        as_of = %dashboard.summary.as_of,
        "Dashboard built"
    );
    Ok(dashboard)
}

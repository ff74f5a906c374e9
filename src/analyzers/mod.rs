//! Case aggregation and dashboard metrics.
//!
//! This module groups case records by date into cumulative series, derives
//! the headline percentages and smoothed growth rate, builds the
//! transmission-factor series, and summarises the affected population.

pub mod aggregate;
pub mod metrics;
pub mod population;
pub mod transmission;
pub mod types;
pub mod utility;

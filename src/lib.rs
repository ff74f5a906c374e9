pub mod analyzers;
pub mod config;
pub mod error;
pub mod i18n;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod report;

pub use error::{PipelineError, Result};

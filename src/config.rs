//! Runtime settings read from the environment (and `.env`, loaded by the
//! binary through `dotenvy`).

use anyhow::{Result, anyhow};
use std::path::PathBuf;

use crate::i18n::Lang;

pub const DATA_PATH_VAR: &str = "COVID_DATA_PATH";
pub const LOG_FILE_PATH_VAR: &str = "LOG_FILE_PATH";
pub const LANG_VAR: &str = "DASHBOARD_LANG";

const DEFAULT_DATA_PATH: &str = "COVID_Senegal.csv";
const DEFAULT_LOG_FILE_PATH: &str = "logs/covid_senegal.log";

/// Where to read the case table, where to log, and which language to
/// render in. Command-line flags take precedence over these.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_path: PathBuf,
    pub log_file_path: PathBuf,
    pub lang: Lang,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset
    /// or empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let lang = match get(LANG_VAR) {
            Some(raw) => raw.parse::<Lang>().map_err(|e| anyhow!("{LANG_VAR}: {e}"))?,
            None => Lang::default(),
        };

        Ok(Settings {
            data_path: get(DATA_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            log_file_path: get(LOG_FILE_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE_PATH)),
            lang,
        })
    }
}

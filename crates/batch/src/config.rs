//! Run configuration

use crate::{default_steps, Result, Step};
use records::{NA_SENTINEL, RETRIEVAL_TIME_COLUMN, SIZE_COLUMN};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Client hosts of the retrieval experiments, matched against file names
pub const DEFAULT_CLIENTS: &[&str] = &[
    "degroot", "miletus", "nancy", "lille", "grenoble", "sophia", "rennes",
];

/// Columns, sentinels, clients and the step pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub key_column: String,
    pub value_column: String,
    pub na_values: Vec<String>,
    pub clients: Vec<String>,
    pub steps: Vec<Step>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_column: SIZE_COLUMN.to_string(),
            value_column: RETRIEVAL_TIME_COLUMN.to_string(),
            na_values: vec![NA_SENTINEL.to_string()],
            clients: DEFAULT_CLIENTS.iter().map(|c| c.to_string()).collect(),
            steps: default_steps(),
        }
    }
}

impl Config {
    /// Read a JSON config file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Override scalar fields from `SIFT_*` environment variables
    pub fn with_env(self) -> Self {
        self.with_vars(|name| std::env::var(name).ok())
    }

    fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var("SIFT_KEY_COLUMN") {
            self.key_column = v;
        }

        if let Some(v) = var("SIFT_VALUE_COLUMN") {
            self.value_column = v;
        }

        if let Some(v) = var("SIFT_NA_VALUES") {
            self.na_values = split_list(&v);
        }

        if let Some(v) = var("SIFT_CLIENTS") {
            self.clients = split_list(&v);
        }

        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    AmountDesc,
    AmountAsc,
    DateDesc,
    DateAsc,
    NameAsc,
}

impl SortMode {
    /// Unknown names fall back to `amount-desc`.
    pub fn parse(name: &str) -> SortMode {
        match name.trim().to_lowercase().as_str() {
            "amount-asc" => SortMode::AmountAsc,
            "date-desc" => SortMode::DateDesc,
            "date-asc" => SortMode::DateAsc,
            "name-asc" => SortMode::NameAsc,
            _ => SortMode::AmountDesc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::AmountDesc => "amount-desc",
            SortMode::AmountAsc => "amount-asc",
            SortMode::DateDesc => "date-desc",
            SortMode::DateAsc => "date-asc",
            SortMode::NameAsc => "name-asc",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_batch_sizes")]
    pub batch_sizes: Vec<usize>,

    #[serde(default)]
    pub sort_mode: SortMode,

    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    #[serde(default = "default_count_up_ms")]
    pub count_up_ms: u64,

    #[serde(default = "default_scroll_margin_px")]
    pub scroll_margin_px: f64,

    #[serde(default = "default_anonymous_label")]
    pub anonymous_label: String,

    #[serde(default = "default_unnamed_label")]
    pub unnamed_label: String,

    #[serde(default = "default_currency_suffix")]
    pub currency_suffix: String,

    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/donors.json")
}
fn default_batch_size() -> usize {
    12
}
fn default_batch_sizes() -> Vec<usize> {
    vec![6, 12, 24, 48]
}
fn default_search_debounce_ms() -> u64 {
    180
}
fn default_count_up_ms() -> u64 {
    650
}
fn default_scroll_margin_px() -> f64 {
    320.0
}
fn default_anonymous_label() -> String {
    "Anonymous".to_string()
}
fn default_unnamed_label() -> String {
    "No name".to_string()
}
fn default_currency_suffix() -> String {
    "đ".to_string()
}
fn default_thousands_separator() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: default_data_path(),
            batch_size: default_batch_size(),
            batch_sizes: default_batch_sizes(),
            sort_mode: SortMode::AmountDesc,
            search_debounce_ms: default_search_debounce_ms(),
            count_up_ms: default_count_up_ms(),
            scroll_margin_px: default_scroll_margin_px(),
            anonymous_label: default_anonymous_label(),
            unnamed_label: default_unnamed_label(),
            currency_suffix: default_currency_suffix(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

impl Config {
    /// Rejects settings the session cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".into()));
        }
        if self.batch_sizes.contains(&0) {
            return Err(Error::Config("batch_sizes must not contain 0".into()));
        }
        if !self.scroll_margin_px.is_finite() || self.scroll_margin_px < 0.0 {
            return Err(Error::Config(format!(
                "scroll_margin_px must be a non-negative number, got {}",
                self.scroll_margin_px
            )));
        }
        Ok(())
    }

    /// A selection is honored when it is one of `batch_sizes` (any positive
    /// size when that list is empty) or the configured `batch_size`. Anything
    /// else, including 0 for an unparseable selection, falls back to
    /// `batch_size`.
    pub fn effective_batch_size(&self, requested: usize) -> usize {
        let offered = self.batch_sizes.is_empty() || self.batch_sizes.contains(&requested);
        if requested > 0 && (offered || requested == self.batch_size) {
            requested
        } else if self.batch_size > 0 {
            self.batch_size
        } else {
            default_batch_size()
        }
    }
}

use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Where the one payload per load comes from.
pub trait DonorSource {
    fn fetch(&self) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DonorSource for FileSource {
    fn fetch(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// Fixed payload, or a fixed failure.
#[derive(Debug, Clone)]
pub struct StaticSource {
    payload: std::result::Result<String, String>,
}

impl StaticSource {
    pub fn ok(payload: impl Into<String>) -> Self {
        Self {
            payload: Ok(payload.into()),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            payload: Err(reason.into()),
        }
    }
}

impl DonorSource for StaticSource {
    fn fetch(&self) -> Result<String> {
        self.payload.clone().map_err(Error::Source)
    }
}

/// Parses a payload into its records. Valid JSON that is not an array
/// yields no records.
pub fn parse_payload(text: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

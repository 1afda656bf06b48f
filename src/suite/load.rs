//! Suite definition loading.
use super::SuiteFile;
use crate::templates;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse a YAML suite definition.
pub fn parse_suite(text: &str) -> Result<SuiteFile> {
    let file: SuiteFile =
        serde_yaml::from_str(text).context("cannot recognize suite definition structure")?;
    Ok(file)
}

/// Read and parse a suite from disk.
pub fn load_suite_file(path: &Path) -> Result<SuiteFile> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read suite {}", path.display()))?;
    parse_suite(&text).with_context(|| format!("parse suite {}", path.display()))
}

/// Load `path` if given, otherwise the suite compiled into the binary.
pub fn load_suite(path: Option<&Path>) -> Result<SuiteFile> {
    match path {
        Some(path) => load_suite_file(path),
        None => parse_suite(templates::DEFAULT_SUITE_YAML).context("parse embedded suite"),
    }
}

//! Configuration parser (verb module)
//!
//! Reads a [`CompilerConfig`] from YAML. Missing keys keep their defaults.

use std::path::Path;
use crate::config::CompilerConfig;
use crate::error::ParseError;

/// Parse a configuration from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<CompilerConfig, ParseError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path_str,
        source: e,
    })?;
    parse_str(&contents)
}

/// Parse a configuration from a YAML string
pub fn parse_str(yaml: &str) -> Result<CompilerConfig, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

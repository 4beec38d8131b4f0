//! Output format selection.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// How the listing (and facility failures) are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Tab-indented `comm,pid,state,uid` lines
    #[default]
    Human,
    /// A single JSON document
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => f.write_str("human"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_from_cli_value() {
        assert_eq!(
            OutputFormat::from_str("json", true).unwrap(),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::from_str("HUMAN", true).unwrap(),
            OutputFormat::Human
        );
        assert!(OutputFormat::from_str("yaml", true).is_err());
    }

    #[test]
    fn test_display_matches_value_names() {
        for format in OutputFormat::value_variants() {
            let name = format.to_possible_value().unwrap();
            assert_eq!(name.get_name(), format.to_string());
        }
    }
}

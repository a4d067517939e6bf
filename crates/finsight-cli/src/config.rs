//! Configuration for the finsight command line tool

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use finsight_statements::StatementKind;

use crate::constants;

// =============================================================================
// File-based Configuration (finsight.toml)
// =============================================================================

/// Configuration loaded from finsight.toml; every field is optional
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Financial-data service settings
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_base_url() -> String {
    constants::DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    constants::DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    constants::DEFAULT_MAX_RETRIES
}

/// Terminal rendering settings
#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    /// Statements to show, by key ("income_statement", ...); all when empty
    #[serde(default)]
    pub statements: Vec<String>,
    #[serde(default = "default_show_details")]
    pub show_details: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            statements: Vec::new(),
            show_details: default_show_details(),
        }
    }
}

fn default_show_details() -> bool {
    true
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).with_context(|| {
            format!(
                "Failed to parse {}. Check for:\n\
                 - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
                 - Incorrect data types (strings vs numbers)\n\
                 - Unknown statement keys under [display]",
                path.display()
            )
        })
    }

    /// Load the file if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Command line values that take precedence over the file
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub hide_details: bool,
    pub statements: Vec<String>,
}

/// Main configuration struct with parsed values
#[derive(Debug)]
pub struct Config {
    /// Financial-data service base URL, without trailing slash
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    /// Statements to show, in the order given
    pub statements: Vec<StatementKind>,
    pub show_details: bool,
}

fn parse_statements(keys: &[String]) -> Result<Vec<StatementKind>> {
    if keys.is_empty() {
        return Ok(StatementKind::ALL.to_vec());
    }

    keys.iter()
        .map(|key| {
            StatementKind::from_key(key.trim()).with_context(|| {
                let known: Vec<&str> = StatementKind::ALL.iter().map(|k| k.key()).collect();
                format!("Unknown statement '{}'. Expected one of: {}", key, known.join(", "))
            })
        })
        .collect()
}

impl Config {
    /// Create config from file config and command line overrides
    pub fn from_file(file_config: &FileConfig, overrides: Overrides) -> Result<Self> {
        let statement_keys = if overrides.statements.is_empty() {
            &file_config.display.statements
        } else {
            &overrides.statements
        };

        Ok(Self {
            base_url: overrides
                .base_url
                .unwrap_or_else(|| file_config.api.base_url.clone())
                .trim_end_matches('/')
                .to_string(),
            timeout: Duration::from_secs(file_config.api.timeout_secs),
            max_retries: file_config.api.max_retries.max(1),
            statements: parse_statements(statement_keys)?,
            show_details: file_config.display.show_details && !overrides.hide_details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = FileConfig::parse("").unwrap();
        assert_eq!(config.api.base_url, constants::DEFAULT_API_BASE);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.max_retries, 3);
        assert!(config.display.show_details);
        assert!(config.display.statements.is_empty());
    }

    #[test]
    fn test_partial_file() {
        let config = FileConfig::parse(
            r#"
            [api]
            base_url = "http://localhost:8000/"
            max_retries = 5

            [display]
            statements = ["balance_sheet", "cash_flow"]
            show_details = false
            "#,
        )
        .unwrap();

        let runtime = Config::from_file(&config, Overrides::default()).unwrap();
        assert_eq!(runtime.base_url, "http://localhost:8000");
        assert_eq!(runtime.timeout, Duration::from_secs(30));
        assert_eq!(runtime.max_retries, 5);
        assert_eq!(
            runtime.statements,
            vec![StatementKind::BalanceSheet, StatementKind::CashFlow]
        );
        assert!(!runtime.show_details);
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            base_url: Some("http://127.0.0.1:9000".to_string()),
            hide_details: true,
            statements: vec!["equity_statement".to_string()],
        };
        let runtime = Config::from_file(&FileConfig::default(), overrides).unwrap();
        assert_eq!(runtime.base_url, "http://127.0.0.1:9000");
        assert!(!runtime.show_details);
        assert_eq!(runtime.statements, vec![StatementKind::EquityStatement]);
    }

    #[test]
    fn test_unknown_statement_rejected() {
        let overrides = Overrides {
            statements: vec!["notes".to_string()],
            ..Overrides::default()
        };
        let err = Config::from_file(&FileConfig::default(), overrides).unwrap_err();
        assert!(err.to_string().contains("Unknown statement 'notes'"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(FileConfig::parse("[api\nbase_url = 1").is_err());
    }
}

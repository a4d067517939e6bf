//! Centralized constants for the finsight command line tool

// =============================================================================
// API Endpoints
// =============================================================================

/// Hosted financial-data service
pub const DEFAULT_API_BASE: &str = "https://finsight-production-d5c1.up.railway.app";

/// Statements endpoint (append `/{ticker}/{year}`)
pub const STATEMENTS_PATH: &str = "/api/statements";

/// Environment variable overriding the API base URL
pub const API_ENV_VAR: &str = "FINSIGHT_API";

// =============================================================================
// HTTP
// =============================================================================

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Attempts per request before giving up
pub const DEFAULT_MAX_RETRIES: u32 = 3;

// =============================================================================
// Logging
// =============================================================================

/// Filter used when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "finsight=info,finsight_cli=info,finsight_statements=info";

/// Filter used with --verbose
pub const VERBOSE_LOG_FILTER: &str = "finsight=debug,finsight_cli=debug,finsight_statements=debug";

// =============================================================================
// File Names
// =============================================================================

/// Default config file path
pub const CONFIG_FILENAME: &str = "finsight.toml";

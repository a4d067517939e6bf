//! Centralized constants for statement building and rendering

// =============================================================================
// Ordering
// =============================================================================

/// Order index given to rows without a presentation order, so they sort last
pub const UNORDERED_INDEX: i64 = 999_999;

// =============================================================================
// Hierarchy levels
// =============================================================================

/// Plain detail line
pub const LEVEL_DETAIL: u8 = 1;

/// Subtotal inside a section
pub const LEVEL_SUBTOTAL: u8 = 2;

/// Section total (end of a section)
pub const LEVEL_SECTION_TOTAL: u8 = 3;

/// Statement-level total
pub const LEVEL_STATEMENT_TOTAL: u8 = 4;

// =============================================================================
// Rendering
// =============================================================================

/// Horizontal indent per tree depth, in pixels
pub const INDENT_PX_PER_LEVEL: u32 = 24;

/// Base left padding of the label cell, in pixels
pub const LABEL_BASE_PADDING_PX: u32 = 16;

/// Placeholder shown for a missing value
pub const MISSING_VALUE: &str = "\u{2014}";

/// Unit token used by the data service for ratios
pub const PURE_UNIT: &str = "pure";

/// Default currency when a statement carries no usable unit
pub const DEFAULT_UNIT: &str = "USD";

/// Currencies that are always reported in millions
pub const MILLIONS_CURRENCIES: [&str; 2] = ["DKK", "EUR"];

// =============================================================================
// File Names
// =============================================================================

/// Flat row CSV export filename
pub const EXPORT_CSV_FILENAME: &str = "finsight_data.csv";

/// Flat row JSON export filename
pub const EXPORT_JSON_FILENAME: &str = "finsight_data.json";

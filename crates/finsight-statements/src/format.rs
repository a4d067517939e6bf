//! Number and date formatting in accounting style
//!
//! Amounts are scaled to B/M/K by magnitude, except DKK and EUR which are
//! always shown in millions and per-share figures which are never scaled.
//! Negative amounts are wrapped in parentheses instead of carrying a sign.

use chrono::{DateTime, NaiveDate};

use crate::constants;

/// Magnitude an amount is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Units,
    Thousands,
    Millions,
    Billions,
}

impl Scale {
    /// Pick the scale for an amount in `unit`
    pub fn for_amount(value: f64, unit: &str) -> Self {
        let abs = value.abs();
        if is_millions_currency(unit) {
            return Scale::Millions;
        }

        let mut scale = if abs >= 1e9 {
            Scale::Billions
        } else if abs >= 1e6 {
            Scale::Millions
        } else if abs >= 1e3 {
            Scale::Thousands
        } else {
            Scale::Units
        };

        // 999_999 shows as 1.00M, not 1,000.00K
        while let Some(larger) = scale.larger() {
            if round_cents(abs / scale.divisor()) < 1e3 {
                break;
            }
            scale = larger;
        }
        scale
    }

    fn larger(&self) -> Option<Self> {
        match self {
            Scale::Units => Some(Scale::Thousands),
            Scale::Thousands => Some(Scale::Millions),
            Scale::Millions => Some(Scale::Billions),
            Scale::Billions => None,
        }
    }

    pub fn divisor(&self) -> f64 {
        match self {
            Scale::Units => 1.0,
            Scale::Thousands => 1e3,
            Scale::Millions => 1e6,
            Scale::Billions => 1e9,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Scale::Units => "",
            Scale::Thousands => "K",
            Scale::Millions => "M",
            Scale::Billions => "B",
        }
    }

    /// Word used in statement captions, e.g. "(millions USD)"
    pub fn caption(&self) -> &'static str {
        match self {
            Scale::Units => "units",
            Scale::Thousands => "thousands",
            Scale::Millions => "millions",
            Scale::Billions => "billions",
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Display form of a unit: the ratio token "pure" becomes "%"
pub fn normalize_unit(unit: &str) -> &str {
    if unit == constants::PURE_UNIT { "%" } else { unit }
}

/// Per-share figures (EPS, dividends per share) are never scaled
pub fn is_per_share(unit: &str) -> bool {
    unit.to_lowercase().contains("share")
}

fn is_millions_currency(unit: &str) -> bool {
    let upper = unit.to_uppercase();
    constants::MILLIONS_CURRENCIES.iter().any(|code| upper.contains(code))
}

/// Insert thousands separators into a run of digits
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Non-negative magnitude with separators and fixed decimals
fn format_magnitude(abs: f64, decimals: usize) -> String {
    let fixed = format!("{:.prec$}", abs, prec = decimals);
    match fixed.split_once('.') {
        Some((whole, frac)) => format!("{}.{}", group_thousands(whole), frac),
        None => group_thousands(&fixed),
    }
}

fn accounting(value: f64, magnitude: String) -> String {
    if value < 0.0 { format!("({})", magnitude) } else { magnitude }
}

/// Scaled amount without the unit: "1.50B", "(500)", "3.14"
fn format_amount(value: f64, unit: &str) -> String {
    let unit = normalize_unit(unit);

    if is_per_share(unit) {
        return accounting(value, format_magnitude(value.abs(), 2));
    }

    let scale = Scale::for_amount(value, unit);
    let scaled = value.abs() / scale.divisor();
    let magnitude = match scale {
        Scale::Units if scaled.fract() == 0.0 => format_magnitude(scaled, 0),
        _ => format_magnitude(scaled, 2),
    };

    accounting(value, format!("{}{}", magnitude, scale.suffix()))
}

/// Self-describing amount: "1.50B USD", "(500) USD", "2.00M DKK"
///
/// Per-share values come back bare ("3.14") since the unit reads as a rate.
pub fn format_number(value: f64, unit: &str) -> String {
    let amount = format_amount(value, unit);
    let unit = normalize_unit(unit);

    if is_per_share(unit) || unit.is_empty() {
        amount
    } else {
        format!("{} {}", amount, unit)
    }
}

/// Table cell text; missing values render as a placeholder, never as zero
pub fn format_cell(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format_amount(v, unit),
        None => constants::MISSING_VALUE.to_string(),
    }
}

/// "at 31 December" from an ISO date or an RFC 3339 timestamp
pub fn format_fiscal_year_end(date: &str) -> Option<String> {
    let date = date.trim();
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()))?;

    Some(format!("at {}", parsed.format("%-d %B")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billions() {
        assert_eq!(format_number(1_500_000_000.0, "USD"), "1.50B USD");
        assert_eq!(format_number(-2_250_000_000.0, "USD"), "(2.25B) USD");
    }

    #[test]
    fn test_millions_and_thousands() {
        assert_eq!(format_number(12_340_000.0, "USD"), "12.34M USD");
        assert_eq!(format_number(4_500.0, "USD"), "4.50K USD");
    }

    #[test]
    fn test_rounding_moves_to_next_scale() {
        assert_eq!(format_number(999_999.0, "USD"), "1.00M USD");
        assert_eq!(format_number(-999_999_999.0, "USD"), "(1.00B) USD");
        assert_eq!(format_number(999.999, "USD"), "1.00K USD");
        assert_eq!(format_number(999_994.0, "USD"), "999.99K USD");
        assert_eq!(format_number(999_999_999_999.0, "USD"), "1,000.00B USD");
    }

    #[test]
    fn test_negative_units_use_parentheses() {
        assert_eq!(format_number(-500.0, "USD"), "(500) USD");
        assert_eq!(format_cell(Some(-500.0), "USD"), "(500)");
    }

    #[test]
    fn test_dkk_and_eur_always_in_millions() {
        assert_eq!(format_number(2_000_000.0, "DKK"), "2.00M DKK");
        assert_eq!(format_number(3_000_000_000.0, "EUR"), "3,000.00M EUR");
        assert_eq!(format_number(500_000.0, "DKK"), "0.50M DKK");
        assert_eq!(Scale::for_amount(10.0, "dkk"), Scale::Millions);
    }

    #[test]
    fn test_per_share_not_scaled() {
        assert_eq!(format_number(3.14, "USD per share"), "3.14");
        assert_eq!(format_number(-1.5, "DKK/shares"), "(1.50)");
        assert_eq!(format_number(1234.5, "USD/share"), "1,234.50");
    }

    #[test]
    fn test_pure_unit_shown_as_percent() {
        assert_eq!(normalize_unit("pure"), "%");
        assert_eq!(format_number(0.25, "pure"), "0.25 %");
    }

    #[test]
    fn test_missing_value_placeholder() {
        assert_eq!(format_cell(None, "USD"), "\u{2014}");
        assert_eq!(format_cell(Some(0.0), "USD"), "0");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("123456789"), "123,456,789");
    }

    #[test]
    fn test_fiscal_year_end() {
        assert_eq!(format_fiscal_year_end("2024-12-31").as_deref(), Some("at 31 December"));
        assert_eq!(
            format_fiscal_year_end("2024-06-30T00:00:00Z").as_deref(),
            Some("at 30 June")
        );
        assert_eq!(format_fiscal_year_end("not a date"), None);
    }
}

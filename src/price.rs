//! Currency price parsing.
//!
//! Providers report prices as display text (`"€25,00"`, `"$8.99"`).
//! Parsing returns a discriminated result rather than panicking, so the
//! evaluation loop can branch explicitly on malformed input.

use thiserror::Error;

/// Currency symbols stripped before numeric conversion.
const CURRENCY_SYMBOLS: &[char] = &['€', '$', '£', '¥'];

/// Why a price string could not be converted to a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceParseError {
    #[error("price text is empty")]
    Empty,
    #[error("not a valid price: {0:?}")]
    Invalid(String),
}

/// Parse currency-formatted text into a numeric value.
///
/// Accepts either `.` or `,` as the decimal separator and a leading or
/// trailing currency symbol. Pure; never panics.
pub fn parse_price(text: &str) -> Result<f64, PriceParseError> {
    let stripped = text
        .trim()
        .trim_start_matches(|c: char| CURRENCY_SYMBOLS.contains(&c) || c.is_whitespace())
        .trim_end_matches(|c: char| CURRENCY_SYMBOLS.contains(&c) || c.is_whitespace());

    if stripped.is_empty() {
        return Err(PriceParseError::Empty);
    }

    let normalized = stripped.replace(',', ".");
    normalized
        .parse::<f64>()
        .map_err(|_| PriceParseError::Invalid(text.to_string()))
}

/// Render a numeric value as currency text with two decimal places.
pub fn format_price(symbol: &str, value: f64) -> String {
    format!("{symbol}{value:.2}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

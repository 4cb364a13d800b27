//! # Price Formatter
//!
//! Locale-aware rendering of prices as grouped, truncated integers.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Price Formatting Pipeline                            │
//! │                                                                         │
//! │  PriceInput::Text("$19.990")          PriceInput::Number(1999.99)       │
//! │       │                                    │                            │
//! │       ▼                                    │                            │
//! │  strip everything but [0-9 . -]            │                            │
//! │       │  "19.990"                          │                            │
//! │       ▼                                    ▼                            │
//! │  parse canonical number ─────────► truncate toward zero                │
//! │                                           │  19 / 1999                  │
//! │                                           ▼                             │
//! │                                    group per locale                     │
//! │                                           │  "19" / "1.999"             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Separator Ambiguity
//! Stripping keeps `.` but drops `,`, so `"$1.999,99"` becomes `"1.99999"`
//! and renders as `"1"`. Strings are treated as canonical numbers after
//! stripping: one optional leading `-`, digits, at most one `.`. Anything
//! else (`"1.234.567"`, `"12-3"`) is a [`CoreError::Format`] instead of a
//! guess. Callers holding es-CL display strings should parse them at the
//! boundary rather than round-trip them through here.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Locale
// =============================================================================

/// Number grouping conventions supported by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum NumberLocale {
    /// Chile: `1.234.567`
    #[default]
    #[serde(rename = "es-CL")]
    EsCl,

    /// United States: `1,234,567`
    #[serde(rename = "en-US")]
    EnUs,
}

impl NumberLocale {
    /// Thousands separator for this locale.
    pub const fn group_separator(&self) -> char {
        match self {
            NumberLocale::EsCl => '.',
            NumberLocale::EnUs => ',',
        }
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberLocale::EsCl => write!(f, "es-CL"),
            NumberLocale::EnUs => write!(f, "en-US"),
        }
    }
}

impl FromStr for NumberLocale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "es-cl" | "es" => Ok(NumberLocale::EsCl),
            "en-us" | "en" => Ok(NumberLocale::EnUs),
            other => Err(CoreError::invalid_input(
                "locale",
                format!("unsupported locale '{}'; valid options: es-CL, en-US", other),
            )),
        }
    }
}

// =============================================================================
// Input
// =============================================================================

/// A price as the UI hands it over: a number or a numeric string.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceInput {
    Number(f64),
    Decimal(Decimal),
    Text(String),
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

impl From<i64> for PriceInput {
    fn from(value: i64) -> Self {
        PriceInput::Decimal(Decimal::from(value))
    }
}

impl From<Decimal> for PriceInput {
    fn from(value: Decimal) -> Self {
        PriceInput::Decimal(value)
    }
}

impl From<Money> for PriceInput {
    fn from(value: Money) -> Self {
        PriceInput::Decimal(value.to_decimal())
    }
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        PriceInput::Text(value.to_string())
    }
}

impl From<String> for PriceInput {
    fn from(value: String) -> Self {
        PriceInput::Text(value)
    }
}

impl PriceInput {
    /// Resolves the input to its integer part (truncated toward zero).
    pub fn truncated(&self) -> CoreResult<i64> {
        match self {
            PriceInput::Number(value) => truncate_f64(*value),
            PriceInput::Decimal(value) => value
                .trunc()
                .to_i64()
                .ok_or_else(|| CoreError::format(value.to_string(), "number out of range")),
            PriceInput::Text(text) => truncate_text(text),
        }
    }
}

fn truncate_f64(value: f64) -> CoreResult<i64> {
    if !value.is_finite() {
        return Err(CoreError::format(value.to_string(), "not a finite number"));
    }
    let whole = value.trunc();
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return Err(CoreError::format(value.to_string(), "number out of range"));
    }
    Ok(whole as i64)
}

/// Strips a price string down to `[0-9.-]`.
pub fn strip_price_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

fn truncate_text(text: &str) -> CoreResult<i64> {
    let stripped = strip_price_text(text);

    let (negative, unsigned) = match stripped.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, stripped.as_str()),
    };

    if unsigned.contains('-') {
        return Err(CoreError::format(text, "minus sign in the middle of the number"));
    }

    let mut parts = unsigned.split('.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        return Err(CoreError::format(text, "more than one decimal point"));
    }
    if whole.is_empty() && fraction.is_empty() {
        return Err(CoreError::format(text, "no digits"));
    }

    let magnitude: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| CoreError::format(text, "number out of range"))?
    };

    Ok(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// Formatting
// =============================================================================

/// Groups the digits of `value` in threes with the locale's separator.
///
/// ## Example
/// ```rust
/// use mostrador_core::format::{group_digits, NumberLocale};
///
/// assert_eq!(group_digits(1_234_567, NumberLocale::EsCl), "1.234.567");
/// assert_eq!(group_digits(999, NumberLocale::EnUs), "999");
/// ```
pub fn group_digits(value: u64, locale: NumberLocale) -> String {
    let digits = value.to_string();
    let separator = locale.group_separator();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

fn render(value: i64, locale: NumberLocale, symbol: &str) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol, group_digits(value.unsigned_abs(), locale))
}

/// Formats a price as a grouped integer with no decimals.
///
/// ## Example
/// ```rust
/// use mostrador_core::format::{format_price, NumberLocale};
///
/// assert_eq!(format_price(1999.99, NumberLocale::EsCl).unwrap(), "1.999");
/// assert_eq!(format_price("19990", NumberLocale::EsCl).unwrap(), "19.990");
/// assert!(format_price("abc", NumberLocale::EsCl).is_err());
/// ```
pub fn format_price(input: impl Into<PriceInput>, locale: NumberLocale) -> CoreResult<String> {
    let value = input.into().truncated()?;
    Ok(render(value, locale, ""))
}

/// Formats a price with a leading currency symbol: `$1.999`, `-$500`.
pub fn format_currency(
    input: impl Into<PriceInput>,
    locale: NumberLocale,
    symbol: &str,
) -> CoreResult<String> {
    let value = input.into().truncated()?;
    Ok(render(value, locale, symbol))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_number_is_truncated_not_rounded() {
        assert_eq!(format_price(1999.99, NumberLocale::EsCl).unwrap(), "1.999");
        assert_eq!(format_price(1999.9, NumberLocale::EsCl).unwrap(), "1.999");
        assert_eq!(format_price(dec!(166.6), NumberLocale::EsCl).unwrap(), "166");
    }

    #[test]
    fn test_grouping_per_locale() {
        assert_eq!(format_price(1_234_567i64, NumberLocale::EsCl).unwrap(), "1.234.567");
        assert_eq!(format_price(1_234_567i64, NumberLocale::EnUs).unwrap(), "1,234,567");
        assert_eq!(format_price(100i64, NumberLocale::EsCl).unwrap(), "100");
        assert_eq!(format_price(0i64, NumberLocale::EsCl).unwrap(), "0");
    }

    #[test]
    fn test_text_is_stripped_before_parsing() {
        assert_eq!(format_price("19990", NumberLocale::EsCl).unwrap(), "19.990");
        assert_eq!(format_price("CLP 25000", NumberLocale::EsCl).unwrap(), "25.000");
        assert_eq!(format_price("1999.99", NumberLocale::EsCl).unwrap(), "1.999");
        // Comma is dropped, the dot survives as the decimal point
        assert_eq!(format_price("$1.999,99", NumberLocale::EsCl).unwrap(), "1");
        assert_eq!(format_price(".75", NumberLocale::EsCl).unwrap(), "0");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_price(-1999.9, NumberLocale::EsCl).unwrap(), "-1.999");
        assert_eq!(format_price("-2500", NumberLocale::EsCl).unwrap(), "-2.500");
        assert_eq!(format_price(-0.5, NumberLocale::EsCl).unwrap(), "0");
    }

    #[test]
    fn test_malformed_input_is_format_error() {
        for bad in ["", "abc", "-", ".", "1.234.567", "12-3"] {
            let err = format_price(bad, NumberLocale::EsCl).unwrap_err();
            assert!(matches!(err, CoreError::Format { .. }), "{bad:?} gave {err:?}");
        }
        assert!(matches!(
            format_price(f64::NAN, NumberLocale::EsCl),
            Err(CoreError::Format { .. })
        ));
        assert!(format_price(f64::INFINITY, NumberLocale::EsCl).is_err());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(
            format_currency(Money::from_minor(19_990), NumberLocale::EsCl, "$").unwrap(),
            "$19.990"
        );
        assert_eq!(
            format_currency(-500i64, NumberLocale::EsCl, "$").unwrap(),
            "-$500"
        );
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("es-CL".parse::<NumberLocale>().unwrap(), NumberLocale::EsCl);
        assert_eq!("en_us".parse::<NumberLocale>().unwrap(), NumberLocale::EnUs);
        assert!("fr-FR".parse::<NumberLocale>().is_err());
    }
}

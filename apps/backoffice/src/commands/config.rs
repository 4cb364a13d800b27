//! # Config Commands
//!
//! Configuration retrieval and price formatting.

use mostrador_core::format::{format_currency, format_price as format_number, PriceInput};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{AppConfig, ConfigState};

/// A price as the UI sends it: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl From<PriceValue> for PriceInput {
    fn from(value: PriceValue) -> Self {
        match value {
            PriceValue::Number(n) => PriceInput::Number(n),
            PriceValue::Text(t) => PriceInput::Text(t),
        }
    }
}

/// Formatted price, with and without the currency symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FormattedPrice {
    /// Digits only, e.g. `1.999`
    pub plain: String,
    /// With symbol, e.g. `$1.999`
    pub currency: String,
}

/// Gets the active configuration. The API token is never returned.
pub fn get_config(config: &ConfigState) -> AppConfig {
    debug!("get_config command");
    let mut current = config.config().clone();
    current.backend.api_token = None;
    current
}

/// Formats `value` with the configured locale.
///
/// Fractions are truncated, never rounded: `1999.99` becomes `1.999`.
///
/// ## Errors
/// `FORMAT_ERROR` when the value is not a number once currency text is
/// stripped.
pub fn format_price(config: &ConfigState, value: PriceValue) -> Result<FormattedPrice, ApiError> {
    debug!(?value, "format_price command");
    let input = PriceInput::from(value);
    Ok(FormattedPrice {
        plain: format_number(input.clone(), config.locale())?,
        currency: format_currency(input, config.locale(), config.currency_symbol())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_format_price_from_json() {
        let config = ConfigState::default();

        let number: PriceValue = serde_json::from_str("1999.99").unwrap();
        let price = format_price(&config, number).unwrap();
        assert_eq!(price.plain, "1.999");
        assert_eq!(price.currency, "$1.999");

        let text: PriceValue = serde_json::from_str(r#""$1.999,99""#).unwrap();
        assert_eq!(format_price(&config, text).unwrap().plain, "1");

        let bad = PriceValue::Text("abc".to_string());
        assert_eq!(format_price(&config, bad).unwrap_err().code, ErrorCode::FormatError);
    }

    #[test]
    fn test_get_config_hides_token() {
        let mut app_config = AppConfig::default();
        app_config.backend.api_token = Some("secret".to_string());
        let config = ConfigState::new(app_config);

        assert_eq!(get_config(&config).backend.api_token, None);
        assert_eq!(config.config().backend.api_token.as_deref(), Some("secret"));
    }
}
